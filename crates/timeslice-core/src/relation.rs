use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::slice::TimeSlice;
use crate::validation::{Validate, ValidationError};

/// Marker trait for a relationship *kind*.
///
/// Each concrete kind supplies a stable tag that doubles as the default
/// discriminator, so distinct kinds are self-discriminating without any
/// runtime type introspection.
pub trait RelationKind {
    /// Stable, unique tag for this kind, e.g. `"music.ConcertVisit"`.
    const TAG: &'static str;
}

/// A time-bounded link between one parent and one child.
///
/// More than one kind of relation can exist between the same parent and
/// child types; the discriminator tells them apart (and is typically part
/// of an identity key in external persistence layers).
pub trait Relation {
    type Parent: PartialEq;
    type Child: PartialEq;

    /// The entity that owns / has assigned the child during the slice.
    fn parent(&self) -> &Self::Parent;

    /// The entity owned by / assigned to the parent during the slice.
    fn child(&self) -> &Self::Child;

    /// The effective discriminator: never empty, never whitespace-only.
    fn discriminator(&self) -> &str;

    /// The half-open span during which the relation holds.
    fn slice(&self) -> &TimeSlice;

    /// Human-readable member name used in validation messages and logs.
    fn label(&self) -> String {
        format!("{} ({})", self.slice(), self.discriminator())
    }
}

/// Capability for types that expose a stable identity key.
///
/// Parent/child types may implement this so external layers can index
/// relationships by `(parent key, child key, discriminator, start, end)`.
/// The core itself never requires it.
pub trait HasStableKey {
    type Key: Clone + Eq + Hash;

    fn stable_key(&self) -> Self::Key;
}

/// The full identity tuple of a relationship, for external indexing.
pub type RelationshipKey<P, C> = (
    <P as HasStableKey>::Key,
    <C as HasStableKey>::Key,
    String,
    chrono::DateTime<chrono::Utc>,
    Option<chrono::DateTime<chrono::Utc>>,
);

/// The generic parent/child relationship: one parent owns one child for the
/// duration of one [`TimeSlice`].
///
/// `K` is the kind marker supplying the default discriminator. Sharing of
/// parents and children across relationships is the caller's choice of `P`
/// and `C` (plain values, `Arc<T>`, ids, ...); the core only reads equality.
#[derive(Serialize, Deserialize)]
#[serde(bound(
    serialize = "P: Serialize, C: Serialize",
    deserialize = "P: Deserialize<'de>, C: Deserialize<'de>"
))]
pub struct Relationship<K, P, C> {
    pub parent: P,
    pub child: C,
    #[serde(flatten)]
    pub slice: TimeSlice,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_blank"
    )]
    discriminator: Option<String>,
    #[serde(skip)]
    kind: PhantomData<K>,
}

/// Blank discriminators are never stored; the kind tag stays in effect.
fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|value| !value.trim().is_empty()))
}

impl<K, P, C> Relationship<K, P, C> {
    #[must_use]
    pub const fn new(parent: P, child: C, slice: TimeSlice) -> Self {
        Self {
            parent,
            child,
            slice,
            discriminator: None,
            kind: PhantomData,
        }
    }

    /// Builder-style override of the default discriminator, e.g. to share
    /// one discriminator across differently-typed but logically identical
    /// kinds. Blank values are ignored.
    #[must_use]
    pub fn with_discriminator(mut self, discriminator: impl Into<String>) -> Self {
        self.set_discriminator(discriminator);
        self
    }

    /// Override the discriminator. A blank or whitespace-only value is
    /// ignored and the kind's tag stays in effect.
    pub fn set_discriminator(&mut self, discriminator: impl Into<String>) {
        let value = discriminator.into();
        if !value.trim().is_empty() {
            self.discriminator = Some(value);
        }
    }

    /// Drop any override and fall back to the kind's tag.
    pub fn clear_discriminator(&mut self) {
        self.discriminator = None;
    }
}

impl<K, P, C> Relationship<K, P, C>
where
    K: RelationKind,
    P: HasStableKey + PartialEq,
    C: HasStableKey + PartialEq,
{
    /// The identity tuple external layers index by. Key derivation beyond
    /// this tuple is a persistence concern, not a core one.
    #[must_use]
    pub fn identity_key(&self) -> RelationshipKey<P, C> {
        (
            self.parent.stable_key(),
            self.child.stable_key(),
            self.discriminator().to_owned(),
            self.slice.start,
            self.slice.end,
        )
    }
}

impl<K, P, C> Relation for Relationship<K, P, C>
where
    K: RelationKind,
    P: PartialEq,
    C: PartialEq,
{
    type Parent = P;
    type Child = C;

    fn parent(&self) -> &P {
        &self.parent
    }

    fn child(&self) -> &C {
        &self.child
    }

    fn discriminator(&self) -> &str {
        self.discriminator.as_deref().unwrap_or(K::TAG)
    }

    fn slice(&self) -> &TimeSlice {
        &self.slice
    }
}

impl<K, P, C> Validate for Relationship<K, P, C>
where
    K: RelationKind,
    P: PartialEq,
    C: PartialEq,
{
    fn validate(&self) -> Vec<ValidationError> {
        self.slice
            .validate()
            .into_iter()
            .map(|problem| ValidationError::new(problem.message, vec![self.label()]))
            .collect()
    }
}

/// Value equality over slice, effective discriminator, parent, and child.
/// Two relationships with different stored-vs-defaulted discriminators are
/// still equal when the effective values match.
impl<K, P, C> PartialEq for Relationship<K, P, C>
where
    K: RelationKind,
    P: PartialEq,
    C: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.slice == other.slice
            && self.discriminator() == other.discriminator()
            && self.parent == other.parent
            && self.child == other.child
    }
}

impl<K, P, C> Eq for Relationship<K, P, C>
where
    K: RelationKind,
    P: Eq,
    C: Eq,
{
}

impl<K, P, C> Clone for Relationship<K, P, C>
where
    P: Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            parent: self.parent.clone(),
            child: self.child.clone(),
            slice: self.slice,
            discriminator: self.discriminator.clone(),
            kind: PhantomData,
        }
    }
}

impl<K, P, C> fmt::Debug for Relationship<K, P, C>
where
    P: fmt::Debug,
    C: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relationship")
            .field("parent", &self.parent)
            .field("child", &self.child)
            .field("slice", &self.slice)
            .field("discriminator", &self.discriminator)
            .finish()
    }
}

impl<K, P, C> fmt::Display for Relationship<K, P, C>
where
    K: RelationKind,
    P: PartialEq,
    C: PartialEq,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
