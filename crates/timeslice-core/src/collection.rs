use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::ops::Index;
use tracing::{debug, trace};

use crate::error::AddError;
use crate::overlap;
use crate::relation::Relation;
use crate::validation::{Validate, ValidationError};

/// The overlap policy governing a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollectionType {
    /// More than one child may be assigned to the parent at a time.
    AllowOverlaps,
    /// At most one child may occupy the parent at any instant.
    PreventOverlaps,
}

mod sealed {
    pub trait Sealed {}
}

/// Type-state selecting a collection's [`CollectionType`] at compile time.
///
/// The policy is part of the collection's type, so it cannot be reassigned
/// after construction; [`Collection::collection_type`] is purely derived.
pub trait OverlapPolicy: sealed::Sealed {
    const COLLECTION_TYPE: CollectionType;
}

/// Policy marker: members may overlap freely.
pub enum AllowOverlaps {}

/// Policy marker: no two members may overlap.
pub enum PreventOverlaps {}

impl sealed::Sealed for AllowOverlaps {}
impl sealed::Sealed for PreventOverlaps {}

impl OverlapPolicy for AllowOverlaps {
    const COLLECTION_TYPE: CollectionType = CollectionType::AllowOverlaps;
}

impl OverlapPolicy for PreventOverlaps {
    const COLLECTION_TYPE: CollectionType = CollectionType::PreventOverlaps;
}

/// An ordered collection of relationships that all share one parent.
///
/// Insertion order is the canonical iteration order; a chronological view
/// is available via [`Collection::chronological`]. Parent consistency is
/// enforced on [`Collection::add`]; the overlap policy is only checked by
/// [`Validate::validate`], never at mutation time, so callers can stage a
/// batch of changes and validate once.
pub struct Collection<R: Relation, O: OverlapPolicy> {
    common_parent: R::Parent,
    slices: Vec<R>,
    policy: PhantomData<O>,
}

impl<R: Relation, O: OverlapPolicy> Collection<R, O> {
    /// An empty collection bound to `common_parent`.
    #[must_use]
    pub const fn new(common_parent: R::Parent) -> Self {
        Self {
            common_parent,
            slices: Vec::new(),
            policy: PhantomData,
        }
    }

    /// A collection pre-populated from `members`.
    ///
    /// # Errors
    ///
    /// [`AddError::ParentMismatch`] if any member's parent differs from
    /// `common_parent`.
    pub fn with_slices(
        common_parent: R::Parent,
        members: impl IntoIterator<Item = R>,
    ) -> Result<Self, AddError> {
        let mut collection = Self::new(common_parent);
        for member in members {
            collection.add(member)?;
        }
        Ok(collection)
    }

    /// The policy this collection's type was constructed with.
    #[must_use]
    pub const fn collection_type(&self) -> CollectionType {
        O::COLLECTION_TYPE
    }

    /// The parent every member must share.
    pub const fn common_parent(&self) -> &R::Parent {
        &self.common_parent
    }

    /// Append a member.
    ///
    /// Overlaps are *not* rejected here, whatever the policy; only parent
    /// consistency is. Run [`Validate::validate`] for the full picture.
    ///
    /// # Errors
    ///
    /// [`AddError::ParentMismatch`] if the member's parent differs from the
    /// common parent; the collection is unchanged in that case.
    pub fn add(&mut self, member: R) -> Result<(), AddError> {
        if *member.parent() != self.common_parent {
            debug!(member = %member.label(), "rejected member with foreign parent");
            return Err(AddError::ParentMismatch);
        }
        trace!(member = %member.label(), "member added");
        self.slices.push(member);
        Ok(())
    }

    /// Remove the first member equal to `member`. Returns whether one was
    /// removed.
    pub fn remove(&mut self, member: &R) -> bool
    where
        R: PartialEq,
    {
        self.index_of(member).is_some_and(|index| {
            self.slices.remove(index);
            true
        })
    }

    pub fn contains(&self, member: &R) -> bool
    where
        R: PartialEq,
    {
        self.slices.contains(member)
    }

    /// Position of the first member equal to `member`, in insertion order.
    pub fn index_of(&self, member: &R) -> Option<usize>
    where
        R: PartialEq,
    {
        self.slices.iter().position(|existing| existing == member)
    }

    pub fn clear(&mut self) {
        self.slices.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.slices.get(index)
    }

    /// Members in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.slices.iter()
    }

    /// Members sorted ascending by `(start, end)`, open ends last.
    ///
    /// The sort is stable and the canonical insertion order is untouched.
    #[must_use]
    pub fn chronological(&self) -> Vec<&R> {
        let mut ordered: Vec<&R> = self.slices.iter().collect();
        ordered.sort_by_key(|member| {
            let slice = member.slice();
            (slice.start, slice.end.unwrap_or(DateTime::<Utc>::MAX_UTC))
        });
        ordered
    }
}

impl<R, O> Validate for Collection<R, O>
where
    R: Relation + Validate,
    O: OverlapPolicy,
{
    /// Every member's own problems, plus (under [`PreventOverlaps`]) one
    /// problem per conflicting pair. Member problems are all collected,
    /// never short-circuited.
    fn validate(&self) -> Vec<ValidationError> {
        let mut problems: Vec<ValidationError> =
            self.slices.iter().flat_map(Validate::validate).collect();

        if self.slices.len() >= 2 && O::COLLECTION_TYPE == CollectionType::PreventOverlaps {
            for (i, j) in overlap::conflicting_pairs(&self.slices) {
                let first = self.slices[i].label();
                let second = self.slices[j].label();
                problems.push(ValidationError::new(
                    format!("{first} and {second} overlap"),
                    vec![first, second],
                ));
            }
        }

        debug!(
            members = self.slices.len(),
            problems = problems.len(),
            "collection validated"
        );
        problems
    }
}

/// Equal iff same policy (enforced by the type), equal parent, and members
/// pairwise equal in insertion order.
impl<R, O> PartialEq for Collection<R, O>
where
    R: Relation + PartialEq,
    O: OverlapPolicy,
{
    fn eq(&self, other: &Self) -> bool {
        self.common_parent == other.common_parent && self.slices == other.slices
    }
}

impl<R, O> Eq for Collection<R, O>
where
    R: Relation + Eq,
    R::Parent: Eq,
    O: OverlapPolicy,
{
}

impl<R, O> Clone for Collection<R, O>
where
    R: Relation + Clone,
    R::Parent: Clone,
    O: OverlapPolicy,
{
    fn clone(&self) -> Self {
        Self {
            common_parent: self.common_parent.clone(),
            slices: self.slices.clone(),
            policy: PhantomData,
        }
    }
}

impl<R, O> fmt::Debug for Collection<R, O>
where
    R: Relation + fmt::Debug,
    R::Parent: fmt::Debug,
    O: OverlapPolicy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("collection_type", &O::COLLECTION_TYPE)
            .field("common_parent", &self.common_parent)
            .field("slices", &self.slices)
            .finish()
    }
}

impl<R: Relation, O: OverlapPolicy> Index<usize> for Collection<R, O> {
    type Output = R;

    fn index(&self, index: usize) -> &R {
        &self.slices[index]
    }
}

impl<'a, R: Relation, O: OverlapPolicy> IntoIterator for &'a Collection<R, O> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<R, O> Serialize for Collection<R, O>
where
    R: Relation + Serialize,
    R::Parent: Serialize,
    O: OverlapPolicy,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Collection", 3)?;
        state.serialize_field("collectionType", &O::COLLECTION_TYPE)?;
        state.serialize_field("commonParent", &self.common_parent)?;
        state.serialize_field("timeSlices", &self.slices)?;
        state.end()
    }
}
