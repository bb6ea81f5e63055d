//! Half-open time slices and time-dependent parent/child relationships.
//!
//! A [`TimeSlice`] spans `[start, end)`: inclusive start, exclusive end,
//! with `end = None` meaning "open". A [`Relationship`] binds one parent to
//! one child for the duration of a slice, and a [`Collection`] gathers the
//! relationships of one parent under an overlap policy: either overlaps are
//! fine ([`AllowOverlaps`]) or at most one child may occupy the parent at a
//! time ([`PreventOverlaps`]).
//!
//! Consistency problems are reported as data via [`Validate::validate`],
//! never as errors, so callers can stage changes and batch-validate. Hard
//! failures are limited to malformed timestamp text ([`FormatError`]) and
//! parent mismatches on insert ([`AddError`]).
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use timeslice_core::{
//!     Collection, PreventOverlaps, RelationKind, Relationship, TimeSlice, Validate,
//! };
//!
//! enum Visit {}
//! impl RelationKind for Visit {
//!     const TAG: &'static str = "example.Visit";
//! }
//!
//! let venue = "blue note";
//! let first = Relationship::<Visit, _, _>::new(
//!     venue,
//!     "joao",
//!     TimeSlice::closed(
//!         Utc.with_ymd_and_hms(2013, 9, 14, 18, 0, 0).unwrap(),
//!         Utc.with_ymd_and_hms(2013, 9, 14, 21, 0, 0).unwrap(),
//!     ),
//! );
//! let second = Relationship::<Visit, _, _>::new(
//!     venue,
//!     "patricia",
//!     TimeSlice::open(Utc.with_ymd_and_hms(2013, 9, 14, 20, 0, 0).unwrap()),
//! );
//!
//! let schedule: Collection<_, PreventOverlaps> =
//!     Collection::with_slices(venue, [first, second]).expect("same venue");
//! assert!(!schedule.is_valid()); // both visits cover 20:00-21:00
//! ```

pub mod codec;
pub mod collection;
pub mod error;
pub mod overlap;
pub mod relation;
pub mod slice;
pub mod validation;

pub use collection::{AllowOverlaps, Collection, CollectionType, OverlapPolicy, PreventOverlaps};
pub use error::{AddError, FormatError};
pub use relation::{HasStableKey, Relation, RelationKind, Relationship, RelationshipKey};
pub use slice::TimeSlice;
pub use validation::{Validate, ValidationError};
