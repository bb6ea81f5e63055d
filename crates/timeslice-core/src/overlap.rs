//! The pairwise overlap scan shared by collection validation.
//!
//! Deliberately O(n²): per-parent schedules are small, and naming the exact
//! conflicting pair in error messages matters more than asymptotics. A
//! sweep-line would be acceptable only if it reported the identical pairs.

use crate::relation::Relation;

/// Every conflicting pair of members, as `(i, j)` index pairs with `i < j`.
///
/// Pairs are identity-distinct, not value-distinct: two value-equal members
/// at different positions still count as a pair when their slices overlap.
pub fn conflicting_pairs<R: Relation>(members: &[R]) -> Vec<(usize, usize)> {
    let mut conflicts = Vec::new();
    for (i, a) in members.iter().enumerate() {
        for (j, b) in members.iter().enumerate().skip(i + 1) {
            if a.slice().overlaps(b.slice()) {
                conflicts.push((i, j));
            }
        }
    }
    conflicts
}

/// True when at least one pair of members overlaps.
pub fn has_conflicts<R: Relation>(members: &[R]) -> bool {
    members.iter().enumerate().any(|(i, a)| {
        members[i + 1..]
            .iter()
            .any(|b| a.slice().overlaps(b.slice()))
    })
}

#[cfg(test)]
mod tests {
    use super::{conflicting_pairs, has_conflicts};
    use crate::relation::{RelationKind, Relationship};
    use crate::slice::TimeSlice;
    use chrono::{DateTime, Utc};

    enum Booking {}

    impl RelationKind for Booking {
        const TAG: &'static str = "test.Booking";
    }

    fn instant(text: &str) -> DateTime<Utc> {
        crate::codec::parse_instant(text).expect("test instant")
    }

    fn booking(start: &str, end: Option<&str>) -> Relationship<Booking, u8, u8> {
        Relationship::new(1, 2, TimeSlice::new(instant(start), end.map(instant)))
    }

    #[test]
    fn empty_and_singleton_sets_have_no_pairs() {
        let none: [Relationship<Booking, u8, u8>; 0] = [];
        assert!(conflicting_pairs(&none).is_empty());

        let one = [booking("2020-01-01T00:00:00Z", None)];
        assert!(conflicting_pairs(&one).is_empty());
        assert!(!has_conflicts(&one));
    }

    #[test]
    fn reports_each_conflicting_pair_once() {
        let members = [
            booking("2020-01-01T00:00:00Z", Some("2021-01-01T00:00:00Z")),
            booking("2019-01-01T00:00:00Z", None),
            booking("2022-01-01T00:00:00Z", Some("2022-06-01T00:00:00Z")),
        ];
        // 0 and 1 overlap in 2020; 1 is open so it also covers 2's span
        assert_eq!(conflicting_pairs(&members), vec![(0, 1), (1, 2)]);
        assert!(has_conflicts(&members));
    }

    #[test]
    fn value_equal_members_still_form_a_pair() {
        let members = [
            booking("2020-01-01T00:00:00Z", Some("2021-01-01T00:00:00Z")),
            booking("2020-01-01T00:00:00Z", Some("2021-01-01T00:00:00Z")),
        ];
        assert_eq!(members[0], members[1]);
        assert_eq!(conflicting_pairs(&members), vec![(0, 1)]);
    }

    #[test]
    fn adjacent_members_do_not_conflict() {
        let members = [
            booking("2020-01-01T00:00:00Z", Some("2020-06-01T00:00:00Z")),
            booking("2020-06-01T00:00:00Z", Some("2021-01-01T00:00:00Z")),
        ];
        assert!(conflicting_pairs(&members).is_empty());
        assert!(!has_conflicts(&members));
    }
}
