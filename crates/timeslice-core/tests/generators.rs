//! Proptest strategies for instants and time slices.
#![allow(dead_code)]

use chrono::{DateTime, TimeDelta, Utc};
use proptest::prelude::*;
use timeslice_core::TimeSlice;

/// 1970-01-01 through ~2100, whole seconds only.
const MIN_SECS: i64 = 0;
const MAX_SECS: i64 = 4_102_444_800;

/// Leave room for a closed slice's span above any generated start.
const MAX_SPAN_SECS: i64 = 10 * 366 * 24 * 60 * 60;

pub fn arb_instant() -> impl Strategy<Value = DateTime<Utc>> {
    (MIN_SECS..MAX_SECS).prop_map(|secs| {
        DateTime::<Utc>::from_timestamp(secs, 0).expect("generated seconds are in range")
    })
}

/// Any slice: open or closed, closed ends never before the start.
pub fn arb_slice() -> impl Strategy<Value = TimeSlice> {
    (arb_instant(), proptest::option::of(0..MAX_SPAN_SECS)).prop_map(|(start, span)| {
        TimeSlice::new(start, span.map(|secs| start + TimeDelta::seconds(secs)))
    })
}

/// A closed slice at least one second long, so `end - 1s` stays inside it.
pub fn arb_closed_slice() -> impl Strategy<Value = TimeSlice> {
    (arb_instant(), 1..MAX_SPAN_SECS)
        .prop_map(|(start, span)| TimeSlice::closed(start, start + TimeDelta::seconds(span)))
}
