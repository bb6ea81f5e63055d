use chrono::{DateTime, TimeDelta, Timelike, Utc};
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::codec;
use crate::validation::{Validate, ValidationError};

/// A half-open span of time: inclusive start, exclusive end.
///
/// `end == None` means the slice is open, i.e. unbounded into the future.
/// An end at [`DateTime::<Utc>::MAX_UTC`] counts as open too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSlice {
    /// Inclusive start.
    pub start: DateTime<Utc>,
    /// Exclusive end; `None` = open.
    pub end: Option<DateTime<Utc>>,
}

impl TimeSlice {
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    /// A slice with a known end: `[start, end)`.
    #[must_use]
    pub const fn closed(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// A slice with no end.
    #[must_use]
    pub const fn open(start: DateTime<Utc>) -> Self {
        Self { start, end: None }
    }

    /// True when the slice has no end, or its end is the maximum instant.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.end.is_none_or(|end| end == DateTime::<Utc>::MAX_UTC)
    }

    /// `end - start`. `None` exactly when `end` is `None`.
    #[must_use]
    pub fn duration(&self) -> Option<TimeDelta> {
        self.end.map(|end| end - self.start)
    }

    /// True iff `instant` lies inside the slice.
    ///
    /// The start is inclusive and the end is exclusive: `[S, E)` contains
    /// `S` and `E - 1s` but not `E`.
    #[must_use]
    pub fn overlaps_instant(&self, instant: DateTime<Utc>) -> bool {
        if self.is_open() {
            return self.start <= instant;
        }
        self.start <= instant && self.end.is_some_and(|end| instant < end)
    }

    /// True iff the two slices share any point in time.
    ///
    /// Symmetric: `a.overlaps(b) == b.overlaps(a)`. Two open slices always
    /// overlap (at infinity). An open and a closed slice overlap iff the
    /// closed one's end lies strictly after the open one's start.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        match (self.finite_end(), other.finite_end()) {
            (None, None) => true,
            (Some(end), None) => end > other.start,
            (None, Some(end)) => end > self.start,
            (Some(self_end), Some(other_end)) => {
                self.start < other_end && other.start < self_end
            }
        }
    }

    /// The end, unless the slice is open.
    fn finite_end(&self) -> Option<DateTime<Utc>> {
        if self.is_open() { None } else { self.end }
    }
}

impl Validate for TimeSlice {
    fn validate(&self) -> Vec<ValidationError> {
        let mut problems = Vec::new();
        let Some(end) = self.end else {
            return problems;
        };

        if end < self.start {
            problems.push(ValidationError::new(
                format!(
                    "end {} must not be before start {}",
                    codec::format_instant(end),
                    codec::format_instant(self.start)
                ),
                vec![self.to_string()],
            ));
        }

        // An exclusive end on a :59:59 boundary is almost always an
        // inclusive end in disguise ("until 23:59:59" meaning "until
        // midnight"). The maximum instant is exempt; it stands for "never".
        if end != DateTime::<Utc>::MAX_UTC && end.minute() == 59 && end.second() == 59 {
            problems.push(ValidationError::new(
                format!(
                    "end {} sits on a :59:59 boundary and looks like an inclusive end in disguise",
                    codec::format_instant(end)
                ),
                vec![self.to_string()],
            ));
        }

        problems
    }
}

impl fmt::Display for TimeSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_open() {
            write!(
                f,
                "Open time slice [{} to infinity",
                codec::format_instant(self.start)
            )
        } else {
            let end = self.end.unwrap_or(DateTime::<Utc>::MAX_UTC);
            write!(
                f,
                "Time slice [{} - {})",
                codec::format_instant(self.start),
                codec::format_instant(end)
            )
        }
    }
}

impl Serialize for TimeSlice {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("TimeSlice", 2)?;
        state.serialize_field("start", &codec::format_instant(self.start))?;
        state.serialize_field("end", &self.end.map(codec::format_instant))?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for TimeSlice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SliceVisitor;

        impl<'de> Visitor<'de> for SliceVisitor {
            type Value = TimeSlice;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a time slice object with 'start' and optional 'end' fields")
            }

            // Field names are matched case-insensitively; unknown fields
            // are skipped so the shape can be embedded in larger objects.
            fn visit_map<A>(self, mut map: A) -> Result<TimeSlice, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut start: Option<DateTime<Utc>> = None;
                let mut end: Option<Option<DateTime<Utc>>> = None;

                while let Some(key) = map.next_key::<String>()? {
                    if key.eq_ignore_ascii_case("start") {
                        if start.is_some() {
                            return Err(de::Error::duplicate_field("start"));
                        }
                        let raw: String = map.next_value()?;
                        start = Some(codec::parse_instant(&raw).map_err(de::Error::custom)?);
                    } else if key.eq_ignore_ascii_case("end") {
                        if end.is_some() {
                            return Err(de::Error::duplicate_field("end"));
                        }
                        let raw: Option<String> = map.next_value()?;
                        end = Some(match raw {
                            Some(text) => {
                                Some(codec::parse_instant(&text).map_err(de::Error::custom)?)
                            }
                            None => None,
                        });
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }

                let start = start.ok_or_else(|| de::Error::missing_field("start"))?;
                Ok(TimeSlice {
                    start,
                    end: end.unwrap_or(None),
                })
            }
        }

        deserializer.deserialize_map(SliceVisitor)
    }
}
