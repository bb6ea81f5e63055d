//! Strict parse/format contract for the canonical timestamp text form.
//!
//! Every serialized instant carries an explicit UTC offset (`Z` is read as
//! `+00:00`) and second-level precision. Parsing offset-less text is a hard
//! [`FormatError`], never a guess; sub-second digits are accepted on read
//! and truncated before the value is exposed, so the round-trip law
//! `parse(format(x)) == x` holds for every value this module produces.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};

use crate::error::FormatError;

/// `yyyy-MM-ddTHH:mm:ss±hh:mm`: like RFC 3339 but without sub-seconds.
pub const OFFSET_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Shape an offset-less input would have; only probed to tell
/// "missing offset" apart from "not a datetime at all".
const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parse canonical timestamp text into a UTC instant.
///
/// The offset is normalized away and sub-seconds are truncated, so two
/// texts naming the same second compare equal after parsing.
///
/// # Errors
///
/// [`FormatError::MissingOffset`] when the text is a plain local datetime,
/// [`FormatError::Malformed`] for anything else that fails to parse.
pub fn parse_instant(text: &str) -> Result<DateTime<Utc>, FormatError> {
    match DateTime::parse_from_rfc3339(text) {
        Ok(parsed) => Ok(parsed.with_timezone(&Utc).trunc_subsecs(0)),
        Err(source) => {
            if NaiveDateTime::parse_from_str(text, LOCAL_DATETIME_FORMAT).is_ok() {
                Err(FormatError::MissingOffset {
                    text: text.to_owned(),
                })
            } else {
                Err(FormatError::Malformed {
                    text: text.to_owned(),
                    source,
                })
            }
        }
    }
}

/// Render a UTC instant in the canonical text form (`...+00:00`).
#[must_use]
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant
        .trunc_subsecs(0)
        .format(OFFSET_DATETIME_FORMAT)
        .to_string()
}

/// Serde adapter for mandatory instants, in the style of chrono's serde
/// modules: `#[serde(with = "timeslice_core::codec::serde_strict")]`.
pub mod serde_strict {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    /// # Errors
    ///
    /// Whatever the underlying serializer reports.
    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_instant(*value))
    }

    /// # Errors
    ///
    /// Rejects non-string values and any text [`super::parse_instant`] rejects.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        super::parse_instant(&text).map_err(de::Error::custom)
    }
}

/// Serde adapter for optional instants; `None` is written as JSON `null`
/// and read back as `None` (an open end).
pub mod serde_strict_option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    /// # Errors
    ///
    /// Whatever the underlying serializer reports.
    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(instant) => serializer.serialize_str(&super::format_instant(*instant)),
            None => serializer.serialize_none(),
        }
    }

    /// # Errors
    ///
    /// Rejects any non-null text [`super::parse_instant`] rejects.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = Option::<String>::deserialize(deserializer)?;
        text.map(|raw| super::parse_instant(&raw).map_err(de::Error::custom))
            .transpose()
    }
}
