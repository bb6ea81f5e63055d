use serde::{Deserialize, Serialize};
use std::fmt;

/// A structural or business-rule violation, reported as data.
///
/// Validation never raises: callers batch-validate and decide themselves
/// whether a non-empty result is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Human-readable description of the problem.
    pub message: String,
    /// Labels of the members involved (one for a member's own problem,
    /// two for a conflicting pair).
    #[serde(rename = "memberNames")]
    pub members: Vec<String>,
}

impl ValidationError {
    #[must_use]
    pub fn new(message: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            message: message.into(),
            members,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.members.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{} [{}]", self.message, self.members.join(", "))
        }
    }
}

/// Anything that can report its consistency problems as a list.
pub trait Validate {
    /// All problems found. Empty means valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Convenience shorthand for `validate().is_empty()`.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Validate, ValidationError};

    struct AlwaysBroken;

    impl Validate for AlwaysBroken {
        fn validate(&self) -> Vec<ValidationError> {
            vec![ValidationError::new("broken", vec!["member a".to_string()])]
        }
    }

    struct AlwaysFine;

    impl Validate for AlwaysFine {
        fn validate(&self) -> Vec<ValidationError> {
            Vec::new()
        }
    }

    #[test]
    fn is_valid_mirrors_validate_emptiness() {
        assert!(!AlwaysBroken.is_valid());
        assert!(AlwaysFine.is_valid());
    }

    #[test]
    fn display_includes_member_labels() {
        let error = ValidationError::new("slices overlap", vec!["a".to_string(), "b".to_string()]);
        assert_eq!(error.to_string(), "slices overlap [a, b]");

        let bare = ValidationError::new("bad", Vec::new());
        assert_eq!(bare.to_string(), "bad");
    }

    #[test]
    fn serializes_to_message_and_members() {
        let error = ValidationError::new("slices overlap", vec!["a".to_string()]);
        let json = serde_json::to_value(&error).expect("serialize validation error");
        assert_eq!(json["message"], "slices overlap");
        assert_eq!(json["memberNames"][0], "a");
    }
}
