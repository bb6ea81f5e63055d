use thiserror::Error;

/// Hard failure while reading or writing the canonical timestamp text form.
///
/// Raised immediately and never recovered locally; domain-consistency
/// problems go through [`crate::validation::ValidationError`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The text parses as a local datetime but carries no UTC offset.
    /// We're not guessing.
    #[error("timestamp '{text}' has no UTC offset")]
    MissingOffset { text: String },
    /// The text is not an offset datetime at all.
    #[error("timestamp '{text}' is malformed: {source}")]
    Malformed {
        text: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Hard failure when appending a relationship to a collection.
///
/// The collection is unchanged whenever this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AddError {
    /// The relationship's parent is not the collection's common parent.
    #[error("relationship parent does not match the collection's common parent")]
    ParentMismatch,
}
