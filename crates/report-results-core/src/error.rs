//! Error types for flattening.

/// Result type alias for flattening operations.
pub type Result<T> = std::result::Result<T, FlattenError>;

/// Errors that can occur before a document reaches the flattener.
///
/// Flattening itself is total over every JSON value; the only failure is a
/// body that is not a JSON document at all.
#[derive(Debug, thiserror::Error)]
pub enum FlattenError {
    /// The input text is not valid JSON.
    #[error("Malformed JSON document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FlattenError {
    /// Line of the input at which parsing failed (1-indexed).
    pub fn line(&self) -> usize {
        match self {
            Self::Parse(err) => err.line(),
        }
    }

    /// Column of the input at which parsing failed (1-indexed).
    pub fn column(&self) -> usize {
        match self {
            Self::Parse(err) => err.column(),
        }
    }
}
