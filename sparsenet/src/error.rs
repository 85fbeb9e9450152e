//! Error types for the sparse codec, extraction and paint transform editing.
//!
//! Every failure is synchronous and final: malformed geometry is a data error,
//! so nothing here is retryable and no partially-applied state is produced.

use thiserror::Error;

/// Errors raised by encode, decode, extraction and host writes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    /// A field could not be parsed as the expected array shape.
    #[error("malformed {field}: {reason}")]
    MalformedInput { field: String, reason: String },

    /// An index points outside its table.
    #[error("{field}: index {index} out of range (len {len})")]
    IndexOutOfRange { field: String, index: i64, len: usize },

    /// An operation precondition does not hold.
    #[error("structural error: {reason}")]
    Structural { reason: String },
}

impl CodecError {
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::MalformedInput { field: field.into(), reason: reason.into() }
    }

    pub fn out_of_range(field: impl Into<String>, index: i64, len: usize) -> Self {
        CodecError::IndexOutOfRange { field: field.into(), index, len }
    }

    pub fn structural(reason: impl Into<String>) -> Self {
        CodecError::Structural { reason: reason.into() }
    }

    /// Stable machine-readable code used in result envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::MalformedInput { .. } => "malformed_input",
            CodecError::IndexOutOfRange { .. } => "out_of_range",
            CodecError::Structural { .. } => "structural",
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_field() {
        let err = CodecError::out_of_range("regions[0].loops[0]", 5, 4);
        assert_eq!(err.to_string(), "regions[0].loops[0]: index 5 out of range (len 4)");

        let err = CodecError::malformed("vertices", "odd coordinate count 3");
        assert_eq!(err.to_string(), "malformed vertices: odd coordinate count 3");
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(CodecError::malformed("paths[0]", "x").code(), "malformed_input");
        assert_eq!(CodecError::out_of_range("handles", 9, 2).code(), "out_of_range");
        assert_eq!(CodecError::structural("no loops").code(), "structural");
    }
}
