//! Error types for the unlayout library.

use crate::model::ContentType;
use std::io;
use thiserror::Error;

/// Result type alias for unlayout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document reconstruction.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading an analysis result file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The analysis result JSON could not be deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A table cell falls outside the grid declared by its table.
    ///
    /// The upstream analysis result is inconsistent: a cell's indices plus
    /// spans exceed `row_count`/`column_count`, or a placement would land
    /// before the caption row. Reconstruction of the whole result aborts,
    /// since a malformed table indicates an untrustworthy upstream output.
    #[error(
        "Malformed table result: cell placement at row {row}, column {column} is outside the declared {row_count}x{column_count} grid"
    )]
    MalformedTable {
        /// Target row of the offending placement
        row: usize,
        /// Target column of the offending placement
        column: usize,
        /// Declared number of rows
        row_count: usize,
        /// Declared number of columns
        column_count: usize,
    },

    /// An operation expected one content shape but found the other.
    #[error("Content type mismatch: expected {expected} content, found {found}")]
    ContentTypeMismatch {
        /// Content type the operation required
        expected: ContentType,
        /// Content type actually present
        found: ContentType,
    },

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MalformedTable {
            row: 4,
            column: 1,
            row_count: 3,
            column_count: 2,
        };
        assert_eq!(
            err.to_string(),
            "Malformed table result: cell placement at row 4, column 1 is outside the declared 3x2 grid"
        );

        let err = Error::ContentTypeMismatch {
            expected: ContentType::Table,
            found: ContentType::Text,
        };
        assert_eq!(
            err.to_string(),
            "Content type mismatch: expected table content, found text"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
