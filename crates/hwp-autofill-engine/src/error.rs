use crate::adapter::AdapterError;
use crate::navigation::Direction;

/// Why a fill, scan or field request did not complete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FillError {
    #[error("Document is not connected: {reason}")]
    NotConnected { reason: String },

    #[error("Label path is empty")]
    EmptyPath,

    #[error("Label path token {index} is empty")]
    EmptyToken { index: usize },

    #[error("{}", label_not_found_message(.found, .missing, .depth))]
    LabelNotFound {
        /// Tokens that resolved before the miss, joined for display
        found: String,
        missing: String,
        depth: usize,
    },

    #[error("Occurrence {required} of label '{label}' is not available ({found} found)")]
    OccurrenceUnavailable {
        label: String,
        required: usize,
        found: usize,
    },

    #[error("Not enough fields named '{name}': required {required}, found {found}")]
    FieldOccurrenceUnavailable {
        name: String,
        required: usize,
        found: usize,
    },

    #[error("Occurrence must be 1 or greater, got {0}")]
    InvalidOccurrence(usize),

    #[error("Table offsets are 1-based, got row {start_row}, column {start_col}")]
    InvalidTableOffset { start_row: usize, start_col: usize },

    #[error("Invalid direction '{0}': use one of 'left', 'right', 'up', 'down'")]
    InvalidDirection(String),

    #[error("Invalid mode '{0}': use one of 'replace', 'prepend', 'append'")]
    InvalidMode(String),

    #[error("Text to insert is empty")]
    EmptyText,

    #[error("Cursor is not inside a table cell")]
    NotInTable,

    #[error("Cannot move {direction}: cursor is at the edge of the table")]
    TableEdge { direction: Direction },

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

fn label_not_found_message(found: &str, missing: &str, depth: &usize) -> String {
    if *depth == 0 {
        format!("First label '{missing}' was not found")
    } else {
        format!("'{missing}' was not found after '{found}'")
    }
}
