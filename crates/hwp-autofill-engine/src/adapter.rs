//! The capability the engine consumes from the word processor.
//!
//! The native object model exposes no queryable document tree. Everything the
//! engine does is expressed through a linear cursor, a forward text search,
//! action-by-name execution and the clipboard. [`DocumentActions`] is that
//! surface; [`Connector`] creates or attaches to a live handle.

use std::fmt;
use std::path::Path;

/// Opaque cursor location in the native model (list, paragraph, character).
///
/// Adapters construct these; the engine only saves and restores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub list: i32,
    pub para: i32,
    pub pos: i32,
}

impl Position {
    pub fn new(list: i32, para: i32, pos: i32) -> Self {
        Self { list, para, pos }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.list, self.para, self.pos)
    }
}

/// Native actions the engine runs by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveDocBegin,
    TableSelCell,
    TableSelTable,
    Cancel,
    TableLeftCell,
    TableRightCell,
    TableUpperCell,
    TableLowerCell,
    SelectAll,
    EditCut,
    Copy,
    Delete,
    MoveSelCellBegin,
    MoveSelCellEnd,
    FileNew,
    BreakPara,
}

impl Action {
    /// The action name as the automation API spells it.
    pub fn name(self) -> &'static str {
        match self {
            Action::MoveDocBegin => "MoveDocBegin",
            Action::TableSelCell => "TableSelCell",
            Action::TableSelTable => "TableSelTable",
            Action::Cancel => "Cancel",
            Action::TableLeftCell => "TableLeftCell",
            Action::TableRightCell => "TableRightCell",
            Action::TableUpperCell => "TableUpperCell",
            Action::TableLowerCell => "TableLowerCell",
            Action::SelectAll => "SelectAll",
            Action::EditCut => "EditCut",
            Action::Copy => "Copy",
            Action::Delete => "Delete",
            Action::MoveSelCellBegin => "MoveSelCellBegin",
            Action::MoveSelCellEnd => "MoveSelCellEnd",
            Action::FileNew => "FileNew",
            Action::BreakPara => "BreakPara",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A call into the automation handle raised instead of returning.
///
/// Distinct from "not found": searches and moves that simply miss report
/// `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{operation} failed: {reason}")]
pub struct AdapterError {
    pub operation: String,
    pub reason: String,
}

impl AdapterError {
    pub fn new(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

/// Synchronous cursor/action surface of one open document.
///
/// Implementations are not expected to be reentrant; the engine issues one
/// call at a time from a single thread.
pub trait DocumentActions {
    /// Run a named action. `Ok(false)` means the action ran but reported no effect.
    fn run_action(&mut self, action: Action) -> Result<bool, AdapterError>;

    fn position(&mut self) -> Result<Position, AdapterError>;

    fn set_position(&mut self, position: Position) -> Result<(), AdapterError>;

    /// Literal, case-as-given, forward-only search from the current cursor.
    /// On a hit the match is selected and the cursor sits at its end.
    fn find_forward(&mut self, text: &str) -> Result<bool, AdapterError>;

    fn insert_text(&mut self, text: &str) -> Result<(), AdapterError>;

    fn read_clipboard_text(&mut self) -> Result<String, AdapterError>;

    /// Form field names in document order, duplicates included.
    fn field_names(&mut self) -> Result<Vec<String>, AdapterError>;

    /// Write `text` into every form field called `name`.
    fn put_field_text(&mut self, name: &str, text: &str) -> Result<(), AdapterError>;

    /// Write `text` into the form field at `index` of [`field_names`](Self::field_names).
    fn set_field_text_at(&mut self, index: usize, text: &str) -> Result<(), AdapterError>;

    fn open(&mut self, path: &Path) -> Result<(), AdapterError>;

    fn save_as(&mut self, path: &Path) -> Result<(), AdapterError>;

    /// Plain text of the whole document. Table cells are tab separated, rows
    /// and paragraphs end with a newline.
    fn document_text(&mut self) -> Result<String, AdapterError>;

    /// Create an empty `rows` x `cols` table at the cursor and move into its
    /// first cell.
    fn insert_table(&mut self, rows: usize, cols: usize) -> Result<(), AdapterError>;

    /// Replace the open document with a new, empty one.
    fn new_document(&mut self) -> Result<bool, AdapterError> {
        self.run_action(Action::FileNew)
    }

    /// Break the paragraph at the cursor.
    fn break_paragraph(&mut self) -> Result<bool, AdapterError> {
        self.run_action(Action::BreakPara)
    }

    fn select_current_cell(&mut self) -> Result<bool, AdapterError> {
        self.run_action(Action::TableSelCell)
    }

    fn deselect(&mut self) -> Result<bool, AdapterError> {
        self.run_action(Action::Cancel)
    }

    fn copy_selection(&mut self) -> Result<bool, AdapterError> {
        self.run_action(Action::Copy)
    }
}

/// Creates a new automation handle or attaches to a running instance.
pub trait Connector {
    type Handle: DocumentActions;

    fn connect(&mut self) -> Result<Self::Handle, AdapterError>;
}
