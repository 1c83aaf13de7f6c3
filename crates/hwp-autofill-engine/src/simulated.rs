//! In-process stand-in for the word processor.
//!
//! [`SimulatedDocument`] implements the full [`DocumentActions`] contract over
//! a small JSON document of paragraphs, tables and form fields. It keeps a
//! real cursor, selection and clipboard so the engine's action sequences
//! have the same observable effect they have against the native application.
//!
//! Each paragraph and each table cell is one "list" of the cursor position;
//! lists are numbered in document order, tables row by row.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::adapter::{Action, AdapterError, Connector, DocumentActions, Position};

#[derive(Debug, thiserror::Error)]
pub enum SimulatedLoadError {
    #[error("Failed to read document at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse document at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Paragraph { text: String },
    Table { rows: Vec<Vec<String>> },
}

impl Block {
    pub fn paragraph(text: &str) -> Self {
        Block::Paragraph {
            text: text.to_string(),
        }
    }

    pub fn table(rows: &[&[&str]]) -> Self {
        Block::Table {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    #[serde(default)]
    pub text: String,
}

impl FormField {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            text: String::new(),
        }
    }
}

/// Serializable document content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentModel {
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

impl DocumentModel {
    pub fn with_blocks(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            fields: Vec::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, SimulatedLoadError> {
        let content = fs::read_to_string(path).map_err(|source| SimulatedLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SimulatedLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Where a cursor list lives in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    block: usize,
    cell: Option<(usize, usize)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    /// Character range inside one list
    Text { start: usize, end: usize },
    Cell,
    Table,
}

/// A document the engine can drive without the native application.
#[derive(Debug, Clone)]
pub struct SimulatedDocument {
    model: DocumentModel,
    slots: Vec<Slot>,
    slot: usize,
    pos: usize,
    selection: Option<Selection>,
    clipboard: String,
    finds: Vec<String>,
    field_writes: Vec<String>,
    /// Action that raises, and how many more times (`None` is forever)
    failing: Option<(Action, Option<usize>)>,
}

impl SimulatedDocument {
    pub fn new(model: DocumentModel) -> Self {
        let slots = build_slots(&model);
        Self {
            model,
            slots,
            slot: 0,
            pos: 0,
            selection: None,
            clipboard: String::new(),
            finds: Vec::new(),
            field_writes: Vec::new(),
            failing: None,
        }
    }

    pub fn model(&self) -> &DocumentModel {
        &self.model
    }

    /// Make every later run of `action` raise instead of running.
    pub fn fail_action(&mut self, action: Action) {
        self.failing = Some((action, None));
    }

    /// Make the next `times` runs of `action` raise; later runs succeed.
    pub fn fail_action_times(&mut self, action: Action, times: usize) {
        self.failing = Some((action, Some(times)));
    }

    /// Search strings passed to `find_forward` since the cursor last went
    /// to the document start, in call order.
    pub fn finds(&self) -> Vec<&str> {
        self.finds.iter().map(String::as_str).collect()
    }

    /// Field names written since the field list was last read, in call order.
    pub fn field_writes(&self) -> Vec<&str> {
        self.field_writes.iter().map(String::as_str).collect()
    }

    /// `(block, row, col)` of the cell holding the cursor.
    pub fn cursor_cell(&self) -> Option<(usize, usize, usize)> {
        let slot = self.slots.get(self.slot)?;
        slot.cell.map(|(row, col)| (slot.block, row, col))
    }

    /// Text of one cell of the `table`-th table.
    pub fn cell_text(&self, table: usize, row: usize, col: usize) -> Option<&str> {
        self.tables()
            .nth(table)?
            .get(row)?
            .get(col)
            .map(String::as_str)
    }

    pub fn table_rows(&self, table: usize) -> Option<Vec<Vec<&str>>> {
        let rows = self.tables().nth(table)?;
        Some(
            rows.iter()
                .map(|row| row.iter().map(String::as_str).collect())
                .collect(),
        )
    }

    pub fn field_text(&self, index: usize) -> Option<&str> {
        self.model.fields.get(index).map(|f| f.text.as_str())
    }

    fn tables(&self) -> impl Iterator<Item = &Vec<Vec<String>>> {
        self.model.blocks.iter().filter_map(|block| match block {
            Block::Table { rows } => Some(rows),
            Block::Paragraph { .. } => None,
        })
    }

    fn text_of(&self, slot: usize) -> &str {
        let Some(slot) = self.slots.get(slot) else {
            return "";
        };
        match (&self.model.blocks[slot.block], slot.cell) {
            (Block::Paragraph { text }, _) => text.as_str(),
            (Block::Table { rows }, Some((row, col))) => rows[row][col].as_str(),
            (Block::Table { .. }, None) => "",
        }
    }

    fn text_mut(&mut self) -> &mut String {
        let slot = self.slots[self.slot];
        match (&mut self.model.blocks[slot.block], slot.cell) {
            (Block::Paragraph { text }, _) => text,
            (Block::Table { rows }, Some((row, col))) => &mut rows[row][col],
            (Block::Table { .. }, None) => unreachable!("table slots always address a cell"),
        }
    }

    fn current_len(&self) -> usize {
        self.text_of(self.slot).chars().count()
    }

    fn current_cell(&self) -> Option<(usize, usize)> {
        self.slots.get(self.slot).and_then(|slot| slot.cell)
    }

    fn slot_of_cell(&self, block: usize, row: usize, col: usize) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.block == block && slot.cell == Some((row, col)))
    }

    fn neighbour(&self, action: Action) -> Option<usize> {
        let block = self.slots.get(self.slot)?.block;
        let (row, col) = self.current_cell()?;
        let (row, col) = match action {
            Action::TableLeftCell => (row, col.checked_sub(1)?),
            Action::TableRightCell => (row, col + 1),
            Action::TableUpperCell => (row.checked_sub(1)?, col),
            Action::TableLowerCell => (row + 1, col),
            _ => return None,
        };
        self.slot_of_cell(block, row, col)
    }

    fn selected_text(&self) -> Option<String> {
        match self.selection? {
            Selection::Text { start, end } => Some(char_slice(self.text_of(self.slot), start, end)),
            Selection::Cell => Some(self.text_of(self.slot).to_string()),
            Selection::Table => {
                let block = self.slots[self.slot].block;
                match &self.model.blocks[block] {
                    Block::Table { rows } => Some(
                        rows.iter()
                            .map(|row| row.join("\t"))
                            .collect::<Vec<_>>()
                            .join("\n"),
                    ),
                    Block::Paragraph { .. } => None,
                }
            }
        }
    }

    /// Remove the selected text (or the whole cell) and park the cursor at its start.
    fn delete_selection(&mut self) -> bool {
        match self.selection.take() {
            Some(Selection::Text { start, end }) => {
                let text = self.text_mut();
                let removed = remove_chars(text, start, end);
                *text = removed;
                self.pos = start;
                true
            }
            Some(Selection::Cell) | Some(Selection::Table) => {
                self.text_mut().clear();
                self.pos = 0;
                true
            }
            None => false,
        }
    }

    fn check_failure(&mut self, action: Action) -> Result<(), AdapterError> {
        let Some((failing, remaining)) = self.failing else {
            return Ok(());
        };
        if failing != action {
            return Ok(());
        }
        match remaining {
            Some(0) => {
                self.failing = None;
                return Ok(());
            }
            Some(n) => self.failing = Some((failing, Some(n - 1))),
            None => {}
        }
        Err(AdapterError::new(action.name(), "simulated failure"))
    }

    /// Swap in new content after a structural edit and put the cursor on `slot`.
    fn restructure(&mut self, slot: usize, pos: usize) {
        self.slots = build_slots(&self.model);
        self.slot = slot.min(self.slots.len().saturating_sub(1));
        self.pos = pos;
        self.selection = None;
    }

    /// Split the paragraph under the cursor, or break the line inside a cell.
    fn break_paragraph_at_cursor(&mut self) -> bool {
        self.delete_selection();
        let slot = self.slots[self.slot];
        let pos = self.pos;

        if slot.cell.is_some() {
            let text = self.text_mut();
            let offset = byte_offset(text, pos);
            text.insert(offset, '\n');
            self.pos = pos + 1;
            return true;
        }

        let text = self.text_mut();
        let offset = byte_offset(text, pos);
        let tail = text.split_off(offset);
        self.model
            .blocks
            .insert(slot.block + 1, Block::Paragraph { text: tail });
        self.restructure(self.slot + 1, 0);
        true
    }
}

impl DocumentActions for SimulatedDocument {
    fn run_action(&mut self, action: Action) -> Result<bool, AdapterError> {
        self.check_failure(action)?;
        if action == Action::MoveDocBegin {
            self.finds.clear();
        }
        if self.slots.is_empty() && action != Action::FileNew {
            return Ok(action == Action::MoveDocBegin);
        }

        let in_cell = self.current_cell().is_some();
        let ran = match action {
            Action::MoveDocBegin => {
                self.slot = 0;
                self.pos = 0;
                self.selection = None;
                true
            }
            Action::TableSelCell if in_cell => {
                self.selection = Some(Selection::Cell);
                true
            }
            Action::TableSelTable if in_cell => {
                self.selection = Some(Selection::Table);
                true
            }
            Action::TableSelCell | Action::TableSelTable => false,
            Action::Cancel => {
                if self.selection.take() == Some(Selection::Table) {
                    let block = self.slots[self.slot].block;
                    if let Some(first) = self.slot_of_cell(block, 0, 0) {
                        self.slot = first;
                        self.pos = 0;
                    }
                }
                self.pos = self.pos.min(self.current_len());
                true
            }
            Action::TableLeftCell
            | Action::TableRightCell
            | Action::TableUpperCell
            | Action::TableLowerCell => match self.neighbour(action) {
                Some(slot) => {
                    self.slot = slot;
                    self.pos = 0;
                    self.selection = None;
                    true
                }
                None => false,
            },
            Action::SelectAll => {
                self.selection = Some(Selection::Text {
                    start: 0,
                    end: self.current_len(),
                });
                true
            }
            Action::EditCut => match self.selected_text() {
                Some(text) => {
                    self.clipboard = text;
                    self.delete_selection()
                }
                None => false,
            },
            Action::Copy => match self.selected_text() {
                Some(text) => {
                    self.clipboard = text;
                    true
                }
                None => false,
            },
            Action::Delete => {
                if !self.delete_selection() && self.pos < self.current_len() {
                    let pos = self.pos;
                    let text = self.text_mut();
                    *text = remove_chars(text, pos, pos + 1);
                }
                true
            }
            Action::MoveSelCellBegin | Action::MoveSelCellEnd if in_cell => {
                let len = self.current_len();
                let (start, end, pos) = if action == Action::MoveSelCellBegin {
                    (0, self.pos, 0)
                } else {
                    (self.pos, len, len)
                };
                self.selection = Some(Selection::Text { start, end });
                self.pos = pos;
                true
            }
            Action::MoveSelCellBegin | Action::MoveSelCellEnd => false,
            Action::BreakPara => self.break_paragraph_at_cursor(),
            Action::FileNew => {
                self.model = DocumentModel::with_blocks(vec![Block::paragraph("")]);
                self.clipboard.clear();
                self.field_writes.clear();
                self.restructure(0, 0);
                true
            }
        };

        Ok(ran)
    }

    fn position(&mut self) -> Result<Position, AdapterError> {
        Ok(Position::new(self.slot as i32, 0, self.pos as i32))
    }

    fn set_position(&mut self, position: Position) -> Result<(), AdapterError> {
        let slot = usize::try_from(position.list)
            .ok()
            .filter(|slot| *slot < self.slots.len());
        let pos = usize::try_from(position.pos).ok();

        match (slot, pos) {
            (Some(slot), Some(pos)) if pos <= self.text_of(slot).chars().count() => {
                self.slot = slot;
                self.pos = pos;
                self.selection = None;
                Ok(())
            }
            _ => Err(AdapterError::new(
                "SetPos",
                format!("no such position {position}"),
            )),
        }
    }

    fn find_forward(&mut self, text: &str) -> Result<bool, AdapterError> {
        self.finds.push(text.to_string());
        if text.is_empty() {
            return Ok(false);
        }

        let mut from = self.pos;
        for slot in self.slot..self.slots.len() {
            let haystack = self.text_of(slot);
            let offset = byte_offset(haystack, from);
            if let Some(found) = haystack[offset..].find(text) {
                let start = from + haystack[offset..offset + found].chars().count();
                let end = start + text.chars().count();
                self.slot = slot;
                self.pos = end;
                self.selection = Some(Selection::Text { start, end });
                return Ok(true);
            }
            from = 0;
        }

        Ok(false)
    }

    fn insert_text(&mut self, text: &str) -> Result<(), AdapterError> {
        if self.slots.is_empty() {
            return Err(AdapterError::new("InsertText", "document has no text lists"));
        }
        self.delete_selection();

        let pos = self.pos;
        let target = self.text_mut();
        let offset = byte_offset(target, pos);
        target.insert_str(offset, text);
        self.pos = pos + text.chars().count();
        Ok(())
    }

    fn read_clipboard_text(&mut self) -> Result<String, AdapterError> {
        Ok(self.clipboard.clone())
    }

    fn field_names(&mut self) -> Result<Vec<String>, AdapterError> {
        self.field_writes.clear();
        Ok(self.model.fields.iter().map(|f| f.name.clone()).collect())
    }

    fn put_field_text(&mut self, name: &str, text: &str) -> Result<(), AdapterError> {
        self.field_writes.push(name.to_string());
        for field in self.model.fields.iter_mut().filter(|f| f.name == name) {
            field.text = text.to_string();
        }
        Ok(())
    }

    fn set_field_text_at(&mut self, index: usize, text: &str) -> Result<(), AdapterError> {
        let field = self
            .model
            .fields
            .get_mut(index)
            .ok_or_else(|| AdapterError::new("SetFieldText", format!("no field at {index}")))?;
        self.field_writes.push(field.name.clone());
        field.text = text.to_string();
        Ok(())
    }

    fn open(&mut self, path: &Path) -> Result<(), AdapterError> {
        let model =
            DocumentModel::load(path).map_err(|e| AdapterError::new("Open", e.to_string()))?;
        *self = SimulatedDocument::new(model);
        Ok(())
    }

    fn save_as(&mut self, path: &Path) -> Result<(), AdapterError> {
        let content = serde_json::to_string_pretty(&self.model)
            .map_err(|e| AdapterError::new("SaveAs", e.to_string()))?;
        fs::write(path, content).map_err(|e| AdapterError::new("SaveAs", e.to_string()))
    }

    fn document_text(&mut self) -> Result<String, AdapterError> {
        let mut out = String::new();
        for block in &self.model.blocks {
            match block {
                Block::Paragraph { text } => {
                    out.push_str(text);
                    out.push('\n');
                }
                Block::Table { rows } => {
                    for row in rows {
                        out.push_str(&row.join("\t"));
                        out.push('\n');
                    }
                }
            }
        }
        Ok(out)
    }

    fn insert_table(&mut self, rows: usize, cols: usize) -> Result<(), AdapterError> {
        if rows == 0 || cols == 0 {
            return Err(AdapterError::new(
                "TableCreate",
                format!("a table needs at least one row and column, got {rows}x{cols}"),
            ));
        }
        if self.current_cell().is_some() {
            return Err(AdapterError::new(
                "TableCreate",
                "tables cannot be created inside a table cell",
            ));
        }

        let block = self
            .slots
            .get(self.slot)
            .map_or(self.model.blocks.len(), |slot| slot.block + 1);
        self.model.blocks.insert(
            block,
            Block::Table {
                rows: vec![vec![String::new(); cols]; rows],
            },
        );
        self.restructure(0, 0);
        self.slot = self.slot_of_cell(block, 0, 0).unwrap_or_default();
        Ok(())
    }
}

/// Hands out fresh copies of a document model on every connect.
#[derive(Debug, Clone, Default)]
pub struct SimulatedConnector {
    model: DocumentModel,
    connects: usize,
}

impl SimulatedConnector {
    pub fn new(model: DocumentModel) -> Self {
        Self { model, connects: 0 }
    }

    pub fn from_path(path: &Path) -> Result<Self, SimulatedLoadError> {
        Ok(Self::new(DocumentModel::load(path)?))
    }

    /// How many handles have been created so far.
    pub fn connects(&self) -> usize {
        self.connects
    }
}

impl Connector for SimulatedConnector {
    type Handle = SimulatedDocument;

    fn connect(&mut self) -> Result<SimulatedDocument, AdapterError> {
        self.connects += 1;
        Ok(SimulatedDocument::new(self.model.clone()))
    }
}

fn build_slots(model: &DocumentModel) -> Vec<Slot> {
    let mut slots = Vec::new();
    for (block, content) in model.blocks.iter().enumerate() {
        match content {
            Block::Paragraph { .. } => slots.push(Slot { block, cell: None }),
            Block::Table { rows } => {
                for (row, cells) in rows.iter().enumerate() {
                    for col in 0..cells.len() {
                        slots.push(Slot {
                            block,
                            cell: Some((row, col)),
                        });
                    }
                }
            }
        }
    }
    slots
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(offset, _)| offset)
}

fn char_slice(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end.saturating_sub(start)).collect()
}

fn remove_chars(text: &str, start: usize, end: usize) -> String {
    text.chars()
        .enumerate()
        .filter(|(i, _)| *i < start || *i >= end)
        .map(|(_, c)| c)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn doc() -> SimulatedDocument {
        SimulatedDocument::new(DocumentModel::with_blocks(vec![
            Block::paragraph("회의록 성명"),
            Block::table(&[&["성명", "홍길동"], &["직위", ""]]),
        ]))
    }

    #[test]
    fn test_find_forward_continues_from_previous_match() {
        let mut doc = doc();

        assert!(doc.find_forward("성명").unwrap());
        assert_eq!(doc.cursor_cell(), None);
        assert!(doc.find_forward("성명").unwrap());
        assert_eq!(doc.cursor_cell(), Some((1, 0, 0)));
        assert!(!doc.find_forward("성명").unwrap());
        assert_eq!(doc.cursor_cell(), Some((1, 0, 0)));
    }

    #[test]
    fn test_moves_stop_at_table_edges() {
        let mut doc = doc();
        doc.find_forward("직위").unwrap();

        assert!(!doc.run_action(Action::TableLowerCell).unwrap());
        assert!(doc.run_action(Action::TableUpperCell).unwrap());
        assert_eq!(doc.cursor_cell(), Some((1, 0, 0)));
    }

    #[test]
    fn test_cell_selection_outside_table_reports_false() {
        let mut doc = doc();
        assert!(!doc.run_action(Action::TableSelCell).unwrap());
    }

    #[test]
    fn test_cut_moves_text_to_clipboard() {
        let mut doc = doc();
        doc.find_forward("홍길동").unwrap();
        doc.run_action(Action::SelectAll).unwrap();
        doc.run_action(Action::EditCut).unwrap();

        assert_eq!(doc.cell_text(0, 0, 1), Some(""));
        assert_eq!(doc.read_clipboard_text().unwrap(), "홍길동");
    }

    #[test]
    fn test_insert_replaces_active_selection() {
        let mut doc = doc();
        doc.find_forward("회의록").unwrap();
        doc.insert_text("Minutes").unwrap();

        assert_eq!(doc.model().blocks[0], Block::paragraph("Minutes 성명"));
    }

    #[test]
    fn test_set_position_rejects_unknown_list() {
        let mut doc = doc();
        assert!(doc.set_position(Position::new(99, 0, 0)).is_err());
    }

    #[test]
    fn test_failing_action_raises() {
        let mut doc = doc();
        doc.fail_action(Action::Copy);

        let err = doc.run_action(Action::Copy).unwrap_err();

        assert_eq!(err.operation, "Copy");
    }

    #[test]
    fn test_limited_failure_recovers() {
        let mut doc = doc();
        doc.fail_action_times(Action::Copy, 1);

        assert!(doc.run_action(Action::Copy).is_err());
        assert!(doc.run_action(Action::Copy).is_ok());
        assert!(doc.run_action(Action::Copy).is_ok());
    }

    #[test]
    fn test_search_log_restarts_at_document_begin() {
        let mut doc = doc();

        for _ in 0..100 {
            doc.run_action(Action::MoveDocBegin).unwrap();
            doc.find_forward("성명").unwrap();
        }

        assert_eq!(doc.finds(), vec!["성명"]);
    }

    #[test]
    fn test_new_document_has_one_empty_paragraph() {
        let mut doc = doc();
        doc.find_forward("홍길동").unwrap();

        assert!(doc.new_document().unwrap());
        doc.insert_text("첫 줄").unwrap();

        assert_eq!(doc.model().blocks, vec![Block::paragraph("첫 줄")]);
        assert_eq!(doc.document_text().unwrap(), "첫 줄\n");
    }

    #[test]
    fn test_break_paragraph_splits_at_cursor() {
        let mut doc = doc();
        doc.find_forward("회의록").unwrap();
        doc.run_action(Action::Cancel).unwrap();

        assert!(doc.break_paragraph().unwrap());
        doc.insert_text("2025").unwrap();

        assert_eq!(doc.model().blocks[0], Block::paragraph("회의록"));
        assert_eq!(doc.model().blocks[1], Block::paragraph("2025 성명"));
    }

    #[test]
    fn test_break_paragraph_inside_cell_adds_line() {
        let mut doc = doc();
        doc.find_forward("홍길동").unwrap();
        doc.run_action(Action::Cancel).unwrap();

        doc.break_paragraph().unwrap();
        doc.insert_text("외 1명").unwrap();

        assert_eq!(doc.cell_text(0, 0, 1), Some("홍길동\n외 1명"));
    }

    #[test]
    fn test_insert_table_after_paragraph_moves_into_first_cell() {
        let mut doc = doc();

        doc.insert_table(2, 3).unwrap();
        doc.insert_text("품목").unwrap();

        assert_eq!(doc.cursor_cell(), Some((1, 0, 0)));
        assert_eq!(
            doc.table_rows(0).unwrap(),
            vec![vec!["품목", "", ""], vec!["", "", ""]]
        );
        assert_eq!(
            doc.document_text().unwrap(),
            "회의록 성명\n품목\t\t\n\t\t\n성명\t홍길동\n직위\t\n"
        );
    }

    #[test]
    fn test_insert_table_into_empty_document() {
        let mut doc = SimulatedDocument::new(DocumentModel::default());

        doc.insert_table(1, 1).unwrap();

        assert_eq!(doc.cursor_cell(), Some((0, 0, 0)));
    }

    #[rstest]
    #[case(0, 2)]
    #[case(2, 0)]
    fn test_insert_table_rejects_empty_shape(#[case] rows: usize, #[case] cols: usize) {
        let mut doc = doc();

        let err = doc.insert_table(rows, cols).unwrap_err();

        assert_eq!(err.operation, "TableCreate");
        assert_eq!(doc.model().blocks.len(), 2);
    }

    #[test]
    fn test_insert_table_inside_cell_is_refused() {
        let mut doc = doc();
        doc.find_forward("직위").unwrap();

        assert!(doc.insert_table(1, 1).is_err());
    }

    #[test]
    fn test_model_json_shape() {
        let json = r#"{
            "blocks": [
                {"kind": "paragraph", "text": "제목"},
                {"kind": "table", "rows": [["성명", ""]]}
            ],
            "fields": [{"name": "date"}]
        }"#;

        let model: DocumentModel = serde_json::from_str(json).unwrap();

        assert_eq!(model.blocks.len(), 2);
        assert_eq!(model.fields[0], FormField::new("date"));
    }

    #[test]
    fn test_connector_hands_out_fresh_documents() {
        let mut connector = SimulatedConnector::new(doc().model().clone());
        let mut first = connector.connect().unwrap();
        first.find_forward("홍길동").unwrap();
        first.insert_text("x").unwrap();

        let second = connector.connect().unwrap();

        assert_eq!(second.cell_text(0, 0, 1), Some("홍길동"));
        assert_eq!(connector.connects(), 2);
    }
}
