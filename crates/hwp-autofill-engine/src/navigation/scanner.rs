use std::collections::BTreeMap;

use serde::Serialize;

use crate::adapter::{Action, DocumentActions, Position};
use crate::error::FillError;
use crate::navigation::{Direction, Navigator};

/// Key of the cell the scan started from.
pub const CENTER: &str = "center";

/// Text of the cells around the cursor, keyed `center` and `{direction}_{depth}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TableView {
    cells: BTreeMap<String, String>,
}

impl TableView {
    pub fn key(direction: Direction, depth: usize) -> String {
        format!("{direction}_{depth}")
    }

    pub fn center(&self) -> Option<&str> {
        self.cells.get(CENTER).map(String::as_str)
    }

    pub fn get(&self, direction: Direction, depth: usize) -> Option<&str> {
        self.cells
            .get(&Self::key(direction, depth))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn insert(&mut self, key: String, text: String) {
        self.cells.insert(key, text);
    }
}

impl<D: DocumentActions + ?Sized> Navigator<'_, D> {
    /// Read the text of the cell under the cursor through the clipboard.
    ///
    /// Leaves no selection behind. Clipboard contents are overwritten.
    pub fn read_cell(&mut self) -> Result<String, FillError> {
        let doc = self.document();
        if !doc.select_current_cell()? {
            doc.deselect()?;
            return Err(FillError::NotInTable);
        }
        doc.run_action(Action::SelectAll)?;
        let copied = doc.copy_selection()?;
        doc.deselect()?;

        if !copied {
            return Ok(String::new());
        }
        Ok(doc.read_clipboard_text()?.trim().to_string())
    }

    /// Capture the cells up to `depth` steps away in each direction.
    ///
    /// The cursor ends exactly where it started, including when the scan fails
    /// partway. With edge detection on, a direction stops at the table edge.
    pub fn scan(&mut self, depth: usize) -> Result<TableView, FillError> {
        let origin = self.document().position()?;

        let scanned = self.scan_around(depth, origin);
        let restored = self.restore(origin);

        let view = scanned?;
        restored?;
        Ok(view)
    }

    fn scan_around(&mut self, depth: usize, origin: Position) -> Result<TableView, FillError> {
        let mut view = TableView::default();
        view.insert(CENTER.to_string(), self.read_cell()?);

        for direction in Direction::ALL {
            let mut taken = 0;
            for d in 1..=depth {
                if !self.step(direction)? && self.detect_table_edges {
                    log::debug!("table edge {direction} after {taken} steps");
                    break;
                }
                taken += 1;
                let text = self.read_cell()?;
                view.insert(TableView::key(direction, d), text);
            }

            for _ in 0..taken {
                self.step(direction.inverse())?;
            }
            self.restore(origin)?;
        }

        Ok(view)
    }
}
