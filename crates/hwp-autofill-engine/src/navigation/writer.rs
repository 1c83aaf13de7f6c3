use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::adapter::{Action, DocumentActions};
use crate::error::FillError;
use crate::navigation::{Direction, Navigator};

/// How a written value merges with what the cell already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// Existing content is cut before inserting
    #[default]
    Replace,
    /// Inserted at the cell start, pushing existing content right
    Prepend,
    /// Inserted at the cell end
    Append,
}

impl FillMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FillMode::Replace => "replace",
            FillMode::Prepend => "prepend",
            FillMode::Append => "append",
        }
    }
}

impl fmt::Display for FillMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FillMode {
    type Err = FillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "replace" => Ok(FillMode::Replace),
            "prepend" => Ok(FillMode::Prepend),
            "append" => Ok(FillMode::Append),
            _ => Err(FillError::InvalidMode(s.to_string())),
        }
    }
}

impl<D: DocumentActions + ?Sized> Navigator<'_, D> {
    /// Write `value` into the cell under the cursor.
    ///
    /// The cursor is left after the inserted text; nothing is restored.
    pub fn write_cell(&mut self, value: &str, mode: FillMode) -> Result<(), FillError> {
        self.pin_cell()?;

        let doc = self.document();
        match mode {
            FillMode::Replace => {
                doc.run_action(Action::SelectAll)?;
                doc.run_action(Action::EditCut)?;
            }
            FillMode::Prepend => {
                doc.run_action(Action::MoveSelCellBegin)?;
                doc.deselect()?;
            }
            FillMode::Append => {
                doc.run_action(Action::MoveSelCellEnd)?;
                doc.deselect()?;
            }
        }

        log::debug!("{mode} '{value}'");
        doc.insert_text(value)?;
        Ok(())
    }

    /// Fill consecutive cells of the table under the cursor, row by row.
    ///
    /// `start_row` and `start_col` are 1-based offsets from the table's first
    /// cell. Every written cell is cleared first. Returns the number of cells
    /// written.
    pub fn fill_grid<R, S>(
        &mut self,
        rows: &[R],
        start_row: usize,
        start_col: usize,
    ) -> Result<usize, FillError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        if start_row == 0 || start_col == 0 {
            return Err(FillError::InvalidTableOffset {
                start_row,
                start_col,
            });
        }

        self.go_to_first_cell()?;
        for _ in 1..start_row {
            self.step_checked(Direction::Down)?;
        }
        for _ in 1..start_col {
            self.step_checked(Direction::Right)?;
        }

        let mut written = 0;
        for (row_idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            for (col_idx, value) in row.iter().enumerate() {
                let doc = self.document();
                doc.select_current_cell()?;
                doc.run_action(Action::Delete)?;
                doc.insert_text(value.as_ref())?;
                written += 1;

                if col_idx + 1 < row.len() {
                    self.step_checked(Direction::Right)?;
                }
            }

            if row_idx + 1 < rows.len() {
                for _ in 1..row.len() {
                    self.step_checked(Direction::Left)?;
                }
                self.step_checked(Direction::Down)?;
            }
        }

        log::debug!("filled {written} cells from row {start_row}, column {start_col}");
        Ok(written)
    }

    fn go_to_first_cell(&mut self) -> Result<(), FillError> {
        let doc = self.document();
        if !doc.select_current_cell()? {
            return Err(FillError::NotInTable);
        }
        doc.run_action(Action::TableSelTable)?;
        doc.deselect()?;
        self.pin_cell()
    }
}
