use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::adapter::{Action, AdapterError, DocumentActions};
use crate::error::FillError;

/// One cell-to-cell step inside a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Scan order used by the table view.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn inverse(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// The table-cell move action bound to this direction
    pub fn action(self) -> Action {
        match self {
            Direction::Left => Action::TableLeftCell,
            Direction::Right => Action::TableRightCell,
            Direction::Up => Action::TableUpperCell,
            Direction::Down => Action::TableLowerCell,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = FillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err(FillError::InvalidDirection(s.to_string())),
        }
    }
}

/// Perform exactly one cell move. Returns what the adapter reported.
pub fn move_cell<D>(doc: &mut D, direction: Direction) -> Result<bool, AdapterError>
where
    D: DocumentActions + ?Sized,
{
    log::debug!("move {direction}");
    doc.run_action(direction.action())
}
