/*!
 * # Table Navigation
 *
 * Relative, cursor-driven navigation over a document whose structure cannot
 * be queried. All positional reasoning happens through the adapter:
 *
 * - **`direction`**: the four cell moves and their inverses
 * - **`path`**: label paths such as `대표자 > <down> > <right>`
 * - **`resolver`**: walks a path from the document start
 * - **`writer`**: replace / prepend / append at the resolved cell, grid fill
 * - **`scanner`**: side-effect-free read of the cells around the cursor
 *
 * A [`Navigator`] borrows the live handle for the duration of one request.
 * Nothing it computes outlives that request.
 */

pub mod direction;
pub mod path;
pub mod resolver;
pub mod scanner;
pub mod writer;

pub use direction::Direction;
pub use path::{LabelPath, PathToken};
pub use scanner::TableView;
pub use writer::FillMode;

use crate::adapter::{AdapterError, DocumentActions, Position};
use crate::error::FillError;

/// Borrowed view of a document handle that knows how to move between cells.
pub struct Navigator<'a, D: DocumentActions + ?Sized> {
    doc: &'a mut D,
    detect_table_edges: bool,
}

impl<'a, D: DocumentActions + ?Sized> Navigator<'a, D> {
    pub fn new(doc: &'a mut D) -> Self {
        Self {
            doc,
            detect_table_edges: true,
        }
    }

    /// When enabled, a move that leaves the cursor in place is reported as
    /// [`FillError::TableEdge`] and pinning outside a table as
    /// [`FillError::NotInTable`].
    pub fn detect_table_edges(mut self, enabled: bool) -> Self {
        self.detect_table_edges = enabled;
        self
    }

    pub fn document(&mut self) -> &mut D {
        self.doc
    }

    /// Select the current cell and drop the selection so the cursor sits
    /// inside the cell rather than on a selection boundary.
    pub fn pin_cell(&mut self) -> Result<(), FillError> {
        let selected = self.doc.select_current_cell()?;
        self.doc.deselect()?;
        if !selected && self.detect_table_edges {
            return Err(FillError::NotInTable);
        }
        Ok(())
    }

    /// One cell move. Returns whether the cursor actually went somewhere.
    pub fn step(&mut self, direction: Direction) -> Result<bool, AdapterError> {
        let before = self.doc.position()?;
        let reported = direction::move_cell(&mut *self.doc, direction)?;
        let after = self.doc.position()?;
        Ok(reported && after != before)
    }

    /// One cell move that fails at a table edge when edge detection is on.
    pub fn step_checked(&mut self, direction: Direction) -> Result<(), FillError> {
        if !self.step(direction)? && self.detect_table_edges {
            return Err(FillError::TableEdge { direction });
        }
        Ok(())
    }

    /// Put the cursor back at `origin` if it is anywhere else.
    pub fn restore(&mut self, origin: Position) -> Result<(), AdapterError> {
        let current = self.doc.position()?;
        if current != origin {
            log::debug!("restoring cursor from {current} to {origin}");
            self.doc.set_position(origin)?;
        }
        Ok(())
    }
}
