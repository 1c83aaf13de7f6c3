//! Label resolution.
//!
//! Literal tokens are global forward searches; direction tokens are local
//! structural moves. Those are the only two primitives the document offers,
//! so resolution is a single left-to-right pass that stops at the first miss.

use crate::adapter::{Action, DocumentActions};
use crate::error::FillError;
use crate::navigation::{LabelPath, Navigator, PathToken};

impl<D: DocumentActions + ?Sized> Navigator<'_, D> {
    /// Walk `path` from the start of the document.
    ///
    /// On a miss the error carries how many tokens resolved, so callers can
    /// tell "label never found" apart from "prefix found, label N missing".
    pub fn resolve(&mut self, path: &LabelPath) -> Result<(), FillError> {
        self.document().run_action(Action::MoveDocBegin)?;

        for (depth, token) in path.tokens().iter().enumerate() {
            match token {
                PathToken::Label(label) => {
                    log::debug!("find '{label}' (token {depth})");
                    if !self.document().find_forward(label)? {
                        return Err(FillError::LabelNotFound {
                            found: path.prefix_display(depth),
                            missing: label.clone(),
                            depth,
                        });
                    }
                }
                PathToken::Move(direction) => {
                    log::debug!("move {direction} (token {depth})");
                    self.pin_cell()?;
                    self.step_checked(*direction)?;
                }
            }
        }

        Ok(())
    }

    /// Land on the `occurrence`-th match of `label`, counting from the document start.
    ///
    /// A label with no match at all is `LabelNotFound` only when the first
    /// occurrence was asked for; any later occurrence reports how many exist.
    pub fn find_occurrence(&mut self, label: &str, occurrence: usize) -> Result<(), FillError> {
        if occurrence == 0 {
            return Err(FillError::InvalidOccurrence(occurrence));
        }

        self.document().run_action(Action::MoveDocBegin)?;

        for found in 0..occurrence {
            if !self.document().find_forward(label)? {
                return Err(if occurrence == 1 {
                    FillError::LabelNotFound {
                        found: String::new(),
                        missing: label.to_string(),
                        depth: 0,
                    }
                } else {
                    FillError::OccurrenceUnavailable {
                        label: label.to_string(),
                        required: occurrence,
                        found,
                    }
                });
            }
        }

        log::debug!("found occurrence {occurrence} of '{label}'");
        Ok(())
    }
}
