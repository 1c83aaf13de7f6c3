pub mod adapter;
pub mod error;
pub mod fields;
pub mod navigation;
pub mod session;
pub mod simulated;

// Re-export key types for easier usage
pub use adapter::{Action, AdapterError, Connector, DocumentActions, Position};
pub use error::FillError;
pub use navigation::{Direction, FillMode, LabelPath, Navigator, PathToken, TableView};
pub use session::{BatchEntry, BatchReport, EngineOptions, Outcome, Session};
pub use simulated::{
    Block, DocumentModel, FormField, SimulatedConnector, SimulatedDocument, SimulatedLoadError,
};
