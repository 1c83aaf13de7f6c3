//! The request surface: one owned document handle, connected on first use.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;

use crate::adapter::{AdapterError, Connector, DocumentActions};
use crate::error::FillError;
use crate::fields;
use crate::navigation::{Direction, FillMode, LabelPath, Navigator, TableView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Treat moves that go nowhere as failures instead of silently staying put
    pub detect_table_edges: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            detect_table_edges: true,
        }
    }
}

/// Success flag plus a human-readable status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub ok: bool,
    pub message: String,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

impl From<Result<String, FillError>> for Outcome {
    fn from(result: Result<String, FillError>) -> Self {
        match result {
            Ok(message) => Outcome::success(message),
            Err(err) => Outcome::failure(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchEntry {
    pub key: String,
    pub ok: bool,
    pub message: String,
}

/// Per-key results of a batch fill, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    fn push(&mut self, key: &str, outcome: Outcome) {
        self.entries.push(BatchEntry {
            key: key.to_string(),
            ok: outcome.ok,
            message: outcome.message,
        });
    }

    pub fn get(&self, key: &str) -> Option<&BatchEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|entry| entry.ok).count()
    }

    pub fn failed(&self) -> usize {
        self.entries.len() - self.succeeded()
    }

    pub fn all_ok(&self) -> bool {
        self.entries.iter().all(|entry| entry.ok)
    }
}

/// Owns the live document handle and runs one request at a time against it.
///
/// The handle is created through the [`Connector`] on the first request that
/// needs it. After [`Session::close`] the next request connects again.
pub struct Session<C: Connector> {
    connector: C,
    handle: Option<C::Handle>,
    options: EngineOptions,
}

impl<C: Connector> Session<C> {
    pub fn new(connector: C) -> Self {
        Self::with_options(connector, EngineOptions::default())
    }

    pub fn with_options(connector: C, options: EngineOptions) -> Self {
        Self {
            connector,
            handle: None,
            options,
        }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn is_connected(&self) -> bool {
        self.handle.is_some()
    }

    /// Create or attach the document handle if there is none yet.
    pub fn connect(&mut self) -> Result<&mut C::Handle, FillError> {
        if self.handle.is_none() {
            let handle = self
                .connector
                .connect()
                .map_err(|err| FillError::NotConnected {
                    reason: err.to_string(),
                })?;
            log::info!("Connected to document");
            self.handle = Some(handle);
        }

        self.handle.as_mut().ok_or_else(|| FillError::NotConnected {
            reason: "handle was not created".to_string(),
        })
    }

    /// Drop the handle. Returns whether there was one to drop.
    pub fn close(&mut self) -> bool {
        let was_connected = self.handle.take().is_some();
        if was_connected {
            log::info!("Closed document connection");
        }
        was_connected
    }

    /// The connected handle, without connecting.
    pub fn handle(&self) -> Option<&C::Handle> {
        self.handle.as_ref()
    }

    fn navigator(&mut self) -> Result<Navigator<'_, C::Handle>, FillError> {
        let detect = self.options.detect_table_edges;
        let doc = self.connect()?;
        Ok(Navigator::new(doc).detect_table_edges(detect))
    }

    /// Fill the cell one step in `direction` from the `occurrence`-th match of `label`.
    pub fn fill_by_label(
        &mut self,
        label: &str,
        value: &str,
        direction: Direction,
        occurrence: usize,
        mode: FillMode,
    ) -> Result<String, FillError> {
        let mut nav = self.navigator()?;
        nav.find_occurrence(label, occurrence)?;
        nav.pin_cell()?;
        nav.step_checked(direction)?;
        nav.write_cell(value, mode)?;

        Ok(if occurrence > 1 {
            format!(
                "Filled the cell {direction} of '{label}' (occurrence {occurrence}) with '{value}'"
            )
        } else {
            format!("Filled the cell {direction} of '{label}' with '{value}'")
        })
    }

    /// Resolve `path`, then fill the target cell.
    ///
    /// When the path ends with a direction token the resolved cell is the
    /// target; otherwise the cursor first moves one step in `direction`.
    pub fn fill_by_path(
        &mut self,
        path: &LabelPath,
        value: &str,
        direction: Direction,
        mode: FillMode,
    ) -> Result<String, FillError> {
        let mut nav = self.navigator()?;
        nav.resolve(path)?;

        let message = if path.ends_with_move() {
            format!("Filled the cell at '{path}' with '{value}'")
        } else {
            nav.pin_cell()?;
            nav.step_checked(direction)?;
            format!("Filled the cell {direction} of '{path}' with '{value}'")
        };

        nav.write_cell(value, mode)?;
        Ok(message)
    }

    /// Fill every `path string -> value` entry in order.
    ///
    /// Each entry fails on its own; the rest still run.
    pub fn fill_batch<I, K, V>(
        &mut self,
        entries: I,
        direction: Direction,
        mode: FillMode,
    ) -> BatchReport
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut report = BatchReport::default();

        for (key, value) in entries {
            let key = key.as_ref();
            let result = key
                .parse::<LabelPath>()
                .and_then(|path| self.fill_by_path(&path, value.as_ref(), direction, mode));
            if let Err(err) = &result {
                log::warn!("Batch entry '{key}' failed: {err}");
            }
            report.push(key, result.into());
        }

        log::debug!(
            "batch done: {} ok, {} failed",
            report.succeeded(),
            report.failed()
        );
        report
    }

    /// Fill `label -> value` entries next to the first match of each label, replacing content.
    pub fn fill_labels<I, K, V>(&mut self, entries: I, direction: Direction) -> BatchReport
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut report = BatchReport::default();

        for (label, value) in entries {
            let label = label.as_ref();
            let result = self.fill_by_label(label, value.as_ref(), direction, 1, FillMode::Replace);
            if let Err(err) = &result {
                log::warn!("Label '{label}' failed: {err}");
            }
            report.push(label, result.into());
        }

        report
    }

    pub fn scan_view(&mut self, depth: usize) -> Result<TableView, FillError> {
        self.navigator()?.scan(depth)
    }

    /// Text of the cell holding the first match of `label`.
    pub fn read_cell_at_label(&mut self, label: &str) -> Result<String, FillError> {
        let mut nav = self.navigator()?;
        nav.find_occurrence(label, 1)?;
        nav.read_cell()
    }

    /// Move one cell from the cursor and return that cell's text.
    pub fn step_and_read(&mut self, direction: Direction) -> Result<String, FillError> {
        let mut nav = self.navigator()?;
        nav.pin_cell()?;
        nav.step_checked(direction)?;
        nav.read_cell()
    }

    /// Write `rows` into the table under the cursor. See [`Navigator::fill_grid`].
    pub fn fill_table<R, S>(
        &mut self,
        rows: &[R],
        start_row: usize,
        start_col: usize,
    ) -> Result<usize, FillError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        self.navigator()?.fill_grid(rows, start_row, start_col)
    }

    pub fn list_fields(&mut self) -> Result<BTreeSet<String>, FillError> {
        Ok(fields::list_fields(self.connect()?)?)
    }

    pub fn inject_fields<I, K, V>(&mut self, data: I) -> Result<usize, FillError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Ok(fields::inject_fields(self.connect()?, data)?)
    }

    pub fn fill_field_nth(
        &mut self,
        name: &str,
        value: &str,
        occurrence: usize,
    ) -> Result<String, FillError> {
        fields::fill_nth(self.connect()?, name, value, occurrence)?;
        Ok(format!(
            "Filled field '{name}' (occurrence {occurrence}) with '{value}'"
        ))
    }

    /// Replace the open document with a new, empty one.
    pub fn create(&mut self) -> Result<String, FillError> {
        self.connect()?.new_document()?;
        log::info!("Created a new document");
        Ok("Created a new document".to_string())
    }

    /// Type `text` at the cursor. Each `\n` starts a new paragraph.
    pub fn insert_text(&mut self, text: &str) -> Result<String, FillError> {
        if text.is_empty() {
            return Err(FillError::EmptyText);
        }

        let doc = self.connect()?;
        for (index, line) in text.split('\n').enumerate() {
            if index > 0 && !doc.break_paragraph()? {
                return Err(AdapterError::new("BreakPara", "no paragraph at the cursor").into());
            }
            if !line.is_empty() {
                doc.insert_text(line)?;
            }
        }

        Ok(format!("Inserted {} characters", text.chars().count()))
    }

    pub fn insert_paragraph(&mut self) -> Result<String, FillError> {
        if !self.connect()?.break_paragraph()? {
            return Err(AdapterError::new("BreakPara", "no paragraph at the cursor").into());
        }
        Ok("Inserted a paragraph break".to_string())
    }

    /// Plain text of the whole document.
    pub fn document_text(&mut self) -> Result<String, FillError> {
        Ok(self.connect()?.document_text()?)
    }

    /// Create an empty table at the cursor; the cursor moves into its first cell.
    pub fn insert_table(&mut self, rows: usize, cols: usize) -> Result<String, FillError> {
        self.connect()?.insert_table(rows, cols)?;
        log::debug!("inserted {rows}x{cols} table");
        Ok(format!("Inserted a table with {rows} rows and {cols} columns"))
    }

    pub fn open(&mut self, path: &Path) -> Result<String, FillError> {
        self.connect()?.open(path)?;
        log::info!("Opened {}", path.display());
        Ok(format!("Opened {}", path.display()))
    }

    pub fn save_as(&mut self, path: &Path) -> Result<String, FillError> {
        self.connect()?.save_as(path)?;
        log::info!("Saved {}", path.display());
        Ok(format!("Saved {}", path.display()))
    }

    /// Open `template`, inject `data` into its fields and save to `output`.
    ///
    /// Returns how many field names were filled.
    pub fn process_template<I, K, V>(
        &mut self,
        template: &Path,
        data: I,
        output: &Path,
    ) -> Result<usize, FillError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.open(template)?;
        let count = self.inject_fields(data)?;
        self.save_as(output)?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::Action;
    use crate::simulated::{Block, DocumentModel, SimulatedConnector, SimulatedDocument};
    use pretty_assertions::assert_eq;

    struct Unavailable;

    impl Connector for Unavailable {
        type Handle = SimulatedDocument;

        fn connect(&mut self) -> Result<SimulatedDocument, AdapterError> {
            Err(AdapterError::new("connect", "application is not running"))
        }
    }

    fn form_session() -> Session<SimulatedConnector> {
        Session::new(SimulatedConnector::new(DocumentModel::with_blocks(vec![
            Block::table(&[&["성명", ""], &["연락처", ""]]),
        ])))
    }

    #[test]
    fn test_requests_fail_fast_without_connection() {
        let mut session = Session::new(Unavailable);

        let err = session.scan_view(1).unwrap_err();

        assert_eq!(
            err,
            FillError::NotConnected {
                reason: "connect failed: application is not running".to_string()
            }
        );
        assert!(!session.is_connected());
    }

    #[test]
    fn test_connects_lazily_and_reconnects_after_close() {
        let mut session = form_session();
        assert!(!session.is_connected());
        assert_eq!(session.connector().connects(), 0);

        session.list_fields().unwrap();
        session.list_fields().unwrap();
        assert_eq!(session.connector().connects(), 1);

        assert!(session.close());
        assert!(!session.close());

        session.list_fields().unwrap();
        assert_eq!(session.connector().connects(), 2);
    }

    #[test]
    fn test_fill_by_label_message() {
        let mut session = form_session();

        let message = session
            .fill_by_label("성명", "홍길동", Direction::Right, 1, FillMode::Replace)
            .unwrap();

        assert_eq!(message, "Filled the cell right of '성명' with '홍길동'");
        let doc = session.handle().unwrap();
        assert_eq!(doc.cell_text(0, 0, 1), Some("홍길동"));
    }

    #[test]
    fn test_batch_isolates_failures() {
        let mut session = form_session();

        let report = session.fill_batch(
            [("성명", "홍길동"), ("주소", "서울"), ("연락처", "010")],
            Direction::Right,
            FillMode::Replace,
        );

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert!(!report.get("주소").unwrap().ok);
        assert_eq!(
            report.get("주소").unwrap().message,
            "First label '주소' was not found"
        );
        let doc = session.handle().unwrap();
        assert_eq!(doc.cell_text(0, 1, 1), Some("010"));
    }

    #[test]
    fn test_batch_reports_malformed_paths() {
        let mut session = form_session();

        let report = session.fill_batch(
            [("성명 > <sideways>", "x")],
            Direction::Right,
            FillMode::Replace,
        );

        assert_eq!(report.entries.len(), 1);
        assert!(!report.all_ok());
    }

    #[test]
    fn test_batch_continues_after_adapter_raises() {
        // Given the first cut the writer issues raises once
        let mut session = form_session();
        session
            .connect()
            .unwrap()
            .fail_action_times(Action::EditCut, 1);

        // When a batch fills both rows
        let report = session.fill_batch(
            [("성명", "홍길동"), ("연락처", "010")],
            Direction::Right,
            FillMode::Replace,
        );

        // Then only the first entry fails and the second is still written
        assert_eq!(
            report.get("성명").unwrap().message,
            "EditCut failed: simulated failure"
        );
        assert!(report.get("연락처").unwrap().ok);
        let doc = session.handle().unwrap();
        assert_eq!(doc.cell_text(0, 0, 1), Some(""));
        assert_eq!(doc.cell_text(0, 1, 1), Some("010"));
    }

    #[test]
    fn test_repeated_fills_keep_search_log_bounded() {
        let mut session = form_session();

        for n in 0..100 {
            session
                .fill_by_label("성명", &n.to_string(), Direction::Right, 1, FillMode::Replace)
                .unwrap();
        }

        let doc = session.handle().unwrap();
        assert_eq!(doc.finds(), vec!["성명"]);
        assert_eq!(doc.cell_text(0, 0, 1), Some("99"));
    }

    #[test]
    fn test_create_then_type_lines() {
        let mut session = form_session();

        session.create().unwrap();
        let message = session.insert_text("제목\n\n본문").unwrap();

        assert_eq!(message, "Inserted 6 characters");
        assert_eq!(session.document_text().unwrap(), "제목\n\n본문\n");
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let mut session = form_session();

        assert_eq!(session.insert_text(""), Err(FillError::EmptyText));
        assert!(!session.is_connected());
    }

    #[test]
    fn test_insert_table_then_fill_it() {
        let mut session = Session::new(SimulatedConnector::new(DocumentModel::default()));
        session.create().unwrap();
        session.insert_paragraph().unwrap();

        let message = session.insert_table(2, 2).unwrap();
        let written = session.fill_table(&[["품목", "수량"], ["사과", "3"]], 1, 1).unwrap();

        assert_eq!(message, "Inserted a table with 2 rows and 2 columns");
        assert_eq!(written, 4);
        assert_eq!(
            session.document_text().unwrap(),
            "\n\n품목\t수량\n사과\t3\n"
        );
    }

    #[test]
    fn test_outcome_from_result() {
        assert_eq!(
            Outcome::from(Err::<String, _>(FillError::EmptyPath)),
            Outcome::failure("Label path is empty")
        );
        assert_eq!(
            Outcome::from(Ok::<_, FillError>("done".to_string())),
            Outcome::success("done")
        );
    }
}
