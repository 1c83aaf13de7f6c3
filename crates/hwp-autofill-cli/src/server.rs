//! Line-delimited JSON tool server.
//!
//! Each input line is `{"id": ..., "tool": "...", "params": {...}}` and gets
//! exactly one output line `{"id": ..., "ok": ..., "message": ..., "result": ...}`.
//! A bad line is answered with `ok: false` and the loop carries on.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use hwp_autofill_config::Config;
use hwp_autofill_engine::{Connector, Direction, FillError, FillMode, LabelPath, Session};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::template::{object_entries, value_text};

/// Values used when a request leaves `direction`, `mode` or `depth` out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Defaults {
    pub direction: Direction,
    pub mode: FillMode,
    pub depth: usize,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            direction: Direction::Right,
            mode: FillMode::Replace,
            depth: 1,
        }
    }
}

impl Defaults {
    pub fn from_config(config: &Config) -> Result<Self, FillError> {
        Ok(Self {
            direction: config.default_direction.parse()?,
            mode: config.default_mode.parse()?,
            depth: config.scan_depth,
        })
    }
}

#[derive(Debug, Deserialize)]
struct Request {
    #[serde(default)]
    id: Value,
    tool: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub id: Value,
    pub ok: bool,
    pub message: String,
    pub result: Value,
}

struct Reply {
    ok: bool,
    message: String,
    result: Value,
}

impl Reply {
    fn message(message: impl Into<String>) -> Self {
        Self::with_result(message, Value::Null)
    }

    fn with_result(message: impl Into<String>, result: Value) -> Self {
        Self {
            ok: true,
            message: message.into(),
            result,
        }
    }
}

/// Either `"a > b"` / `"a/b"` or an explicit token list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PathParam {
    Joined(String),
    Tokens(Vec<String>),
}

impl PathParam {
    fn into_path(self) -> Result<LabelPath, FillError> {
        match self {
            PathParam::Joined(raw) => raw.parse(),
            PathParam::Tokens(tokens) => LabelPath::from_tokens(tokens),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FillByLabelParams {
    label: String,
    value: Value,
    direction: Option<String>,
    occurrence: Option<usize>,
    mode: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FillByPathParams {
    path: PathParam,
    value: Value,
    direction: Option<String>,
    mode: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FillBatchParams {
    entries: Map<String, Value>,
    direction: Option<String>,
    mode: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScanViewParams {
    depth: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct ReadCellParams {
    label: String,
}

#[derive(Debug, Deserialize)]
struct StepCellParams {
    direction: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FillTableParams {
    /// Label of a cell inside the target table; the cursor's table when absent
    label: Option<String>,
    rows: Vec<Vec<Value>>,
    #[serde(default = "first")]
    start_row: usize,
    #[serde(default = "first")]
    start_col: usize,
    /// Header styling needs character formatting, which is not available
    #[serde(default)]
    has_header: bool,
}

#[derive(Debug, Deserialize)]
struct InsertTextParams {
    text: String,
}

#[derive(Debug, Deserialize)]
struct InsertTableParams {
    rows: usize,
    cols: usize,
}

#[derive(Debug, Deserialize)]
struct InjectFieldsParams {
    data: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct FillFieldParams {
    name: String,
    value: Value,
    #[serde(default = "first")]
    occurrence: usize,
}

#[derive(Debug, Deserialize)]
struct PathOnlyParams {
    path: PathBuf,
}

fn first() -> usize {
    1
}

pub struct Server<C: Connector> {
    session: Session<C>,
    defaults: Defaults,
}

impl<C: Connector> Server<C> {
    pub fn new(session: Session<C>, defaults: Defaults) -> Self {
        Self { session, defaults }
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session<C> {
        &self.session
    }

    /// Answer requests from `reader` until end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, reader: R, mut writer: W) -> Result<()> {
        for line in reader.lines() {
            let line = line.context("Failed to read request line")?;
            if line.trim().is_empty() {
                continue;
            }

            let response = self.handle_line(&line);
            serde_json::to_writer(&mut writer, &response)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }

        log::info!("Input closed, shutting down");
        self.session.close();
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str) -> Response {
        let request: Request = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(err) => {
                log::warn!("Malformed request: {err}");
                return Response {
                    id: Value::Null,
                    ok: false,
                    message: format!("Invalid request: {err}"),
                    result: Value::Null,
                };
            }
        };

        log::debug!("request {} tool={}", request.id, request.tool);
        match self.dispatch(&request.tool, request.params) {
            Ok(reply) => Response {
                id: request.id,
                ok: reply.ok,
                message: reply.message,
                result: reply.result,
            },
            Err(err) => {
                let message = format!("{err:#}");
                log::warn!("{} failed: {message}", request.tool);
                Response {
                    id: request.id,
                    ok: false,
                    message,
                    result: Value::Null,
                }
            }
        }
    }

    fn dispatch(&mut self, tool: &str, params: Value) -> Result<Reply> {
        let defaults = self.defaults;
        let session = &mut self.session;

        let reply = match tool {
            "fill_by_label" => {
                let p: FillByLabelParams = parse_params(tool, params)?;
                let direction = direction_or(p.direction, defaults.direction)?;
                let mode = mode_or(p.mode, defaults.mode)?;
                let message = session.fill_by_label(
                    &p.label,
                    &value_text(&p.value),
                    direction,
                    p.occurrence.unwrap_or(1),
                    mode,
                )?;
                Reply::message(message)
            }
            "fill_by_path" => {
                let p: FillByPathParams = parse_params(tool, params)?;
                let direction = direction_or(p.direction, defaults.direction)?;
                let mode = mode_or(p.mode, defaults.mode)?;
                let path = p.path.into_path()?;
                let value = value_text(&p.value);
                Reply::message(session.fill_by_path(&path, &value, direction, mode)?)
            }
            "fill_batch" | "fill_labels" => {
                let p: FillBatchParams = parse_params(tool, params)?;
                let direction = direction_or(p.direction, defaults.direction)?;
                let entries = object_entries(p.entries);
                let report = if tool == "fill_batch" {
                    let mode = mode_or(p.mode, defaults.mode)?;
                    session.fill_batch(entries, direction, mode)
                } else {
                    if p.mode.is_some() {
                        bail!("'fill_labels' always replaces cell content; use 'fill_batch' to choose a mode");
                    }
                    session.fill_labels(entries, direction)
                };
                // Per-entry outcomes travel in `result` even when some failed
                Reply {
                    ok: report.all_ok(),
                    message: format!(
                        "Filled {} of {} entries",
                        report.succeeded(),
                        report.entries.len()
                    ),
                    result: serde_json::to_value(&report)?,
                }
            }
            "scan_view" => {
                let p: ScanViewParams = parse_params(tool, params)?;
                let view = session.scan_view(p.depth.unwrap_or(defaults.depth))?;
                Reply::with_result(
                    format!("Read {} cells", view.len()),
                    serde_json::to_value(&view)?,
                )
            }
            "read_cell" => {
                let p: ReadCellParams = parse_params(tool, params)?;
                let text = session.read_cell_at_label(&p.label)?;
                Reply::with_result(format!("Read the cell at '{}'", p.label), json!(text))
            }
            "step_cell" => {
                let p: StepCellParams = parse_params(tool, params)?;
                let direction = direction_or(p.direction, defaults.direction)?;
                let text = session.step_and_read(direction)?;
                Reply::with_result(format!("Moved {direction}"), json!(text))
            }
            "fill_table" => {
                let p: FillTableParams = parse_params(tool, params)?;
                if p.has_header {
                    bail!("Header row styling is not supported; pass the header as the first row");
                }
                if let Some(label) = &p.label {
                    session.read_cell_at_label(label)?;
                }
                let rows: Vec<Vec<String>> = p
                    .rows
                    .iter()
                    .map(|row| row.iter().map(value_text).collect())
                    .collect();
                let written = session.fill_table(&rows, p.start_row, p.start_col)?;
                Reply::with_result(format!("Filled {written} cells"), json!(written))
            }
            "list_fields" => {
                let fields = session.list_fields()?;
                Reply::with_result(format!("Found {} fields", fields.len()), json!(fields))
            }
            "inject_fields" => {
                let p: InjectFieldsParams = parse_params(tool, params)?;
                let count = session.inject_fields(object_entries(p.data))?;
                Reply::with_result(format!("Filled {count} fields"), json!(count))
            }
            "fill_field" => {
                let p: FillFieldParams = parse_params(tool, params)?;
                let value = value_text(&p.value);
                Reply::message(session.fill_field_nth(&p.name, &value, p.occurrence)?)
            }
            "create" => Reply::message(session.create()?),
            "insert_text" => {
                let p: InsertTextParams = parse_params(tool, params)?;
                Reply::message(session.insert_text(&p.text)?)
            }
            "insert_paragraph" => Reply::message(session.insert_paragraph()?),
            "insert_table" => {
                let p: InsertTableParams = parse_params(tool, params)?;
                Reply::message(session.insert_table(p.rows, p.cols)?)
            }
            "get_text" => {
                let text = session.document_text()?;
                Reply::with_result(
                    format!("Read {} characters", text.chars().count()),
                    json!(text),
                )
            }
            "open" => {
                let p: PathOnlyParams = parse_params(tool, params)?;
                Reply::message(session.open(&p.path)?)
            }
            "save" => {
                let p: PathOnlyParams = parse_params(tool, params)?;
                Reply::message(session.save_as(&p.path)?)
            }
            "close" => {
                if session.close() {
                    Reply::message("Connection closed")
                } else {
                    Reply::message("No open connection")
                }
            }
            other => bail!("Unknown tool '{other}'"),
        };

        Ok(reply)
    }
}

fn parse_params<T: DeserializeOwned>(tool: &str, params: Value) -> Result<T> {
    let params = if params.is_null() {
        Value::Object(Map::new())
    } else {
        params
    };
    serde_json::from_value(params).with_context(|| format!("Invalid params for '{tool}'"))
}

fn direction_or(raw: Option<String>, default: Direction) -> Result<Direction, FillError> {
    raw.map_or(Ok(default), |raw| raw.parse())
}

fn mode_or(raw: Option<String>, default: FillMode) -> Result<FillMode, FillError> {
    raw.map_or(Ok(default), |raw| raw.parse())
}
