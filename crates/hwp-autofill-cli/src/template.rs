use std::path::Path;

use anyhow::{Context, Result, bail};
use hwp_autofill_engine::{Session, SimulatedConnector};
use serde_json::{Map, Value};

/// Field data from a JSON file path or an inline JSON object.
pub fn load_data(source: &str) -> Result<Vec<(String, String)>> {
    let path = Path::new(source);
    let content = if path.is_file() {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read data file {}", path.display()))?
    } else {
        source.to_string()
    };

    let value: Value =
        serde_json::from_str(&content).context("Data is neither a readable file nor valid JSON")?;
    let Value::Object(map) = value else {
        bail!("Data must be a JSON object of field name to value");
    };

    Ok(object_entries(map))
}

/// Text written into a document for a JSON value. Strings are taken as-is.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub fn object_entries(map: Map<String, Value>) -> Vec<(String, String)> {
    map.into_iter()
        .map(|(key, value)| {
            let text = value_text(&value);
            (key, text)
        })
        .collect()
}

/// Open `template`, fill its fields from `data` and save to `output`.
pub fn run(template: &Path, data: &str, output: &Path) -> Result<usize> {
    let data = load_data(data)?;
    let mut session = Session::new(SimulatedConnector::default());

    let count = session
        .process_template(template, data, output)
        .with_context(|| format!("Failed to process template {}", template.display()))?;
    log::info!("Filled {count} fields into {}", output.display());
    Ok(count)
}
