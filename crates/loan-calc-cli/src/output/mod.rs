pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` member of an output envelope, or the value itself.
pub(crate) fn result_body(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Flatten nested objects into dotted keys, e.g. `aggregates.monthly_payment`.
/// Arrays are rendered inline.
pub(crate) fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, val, out);
            }
        }
        _ => out.push((prefix.to_string(), scalar(value))),
    }
}

/// Split a result body into its scalar/object fields and its arrays of rows
/// (such as the `results` of a batch).
pub(crate) fn split_body(body: &Value) -> (Vec<(String, String)>, Vec<(&str, &[Value])>) {
    let mut fields = Vec::new();
    let mut tables = Vec::new();
    match body {
        Value::Object(map) => {
            for (key, val) in map {
                match val {
                    Value::Array(rows) if rows.iter().all(Value::is_object) => {
                        tables.push((key.as_str(), rows.as_slice()));
                    }
                    _ => flatten(key, val, &mut fields),
                }
            }
        }
        Value::Array(rows) => tables.push(("results", rows.as_slice())),
        _ => fields.push(("value".to_string(), scalar(body))),
    }
    (fields, tables)
}

/// Flatten every row and collect the union of column names in first-seen order.
pub(crate) fn flatten_rows(rows: &[Value]) -> (Vec<String>, Vec<Vec<(String, String)>>) {
    let mut headers: Vec<String> = Vec::new();
    let mut flat_rows = Vec::with_capacity(rows.len());
    for row in rows {
        let mut flat = Vec::new();
        flatten("", row, &mut flat);
        for (key, _) in &flat {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
        flat_rows.push(flat);
    }
    (headers, flat_rows)
}

pub(crate) fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(scalar).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
