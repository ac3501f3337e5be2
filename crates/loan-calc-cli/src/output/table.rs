use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten_rows, result_body, split_body};

/// Print the result as Field/Value pairs, one table per list of results,
/// then any warnings and the methodology line.
pub fn print_table(value: &Value) {
    let (fields, tables) = split_body(result_body(value));

    if !fields.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in &fields {
            builder.push_record([key.as_str(), val.as_str()]);
        }
        println!("{}", Table::from(builder));
    }

    for (name, rows) in tables {
        println!("\n{}:", name);
        print_rows(rows);
    }

    let envelope = value.as_object();
    if let Some(Value::Array(warnings)) = envelope.and_then(|m| m.get("warnings")) {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }
    if let Some(Value::String(meth)) = envelope.and_then(|m| m.get("methodology")) {
        println!("\nMethodology: {}", meth);
    }
}

fn print_rows(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }
    let (headers, flat_rows) = flatten_rows(rows);
    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(String::as_str));
    for row in &flat_rows {
        let cells: Vec<&str> = headers
            .iter()
            .map(|h| {
                row.iter()
                    .find(|(k, _)| k == h)
                    .map(|(_, v)| v.as_str())
                    .unwrap_or("")
            })
            .collect();
        builder.push_record(cells);
    }
    println!("{}", Table::from(builder));
}
