use serde_json::Value;
use std::io;

use super::{flatten_rows, result_body, split_body};

/// Write the result as CSV to stdout.
///
/// A body holding a list of results (batch) becomes one row per result with
/// dotted column names; a single result becomes `field,value` pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    let (fields, tables) = split_body(result_body(value));

    if let Some((_, rows)) = tables.first() {
        let (headers, flat_rows) = flatten_rows(rows);
        let _ = wtr.write_record(&headers);
        for row in &flat_rows {
            let record: Vec<&str> = headers
                .iter()
                .map(|h| {
                    row.iter()
                        .find(|(k, _)| k == h)
                        .map(|(_, v)| v.as_str())
                        .unwrap_or("")
                })
                .collect();
            let _ = wtr.write_record(&record);
        }
    } else {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in &fields {
            let _ = wtr.write_record([key.as_str(), val.as_str()]);
        }
    }

    let _ = wtr.flush();
}
