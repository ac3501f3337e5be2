use serde_json::Value;

use super::{flatten, result_body};

/// Fields worth printing on their own, in priority order.
const PRIORITY_KEYS: [&str; 2] = ["aggregates.monthly_payment", "succeeded"];

/// Print just the key answer: the monthly payment for a single calculation,
/// the success count for a batch, otherwise the first field.
pub fn print_minimal(value: &Value) {
    let mut fields = Vec::new();
    flatten("", result_body(value), &mut fields);

    for key in PRIORITY_KEYS {
        if let Some((_, val)) = fields.iter().find(|(k, _)| k == key) {
            println!("{}", val);
            return;
        }
    }

    match fields.first() {
        Some((key, val)) if !key.is_empty() => println!("{}: {}", key, val),
        Some((_, val)) => println!("{}", val),
        None => println!(),
    }
}
