use serde_json::Value;

use super::format_scalar;

/// Print just the key answer from the output.
///
/// Row results print one `APR<TAB>monthly payment` line per row; object
/// results print the summary text, else the first field.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Array(rows) => {
            for row in rows {
                let apr = row.get("apr").map(format_scalar).unwrap_or_default();
                let payment = row
                    .get("monthly_payment")
                    .map(format_scalar)
                    .unwrap_or_default();
                println!("{}\t{}", apr, payment);
            }
        }
        Value::Object(map) => {
            if let Some(Value::String(text)) = map.get("summary_text") {
                println!("{}", text);
            } else if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, format_scalar(val));
            }
        }
        other => println!("{}", format_scalar(other)),
    }
}
