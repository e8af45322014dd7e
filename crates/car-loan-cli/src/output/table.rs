use colored::Colorize;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_scalar, HIDDEN_COLUMNS};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    let Value::Object(map) = value else {
        println!("{}", format_scalar(value));
        return;
    };

    match map.get("result") {
        Some(Value::Array(rows)) => print_rows_table(rows),
        Some(Value::Object(result)) => print_result_object(result),
        _ => print_flat_object(map),
    }

    if let Some(Value::Array(warnings)) = map.get("warnings") {
        if !warnings.is_empty() {
            println!("\n{}", "Warnings:".yellow().bold());
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }
}

/// Summary text verbatim, then any remaining scalar fields.
fn print_result_object(result: &Map<String, Value>) {
    if let Some(Value::String(text)) = result.get("summary_text") {
        println!("{}", text);
    }

    let scalars: Vec<(&String, &Value)> = result
        .iter()
        .filter(|(k, v)| k.as_str() != "summary_text" && !v.is_object() && !v.is_array())
        .collect();
    if scalars.is_empty() {
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in scalars {
        builder.push_record([key.clone(), format_scalar(val)]);
    }
    println!("\n{}", Table::from(builder));
}

fn print_flat_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.clone(), format_scalar(val)]);
    }
    println!("{}", Table::from(builder));
}

fn header_label(key: &str) -> String {
    match key {
        "apr" => "APR".to_string(),
        "interest_pct_of_principal" => "Interest % of Principal".to_string(),
        other => other
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Colour a difference cell by the row's tone.
fn paint_difference(text: &str, tone: Option<&str>) -> String {
    match tone {
        Some("favorable") => text.green().to_string(),
        Some("neutral") => text.yellow().to_string(),
        Some("costlier") => text.red().to_string(),
        _ => text.to_string(),
    }
}

fn print_rows_table(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        println!("(empty)");
        return;
    };

    let headers: Vec<&String> = first
        .keys()
        .filter(|k| !HIDDEN_COLUMNS.contains(&k.as_str()))
        .collect();

    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(|h| header_label(h)));

    for item in rows {
        if let Value::Object(map) = item {
            let tone = map.get("tone").and_then(Value::as_str);
            let row: Vec<String> = headers
                .iter()
                .map(|h| {
                    let cell = map.get(h.as_str()).map(format_scalar).unwrap_or_default();
                    if h.as_str() == "difference" {
                        paint_difference(&cell, tone)
                    } else {
                        cell
                    }
                })
                .collect();
            builder.push_record(row);
        }
    }

    println!("{}", Table::from(builder));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header_labels() {
        assert_eq!(header_label("apr"), "APR");
        assert_eq!(header_label("monthly_payment"), "Monthly Payment");
        assert_eq!(header_label("interest_pct_of_principal"), "Interest % of Principal");
    }

    #[test]
    fn test_uncoloured_without_tone() {
        assert_eq!(paint_difference("-", None), "-");
    }
}
