use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate.
///
/// Scalar fields of an object share one Field/Value table; arrays of objects
/// and nested objects get their own titled tables.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_section(None, result);
                print_envelope_notes(map);
            } else {
                print_object(None, map);
            }
        }
        Value::Array(arr) => print_array_table(None, arr),
        _ => println!("{}", value),
    }
}

fn print_section(title: Option<&str>, value: &Value) {
    match value {
        Value::Object(map) => print_object(title, map),
        Value::Array(arr) => print_array_table(title, arr),
        other => {
            print_title(title);
            println!("{}", format_value(other));
        }
    }
}

fn print_object(title: Option<&str>, map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut has_scalars = false;
    let mut nested: Vec<(&String, &Value)> = Vec::new();

    for (key, val) in map {
        match val {
            Value::Object(_) => nested.push((key, val)),
            Value::Array(arr) if arr.iter().any(Value::is_object) => nested.push((key, val)),
            _ => {
                builder.push_record([key.as_str(), &format_value(val)]);
                has_scalars = true;
            }
        }
    }

    if has_scalars {
        print_title(title);
        println!("{}", Table::from(builder));
    }

    for (key, val) in nested {
        let child = match title {
            Some(parent) => format!("{}.{}", parent, key),
            None => key.clone(),
        };
        println!();
        print_section(Some(&child), val);
    }
}

fn print_array_table(title: Option<&str>, arr: &[Value]) {
    print_title(title);
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    // Insight lists read better as their rendered Markdown
    if arr.iter().all(|item| item.get("markdown").is_some()) {
        for item in arr {
            if let Some(Value::String(md)) = item.get("markdown") {
                println!("{}\n", md);
            }
        }
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_title(title: Option<&str>) {
    if let Some(t) = title {
        println!("{}:", t);
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
