use serde_json::Value;

/// Print just the key answer from the output.
///
/// Insight lists print their Markdown blocks. Otherwise look for well-known
/// result fields in order of priority (descending into a `kpis` object),
/// then fall back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    // Try to extract the "result" envelope
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some(blocks) = markdown_blocks(result_obj) {
        println!("{}", blocks.join("\n\n"));
        return;
    }

    let priority_keys = [
        "break_even_revenue",
        "total_margin",
        "gross_profit_pct",
        "total_revenue",
    ];

    if let Value::Object(map) = result_obj {
        let scopes = [map.get("kpis").and_then(Value::as_object), Some(map)];
        for scope in scopes.into_iter().flatten() {
            for key in &priority_keys {
                if let Some(val) = scope.get(*key) {
                    if !val.is_null() {
                        println!("{}", format_minimal(val));
                        return;
                    }
                }
            }
        }

        // Fall back to first field
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    // Not an object, just print directly
    println!("{}", format_minimal(result_obj));
}

/// Markdown of every insight in an insight list, `None` for anything else.
fn markdown_blocks(value: &Value) -> Option<Vec<&str>> {
    let items = value.as_array()?;
    if items.is_empty() {
        return None;
    }
    items
        .iter()
        .map(|item| item.get("markdown").and_then(Value::as_str))
        .collect()
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
