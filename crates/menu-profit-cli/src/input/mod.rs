pub mod file;

use menu_profit_core::catalog::csv_loader::read_catalog_csv;
use menu_profit_core::catalog::json::catalog_from_json;
use menu_profit_core::catalog::ProductRow;
use serde_json::Value;
use std::io::{self, Read};

/// Load the product table from `--data`, falling back to a piped table on stdin.
pub fn load_catalog(data: Option<&str>) -> Result<Vec<ProductRow>, Box<dyn std::error::Error>> {
    if let Some(path) = data {
        return file::read_catalog(path);
    }
    match read_piped()? {
        Some(body) => parse_catalog_text(&body),
        None => Err("--data <file.csv|file.json> or a CSV/JSON table on stdin required".into()),
    }
}

/// Whole of stdin when it is piped and non-empty. A TTY yields nothing.
fn read_piped() -> io::Result<Option<String>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut body = String::new();
    io::stdin().read_to_string(&mut body)?;
    Ok(Some(body).filter(|b| !b.trim().is_empty()))
}

/// A body opening with `[` or `{` is a JSON table, anything else a CSV table.
fn parse_catalog_text(body: &str) -> Result<Vec<ProductRow>, Box<dyn std::error::Error>> {
    let trimmed = body.trim_start();
    let rows = if trimmed.starts_with('[') || trimmed.starts_with('{') {
        let value: Value = serde_json::from_str(trimmed)
            .map_err(|e| format!("Failed to parse JSON on stdin: {}", e))?;
        catalog_from_json(&value)?
    } else {
        read_catalog_csv(trimmed.as_bytes())?
    };
    tracing::debug!(rows = rows.len(), "catalog read from stdin");
    Ok(rows)
}
