use menu_profit_core::catalog::csv_loader::read_catalog_csv_file;
use menu_profit_core::catalog::json::catalog_from_json;
use menu_profit_core::catalog::ProductRow;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Load a product table, picking the parser from the file extension.
/// `.csv` goes through the CSV loader, anything else is read as JSON.
pub fn read_catalog(path: &str) -> Result<Vec<ProductRow>, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let is_csv = canonical
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let rows = if is_csv {
        read_catalog_csv_file(&canonical.to_string_lossy())?
    } else {
        catalog_from_json(&read_json_value(path)?)?
    };
    tracing::debug!(path = %canonical.display(), rows = rows.len(), "catalog loaded");
    Ok(rows)
}

/// Read a JSON file as a generic serde_json::Value.
pub fn read_json_value(path: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    let value: Value = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
    Ok(value)
}

/// Resolve and validate the path.
fn resolve_path(path: &str) -> Result<std::path::PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}
