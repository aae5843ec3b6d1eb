pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => emit("JSON", serde_json::to_string_pretty(value).map(|s| s + "\n")),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        // Decimals stay quoted strings, as in the JSON form.
        OutputFormat::Yaml => emit("YAML", serde_yaml::to_string(value)),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

fn emit<E: std::fmt::Display>(kind: &str, rendered: Result<String, E>) {
    match rendered {
        Ok(text) => print!("{}", text),
        Err(e) => eprintln!("{} serialization error: {}", kind, e),
    }
}
