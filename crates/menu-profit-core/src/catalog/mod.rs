pub mod schema;

pub mod json;

#[cfg(feature = "csv")]
pub mod csv_loader;

pub use schema::{ProductRow, REQUIRED_COLUMNS};
