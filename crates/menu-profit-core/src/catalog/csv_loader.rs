//! CSV catalog loader.
//!
//! Expected header (case-sensitive, any order, extra columns ignored):
//!   product_name, category, sale_price, prime_cost,
//!   sales_q1, sales_q2, sales_q3, sales_q4

use rust_decimal::Decimal;
use std::io::Read;

use super::schema::{
    parse_decimal, validate_rows, ProductRow, COL_CATEGORY, COL_PRIME_COST, COL_PRODUCT_NAME,
    COL_SALES_Q1, COL_SALES_Q2, COL_SALES_Q3, COL_SALES_Q4, COL_SALE_PRICE, REQUIRED_COLUMNS,
};
use crate::error::MenuProfitError;
use crate::MenuProfitResult;

/// Header positions of the required columns.
struct ColumnIndex {
    positions: Vec<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> MenuProfitResult<Self> {
        let positions = REQUIRED_COLUMNS
            .iter()
            .map(|column| {
                headers
                    .iter()
                    .position(|h| h == *column)
                    .ok_or_else(|| MenuProfitError::MissingColumn {
                        column: column.to_string(),
                    })
            })
            .collect::<MenuProfitResult<Vec<usize>>>()?;
        Ok(Self { positions })
    }

    fn get<'r>(&self, record: &'r csv::StringRecord, column: &str) -> &'r str {
        REQUIRED_COLUMNS
            .iter()
            .position(|c| *c == column)
            .and_then(|i| record.get(self.positions[i]))
            .unwrap_or("")
    }

    fn numeric(
        &self,
        row: usize,
        record: &csv::StringRecord,
        column: &str,
    ) -> MenuProfitResult<Decimal> {
        let raw = self.get(record, column);
        parse_decimal(raw).ok_or_else(|| MenuProfitError::NonNumericValue {
            row,
            column: column.to_string(),
            value: raw.to_string(),
        })
    }
}

/// Load a product table from a CSV reader. Row numbers in errors start at 1
/// for the first data row.
pub fn read_catalog_csv<R: Read>(reader: R) -> MenuProfitResult<Vec<ProductRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let index = ColumnIndex::from_headers(csv_reader.headers()?)?;

    let mut rows = Vec::new();
    for (i, result) in csv_reader.records().enumerate() {
        let record = result?;
        let row = i + 1;
        rows.push(ProductRow {
            product_name: index.get(&record, COL_PRODUCT_NAME).to_string(),
            category: index.get(&record, COL_CATEGORY).to_string(),
            sale_price: index.numeric(row, &record, COL_SALE_PRICE)?,
            prime_cost: index.numeric(row, &record, COL_PRIME_COST)?,
            sales_q1: index.numeric(row, &record, COL_SALES_Q1)?,
            sales_q2: index.numeric(row, &record, COL_SALES_Q2)?,
            sales_q3: index.numeric(row, &record, COL_SALES_Q3)?,
            sales_q4: index.numeric(row, &record, COL_SALES_Q4)?,
        });
    }

    validate_rows(&rows)?;
    tracing::debug!(rows = rows.len(), "loaded catalog from CSV");
    Ok(rows)
}

/// Load a product table from a CSV file path.
pub fn read_catalog_csv_file(path: &str) -> MenuProfitResult<Vec<ProductRow>> {
    let file = std::fs::File::open(path).map_err(|e| MenuProfitError::InvalidInput {
        field: "path".to_string(),
        reason: format!("failed to open '{}': {}", path, e),
    })?;
    read_catalog_csv(file)
}
