use rust_decimal::Decimal;
use serde_json::{Map, Value};

use super::schema::{
    parse_decimal, validate_rows, ProductRow, COL_CATEGORY, COL_PRIME_COST, COL_PRODUCT_NAME,
    COL_SALES_Q1, COL_SALES_Q2, COL_SALES_Q3, COL_SALES_Q4, COL_SALE_PRICE, REQUIRED_COLUMNS,
};
use crate::error::MenuProfitError;
use crate::MenuProfitResult;

/// Build a product table from JSON.
///
/// Accepts either an array of row objects or an object with a `products`
/// array. Every row must carry all of [`REQUIRED_COLUMNS`]; numeric cells may
/// be JSON numbers or numeric strings. Row numbers in errors start at 1.
pub fn catalog_from_json(value: &Value) -> MenuProfitResult<Vec<ProductRow>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("products") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(MenuProfitError::InvalidInput {
                    field: "products".to_string(),
                    reason: "expected an array of product rows".to_string(),
                })
            }
        },
        _ => {
            return Err(MenuProfitError::InvalidInput {
                field: "input".to_string(),
                reason: "expected a JSON array or an object with a 'products' array".to_string(),
            })
        }
    };

    let rows = items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(obj) => row_from_object(i + 1, obj),
            _ => Err(MenuProfitError::InvalidInput {
                field: format!("products (row {})", i + 1),
                reason: "expected an object".to_string(),
            }),
        })
        .collect::<MenuProfitResult<Vec<ProductRow>>>()?;

    validate_rows(&rows)?;
    Ok(rows)
}

fn row_from_object(row: usize, obj: &Map<String, Value>) -> MenuProfitResult<ProductRow> {
    if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !obj.contains_key(**c)) {
        return Err(MenuProfitError::MissingColumn {
            column: missing.to_string(),
        });
    }

    Ok(ProductRow {
        product_name: text_cell(obj, COL_PRODUCT_NAME),
        category: text_cell(obj, COL_CATEGORY),
        sale_price: numeric_cell(row, obj, COL_SALE_PRICE)?,
        prime_cost: numeric_cell(row, obj, COL_PRIME_COST)?,
        sales_q1: numeric_cell(row, obj, COL_SALES_Q1)?,
        sales_q2: numeric_cell(row, obj, COL_SALES_Q2)?,
        sales_q3: numeric_cell(row, obj, COL_SALES_Q3)?,
        sales_q4: numeric_cell(row, obj, COL_SALES_Q4)?,
    })
}

fn text_cell(obj: &Map<String, Value>, column: &str) -> String {
    match obj.get(column) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn numeric_cell(row: usize, obj: &Map<String, Value>, column: &str) -> MenuProfitResult<Decimal> {
    let raw = match obj.get(column) {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    parse_decimal(&raw).ok_or_else(|| MenuProfitError::NonNumericValue {
        row,
        column: column.to_string(),
        value: raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn row_json() -> Value {
        json!({
            "product_name": "Margherita",
            "category": "Pizza",
            "sale_price": 8.5,
            "prime_cost": "2.10",
            "sales_q1": 120,
            "sales_q2": 140,
            "sales_q3": 160,
            "sales_q4": 110
        })
    }

    #[test]
    fn test_array_of_rows() {
        let rows = catalog_from_json(&json!([row_json()])).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_name, "Margherita");
        assert_eq!(rows[0].sale_price, dec!(8.5));
        assert_eq!(rows[0].prime_cost, dec!(2.10));
        assert_eq!(rows[0].sales_q3, dec!(160));
    }

    #[test]
    fn test_products_envelope() {
        let rows = catalog_from_json(&json!({ "products": [row_json(), row_json()] })).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_missing_column() {
        let mut row = row_json();
        row.as_object_mut().unwrap().remove("sales_q4");
        let err = catalog_from_json(&json!([row])).unwrap_err();
        match err {
            MenuProfitError::MissingColumn { column } => assert_eq!(column, "sales_q4"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_column_names_are_case_sensitive() {
        let mut row = row_json();
        let obj = row.as_object_mut().unwrap();
        let price = obj.remove("sale_price").unwrap();
        obj.insert("Sale_Price".to_string(), price);
        assert!(matches!(
            catalog_from_json(&json!([row])),
            Err(MenuProfitError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_non_numeric_cell() {
        let mut row = row_json();
        row["sales_q2"] = json!("lots");
        let err = catalog_from_json(&json!([row_json(), row])).unwrap_err();
        match err {
            MenuProfitError::NonNumericValue { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, "sales_q2");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_null_numeric_is_rejected() {
        let mut row = row_json();
        row["prime_cost"] = Value::Null;
        assert!(matches!(
            catalog_from_json(&json!([row])),
            Err(MenuProfitError::NonNumericValue { .. })
        ));
    }

    #[test]
    fn test_scalar_input_rejected() {
        assert!(matches!(
            catalog_from_json(&json!(42)),
            Err(MenuProfitError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_row_numbers_are_one_based_everywhere() {
        let err = catalog_from_json(&json!([row_json(), "oops"])).unwrap_err();
        assert!(err.to_string().contains("products (row 2)"));

        let mut negative = row_json();
        negative["prime_cost"] = json!(-1);
        let err = catalog_from_json(&json!([row_json(), negative])).unwrap_err();
        assert!(err.to_string().contains("prime_cost (row 2)"));
    }

    #[test]
    fn test_oversized_cells_rejected_at_load() {
        let mut row = row_json();
        row["sale_price"] = json!("100000000000000000000");
        row["sales_q1"] = json!("10000000000");
        let err = catalog_from_json(&json!([row])).unwrap_err();
        assert!(matches!(err, MenuProfitError::InvalidInput { .. }));
    }
}
