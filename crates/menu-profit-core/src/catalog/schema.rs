use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MenuProfitError;
use crate::types::{Money, Quantity};
use crate::MenuProfitResult;

// ---------------------------------------------------------------------------
// Column names (case-sensitive)
// ---------------------------------------------------------------------------

pub const COL_PRODUCT_NAME: &str = "product_name";
pub const COL_CATEGORY: &str = "category";
pub const COL_SALE_PRICE: &str = "sale_price";
pub const COL_PRIME_COST: &str = "prime_cost";
pub const COL_SALES_Q1: &str = "sales_q1";
pub const COL_SALES_Q2: &str = "sales_q2";
pub const COL_SALES_Q3: &str = "sales_q3";
pub const COL_SALES_Q4: &str = "sales_q4";

/// Every column an input table must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    COL_PRODUCT_NAME,
    COL_CATEGORY,
    COL_SALE_PRICE,
    COL_PRIME_COST,
    COL_SALES_Q1,
    COL_SALES_Q2,
    COL_SALES_Q3,
    COL_SALES_Q4,
];

/// Largest accepted price, cost or quarterly quantity. Keeps every derived
/// product, sum and share inside `Decimal` range.
pub const MAX_CELL_VALUE: Decimal = dec!(1000000000);

/// Quarterly quantity columns in calendar order.
pub const QUARTER_COLUMNS: [&str; 4] = [COL_SALES_Q1, COL_SALES_Q2, COL_SALES_Q3, COL_SALES_Q4];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One catalog item with its unit economics and quarterly volumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    /// Display name, not required to be unique
    pub product_name: String,
    pub category: String,
    /// Unit sale price
    pub sale_price: Money,
    /// Unit prime (variable) cost
    pub prime_cost: Money,
    pub sales_q1: Quantity,
    pub sales_q2: Quantity,
    pub sales_q3: Quantity,
    pub sales_q4: Quantity,
}

impl ProductRow {
    /// Quarterly quantities in calendar order.
    pub fn quarterly_sales(&self) -> [Quantity; 4] {
        [self.sales_q1, self.sales_q2, self.sales_q3, self.sales_q4]
    }

    /// Sale price minus prime cost. Negative when the item sells below cost.
    pub fn unit_margin(&self) -> Money {
        self.sale_price - self.prime_cost
    }

    /// Reject negative or out-of-range prices, costs and quantities. `row` is
    /// the one-based row number used in the error message.
    pub fn validate(&self, row: usize) -> MenuProfitResult<()> {
        let checks: [(&str, Decimal); 6] = [
            (COL_SALE_PRICE, self.sale_price),
            (COL_PRIME_COST, self.prime_cost),
            (COL_SALES_Q1, self.sales_q1),
            (COL_SALES_Q2, self.sales_q2),
            (COL_SALES_Q3, self.sales_q3),
            (COL_SALES_Q4, self.sales_q4),
        ];
        for (column, value) in checks {
            if value < Decimal::ZERO {
                return Err(MenuProfitError::InvalidInput {
                    field: format!("{} (row {})", column, row),
                    reason: format!("must be non-negative, got {}", value),
                });
            }
            if value > MAX_CELL_VALUE {
                return Err(MenuProfitError::InvalidInput {
                    field: format!("{} (row {})", column, row),
                    reason: format!("must not exceed {}, got {}", MAX_CELL_VALUE, value),
                });
            }
        }
        Ok(())
    }
}

/// Parse a numeric cell. Accepts plain and scientific notation.
pub(crate) fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(trimmed).ok())
}

/// Validate every row of a table. Row numbers start at 1.
pub fn validate_rows(rows: &[ProductRow]) -> MenuProfitResult<()> {
    rows.iter()
        .enumerate()
        .try_for_each(|(i, row)| row.validate(i + 1))
}


#[cfg(test)]
mod tests {
    use super::fixtures::product;
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_unit_margin() {
        let row = product("Carbonara", "Pasta", dec!(12), dec!(4.5), [dec!(1); 4]);
        assert_eq!(row.unit_margin(), dec!(7.5));
    }

    #[test]
    fn test_unit_margin_below_cost_is_negative() {
        let row = product("Promo", "Pizza", dec!(3), dec!(5), [dec!(1); 4]);
        assert_eq!(row.unit_margin(), dec!(-2));
    }

    #[test]
    fn test_validate_accepts_zero_price() {
        let row = product("Water", "Drinks", dec!(0), dec!(0), [dec!(0); 4]);
        assert!(row.validate(1).is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_quantity() {
        let quarters = [dec!(1), dec!(-3), dec!(0), dec!(0)];
        let row = product("Tiramisu", "Dessert", dec!(6), dec!(2), quarters);
        let err = row.validate(4).unwrap_err();
        match err {
            MenuProfitError::InvalidInput { field, .. } => assert_eq!(field, "sales_q2 (row 4)"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_decimal_variants() {
        assert_eq!(parse_decimal(" 12.50 "), Some(dec!(12.50)));
        assert_eq!(parse_decimal("1e2"), Some(dec!(100)));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("twelve"), None);
    }

    #[test]
    fn test_validate_rows_reports_first_offender() {
        let rows = vec![
            product("A", "X", dec!(1), dec!(0), [dec!(1); 4]),
            product("B", "X", dec!(-1), dec!(0), [dec!(1); 4]),
        ];
        let err = validate_rows(&rows).unwrap_err();
        assert!(err.to_string().contains("sale_price (row 2)"));
    }

    #[test]
    fn test_validate_rejects_oversized_cells() {
        let price = dec!(100000000000000000000);
        let huge_price = product("Yacht", "Toys", price, dec!(1), [dec!(1); 4]);
        let err = huge_price.validate(1).unwrap_err();
        assert!(err.to_string().contains("sale_price (row 1)"));

        let quarters = [dec!(10000000000), dec!(0), dec!(0), dec!(0)];
        let huge_volume = product("Salt", "Pantry", dec!(1), dec!(0), quarters);
        assert!(huge_volume.validate(1).is_err());
    }

    #[test]
    fn test_validate_accepts_cell_at_limit() {
        let row = product("Bulk", "Pantry", MAX_CELL_VALUE, dec!(0), [MAX_CELL_VALUE; 4]);
        assert!(row.validate(1).is_ok());
    }
}
