use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::catalog::schema::{validate_rows, ProductRow};
use crate::types::{safe_div, Money, Percent, Quantity};
use crate::MenuProfitResult;

/// A product row with its full-year derived figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualizedRow {
    #[serde(flatten)]
    pub product: ProductRow,
    /// sales_q1 + sales_q2 + sales_q3 + sales_q4
    pub total_quantity: Quantity,
    /// sale_price * total_quantity
    pub total_revenue: Money,
    /// sale_price - prime_cost
    pub unit_margin: Money,
    /// unit_margin * total_quantity
    pub total_margin: Money,
    /// unit_margin / sale_price * 100, zero when the price is not positive
    pub margin_pct: Percent,
}

impl AnnualizedRow {
    /// Derive the annual figures. Expects a row that passed
    /// [`ProductRow::validate`], which keeps every product in range.
    pub fn from_product(product: &ProductRow) -> Self {
        let total_quantity: Quantity = product.quarterly_sales().iter().copied().sum();
        let unit_margin = product.unit_margin();
        let margin_pct = if product.sale_price > Decimal::ZERO {
            safe_div(unit_margin, product.sale_price) * dec!(100)
        } else {
            Decimal::ZERO
        };

        AnnualizedRow {
            product: product.clone(),
            total_quantity,
            total_revenue: product.sale_price * total_quantity,
            unit_margin,
            total_margin: unit_margin * total_quantity,
            margin_pct,
        }
    }
}

/// Expand a raw product table into annualized rows, one per input row and in
/// the same order. The input is borrowed and left untouched.
pub fn enrich(rows: &[ProductRow]) -> MenuProfitResult<Vec<AnnualizedRow>> {
    validate_rows(rows)?;
    Ok(rows.iter().map(AnnualizedRow::from_product).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::schema::fixtures::product;
    use crate::error::MenuProfitError;

    fn menu() -> Vec<ProductRow> {
        vec![
            product(
                "Margherita",
                "Pizza",
                dec!(8),
                dec!(2),
                [dec!(10), dec!(20), dec!(30), dec!(40)],
            ),
            product("Tiramisu", "Dessert", dec!(5), dec!(4), [dec!(1), dec!(1), dec!(1), dec!(1)]),
            product("Water", "Drinks", dec!(0), dec!(0.2), [dec!(5), dec!(5), dec!(5), dec!(5)]),
        ]
    }

    #[test]
    fn test_annual_totals() {
        let out = enrich(&menu()).unwrap();
        assert_eq!(out[0].total_quantity, dec!(100));
        assert_eq!(out[0].total_revenue, dec!(800));
        assert_eq!(out[0].unit_margin, dec!(6));
        assert_eq!(out[0].total_margin, dec!(600));
        assert_eq!(out[0].margin_pct, dec!(75));
    }

    #[test]
    fn test_margin_pct_exact_ratio() {
        let out = enrich(&menu()).unwrap();
        // (5 - 4) / 5 * 100
        assert_eq!(out[1].margin_pct, dec!(20));
    }

    #[test]
    fn test_zero_price_margin_pct_is_zero() {
        let out = enrich(&menu()).unwrap();
        assert_eq!(out[2].margin_pct, Decimal::ZERO);
        assert_eq!(out[2].total_revenue, Decimal::ZERO);
        // Selling at zero still loses the prime cost
        assert_eq!(out[2].total_margin, dec!(-4.0));
    }

    #[test]
    fn test_preserves_order_and_input() {
        let rows = menu();
        let before = rows.clone();
        let out = enrich(&rows).unwrap();
        assert_eq!(rows, before);
        let names: Vec<&str> = out.iter().map(|r| r.product.product_name.as_str()).collect();
        assert_eq!(names, vec!["Margherita", "Tiramisu", "Water"]);
    }

    #[test]
    fn test_empty_table() {
        assert!(enrich(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_negative_cost_rejected() {
        let rows = vec![product("Bad", "X", dec!(1), dec!(-1), [dec!(1); 4])];
        assert!(matches!(enrich(&rows), Err(MenuProfitError::InvalidInput { .. })));
    }

    #[test]
    fn test_serializes_flat() {
        let out = enrich(&menu()).unwrap();
        let value = serde_json::to_value(&out[0]).unwrap();
        assert_eq!(value["product_name"], "Margherita");
        assert!(value.get("product").is_none());
        assert!(value.get("margin_pct").is_some());
    }

    #[test]
    fn test_out_of_range_row_rejected_before_arithmetic() {
        let quarters = [dec!(10000000000), dec!(0), dec!(0), dec!(0)];
        let price = dec!(100000000000000000000);
        let rows = vec![product("Bulk", "Pantry", price, dec!(1), quarters)];
        assert!(matches!(enrich(&rows), Err(MenuProfitError::InvalidInput { .. })));
    }

    #[test]
    fn test_repeat_runs_serialize_identically() {
        let rows = menu();
        let first = serde_json::to_string(&enrich(&rows).unwrap()).unwrap();
        let second = serde_json::to_string(&enrich(&rows).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
