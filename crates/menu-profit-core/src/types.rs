use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::MenuProfitError;
use crate::MenuProfitResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%).
pub type Rate = Decimal;

/// Percentages expressed on a 0-100 scale (5 = 5%).
pub type Percent = Decimal;

/// Units sold. Fractional quantities are allowed (e.g. kilograms).
pub type Quantity = Decimal;

/// Divide, returning zero when the denominator is zero.
///
/// Every ratio in the crate goes through this so that empty periods, new
/// products and zero-priced items resolve to 0 instead of an error. A
/// quotient outside `Decimal` range also resolves to 0; use [`checked_ratio`]
/// where that must surface as an error.
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or_else(|| {
        tracing::warn!(%numerator, %denominator, "ratio out of range; reported as zero");
        Decimal::ZERO
    })
}

/// Like [`safe_div`] (zero for a zero denominator), but a quotient outside
/// `Decimal` range is an `InvalidInput` naming `field`.
pub fn checked_ratio(
    field: &str,
    numerator: Decimal,
    denominator: Decimal,
) -> MenuProfitResult<Decimal> {
    if denominator.is_zero() {
        return Ok(Decimal::ZERO);
    }
    numerator
        .checked_div(denominator)
        .ok_or_else(|| MenuProfitError::InvalidInput {
            field: field.to_string(),
            reason: format!("{} / {} is out of range", numerator, denominator),
        })
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
