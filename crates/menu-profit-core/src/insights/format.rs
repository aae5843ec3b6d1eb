use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::InsightRule;
use crate::types::{Percent, Rate};

/// Render a value already on the 0-100 scale with a fixed number of decimals.
/// Ties round half to even so output is stable across runs and platforms.
pub fn format_pct_value(value: Percent, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointNearestEven);
    format!("{:.*}", decimals as usize, rounded)
}

/// Render a ratio (0.9) as a percentage number ("90") without the sign.
pub fn format_ratio_as_pct(ratio: Rate, decimals: u32) -> String {
    format_pct_value(ratio * dec!(100), decimals)
}

/// Absolute value of a ratio, rendered as a percentage.
pub fn format_ratio_magnitude(ratio: Rate, decimals: u32) -> String {
    format_ratio_as_pct(ratio.abs(), decimals)
}

/// Assemble the Markdown block shown to the analyst.
pub fn render_markdown(
    rule: InsightRule,
    headline: &str,
    observation: &str,
    implication: &str,
    recommendation: &str,
) -> String {
    let title = match rule.marker() {
        Some(marker) => format!("{} **{}:**", marker, headline),
        None => format!("**Insight - {}:**", headline),
    };
    format!(
        "{}\n\n* **Observation:** {}\n* **Implication:** {}\n* **Recommendation:** {}",
        title, observation, implication, recommendation
    )
}

/// Number of rows in a leading slice of `n` rows: `round(n * fraction)` with
/// ties to even, never less than one.
pub fn slice_len(n: usize, fraction: Decimal) -> usize {
    use rust_decimal::prelude::ToPrimitive;

    let raw = (Decimal::from(n) * fraction)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
    raw.to_usize().unwrap_or(0).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_whole_percent() {
        assert_eq!(format_ratio_as_pct(dec!(0.9), 0), "90");
        assert_eq!(format_pct_value(dec!(42.4), 0), "42");
    }

    #[test]
    fn test_format_pads_decimals() {
        assert_eq!(format_pct_value(dec!(3), 1), "3.0");
        assert_eq!(format_ratio_as_pct(dec!(-0.06), 1), "-6.0");
    }

    #[test]
    fn test_format_ties_to_even() {
        assert_eq!(format_pct_value(dec!(4.25), 1), "4.2");
        assert_eq!(format_pct_value(dec!(4.35), 1), "4.4");
        assert_eq!(format_pct_value(dec!(82.5), 0), "82");
    }

    #[test]
    fn test_magnitude() {
        assert_eq!(format_ratio_magnitude(dec!(-0.06), 1), "6.0");
        assert_eq!(format_ratio_magnitude(dec!(0.105), 1), "10.5");
    }

    #[test]
    fn test_trend_marker_title() {
        let md = render_markdown(
            InsightRule::PositiveTrend,
            "Positive Trend Detected",
            "o",
            "i",
            "r",
        );
        assert!(md.starts_with("✅ **Positive Trend Detected:**\n\n"));
    }

    #[test]
    fn test_slice_len() {
        assert_eq!(slice_len(0, dec!(0.2)), 1);
        assert_eq!(slice_len(3, dec!(0.2)), 1);
        assert_eq!(slice_len(8, dec!(0.2)), 2);
        assert_eq!(slice_len(10, dec!(0.2)), 2);
        assert_eq!(slice_len(1, dec!(0.5)), 1);
        // 2.5 rounds to 2, 3.5 rounds to 4
        assert_eq!(slice_len(5, dec!(0.5)), 2);
        assert_eq!(slice_len(7, dec!(0.5)), 4);
    }
}
