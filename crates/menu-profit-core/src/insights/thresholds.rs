//! Business thresholds for the insight rules. Fixed by design, not tunable
//! per call.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fraction of products (by margin, descending) checked for concentration.
pub const PARETO_TOP_FRACTION: Decimal = dec!(0.2);
/// Concentration is flagged when the top slice holds more than this share.
pub const PARETO_SHARE_THRESHOLD: Decimal = dec!(0.8);

/// Fraction of products (by margin, ascending) checked for a long tail.
pub const LONG_TAIL_BOTTOM_FRACTION: Decimal = dec!(0.5);
/// A long tail is flagged when the bottom slice holds less than this share.
pub const LONG_TAIL_SHARE_THRESHOLD: Decimal = dec!(0.05);

/// Revenue share minus margin share, in percentage points.
pub const WORKHORSE_GAP_PP: Decimal = dec!(15);
/// Margin share minus revenue share, in percentage points.
pub const GOLDMINE_GAP_PP: Decimal = dec!(10);

/// Period-over-period margin change below which a decline is reported.
pub const NEGATIVE_TREND_THRESHOLD: Decimal = dec!(-0.05);
/// Period-over-period margin change above which growth is reported.
pub const POSITIVE_TREND_THRESHOLD: Decimal = dec!(0.10);
