use super::format::format_ratio_magnitude;
use super::thresholds::{NEGATIVE_TREND_THRESHOLD, POSITIVE_TREND_THRESHOLD};
use super::{Insight, InsightRule};
use crate::analytics::kpi::{relative_change, KpiSnapshot};

/// Compare total contribution margin against the prior period.
///
/// Emits at most one insight. Nothing is reported without a prior snapshot,
/// when the prior margin is zero (the change is undefined), or when the change
/// stays within the -5% / +10% band.
pub fn analyze_trend(current: &KpiSnapshot, prior: Option<&KpiSnapshot>) -> Vec<Insight> {
    let Some(prior) = prior else {
        return Vec::new();
    };
    let Some(change) = relative_change(current.total_margin, prior.total_margin) else {
        tracing::debug!("prior margin is zero; trend not reportable");
        return Vec::new();
    };

    if change < NEGATIVE_TREND_THRESHOLD {
        tracing::debug!(%change, "negative margin trend");
        vec![Insight::new(
            InsightRule::NegativeTrend,
            None,
            "Negative Trend Detected",
            format!(
                "Total margin dropped by {}% compared with the previous period.",
                format_ratio_magnitude(change, 1)
            ),
            "Overall profitability is shrinking, pointing to a possible cost problem or \
             falling sales of the most profitable products.",
            "Investigate how the star products performed in this period and check for \
             increases in prime costs.",
        )]
    } else if change > POSITIVE_TREND_THRESHOLD {
        tracing::debug!(%change, "positive margin trend");
        vec![Insight::new(
            InsightRule::PositiveTrend,
            None,
            "Positive Trend Detected",
            format!(
                "Total margin grew by {}% compared with the previous period.",
                format_ratio_magnitude(change, 1)
            ),
            "The strategies in place are producing excellent results and profitability \
             is rising.",
            "Capitalize on this momentum. Analyze which products or categories drove the \
             growth so that it can be replicated.",
        )]
    } else {
        Vec::new()
    }
}
