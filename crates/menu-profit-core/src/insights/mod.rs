//! Rule-based insight engine.
//!
//! Each rule is a pure function from an aggregated table (or a pair of KPI
//! snapshots) to zero or more [`Insight`]s. Rules never share state, so any
//! subset can be run in any combination; the registry in [`structural`] fixes
//! the order in which the catalog-wide rules are reported.

pub mod format;
pub mod structural;
pub mod thresholds;
pub mod trend;

use serde::{Deserialize, Serialize};

pub use structural::{analyze_structure, analyze_structure_with, STRUCTURAL_RULES};
pub use trend::analyze_trend;

/// The rule that produced an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightRule {
    ParetoConcentration,
    LongTail,
    WorkhorseCategory,
    GoldmineCategory,
    NegativeTrend,
    PositiveTrend,
}

impl InsightRule {
    pub fn name(self) -> &'static str {
        match self {
            InsightRule::ParetoConcentration => "pareto_concentration",
            InsightRule::LongTail => "long_tail",
            InsightRule::WorkhorseCategory => "workhorse_category",
            InsightRule::GoldmineCategory => "goldmine_category",
            InsightRule::NegativeTrend => "negative_trend",
            InsightRule::PositiveTrend => "positive_trend",
        }
    }

    /// Leading marker for rules that report a direction of travel.
    pub fn marker(self) -> Option<&'static str> {
        match self {
            InsightRule::NegativeTrend => Some("⚠️"),
            InsightRule::PositiveTrend => Some("✅"),
            _ => None,
        }
    }
}

/// A narrative finding in observation / implication / recommendation form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub rule: InsightRule,
    /// Category the finding is about, for per-category rules
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub headline: String,
    pub observation: String,
    pub implication: String,
    pub recommendation: String,
    /// The full block as Markdown, ready to render as-is
    pub markdown: String,
}

impl Insight {
    pub fn new(
        rule: InsightRule,
        subject: Option<String>,
        headline: &str,
        observation: String,
        implication: &str,
        recommendation: &str,
    ) -> Self {
        let markdown =
            format::render_markdown(rule, headline, &observation, implication, recommendation);
        Insight {
            rule,
            subject,
            headline: headline.to_string(),
            observation,
            implication: implication.to_string(),
            recommendation: recommendation.to_string(),
            markdown,
        }
    }
}
