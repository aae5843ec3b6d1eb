pub mod breakdown;
pub mod breakeven;
pub mod enrichment;
pub mod kpi;
pub mod period;
