pub mod breakeven;
pub mod catalog;
pub mod dashboard;
pub mod insights;
pub mod kpi;

use clap::Args;

/// Where to read the product table from
#[derive(Args)]
pub struct DataArgs {
    /// Path to a CSV or JSON product table (JSON may also be piped on stdin)
    #[arg(long)]
    pub data: Option<String>,
}
