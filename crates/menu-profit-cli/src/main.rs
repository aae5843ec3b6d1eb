mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::breakeven::BreakevenArgs;
use commands::catalog::{CategoriesArgs, EnrichArgs, ProjectArgs, QuarterlyArgs, RankArgs};
use commands::dashboard::DashboardArgs;
use commands::insights::InsightsArgs;
use commands::kpi::KpiArgs;

/// Menu and catalog profitability analytics
#[derive(Parser)]
#[command(
    name = "mpa",
    version,
    about = "Menu and catalog profitability analytics",
    long_about = "A CLI for product catalog profitability analysis with decimal precision. \
                  Supports period KPIs, quarter-over-quarter comparison, break-even \
                  analysis, category breakdowns, product rankings and rule-based insights."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Annualize every product (total quantity, revenue, margin, margin %)
    Enrich(EnrichArgs),
    /// Project products onto one quarter or the full year
    Period(ProjectArgs),
    /// KPI snapshot for a period, optionally against the previous quarter
    Kpi(KpiArgs),
    /// Break-even revenue and units for a period's fixed costs
    Breakeven(BreakevenArgs),
    /// Margin trend and catalog structure insights
    Insights(InsightsArgs),
    /// Revenue, margin and profitability for each quarter
    Quarterly(QuarterlyArgs),
    /// Revenue and margin share per category
    Categories(CategoriesArgs),
    /// Top and bottom products by margin
    Rank(RankArgs),
    /// Full dashboard for a period
    Dashboard(DashboardArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Yaml,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(&cli.log_level, cli.log_json);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Enrich(args) => commands::catalog::run_enrich(args),
        Commands::Period(args) => commands::catalog::run_project(args),
        Commands::Kpi(args) => commands::kpi::run_kpi(args),
        Commands::Breakeven(args) => commands::breakeven::run_breakeven(args),
        Commands::Insights(args) => commands::insights::run_insights(args),
        Commands::Quarterly(args) => commands::catalog::run_quarterly(args),
        Commands::Categories(args) => commands::catalog::run_categories(args),
        Commands::Rank(args) => commands::catalog::run_rank(args),
        Commands::Dashboard(args) => commands::dashboard::run_dashboard(args),
        Commands::Version => {
            println!("mpa {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
