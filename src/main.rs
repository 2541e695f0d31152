use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use core_types::Tier;
use engine::ScreenerEngine;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// The main entry point for the marketscope screener.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = configuration::load_config().context("Failed to load config.toml")?;
    let store = data_loader::load_bar_store(&config.data, &config.universe)
        .context("Failed to load the bar store")?;
    let catalog = reference::Catalog::load(&config.data.catalog_path)
        .context("Failed to load the reference catalog")?;
    let engine = ScreenerEngine::new(store, catalog);

    match cli.command {
        Commands::Candidates(args) => handle_candidates(args, &engine),
        Commands::Instrument(args) => handle_instrument(args, &engine),
        Commands::Industries(args) => handle_industries(args, &engine),
        Commands::Summary(args) => handle_summary(args, &engine),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Screens historical daily bars for return/volatility candidates.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find instruments in the chosen return and volatility tiers.
    Candidates(CandidatesArgs),
    /// Show the windowed forward-return rows for one instrument.
    Instrument(InstrumentArgs),
    /// Rank industries by average instrument performance.
    Industries(WindowArgs),
    /// Print the cross-sectional summary statistics.
    Summary(WindowArgs),
}

#[derive(Parser)]
struct WindowArgs {
    /// Trailing window length in months (must be at least twice the return period).
    #[arg(long)]
    time_range: u32,

    /// Forward return horizon in months (1-15).
    #[arg(long)]
    return_period: u32,
}

#[derive(Parser)]
struct CandidatesArgs {
    #[command(flatten)]
    window: WindowArgs,

    /// Return tier to select: low, medium or high.
    #[arg(long)]
    returns: Tier,

    /// Volatility tier to select: low, medium or high.
    #[arg(long)]
    volatility: Tier,
}

#[derive(Parser)]
struct InstrumentArgs {
    #[command(flatten)]
    window: WindowArgs,

    /// The instrument symbol to query (e.g., "AAPL").
    #[arg(long)]
    symbol: String,
}

impl WindowArgs {
    /// The window/horizon relation the engine does not re-check.
    fn validate(&self) -> anyhow::Result<()> {
        if self.time_range < 2 * self.return_period {
            bail!(
                "time-range ({}) must be at least twice the return-period ({})",
                self.time_range,
                self.return_period
            );
        }
        Ok(())
    }
}

// ==============================================================================
// Command Handlers
// ==============================================================================

fn handle_candidates(args: CandidatesArgs, engine: &ScreenerEngine) -> anyhow::Result<()> {
    args.window.validate()?;
    let report = engine.find_candidates(
        args.window.time_range,
        args.window.return_period,
        args.returns,
        args.volatility,
    )?;

    if report.ranked.is_empty() {
        println!("No instruments match the selected tiers in this window.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(["Ticker", "Name", "Mean Return", "Std Dev"]);
    for candidate in &report.ranked {
        table.add_row([
            candidate.stat.instrument_id.clone(),
            candidate.name.clone().unwrap_or_else(|| "-".to_string()),
            format!("{:.2}", candidate.stat.mean_return),
            candidate
                .stat
                .std_return
                .map(|s| format!("{s:.2}"))
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("{table}");
    println!(
        "Market mean return: {:.2} | Top candidates: {}",
        report.market_mean_return,
        report.top_ids.join(", ")
    );
    info!(
        candidates = report.ranked.len(),
        top_records = report.top_records.len(),
        "rendered candidate screen"
    );
    Ok(())
}

fn handle_instrument(args: InstrumentArgs, engine: &ScreenerEngine) -> anyhow::Result<()> {
    args.window.validate()?;
    let records = engine.query_instrument(
        args.window.time_range,
        args.window.return_period,
        &args.symbol,
    )?;

    if records.is_empty() {
        println!("No windowed rows for '{}'.", args.symbol);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(["Date", "Open", "High", "Low", "Close", "Future Close", "Return %"]);
    for record in &records {
        table.add_row([
            record.date.to_string(),
            record.open.to_string(),
            record.high.to_string(),
            record.low.to_string(),
            record.close.to_string(),
            record
                .future_close
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
            record
                .return_pct
                .map(|r| format!("{r:.2}"))
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn handle_industries(args: WindowArgs, engine: &ScreenerEngine) -> anyhow::Result<()> {
    args.validate()?;
    let industries = engine.industry_performance(args.time_range, args.return_period)?;

    let mut table = Table::new();
    table.set_header(["Industry", "Mean Return", "Std Dev"]);
    for industry in &industries {
        table.add_row([
            industry.industry.clone(),
            format!("{:.2}", industry.mean_return),
            format!("{:.2}", industry.mean_std),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn handle_summary(args: WindowArgs, engine: &ScreenerEngine) -> anyhow::Result<()> {
    args.validate()?;
    let stats = engine.instrument_stats(args.time_range, args.return_period)?;
    let summary = engine.summary_statistics(&stats)?;

    let mut table = Table::new();
    table.set_header(["Metric", "Value"]);
    table.add_row(["Mean Return".to_string(), format!("{:.4}", summary.mean_return)]);
    table.add_row(["40% Return".to_string(), format!("{:.4}", summary.p40_return)]);
    table.add_row(["75% Return".to_string(), format!("{:.4}", summary.p75_return)]);
    table.add_row(["Mean Std Dev".to_string(), format!("{:.4}", summary.mean_std)]);
    table.add_row(["40% Std Dev".to_string(), format!("{:.4}", summary.p40_std)]);
    table.add_row(["75% Std Dev".to_string(), format!("{:.4}", summary.p75_std)]);
    println!("{table}");
    Ok(())
}
