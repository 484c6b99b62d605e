use analytics::{AnalyticsEngine, BucketSummary, CumulativePoint, KpiSummary};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::{Config, load_config};
use core_types::{BetRecord, BucketGranularity};
use filter::{FilterCriteria, apply_filter};
use ledger::LedgerSession;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// The main entry point for the Topspin betting dashboard.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    tracing::debug!(path = %cli.config.display(), "Configuration loaded.");

    // One session per invocation: the ledger is loaded once and treated as
    // immutable; every computation below borrows the same snapshot.
    let session = LedgerSession::load(config.ledger.clone())?;

    // Execute the appropriate command
    match cli.command {
        Commands::Report(args) => handle_report(args, &session, &config),
        Commands::History(args) => handle_history(args, &session),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Personal analytics for a tennis betting ledger.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute KPI, rollup, and cumulative tables over the filtered ledger.
    Report(ReportArgs),
    /// List the filtered raw bet history, newest first.
    History(HistoryArgs),
}

#[derive(Parser)]
struct ReportArgs {
    #[command(flatten)]
    filter: FilterArgs,

    /// Bucket granularity for the rollup tables (default from config).
    #[arg(long, value_enum)]
    granularity: Option<GranularityArg>,

    /// Emit the report as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct HistoryArgs {
    #[command(flatten)]
    filter: FilterArgs,
}

#[derive(Parser)]
struct FilterArgs {
    /// Inclusive start date (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Inclusive end date (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Keep only bets on matches this player took part in.
    #[arg(long)]
    player: Option<String>,
}

impl FilterArgs {
    fn into_criteria(self) -> FilterCriteria {
        FilterCriteria {
            date_from: self.from,
            date_to: self.to,
            player: self.player,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GranularityArg {
    Week,
    Month,
}

impl From<GranularityArg> for BucketGranularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::Week => BucketGranularity::Week,
            GranularityArg::Month => BucketGranularity::Month,
        }
    }
}

// ==============================================================================
// Report Command Logic
// ==============================================================================

fn handle_report(args: ReportArgs, session: &LedgerSession, config: &Config) -> anyhow::Result<()> {
    let criteria = args.filter.into_criteria();
    let filtered = apply_filter(session.records(), &criteria);

    let granularity = args
        .granularity
        .map(BucketGranularity::from)
        .unwrap_or(config.report.granularity);

    let engine = AnalyticsEngine::new();
    let kpis = engine.compute_kpis(&filtered);
    let buckets = engine.aggregate_by_bucket(&filtered, granularity);
    let cumulative = engine.cumulative_series(&buckets);

    if args.json {
        let payload = serde_json::json!({
            "kpis": kpis,
            "buckets": buckets,
            "cumulative": cumulative,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    print_kpis(&kpis);
    print_buckets(&buckets, granularity);
    print_cumulative(&cumulative);

    Ok(())
}

fn print_kpis(kpis: &KpiSummary) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Total bets",
        "Hits",
        "Units won",
        "Yield",
        "Profit factor",
    ]);
    table.add_row(vec![
        kpis.total_bets.to_string(),
        kpis.total_hits.to_string(),
        format_units(kpis.total_profit),
        format_pct(kpis.yield_per_bet),
        kpis.profit_factor.to_string(),
    ]);
    println!("{table}");
}

fn print_buckets(buckets: &[BucketSummary], granularity: BucketGranularity) {
    let label = match granularity {
        BucketGranularity::Week => "Week",
        BucketGranularity::Month => "Month",
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec![label, "Bets", "Hits", "Misses", "Units", "Yield"]);
    for bucket in buckets {
        table.add_row(vec![
            bucket.bucket_start.to_string(),
            bucket.bet_count.to_string(),
            bucket.hit_count.to_string(),
            bucket.miss_count.to_string(),
            format_units(bucket.units_profit),
            bucket
                .yield_per_bet
                .map(format_pct)
                .unwrap_or_else(|| "n/a".to_string()),
        ]);
    }
    println!("{table}");
}

fn print_cumulative(series: &[CumulativePoint]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Bucket", "Cumulative units", "Cumulative yield"]);
    for point in series {
        table.add_row(vec![
            point.bucket_start.to_string(),
            format_units(point.running_profit),
            format!("{}%", point.running_yield_pct.round_dp(2)),
        ]);
    }
    println!("{table}");
}

// ==============================================================================
// History Command Logic
// ==============================================================================

fn handle_history(args: HistoryArgs, session: &LedgerSession) -> anyhow::Result<()> {
    let criteria = args.filter.into_criteria();
    let mut filtered = apply_filter(session.records(), &criteria);

    // The dashboard has always listed history newest first. The sort is
    // stable, so same-day bets keep their sheet order.
    filtered.sort_by(|a, b| b.date.cmp(&a.date));

    print_history(&filtered);
    Ok(())
}

fn print_history(records: &[BetRecord]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Date", "Match", "Pick", "Odds", "Outcome", "Profit",
    ]);
    for record in records {
        table.add_row(vec![
            record.date.to_string(),
            format!("{} vs {}", record.player_a, record.player_b),
            record.pick.clone(),
            record
                .odds
                .map(|odds| odds.to_string())
                .unwrap_or_else(|| "-".to_string()),
            record.outcome.to_string(),
            record
                .profit
                .map(format_units)
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("{table}");
}

// ==============================================================================
// Formatting Helpers
// ==============================================================================

fn format_units(value: Decimal) -> String {
    value.round_dp(2).to_string()
}

/// Renders a per-unit yield ratio as a percentage, e.g. 0.125 -> "12.50%".
fn format_pct(value: Decimal) -> String {
    format!("{}%", (value * Decimal::from(100)).round_dp(2))
}
