//! FactorLab CLI — run, seed, and status commands.
//!
//! Commands:
//! - `run`    — execute the factor study from a TOML config or flags
//! - `seed`   — write deterministic synthetic CSVs into the data directory
//! - `status` — report stored symbols, row counts, and date ranges

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use factorlab_core::data::{synthetic_prices, CsvStore};
use factorlab_runner::config::BacktestConfig;
use factorlab_runner::export::save_artifacts;
use factorlab_runner::runner::{run_factor_backtests, FactorBacktestResult};

#[derive(Parser)]
#[command(
    name = "factorlab",
    about = "FactorLab CLI — factor-strategy backtests over an ETF basket"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute the factor study from a TOML config file or flags.
    Run {
        /// Path to a TOML config file. Mutually exclusive with the study flags.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Tickers (e.g., VLUE QUAL MTUM SIZE USMV). Defaults to the
        /// canonical five factor ETFs.
        #[arg(long, num_args = 2..)]
        tickers: Option<Vec<String>>,

        /// Start date (YYYY-MM-DD, inclusive).
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD, exclusive).
        #[arg(long)]
        end: Option<String>,

        /// Return lookback in sessions.
        #[arg(long)]
        lookback: Option<usize>,

        /// Trend execution lag in sessions.
        #[arg(long)]
        lag: Option<usize>,

        /// Generate synthetic prices for symbols missing from the data dir.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Data directory with per-symbol CSV files. Defaults to ./data.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Output directory for the factor CSV and manifest.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Write deterministic synthetic CSVs into the data directory.
    Seed {
        /// Symbols to seed (e.g., VLUE QUAL).
        #[arg(required = true)]
        symbols: Vec<String>,

        /// Start date (YYYY-MM-DD). Defaults to 2000-01-01.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Data directory. Defaults to ./data.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
    /// Report stored symbols, row counts, and date ranges.
    Status {
        /// Data directory. Defaults to ./data.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            tickers,
            start,
            end,
            lookback,
            lag,
            synthetic,
            data_dir,
            output_dir,
        } => run_cmd(
            config, tickers, start, end, lookback, lag, synthetic, data_dir, output_dir,
        ),
        Commands::Seed {
            symbols,
            start,
            end,
            data_dir,
        } => seed_cmd(symbols, start, end, data_dir),
        Commands::Status { data_dir } => status_cmd(&data_dir),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_cmd(
    config_path: Option<PathBuf>,
    tickers: Option<Vec<String>>,
    start: Option<String>,
    end: Option<String>,
    lookback: Option<usize>,
    lag: Option<usize>,
    synthetic: bool,
    data_dir: PathBuf,
    output_dir: PathBuf,
) -> Result<()> {
    let flags_given =
        tickers.is_some() || start.is_some() || end.is_some() || lookback.is_some() || lag.is_some();
    if config_path.is_some() && flags_given {
        bail!("--config and study flags (--tickers/--start/--end/--lookback/--lag) are mutually exclusive");
    }

    let config = if let Some(path) = config_path {
        BacktestConfig::from_file(&path)?
    } else {
        let mut config = BacktestConfig::default();
        if let Some(tickers) = tickers {
            config.backtest.tickers = tickers;
        }
        if let Some(start) = start {
            config.backtest.start_date = start;
        }
        if let Some(end) = end {
            config.backtest.end_date = end;
        }
        if let Some(lookback) = lookback {
            config.signals.lookback = lookback;
        }
        if let Some(lag) = lag {
            config.signals.signal_lag = lag;
        }
        config.validate()?;
        config
    };

    let store = CsvStore::new(&data_dir);
    let result = run_factor_backtests(&config, &store, synthetic)?;

    print_summary(&result);

    let run_dir = save_artifacts(&result, &output_dir)?;
    println!("Artifacts saved to: {}", run_dir.display());

    Ok(())
}

fn seed_cmd(
    symbols: Vec<String>,
    start: Option<String>,
    end: Option<String>,
    data_dir: PathBuf,
) -> Result<()> {
    let start_date = start
        .as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()?
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());

    let end_date = end
        .as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()?
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    if start_date >= end_date {
        bail!("--start must be before --end");
    }

    let store = CsvStore::new(&data_dir);
    for symbol in &symbols {
        let symbol = symbol.trim().to_lowercase();
        let prices = synthetic_prices(&symbol, start_date, end_date);
        store.write(&symbol, &prices)?;
        println!("Seeded {symbol}: {} sessions", prices.len());
    }

    Ok(())
}

fn status_cmd(data_dir: &Path) -> Result<()> {
    let store = CsvStore::new(data_dir);
    let symbols = store.symbols()?;

    if symbols.is_empty() {
        println!("Data directory is empty: {}", data_dir.display());
        return Ok(());
    }

    println!("Data directory: {}", data_dir.display());
    println!("Symbols: {}", symbols.len());
    println!();
    println!("{:<8} {:<25} {:>10}", "Symbol", "Date Range", "Rows");
    println!("{}", "-".repeat(46));
    for symbol in &symbols {
        match store.meta(symbol) {
            Ok(meta) => println!(
                "{:<8} {:<25} {:>10}",
                symbol,
                format!("{} to {}", meta.start_date, meta.end_date),
                meta.row_count
            ),
            Err(_) => println!("{:<8} {:<25} {:>10}", symbol, "(no meta)", "?"),
        }
    }

    Ok(())
}

fn print_summary(result: &FactorBacktestResult) {
    println!();
    println!("=== Factor Backtest ===");
    println!("Universe:       {}", result.config.universe().join(", "));
    println!(
        "Period:         {} to {} ({} sessions)",
        result.config.backtest.start_date,
        result.config.backtest.end_date,
        result.dates.len()
    );
    println!("Run id:         {}", &result.run_id[..16.min(result.run_id.len())]);
    println!("Dataset hash:   {}", &result.dataset_hash[..16.min(result.dataset_hash.len())]);
    println!();
    println!(
        "{:<18} {:>9} {:>8} {:>8} {:>8} {:>9} {:>6}",
        "Strategy", "TotRet", "CAGR", "Vol", "Sharpe", "MaxDD", "Rebal"
    );
    println!("{}", "-".repeat(72));
    for series in result.all_series() {
        let m = &series.metrics;
        println!(
            "{:<18} {:>8.2}% {:>7.2}% {:>7.2}% {:>8.3} {:>8.2}% {:>6}",
            series.name,
            m.total_return * 100.0,
            m.cagr * 100.0,
            m.annual_vol * 100.0,
            m.sharpe,
            m.max_drawdown * 100.0,
            series.rebalance_count
        );
    }
    if result.has_synthetic {
        println!();
        println!("WARNING: results based on SYNTHETIC data");
    }
    println!();
}
