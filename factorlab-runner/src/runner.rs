//! Factor backtest orchestration.
//!
//! One entry point, `run_factor_backtests()`: load prices, generate
//! signals on the full history, cut the backtest window, run the four
//! absolute variants in parallel, then run the long/short relative pass
//! over their equity-index series.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use factorlab_core::data::CsvStore;
use factorlab_core::domain::PriceFrame;
use factorlab_core::engine::run_backtest;

use crate::config::{BacktestConfig, ConfigError};
use crate::data_loader::{load_prices, LoadError, LoadOptions};
use crate::metrics::PerformanceMetrics;
use crate::signals::generate_signals;
use crate::strategies::{absolute_variants, relative_variant, RELATIVE_TARGETS};

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("data error: {0}")]
    Data(#[from] LoadError),

    #[error("no sessions before end_date {end} in the loaded data")]
    EmptyBacktestWindow { end: NaiveDate },
}

/// One strategy's equity-index series with its statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategySeries {
    pub name: String,
    /// Equity index, rebased to 100 at the first session.
    pub series: Vec<f64>,
    pub metrics: PerformanceMetrics,
    pub rebalance_count: usize,
}

/// Complete result of a factor backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorBacktestResult {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub run_id: String,
    pub config: BacktestConfig,
    /// The backtest window's date axis.
    pub dates: Vec<NaiveDate>,
    /// The four absolute variants, in canonical order.
    pub absolute: Vec<StrategySeries>,
    /// The long/short relative series, one per non-baseline variant.
    pub relative: Vec<StrategySeries>,
    pub dataset_hash: String,
    pub has_synthetic: bool,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl FactorBacktestResult {
    /// All series in export order: absolute columns then relative columns.
    pub fn all_series(&self) -> impl Iterator<Item = &StrategySeries> {
        self.absolute.iter().chain(self.relative.iter())
    }
}

/// Run the full factor study described by `config`.
pub fn run_factor_backtests(
    config: &BacktestConfig,
    store: &CsvStore,
    synthetic: bool,
) -> Result<FactorBacktestResult, RunError> {
    config.validate()?;
    let start = config.start()?;
    let end = config.end()?;
    let universe = config.universe();
    let lookback = config.signals.lookback;
    let capital = config.backtest.initial_capital;

    // The foresight signal reads `lookback` sessions past the horizon, so
    // load beyond end_date; two calendar days per session covers weekends.
    let load_horizon = end + chrono::Duration::days(2 * lookback as i64);
    let loaded = load_prices(
        &universe,
        store,
        &LoadOptions {
            start,
            end: load_horizon,
            synthetic,
        },
    )?;

    // Signals are generated on the full history, then cut to the window
    // together with the prices so row indices stay aligned.
    let signals = generate_signals(&loaded.frame, lookback, config.signals.signal_lag);

    let window_len = loaded.frame.sessions_before(end);
    if window_len == 0 {
        return Err(RunError::EmptyBacktestWindow { end });
    }
    let window = loaded.frame.head(window_len);
    let signals = crate::signals::SignalSet {
        trend: signals.trend.head(window_len),
        reversal: signals.reversal.head(window_len),
        best_case: signals.best_case.head(window_len),
    };

    // Absolute variants, fanned out over the thread pool.
    let variants = absolute_variants(&signals, config.weighting.vol_lookback);
    let absolute_runs: Vec<_> = variants
        .par_iter()
        .map(|strategy| run_backtest(strategy, &window, capital))
        .collect();

    // The relative pass trades the variants' index series as prices.
    let index_frame = PriceFrame::new(
        window.dates().to_vec(),
        absolute_runs
            .iter()
            .map(|r| (r.name.clone(), r.equity_index.clone()))
            .collect(),
    );
    let relative_runs: Vec<_> = RELATIVE_TARGETS
        .iter()
        .map(|target| run_backtest(&relative_variant(target, &index_frame), &index_frame, capital))
        .collect();

    let to_series = |run: factorlab_core::engine::RunResult| StrategySeries {
        metrics: PerformanceMetrics::compute(&run.equity_index),
        name: run.name,
        series: run.equity_index,
        rebalance_count: run.rebalance_count,
    };

    Ok(FactorBacktestResult {
        schema_version: SCHEMA_VERSION,
        run_id: config.run_id(),
        config: config.clone(),
        dates: window.dates().to_vec(),
        absolute: absolute_runs.into_iter().map(to_series).collect(),
        relative: relative_runs.into_iter().map(to_series).collect(),
        dataset_hash: loaded.dataset_hash,
        has_synthetic: loaded.has_synthetic,
    })
}
