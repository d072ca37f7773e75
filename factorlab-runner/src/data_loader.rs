//! Price loading for the runner.
//!
//! Given the universe, loads close series from the CSV store and returns
//! an aligned frame. Fallback policy:
//! 1. If stored data exists → use it
//! 2. If not stored and `synthetic` is set → generate synthetic prices
//!    (tagged, developer-only)
//! 3. Otherwise → fail with a typed error
//!
//! There is no download path: supplying market data is the user's job.

use std::collections::HashMap;

use chrono::NaiveDate;
use thiserror::Error;

use factorlab_core::data::{
    align_symbols, synthetic_prices, ClosePrice, CsvStore, DataError,
};
use factorlab_core::domain::PriceFrame;

/// Errors from the price loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(
        "no stored data for '{symbol}' — add {symbol}.csv to the data dir, \
         or pass --synthetic for generated prices"
    )]
    MissingSymbol { symbol: String },

    #[error("no sessions in [{start}, {end}] for the requested tickers")]
    NoSessions { start: NaiveDate, end: NaiveDate },

    #[error("data error: {0}")]
    Data(#[from] DataError),
}

/// Options controlling how prices are loaded.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// First date loaded (inclusive).
    pub start: NaiveDate,
    /// Last date loaded (inclusive). The runner loads past the backtest
    /// horizon so the foresight signal has future sessions to read.
    pub end: NaiveDate,
    /// Generate synthetic prices for symbols missing from the store.
    pub synthetic: bool,
}

/// Where a symbol's prices came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    Store,
    Synthetic,
}

/// Result of loading prices, including provenance.
#[derive(Debug)]
pub struct LoadedPrices {
    /// Aligned close prices for the full universe.
    pub frame: PriceFrame,
    /// Data source per symbol.
    pub sources: HashMap<String, PriceSource>,
    /// BLAKE3 hash over all price data, for result provenance.
    pub dataset_hash: String,
    /// Whether any symbol used synthetic data.
    pub has_synthetic: bool,
}

/// Load aligned prices for the universe from the store, with synthetic
/// fallback. The primary entry point for the runner.
pub fn load_prices(
    tickers: &[String],
    store: &CsvStore,
    opts: &LoadOptions,
) -> Result<LoadedPrices, LoadError> {
    let mut series: HashMap<String, Vec<ClosePrice>> = HashMap::new();
    let mut sources: HashMap<String, PriceSource> = HashMap::new();
    let mut has_synthetic = false;

    for symbol in tickers {
        match store.load(symbol) {
            Ok(prices) => {
                let in_range: Vec<ClosePrice> = prices
                    .into_iter()
                    .filter(|p| p.date >= opts.start && p.date <= opts.end)
                    .collect();
                series.insert(symbol.clone(), in_range);
                sources.insert(symbol.clone(), PriceSource::Store);
            }
            Err(DataError::SymbolNotFound { .. }) if opts.synthetic => {
                eprintln!(
                    "WARNING: generating synthetic prices for {symbol} — results will be tagged as synthetic"
                );
                series.insert(symbol.clone(), synthetic_prices(symbol, opts.start, opts.end));
                sources.insert(symbol.clone(), PriceSource::Synthetic);
                has_synthetic = true;
            }
            Err(DataError::SymbolNotFound { .. }) => {
                return Err(LoadError::MissingSymbol {
                    symbol: symbol.clone(),
                });
            }
            Err(e) => return Err(e.into()),
        }
    }

    let frame = align_symbols(&series, tickers);
    if frame.is_empty() {
        return Err(LoadError::NoSessions {
            start: opts.start,
            end: opts.end,
        });
    }

    let dataset_hash = compute_dataset_hash(&frame);

    Ok(LoadedPrices {
        frame,
        sources,
        dataset_hash,
        has_synthetic,
    })
}

/// Deterministic BLAKE3 hash over the frame's dates and values.
///
/// Symbols are hashed in sorted order so the result is independent of map
/// iteration order.
fn compute_dataset_hash(frame: &PriceFrame) -> String {
    let mut hasher = blake3::Hasher::new();

    let mut symbols: Vec<&String> = frame.columns().iter().collect();
    symbols.sort();

    for date in frame.dates() {
        hasher.update(date.to_string().as_bytes());
    }
    for symbol in symbols {
        hasher.update(symbol.as_bytes());
        for index in 0..frame.len() {
            hasher.update(&frame.value(symbol, index).to_le_bytes());
        }
    }

    hasher.finalize().to_hex().to_string()
}
