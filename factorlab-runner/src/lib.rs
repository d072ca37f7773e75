//! FactorLab Runner — factor signals, strategy variants, relative series.
//!
//! This crate builds on `factorlab-core` to provide:
//! - Trend / reversal / foresight selection signals from trailing returns
//! - The four absolute strategy variants and the long/short relative pass
//! - Data loading with store/synthetic fallback and dataset hashing
//! - Equity-curve performance metrics
//! - CSV and JSON export with schema versioning
//! - TOML backtest configuration

pub mod algos;
pub mod config;
pub mod data_loader;
pub mod export;
pub mod metrics;
pub mod runner;
pub mod signals;
pub mod strategies;

pub use algos::{SelectWhere, WeighTarget};
pub use config::{BacktestConfig, ConfigError};
pub use data_loader::{load_prices, LoadError, LoadOptions, LoadedPrices, PriceSource};
pub use export::{default_csv_name, export_json, export_series_csv, import_json, save_artifacts};
pub use metrics::PerformanceMetrics;
pub use runner::{run_factor_backtests, FactorBacktestResult, RunError, StrategySeries};
pub use signals::{generate_signals, SignalSet};
pub use strategies::{absolute_variants, relative_variant, BASELINE, RELATIVE_TARGETS, VARIANT_NAMES};
