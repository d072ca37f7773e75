//! Serializable backtest configuration.
//!
//! Loaded from TOML. Dates are `YYYY-MM-DD` strings, parsed at use sites;
//! `end_date` is exclusive — the backtest covers sessions strictly before
//! it. Defaults reproduce the canonical factor-ETF study: five factor
//! ETFs, a 60-session return lookback, a 5-session trend execution lag.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from config loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid date '{value}' (expected YYYY-MM-DD)")]
    BadDate { value: String },

    #[error("start_date {start} is not before end_date {end}")]
    BadDateRange { start: String, end: String },

    #[error("need at least 2 tickers for a cross-sectional median, got {0}")]
    TooFewTickers(usize),

    #[error("tickers must be non-empty strings")]
    EmptyTicker,

    #[error("initial_capital must be positive, got {0}")]
    NonPositiveCapital(f64),

    #[error("signals.lookback must be >= 1")]
    ZeroLookback,

    #[error("weighting.vol_lookback must be >= 2")]
    VolLookbackTooShort,
}

/// Complete configuration for a factor backtest run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BacktestConfig {
    pub backtest: BacktestSection,
    #[serde(default)]
    pub signals: SignalsSection,
    #[serde(default)]
    pub weighting: WeightingSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BacktestSection {
    /// Universe of ETF tickers; lower-cased by [`BacktestConfig::universe`].
    pub tickers: Vec<String>,
    /// First session (inclusive), `YYYY-MM-DD`.
    pub start_date: String,
    /// Backtest horizon (exclusive), `YYYY-MM-DD`.
    pub end_date: String,
    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignalsSection {
    /// Return lookback in sessions; also the foresight shift.
    #[serde(default = "default_lookback")]
    pub lookback: usize,
    /// Execution lag applied to the trend signal, in sessions.
    #[serde(default = "default_signal_lag")]
    pub signal_lag: usize,
}

impl Default for SignalsSection {
    fn default() -> Self {
        Self {
            lookback: default_lookback(),
            signal_lag: default_signal_lag(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightingSection {
    /// Trailing sessions for the inverse-volatility estimate.
    #[serde(default = "default_vol_lookback")]
    pub vol_lookback: usize,
}

impl Default for WeightingSection {
    fn default() -> Self {
        Self {
            vol_lookback: default_vol_lookback(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OutputSection {
    /// CSV file name; empty derives `Factors{start_date}.csv`.
    #[serde(default)]
    pub csv_path: String,
}

fn default_initial_capital() -> f64 {
    100_000.0
}

fn default_lookback() -> usize {
    60
}

fn default_signal_lag() -> usize {
    5
}

fn default_vol_lookback() -> usize {
    factorlab_core::algos::weigh::DEFAULT_VOL_LOOKBACK
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            backtest: BacktestSection {
                tickers: ["vlue", "qual", "mtum", "size", "usmv"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                start_date: "2000-01-01".to_string(),
                end_date: "2019-06-30".to_string(),
                initial_capital: default_initial_capital(),
            },
            signals: SignalsSection::default(),
            weighting: WeightingSection::default(),
            output: OutputSection::default(),
        }
    }
}

impl BacktestConfig {
    /// Load and validate a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a TOML config string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: BacktestConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// The trading universe: tickers lower-cased and trimmed.
    pub fn universe(&self) -> Vec<String> {
        self.backtest
            .tickers
            .iter()
            .map(|t| t.trim().to_lowercase())
            .collect()
    }

    pub fn start(&self) -> Result<NaiveDate, ConfigError> {
        parse_date(&self.backtest.start_date)
    }

    pub fn end(&self) -> Result<NaiveDate, ConfigError> {
        parse_date(&self.backtest.end_date)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backtest.tickers.len() < 2 {
            return Err(ConfigError::TooFewTickers(self.backtest.tickers.len()));
        }
        if self.universe().iter().any(|t| t.is_empty()) {
            return Err(ConfigError::EmptyTicker);
        }
        let start = self.start()?;
        let end = self.end()?;
        if start >= end {
            return Err(ConfigError::BadDateRange {
                start: self.backtest.start_date.clone(),
                end: self.backtest.end_date.clone(),
            });
        }
        if self.backtest.initial_capital <= 0.0 {
            return Err(ConfigError::NonPositiveCapital(
                self.backtest.initial_capital,
            ));
        }
        if self.signals.lookback == 0 {
            return Err(ConfigError::ZeroLookback);
        }
        if self.weighting.vol_lookback < 2 {
            return Err(ConfigError::VolLookbackTooShort);
        }
        Ok(())
    }

    /// Deterministic content hash of this configuration.
    ///
    /// Two runs with identical configs share a run id.
    pub fn run_id(&self) -> String {
        let json =
            serde_json::to_string(self).expect("BacktestConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ConfigError::BadDate {
        value: value.to_string(),
    })
}
