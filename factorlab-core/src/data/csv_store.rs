//! CSV price store — one file per symbol plus a metadata sidecar.
//!
//! Layout under the store root:
//! - `{symbol}.csv`       — columns `date,close,adj_close`
//! - `{symbol}.meta.json` — row count, date range, written-at timestamp
//!
//! On load, `adj_close` is preferred and `close` is the fallback; a row
//! with neither is an error. Rows are sorted by date and duplicate dates
//! are rejected.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ClosePrice;

/// Errors from the price store.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("no stored data for '{symbol}'")]
    SymbolNotFound { symbol: String },

    #[error("'{symbol}' has no rows")]
    Empty { symbol: String },

    #[error("'{symbol}' row {row} has neither adj_close nor close")]
    MissingPrice { symbol: String, row: usize },

    #[error("'{symbol}' has duplicate date {date}")]
    DuplicateDate { symbol: String, date: NaiveDate },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("metadata error: {0}")]
    Meta(#[from] serde_json::Error),
}

/// Sidecar metadata written next to each symbol's CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMeta {
    pub symbol: String,
    pub row_count: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub written_at: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    #[serde(default)]
    close: Option<f64>,
    #[serde(default)]
    adj_close: Option<f64>,
}

#[derive(Debug, Serialize)]
struct CsvOut {
    date: NaiveDate,
    close: f64,
    adj_close: f64,
}

/// Directory-backed CSV price store.
#[derive(Debug, Clone)]
pub struct CsvStore {
    root: PathBuf,
}

impl CsvStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.root.join(format!("{symbol}.csv"))
    }

    fn meta_path(&self, symbol: &str) -> PathBuf {
        self.root.join(format!("{symbol}.meta.json"))
    }

    /// Load a symbol's close series, sorted ascending by date.
    pub fn load(&self, symbol: &str) -> Result<Vec<ClosePrice>, DataError> {
        let path = self.csv_path(symbol);
        if !path.exists() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        let mut reader = csv::Reader::from_path(&path)?;
        let mut prices = Vec::new();
        for (row, record) in reader.deserialize::<CsvRow>().enumerate() {
            let record = record?;
            let price = record
                .adj_close
                .or(record.close)
                .ok_or(DataError::MissingPrice {
                    symbol: symbol.to_string(),
                    row,
                })?;
            prices.push(ClosePrice {
                date: record.date,
                price,
            });
        }
        if prices.is_empty() {
            return Err(DataError::Empty {
                symbol: symbol.to_string(),
            });
        }

        prices.sort_by_key(|p| p.date);
        let mut seen = BTreeSet::new();
        for p in &prices {
            if !seen.insert(p.date) {
                return Err(DataError::DuplicateDate {
                    symbol: symbol.to_string(),
                    date: p.date,
                });
            }
        }
        Ok(prices)
    }

    /// Write a symbol's close series and its metadata sidecar.
    pub fn write(&self, symbol: &str, prices: &[ClosePrice]) -> Result<(), DataError> {
        std::fs::create_dir_all(&self.root)?;

        let mut writer = csv::Writer::from_path(self.csv_path(symbol))?;
        for p in prices {
            writer.serialize(CsvOut {
                date: p.date,
                close: p.price,
                adj_close: p.price,
            })?;
        }
        writer.flush()?;

        if let (Some(first), Some(last)) = (prices.first(), prices.last()) {
            let meta = StoreMeta {
                symbol: symbol.to_string(),
                row_count: prices.len(),
                start_date: first.date,
                end_date: last.date,
                written_at: chrono::Local::now().naive_local(),
            };
            std::fs::write(self.meta_path(symbol), serde_json::to_string_pretty(&meta)?)?;
        }
        Ok(())
    }

    /// Metadata sidecar for a stored symbol.
    pub fn meta(&self, symbol: &str) -> Result<StoreMeta, DataError> {
        let path = self.meta_path(symbol);
        if !path.exists() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Symbols with a CSV file in the store, sorted.
    pub fn symbols(&self) -> Result<Vec<String>, DataError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut symbols = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if let Some(stem) = name.strip_suffix(".csv") {
                symbols.push(stem.to_string());
            }
        }
        symbols.sort();
        Ok(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(date: &str, price: f64) -> ClosePrice {
        ClosePrice {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            price,
        }
    }

    fn temp_store() -> (tempfile::TempDir, CsvStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn write_then_load_roundtrip() {
        let (_dir, store) = temp_store();
        let prices = vec![p("2024-01-02", 100.0), p("2024-01-03", 101.5)];
        store.write("spy", &prices).unwrap();

        let loaded = store.load("spy").unwrap();
        assert_eq!(loaded, prices);
    }

    #[test]
    fn load_sorts_by_date() {
        let (_dir, store) = temp_store();
        store
            .write("spy", &[p("2024-01-03", 101.0), p("2024-01-02", 100.0)])
            .unwrap();
        let loaded = store.load("spy").unwrap();
        assert!(loaded[0].date < loaded[1].date);
    }

    #[test]
    fn missing_symbol_is_typed_error() {
        let (_dir, store) = temp_store();
        let err = store.load("nope").unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound { .. }));
    }

    #[test]
    fn duplicate_date_is_rejected() {
        let (_dir, store) = temp_store();
        store
            .write("spy", &[p("2024-01-02", 100.0), p("2024-01-02", 101.0)])
            .unwrap();
        let err = store.load("spy").unwrap_err();
        assert!(matches!(err, DataError::DuplicateDate { .. }));
    }

    #[test]
    fn adj_close_preferred_over_close() {
        let (_dir, store) = temp_store();
        std::fs::create_dir_all(store.root()).unwrap();
        std::fs::write(
            store.root().join("spy.csv"),
            "date,close,adj_close\n2024-01-02,100.0,99.0\n",
        )
        .unwrap();
        let loaded = store.load("spy").unwrap();
        assert_eq!(loaded[0].price, 99.0);
    }

    #[test]
    fn close_fallback_when_adj_close_absent() {
        let (_dir, store) = temp_store();
        std::fs::create_dir_all(store.root()).unwrap();
        std::fs::write(
            store.root().join("spy.csv"),
            "date,close\n2024-01-02,100.0\n",
        )
        .unwrap();
        let loaded = store.load("spy").unwrap();
        assert_eq!(loaded[0].price, 100.0);
    }

    #[test]
    fn meta_sidecar_reflects_series() {
        let (_dir, store) = temp_store();
        store
            .write("spy", &[p("2024-01-02", 100.0), p("2024-06-03", 105.0)])
            .unwrap();
        let meta = store.meta("spy").unwrap();
        assert_eq!(meta.symbol, "spy");
        assert_eq!(meta.row_count, 2);
        assert_eq!(meta.start_date, p("2024-01-02", 0.0).date);
        assert_eq!(meta.end_date, p("2024-06-03", 0.0).date);
    }

    #[test]
    fn symbols_lists_csv_stems() {
        let (_dir, store) = temp_store();
        store.write("spy", &[p("2024-01-02", 100.0)]).unwrap();
        store.write("qqq", &[p("2024-01-02", 300.0)]).unwrap();
        assert_eq!(store.symbols().unwrap(), vec!["qqq", "spy"]);
    }
}
