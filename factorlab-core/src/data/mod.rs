//! Data layer: CSV price store, multi-symbol alignment, synthetic prices.

pub mod align;
pub mod csv_store;
pub mod synthetic;

pub use align::align_symbols;
pub use csv_store::{CsvStore, DataError, StoreMeta};
pub use synthetic::synthetic_prices;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily adjusted-close observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosePrice {
    pub date: NaiveDate,
    pub price: f64,
}
