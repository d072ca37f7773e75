//! Deterministic synthetic close prices for development and tests.
//!
//! A per-symbol random walk seeded from a BLAKE3 hash of the symbol name:
//! the same symbol and date range always produce the same series. Weekends
//! are skipped. Results produced on synthetic data are tagged upstream.

use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::ClosePrice;

/// Generate a synthetic close series for `[start, end]`, weekends skipped.
pub fn synthetic_prices(symbol: &str, start: NaiveDate, end: NaiveDate) -> Vec<ClosePrice> {
    let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
    let mut rng = StdRng::from_seed(seed);

    let mut prices = Vec::new();
    let mut price = 100.0_f64;
    let mut current = start;

    while current <= end {
        let weekday = current.weekday();
        if weekday == chrono::Weekday::Sat || weekday == chrono::Weekday::Sun {
            current += chrono::Duration::days(1);
            continue;
        }

        let daily_return: f64 = rng.gen_range(-0.03..0.03);
        price *= 1.0 + daily_return;
        prices.push(ClosePrice {
            date: current,
            price,
        });
        current += chrono::Duration::days(1);
    }

    prices
}
