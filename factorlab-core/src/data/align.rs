//! Multi-symbol time alignment.
//!
//! Given close series for multiple symbols, align them to the union of
//! their dates. Missing observations get strict NaN — no forward-fill of
//! tradable prices.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use super::ClosePrice;
use crate::domain::PriceFrame;

/// Align symbols to a common timeline, preserving the given column order.
///
/// For each date in the union of all symbols' dates, each symbol either
/// has its observed price or NaN. Symbols in `order` with no series at all
/// become all-NaN columns.
pub fn align_symbols(
    series: &HashMap<String, Vec<ClosePrice>>,
    order: &[String],
) -> PriceFrame {
    let mut all_dates = BTreeSet::new();
    for prices in series.values() {
        for p in prices {
            all_dates.insert(p.date);
        }
    }
    let dates: Vec<NaiveDate> = all_dates.into_iter().collect();

    let columns = order
        .iter()
        .map(|symbol| {
            let lookup: HashMap<NaiveDate, f64> = series
                .get(symbol)
                .map(|prices| prices.iter().map(|p| (p.date, p.price)).collect())
                .unwrap_or_default();
            let aligned: Vec<f64> = dates
                .iter()
                .map(|d| lookup.get(d).copied().unwrap_or(f64::NAN))
                .collect();
            (symbol.clone(), aligned)
        })
        .collect();

    PriceFrame::new(dates, columns)
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

    #[test]
    fn align_fills_missing_with_nan() {
        let mut series = HashMap::new();
        series.insert(
            "aaa".to_string(),
            vec![p("2024-01-02", 100.0), p("2024-01-03", 101.0), p("2024-01-04", 102.0)],
        );
        series.insert(
            "bbb".to_string(),
            vec![p("2024-01-02", 200.0), p("2024-01-04", 202.0)],
        );

        let order = vec!["aaa".to_string(), "bbb".to_string()];
        let frame = align_symbols(&series, &order);

        assert_eq!(frame.len(), 3);
        assert_eq!(frame.columns(), order.as_slice());
        assert_eq!(frame.value("aaa", 1), 101.0);
        assert!(frame.value("bbb", 1).is_nan());
        assert_eq!(frame.value("bbb", 2), 202.0);
    }

    #[test]
    fn column_order_is_preserved() {
        let mut series = HashMap::new();
        series.insert("zzz".to_string(), vec![p("2024-01-02", 1.0)]);
        series.insert("aaa".to_string(), vec![p("2024-01-02", 2.0)]);

        let order = vec!["zzz".to_string(), "aaa".to_string()];
        let frame = align_symbols(&series, &order);
        assert_eq!(frame.columns(), order.as_slice());
    }

    #[test]
    fn absent_symbol_becomes_all_nan() {
        let mut series = HashMap::new();
        series.insert("aaa".to_string(), vec![p("2024-01-02", 100.0)]);

        let order = vec!["aaa".to_string(), "missing".to_string()];
        let frame = align_symbols(&series, &order);
        assert!(frame.value("missing", 0).is_nan());
    }
}
