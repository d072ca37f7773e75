//! Price and weight frames — daily series aligned on a common date axis.
//!
//! Missing observations are strict NaN. No forward-fill of tradable prices;
//! the portfolio layer decides how voids affect valuation.

use chrono::NaiveDate;
use std::collections::HashMap;

/// Aligned daily values for multiple symbols on a common, ascending date axis.
///
/// Every column has exactly one value per date. A void observation is NaN.
#[derive(Debug, Clone)]
pub struct PriceFrame {
    dates: Vec<NaiveDate>,
    columns: Vec<String>,
    values: HashMap<String, Vec<f64>>,
}

impl PriceFrame {
    /// Build a frame from ordered columns.
    ///
    /// Panics if dates are not strictly ascending or any column's length
    /// differs from the axis — callers construct frames from already
    /// aligned data.
    pub fn new(dates: Vec<NaiveDate>, columns: Vec<(String, Vec<f64>)>) -> Self {
        assert!(
            dates.windows(2).all(|w| w[0] < w[1]),
            "frame dates must be strictly ascending"
        );
        let mut order = Vec::with_capacity(columns.len());
        let mut values = HashMap::with_capacity(columns.len());
        for (name, series) in columns {
            assert_eq!(
                series.len(),
                dates.len(),
                "column '{name}' length does not match date axis"
            );
            assert!(!values.contains_key(&name), "duplicate column '{name}'");
            order.push(name.clone());
            values.insert(name, series);
        }
        Self {
            dates,
            columns: order,
            values,
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of sessions on the axis.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Value for `symbol` at row `index`. Unknown symbols read as NaN,
    /// the same as a void observation.
    pub fn value(&self, symbol: &str, index: usize) -> f64 {
        self.values
            .get(symbol)
            .map(|s| s[index])
            .unwrap_or(f64::NAN)
    }

    pub fn series(&self, symbol: &str) -> Option<&[f64]> {
        self.values.get(symbol).map(|s| s.as_slice())
    }

    /// n-session simple returns: `r[t] = v[t] / v[t-n] - 1`.
    ///
    /// Rows before `periods`, and rows where either endpoint is void or the
    /// base is non-positive, are NaN.
    pub fn pct_change(&self, periods: usize) -> PriceFrame {
        let columns = self
            .columns
            .iter()
            .map(|name| {
                let series = &self.values[name];
                let returns: Vec<f64> = (0..series.len())
                    .map(|t| {
                        if t < periods {
                            return f64::NAN;
                        }
                        let base = series[t - periods];
                        let cur = series[t];
                        if !base.is_finite() || base <= 0.0 || !cur.is_finite() {
                            f64::NAN
                        } else {
                            cur / base - 1.0
                        }
                    })
                    .collect();
                (name.clone(), returns)
            })
            .collect();
        PriceFrame::new(self.dates.clone(), columns)
    }

    /// Cross-sectional median of the finite values at row `index`.
    ///
    /// Linear interpolation for even counts; NaN when no column is finite.
    pub fn cross_median(&self, index: usize) -> f64 {
        let mut finite: Vec<f64> = self
            .columns
            .iter()
            .map(|c| self.values[c][index])
            .filter(|v| v.is_finite())
            .collect();
        if finite.is_empty() {
            return f64::NAN;
        }
        finite.sort_by(f64::total_cmp);
        let n = finite.len();
        if n % 2 == 1 {
            finite[n / 2]
        } else {
            (finite[n / 2 - 1] + finite[n / 2]) / 2.0
        }
    }

    /// The first `sessions` rows as a new frame.
    ///
    /// Used to cut a backtest window out of a longer loaded history while
    /// keeping row indices aligned with frames derived from the full axis.
    pub fn head(&self, sessions: usize) -> PriceFrame {
        let n = sessions.min(self.dates.len());
        let columns = self
            .columns
            .iter()
            .map(|name| (name.clone(), self.values[name][..n].to_vec()))
            .collect();
        PriceFrame::new(self.dates[..n].to_vec(), columns)
    }

    /// Number of rows with a date strictly before `end`.
    pub fn sessions_before(&self, end: NaiveDate) -> usize {
        self.dates.partition_point(|d| *d < end)
    }
}

/// Target portfolio weights on the same axis shape as a [`PriceFrame`].
///
/// Weights may be negative (short legs). Defaults to 0.0 everywhere.
#[derive(Debug, Clone)]
pub struct WeightFrame {
    dates: Vec<NaiveDate>,
    columns: Vec<String>,
    values: HashMap<String, Vec<f64>>,
}

impl WeightFrame {
    /// All-zero weights over the given axis and columns.
    pub fn zeros(dates: Vec<NaiveDate>, columns: Vec<String>) -> Self {
        let values = columns
            .iter()
            .map(|c| (c.clone(), vec![0.0; dates.len()]))
            .collect();
        Self {
            dates,
            columns,
            values,
        }
    }

    /// Set one column to a constant weight on every date.
    ///
    /// Panics on unknown columns — weight frames are built against a known
    /// strategy-series axis.
    pub fn fill_column(&mut self, symbol: &str, weight: f64) {
        let series = self
            .values
            .get_mut(symbol)
            .unwrap_or_else(|| panic!("unknown weight column '{symbol}'"));
        for w in series.iter_mut() {
            *w = weight;
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The weight row at `index` as a symbol → weight map.
    pub fn row(&self, index: usize) -> HashMap<String, f64> {
        self.columns
            .iter()
            .map(|c| (c.clone(), self.values[c][index]))
            .collect()
    }
}
