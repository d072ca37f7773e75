//! Boolean selection frames.
//!
//! A signal frame shares a price frame's axis and answers one question per
//! symbol per session: is this symbol in the basket today? Absent data is
//! false — a shifted-in row selects nothing.

use chrono::NaiveDate;
use std::collections::HashMap;

/// Boolean selection matrix on a date axis.
#[derive(Debug, Clone)]
pub struct SignalFrame {
    dates: Vec<NaiveDate>,
    columns: Vec<String>,
    values: HashMap<String, Vec<bool>>,
}

impl SignalFrame {
    /// An all-false frame over the given axis and columns.
    pub fn all_false(dates: Vec<NaiveDate>, columns: Vec<String>) -> Self {
        let values = columns
            .iter()
            .map(|c| (c.clone(), vec![false; dates.len()]))
            .collect();
        Self {
            dates,
            columns,
            values,
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Signal for `symbol` at row `index`. Unknown symbols are false.
    pub fn get(&self, symbol: &str, index: usize) -> bool {
        self.values.get(symbol).map(|s| s[index]).unwrap_or(false)
    }

    /// Set the signal for a known column. Panics on unknown columns —
    /// frames are built against a fixed universe.
    pub fn set(&mut self, symbol: &str, index: usize, value: bool) {
        let series = self
            .values
            .get_mut(symbol)
            .unwrap_or_else(|| panic!("unknown signal column '{symbol}'"));
        series[index] = value;
    }

    /// Shift forward in time: `out[t] = in[t - periods]`.
    ///
    /// The first `periods` rows become false. Models an execution delay
    /// between observing a signal and acting on it.
    pub fn lag(&self, periods: usize) -> SignalFrame {
        self.shifted(|t, len| {
            if t < periods || periods > len {
                None
            } else {
                Some(t - periods)
            }
        })
    }

    /// Shift backward in time: `out[t] = in[t + periods]`.
    ///
    /// The last `periods` rows become false. Only meaningful for
    /// foresight baselines — a live strategy cannot trade on it.
    pub fn lead(&self, periods: usize) -> SignalFrame {
        self.shifted(|t, len| {
            let src = t.checked_add(periods)?;
            if src < len {
                Some(src)
            } else {
                None
            }
        })
    }

    fn shifted(&self, source: impl Fn(usize, usize) -> Option<usize>) -> SignalFrame {
        let len = self.dates.len();
        let values = self
            .columns
            .iter()
            .map(|name| {
                let series = &self.values[name];
                let out: Vec<bool> = (0..len)
                    .map(|t| source(t, len).map(|s| series[s]).unwrap_or(false))
                    .collect();
                (name.clone(), out)
            })
            .collect();
        SignalFrame {
            dates: self.dates.clone(),
            columns: self.columns.clone(),
            values,
        }
    }

    /// The first `sessions` rows as a new frame.
    pub fn head(&self, sessions: usize) -> SignalFrame {
        let n = sessions.min(self.dates.len());
        let values = self
            .columns
            .iter()
            .map(|name| (name.clone(), self.values[name][..n].to_vec()))
            .collect();
        SignalFrame {
            dates: self.dates[..n].to_vec(),
            columns: self.columns.clone(),
            values,
        }
    }

    /// Count of true cells at row `index`.
    pub fn selected_count(&self, index: usize) -> usize {
        self.columns.iter().filter(|c| self.get(c, index)).count()
    }
}
