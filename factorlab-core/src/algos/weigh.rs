//! Inverse-volatility weighting.

use super::{Algo, AlgoContext};
use crate::domain::PriceFrame;

/// Default volatility lookback: three months of sessions.
pub const DEFAULT_VOL_LOOKBACK: usize = 63;

/// Weights the selected symbols proportional to the inverse of their
/// trailing daily-return volatility.
///
/// Symbols without a complete lookback window of finite prices are
/// excluded. Zero-volatility symbols split the full weight among
/// themselves — the finite analogue of an infinite inverse. If nothing is
/// weighable the stack stops, leaving the portfolio as it was.
#[derive(Debug, Clone, Copy)]
pub struct WeighInvVol {
    pub lookback: usize,
}

impl WeighInvVol {
    pub fn new(lookback: usize) -> Self {
        assert!(lookback >= 2, "volatility lookback must be >= 2");
        Self { lookback }
    }
}

impl Default for WeighInvVol {
    fn default() -> Self {
        Self::new(DEFAULT_VOL_LOOKBACK)
    }
}

impl Algo for WeighInvVol {
    fn name(&self) -> &str {
        "weigh_inv_vol"
    }

    fn run(&self, ctx: &mut AlgoContext<'_>) -> bool {
        let mut vols: Vec<(String, f64)> = Vec::with_capacity(ctx.selected.len());
        for sym in &ctx.selected {
            if let Some(vol) = trailing_vol(ctx.frame, sym, ctx.index, self.lookback) {
                vols.push((sym.clone(), vol));
            }
        }
        if vols.is_empty() {
            ctx.weights.clear();
            return false;
        }

        ctx.weights.clear();
        let zero_vol: Vec<&String> = vols
            .iter()
            .filter(|(_, v)| *v <= f64::EPSILON)
            .map(|(s, _)| s)
            .collect();
        if !zero_vol.is_empty() {
            let w = 1.0 / zero_vol.len() as f64;
            for sym in zero_vol {
                ctx.weights.insert(sym.clone(), w);
            }
            return true;
        }

        let inv_sum: f64 = vols.iter().map(|(_, v)| 1.0 / v).sum();
        for (sym, vol) in vols {
            ctx.weights.insert(sym, (1.0 / vol) / inv_sum);
        }
        true
    }
}

/// Sample standard deviation of daily returns over the window ending at
/// `index` (inclusive), spanning `lookback` returns.
///
/// Returns None if any price in the window is missing or non-positive.
fn trailing_vol(frame: &PriceFrame, symbol: &str, index: usize, lookback: usize) -> Option<f64> {
    if index < lookback {
        return None;
    }
    let mut returns = Vec::with_capacity(lookback);
    for t in (index - lookback + 1)..=index {
        let prev = frame.value(symbol, t - 1);
        let cur = frame.value(symbol, t);
        if !prev.is_finite() || prev <= 0.0 || !cur.is_finite() || cur <= 0.0 {
            return None;
        }
        returns.push(cur / prev - 1.0);
    }
    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let var = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>()
        / (returns.len() - 1) as f64;
    Some(var.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Portfolio;
    use chrono::NaiveDate;

    fn frame(columns: Vec<(&str, Vec<f64>)>) -> PriceFrame {
        let n = columns[0].1.len();
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates: Vec<NaiveDate> = (0..n)
            .map(|i| base + chrono::Duration::days(i as i64))
            .collect();
        PriceFrame::new(
            dates,
            columns.into_iter().map(|(s, v)| (s.to_string(), v)).collect(),
        )
    }

    fn weigh_at(
        frame: &PriceFrame,
        selected: &[&str],
        index: usize,
        lookback: usize,
    ) -> Option<std::collections::HashMap<String, f64>> {
        let mut portfolio = Portfolio::new(1_000.0);
        let mut ctx = AlgoContext::new(index, frame, &mut portfolio);
        ctx.selected = selected.iter().map(|s| s.to_string()).collect();
        if WeighInvVol::new(lookback).run(&mut ctx) {
            Some(ctx.weights)
        } else {
            None
        }
    }

    #[test]
    fn lower_vol_gets_higher_weight() {
        // aaa oscillates hard, bbb barely moves.
        let f = frame(vec![
            ("aaa", vec![100.0, 110.0, 95.0, 112.0, 98.0, 115.0]),
            ("bbb", vec![100.0, 100.5, 100.2, 100.7, 100.4, 100.9]),
        ]);
        let w = weigh_at(&f, &["aaa", "bbb"], 5, 4).unwrap();
        assert!(w["bbb"] > w["aaa"]);
        assert!((w["aaa"] + w["bbb"] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn weights_sum_to_one() {
        let f = frame(vec![
            ("aaa", vec![100.0, 101.0, 103.0, 102.0, 105.0, 104.0]),
            ("bbb", vec![50.0, 51.0, 50.5, 52.0, 51.5, 53.0]),
            ("ccc", vec![20.0, 20.2, 20.1, 20.4, 20.3, 20.6]),
        ]);
        let w = weigh_at(&f, &["aaa", "bbb", "ccc"], 5, 4).unwrap();
        let total: f64 = w.values().sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(w.values().all(|&x| x > 0.0));
    }

    #[test]
    fn incomplete_window_excludes_symbol() {
        let f = frame(vec![
            ("aaa", vec![100.0, 101.0, 103.0, 102.0, 105.0, 104.0]),
            ("bbb", vec![f64::NAN, 51.0, 50.5, 52.0, 51.5, 53.0]),
        ]);
        // Window for index 5, lookback 5 touches row 0 where bbb is void.
        let w = weigh_at(&f, &["aaa", "bbb"], 5, 5).unwrap();
        assert!(!w.contains_key("bbb"));
        assert!((w["aaa"] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn nothing_weighable_stops_stack() {
        let f = frame(vec![("aaa", vec![100.0, 101.0, 102.0])]);
        // Not enough history for a 5-return window at index 2.
        assert!(weigh_at(&f, &["aaa"], 2, 5).is_none());
    }

    #[test]
    fn zero_vol_symbols_take_all_weight() {
        let f = frame(vec![
            ("flat", vec![100.0; 6]),
            ("noisy", vec![100.0, 104.0, 98.0, 105.0, 97.0, 106.0]),
        ]);
        let w = weigh_at(&f, &["flat", "noisy"], 5, 4).unwrap();
        assert!((w["flat"] - 1.0).abs() < 1e-12);
        assert!(!w.contains_key("noisy"));
    }

    #[test]
    fn empty_selection_stops_stack() {
        let f = frame(vec![("aaa", vec![100.0, 101.0, 102.0, 103.0, 104.0, 105.0])]);
        assert!(weigh_at(&f, &[], 5, 4).is_none());
    }

    #[test]
    fn trailing_vol_known_value() {
        let f = frame(vec![("aaa", vec![100.0, 110.0, 99.0, 108.9])]);
        // Returns: +10%, -10%, +10%; sample std of [0.1, -0.1, 0.1]
        let vol = trailing_vol(&f, "aaa", 3, 3).unwrap();
        let mean: f64 = (0.1 - 0.1 + 0.1) / 3.0;
        let expected = (((0.1f64 - mean).powi(2) * 2.0 + (-0.1 - mean).powi(2)) / 2.0).sqrt();
        assert!((vol - expected).abs() < 1e-12);
    }
}
