//! Selection signals from trailing returns.
//!
//! Each session, every symbol's `lookback`-session return is compared to
//! the cross-sectional median of that session's returns:
//! - trend: at or above the median (winners stay in the basket)
//! - reversal: at or below the median (losers, betting on mean reversion)
//!
//! Ties at the median land in both baskets. The trend signal is lagged by
//! an execution delay before use; the foresight variant shifts the raw
//! trend signal backward by the full lookback, selecting tomorrow's
//! winners today — an upper bound no live strategy can reach.

use factorlab_core::domain::{PriceFrame, SignalFrame};

/// The three selection frames derived from one price frame.
#[derive(Debug, Clone)]
pub struct SignalSet {
    /// Above-median momentum, lagged by the execution delay.
    pub trend: SignalFrame,
    /// Below-median momentum, unlagged.
    pub reversal: SignalFrame,
    /// The trend rule with perfect foresight of the next lookback window.
    pub best_case: SignalFrame,
}

/// Build trend, reversal, and foresight signals from a price frame.
pub fn generate_signals(frame: &PriceFrame, lookback: usize, signal_lag: usize) -> SignalSet {
    let returns = frame.pct_change(lookback);

    let mut trend_raw =
        SignalFrame::all_false(frame.dates().to_vec(), frame.columns().to_vec());
    let mut reversal = trend_raw.clone();

    for index in 0..frame.len() {
        let mid = returns.cross_median(index);
        if !mid.is_finite() {
            continue;
        }
        for sym in frame.columns() {
            let r = returns.value(sym, index);
            if !r.is_finite() {
                continue;
            }
            if r >= mid {
                trend_raw.set(sym, index, true);
            }
            if r <= mid {
                reversal.set(sym, index, true);
            }
        }
    }

    SignalSet {
        best_case: trend_raw.lead(lookback),
        trend: trend_raw.lag(signal_lag),
        reversal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn frame(columns: Vec<(&str, Vec<f64>)>) -> PriceFrame {
        let n = columns[0].1.len();
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let dates: Vec<NaiveDate> = (0..n)
            .map(|i| base + chrono::Duration::days(i as i64))
            .collect();
        PriceFrame::new(
            dates,
            columns.into_iter().map(|(s, v)| (s.to_string(), v)).collect(),
        )
    }

    /// Three symbols with clearly ordered 1-session returns:
    /// up +10%, flat 0%, down -10% every session.
    fn ordered_frame(n: usize) -> PriceFrame {
        let up: Vec<f64> = (0..n).map(|i| 100.0 * 1.1_f64.powi(i as i32)).collect();
        let flat = vec![100.0; n];
        let down: Vec<f64> = (0..n).map(|i| 100.0 * 0.9_f64.powi(i as i32)).collect();
        frame(vec![("up", up), ("flat", flat), ("down", down)])
    }

    #[test]
    fn winner_is_trend_loser_is_reversal() {
        let f = ordered_frame(4);
        let s = generate_signals(&f, 1, 0);
        // Median return is the flat symbol's 0%.
        assert!(s.trend.get("up", 2));
        assert!(!s.trend.get("down", 2));
        assert!(s.reversal.get("down", 2));
        assert!(!s.reversal.get("up", 2));
    }

    #[test]
    fn median_symbol_lands_in_both_baskets() {
        let f = ordered_frame(4);
        let s = generate_signals(&f, 1, 0);
        assert!(s.trend.get("flat", 2));
        assert!(s.reversal.get("flat", 2));
    }

    #[test]
    fn warmup_rows_select_nothing() {
        let f = ordered_frame(6);
        let s = generate_signals(&f, 3, 0);
        for i in 0..3 {
            assert_eq!(s.trend.selected_count(i), 0, "row {i}");
            assert_eq!(s.reversal.selected_count(i), 0, "row {i}");
        }
        assert!(s.trend.selected_count(3) > 0);
    }

    #[test]
    fn execution_lag_delays_trend_only() {
        let f = ordered_frame(8);
        let lagged = generate_signals(&f, 1, 2);
        let unlagged = generate_signals(&f, 1, 0);
        // Row 3 of the lagged trend is row 1 of the unlagged one.
        assert_eq!(lagged.trend.get("up", 3), unlagged.trend.get("up", 1));
        // Reversal ignores the lag entirely.
        for i in 0..8 {
            assert_eq!(
                lagged.reversal.get("down", i),
                unlagged.reversal.get("down", i)
            );
        }
    }

    #[test]
    fn best_case_sees_the_future() {
        let f = ordered_frame(8);
        let s = generate_signals(&f, 2, 0);
        let raw = generate_signals(&f, 2, 0);
        // best_case at t equals the raw trend rule at t + lookback.
        for i in 0..6 {
            assert_eq!(s.best_case.get("up", i), raw.trend.get("up", i + 2));
        }
        // Trailing rows have no future to look at.
        assert_eq!(s.best_case.selected_count(6), 0);
        assert_eq!(s.best_case.selected_count(7), 0);
    }

    #[test]
    fn void_prices_drop_out_of_the_cross_section() {
        let f = frame(vec![
            ("aaa", vec![100.0, 110.0, 121.0]),
            ("bbb", vec![100.0, f64::NAN, 90.0]),
            ("ccc", vec![100.0, 95.0, 90.0]),
        ]);
        let s = generate_signals(&f, 1, 0);
        // bbb has no return on rows 1 and 2 (void endpoint): never selected.
        assert!(!s.trend.get("bbb", 1));
        assert!(!s.reversal.get("bbb", 1));
        assert!(!s.trend.get("bbb", 2));
        assert!(!s.reversal.get("bbb", 2));
        // The remaining two symbols still rank against their own median.
        assert!(s.trend.get("aaa", 1));
        assert!(s.reversal.get("ccc", 1));
    }
}
