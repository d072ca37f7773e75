//! Performance metrics — pure functions over an equity series.
//!
//! Every metric is equity-curve in, scalar out; no dependency on the
//! engine or the data pipeline. A weight-rebalancing portfolio has no
//! trade tape, so all statistics here derive from session returns.

use serde::{Deserialize, Serialize};

/// Sessions per year used for annualisation.
const SESSIONS_PER_YEAR: f64 = 252.0;

/// Aggregate performance statistics for one strategy series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total_return: f64,
    pub cagr: f64,
    pub annual_vol: f64,
    pub sharpe: f64,
    pub sortino: f64,
    pub max_drawdown: f64,
    pub calmar: f64,
}

impl PerformanceMetrics {
    /// Compute all metrics from an equity series.
    pub fn compute(equity: &[f64]) -> Self {
        Self {
            total_return: total_return(equity),
            cagr: cagr(equity),
            annual_vol: annual_vol(equity),
            sharpe: sharpe_ratio(equity, 0.0),
            sortino: sortino_ratio(equity, 0.0),
            max_drawdown: max_drawdown(equity),
            calmar: calmar_ratio(equity),
        }
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Total return as a fraction: (final - initial) / initial.
pub fn total_return(equity: &[f64]) -> f64 {
    if equity.len() < 2 {
        return 0.0;
    }
    let initial = equity[0];
    let final_eq = *equity.last().unwrap();
    if initial <= 0.0 {
        return 0.0;
    }
    (final_eq - initial) / initial
}

/// Compound annual growth rate, assuming 252 sessions per year.
///
/// Returns 0.0 for fewer than two sessions or non-positive endpoints.
pub fn cagr(equity: &[f64]) -> f64 {
    if equity.len() < 2 {
        return 0.0;
    }
    let initial = equity[0];
    let final_eq = *equity.last().unwrap();
    if initial <= 0.0 || final_eq <= 0.0 {
        return 0.0;
    }
    let years = equity.len() as f64 / SESSIONS_PER_YEAR;
    (final_eq / initial).powf(1.0 / years) - 1.0
}

/// Annualised volatility of session returns.
pub fn annual_vol(equity: &[f64]) -> f64 {
    let returns = session_returns(equity);
    if returns.len() < 2 {
        return 0.0;
    }
    std_dev(&returns) * SESSIONS_PER_YEAR.sqrt()
}

/// Annualised Sharpe ratio from session returns.
///
/// Returns 0.0 if variance is zero or there are fewer than 2 sessions.
pub fn sharpe_ratio(equity: &[f64], risk_free_rate: f64) -> f64 {
    let returns = session_returns(equity);
    if returns.len() < 2 {
        return 0.0;
    }
    let daily_rf = risk_free_rate / SESSIONS_PER_YEAR;
    let excess: Vec<f64> = returns.iter().map(|r| r - daily_rf).collect();
    let mean = mean_f64(&excess);
    let std = std_dev(&excess);
    if std < 1e-15 {
        return 0.0;
    }
    (mean / std) * SESSIONS_PER_YEAR.sqrt()
}

/// Annualised Sortino ratio (downside deviation only).
///
/// Returns 0.0 when there is no downside at all.
pub fn sortino_ratio(equity: &[f64], risk_free_rate: f64) -> f64 {
    let returns = session_returns(equity);
    if returns.len() < 2 {
        return 0.0;
    }
    let daily_rf = risk_free_rate / SESSIONS_PER_YEAR;
    let excess: Vec<f64> = returns.iter().map(|r| r - daily_rf).collect();
    let mean = mean_f64(&excess);

    let downside_sq: Vec<f64> = excess.iter().filter(|&&r| r < 0.0).map(|r| r * r).collect();
    if downside_sq.is_empty() {
        return 0.0;
    }

    let downside_var = downside_sq.iter().sum::<f64>() / returns.len() as f64;
    let downside_std = downside_var.sqrt();
    if downside_std < 1e-15 {
        return 0.0;
    }
    (mean / downside_std) * SESSIONS_PER_YEAR.sqrt()
}

/// Maximum drawdown as a negative fraction (e.g., -0.15 = 15% drawdown).
pub fn max_drawdown(equity: &[f64]) -> f64 {
    if equity.len() < 2 {
        return 0.0;
    }
    let mut peak = equity[0];
    let mut max_dd = 0.0_f64;

    for &eq in equity {
        if eq > peak {
            peak = eq;
        }
        if peak > 0.0 {
            let dd = (eq - peak) / peak;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Calmar ratio: CAGR / |max drawdown|.
///
/// Returns 0.0 if there is no drawdown or CAGR is non-positive.
pub fn calmar_ratio(equity: &[f64]) -> f64 {
    let c = cagr(equity);
    let dd = max_drawdown(equity);
    if dd >= 0.0 || c <= 0.0 {
        return 0.0;
    }
    c / dd.abs()
}

// ─── Helpers ────────────────────────────────────────────────────────

/// Session-over-session returns of an equity series.
pub fn session_returns(equity: &[f64]) -> Vec<f64> {
    if equity.len() < 2 {
        return Vec::new();
    }
    equity
        .windows(2)
        .map(|w| if w[0] > 0.0 { (w[1] - w[0]) / w[0] } else { 0.0 })
        .collect()
}

pub(crate) fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean_f64(values);
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
