//! The backtest loop.
//!
//! One pass over the frame's sessions: run the strategy's algo stack, then
//! mark the portfolio to market. Output is the raw equity curve plus an
//! equity index rebased to 100 at the first session — the series the
//! relative-performance pass consumes as synthetic "prices".

use serde::{Deserialize, Serialize};

use crate::algos::{AlgoContext, Strategy};
use crate::domain::{Portfolio, PriceFrame};

/// Base value of the rebased equity index.
pub const INDEX_BASE: f64 = 100.0;

/// Result of one backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub name: String,
    /// Mark-to-market equity per session, in capital terms.
    pub equity_curve: Vec<f64>,
    /// Equity rebased to [`INDEX_BASE`] at the first session.
    pub equity_index: Vec<f64>,
    /// Sessions on which the full stack ran to completion.
    pub rebalance_count: usize,
}

/// Run a strategy's algo stack over every session of the frame.
pub fn run_backtest(strategy: &Strategy, frame: &PriceFrame, initial_capital: f64) -> RunResult {
    let mut portfolio = Portfolio::new(initial_capital);
    let mut equity_curve = Vec::with_capacity(frame.len());
    let mut rebalance_count = 0;

    for index in 0..frame.len() {
        {
            let mut ctx = AlgoContext::new(index, frame, &mut portfolio);
            let completed = strategy.algos.iter().all(|algo| algo.run(&mut ctx));
            if completed && !strategy.algos.is_empty() {
                rebalance_count += 1;
            }
        }

        // Mark to market on every session, traded or not.
        for sym in frame.columns() {
            portfolio.observe_price(sym, frame.value(sym, index));
        }
        equity_curve.push(portfolio.equity());
    }

    let equity_index = rebase(&equity_curve);

    RunResult {
        name: strategy.name.clone(),
        equity_curve,
        equity_index,
        rebalance_count,
    }
}

/// Rebase an equity curve to [`INDEX_BASE`] at its first value.
fn rebase(equity_curve: &[f64]) -> Vec<f64> {
    match equity_curve.first() {
        Some(&first) if first > 0.0 => equity_curve
            .iter()
            .map(|&e| INDEX_BASE * e / first)
            .collect(),
        _ => vec![f64::NAN; equity_curve.len()],
    }
}
