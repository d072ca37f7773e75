//! Rebalance scheduling.

use chrono::{Datelike, NaiveDate};

use super::{Algo, AlgoContext};

/// Passes on the backtest's first session and on the first session of each
/// new calendar quarter; stops the stack on every other session.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunQuarterly;

impl Algo for RunQuarterly {
    fn name(&self) -> &str {
        "run_quarterly"
    }

    fn run(&self, ctx: &mut AlgoContext<'_>) -> bool {
        if ctx.index == 0 {
            return true;
        }
        let prev = ctx.frame.dates()[ctx.index - 1];
        quarter(prev) != quarter(ctx.date)
    }
}

fn quarter(date: NaiveDate) -> (i32, u32) {
    (date.year(), (date.month0()) / 3)
}
