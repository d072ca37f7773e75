//! Custom algos layered on the engine's stack.
//!
//! These two are strategy-side concerns, not engine built-ins: selection
//! from a precomputed boolean frame, and weighting from a precomputed
//! target-weight frame. Both frames must share the traded frame's axis.

use factorlab_core::algos::{Algo, AlgoContext};
use factorlab_core::domain::{SignalFrame, WeightFrame};

/// Selects the symbols whose signal is true this session.
#[derive(Debug, Clone)]
pub struct SelectWhere {
    signal: SignalFrame,
}

impl SelectWhere {
    pub fn new(signal: SignalFrame) -> Self {
        Self { signal }
    }
}

impl Algo for SelectWhere {
    fn name(&self) -> &str {
        "select_where"
    }

    fn run(&self, ctx: &mut AlgoContext<'_>) -> bool {
        debug_assert_eq!(
            self.signal.dates().get(ctx.index),
            Some(&ctx.date),
            "signal frame axis diverged from price frame axis"
        );
        ctx.selected = ctx
            .frame
            .columns()
            .iter()
            .filter(|sym| self.signal.get(sym, ctx.index))
            .cloned()
            .collect();
        true
    }
}

/// Copies a precomputed weight row into the context.
///
/// Weights may be negative — the relative pass uses +1/−1 rows to hold a
/// variant long against the baseline short.
#[derive(Debug, Clone)]
pub struct WeighTarget {
    weights: WeightFrame,
}

impl WeighTarget {
    pub fn new(weights: WeightFrame) -> Self {
        Self { weights }
    }
}

impl Algo for WeighTarget {
    fn name(&self) -> &str {
        "weigh_target"
    }

    fn run(&self, ctx: &mut AlgoContext<'_>) -> bool {
        debug_assert_eq!(
            self.weights.dates().get(ctx.index),
            Some(&ctx.date),
            "weight frame axis diverged from price frame axis"
        );
        ctx.weights = self.weights.row(ctx.index);
        true
    }
}
