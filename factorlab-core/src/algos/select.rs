//! Universe selection.

use super::{Algo, AlgoContext};

/// Selects every symbol with a finite, positive price this session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectAll;

impl Algo for SelectAll {
    fn name(&self) -> &str {
        "select_all"
    }

    fn run(&self, ctx: &mut AlgoContext<'_>) -> bool {
        ctx.selected = ctx
            .frame
            .columns()
            .iter()
            .filter(|sym| {
                let p = ctx.frame.value(sym, ctx.index);
                p.is_finite() && p > 0.0
            })
            .cloned()
            .collect();
        true
    }
}
