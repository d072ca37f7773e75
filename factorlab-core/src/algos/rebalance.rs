//! Rebalancing — trade the portfolio to the session's target weights.

use super::{Algo, AlgoContext};

/// Trades to the weight map at this session's prices.
///
/// Every symbol in the map is set to `weight × equity / price`; held
/// symbols absent from the map are liquidated. Weights on symbols without
/// a usable price are dropped without renormalising — the slack stays in
/// cash.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rebalance;

impl Algo for Rebalance {
    fn name(&self) -> &str {
        "rebalance"
    }

    fn run(&self, ctx: &mut AlgoContext<'_>) -> bool {
        // Mark today's prices first so sizing uses this session's closes.
        for sym in ctx.frame.columns() {
            ctx.portfolio.observe_price(sym, ctx.frame.value(sym, ctx.index));
        }
        let equity = ctx.portfolio.equity();

        // Liquidate anything the target no longer includes.
        for sym in ctx.portfolio.held_symbols() {
            if ctx.weights.contains_key(&sym) {
                continue;
            }
            if let Some(price) = ctx.portfolio.marking_price(&sym) {
                ctx.portfolio.set_position(&sym, 0.0, price);
            }
        }

        // Trade to target.
        for (sym, weight) in &ctx.weights {
            let price = ctx.frame.value(sym, ctx.index);
            if !price.is_finite() || price <= 0.0 {
                continue;
            }
            let quantity = weight * equity / price;
            ctx.portfolio.set_position(sym, quantity, price);
        }
        true
    }
}
