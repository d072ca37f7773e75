//! FactorLab Core — engine: frames, algo stack, portfolio accounting, data store.
//!
//! This crate contains the simulation engine the runner builds on:
//! - Aligned price, weight, and boolean signal frames
//! - Algo trait and the daily algo stack (schedule → select → weigh → rebalance)
//! - Portfolio accounting with fractional long/short positions
//! - Backtest loop producing capital-based and 100-rebased equity series
//! - CSV price store with metadata sidecars, multi-symbol alignment,
//!   and a deterministic synthetic price generator

pub mod algos;
pub mod data;
pub mod domain;
pub mod engine;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: engine types cross thread boundaries.
    ///
    /// The runner fans the strategy variants out over a rayon pool; if any
    /// of these types loses Send + Sync, the build breaks here first.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::PriceFrame>();
        require_sync::<domain::PriceFrame>();
        require_send::<domain::SignalFrame>();
        require_sync::<domain::SignalFrame>();
        require_send::<domain::WeightFrame>();
        require_sync::<domain::WeightFrame>();
        require_send::<domain::Portfolio>();
        require_sync::<domain::Portfolio>();

        require_send::<algos::Strategy>();
        require_sync::<algos::Strategy>();
        require_send::<algos::RunQuarterly>();
        require_sync::<algos::RunQuarterly>();
        require_send::<algos::SelectAll>();
        require_sync::<algos::SelectAll>();
        require_send::<algos::WeighInvVol>();
        require_sync::<algos::WeighInvVol>();
        require_send::<algos::Rebalance>();
        require_sync::<algos::Rebalance>();

        require_send::<engine::RunResult>();
        require_sync::<engine::RunResult>();

        require_send::<data::ClosePrice>();
        require_sync::<data::ClosePrice>();
    }

    /// Architecture contract: algos never see the raw equity series.
    ///
    /// `Algo::run` receives an `AlgoContext` holding the price frame, the
    /// scratch selection/weights, and the portfolio — nothing else. If the
    /// trait signature grows, every implementation breaks loudly.
    #[test]
    fn algo_trait_runs_on_context_only() {
        fn _check_trait_object_builds(
            algo: &dyn algos::Algo,
            ctx: &mut algos::AlgoContext<'_>,
        ) -> bool {
            algo.run(ctx)
        }
    }
}
