//! Strategy variant assembly.
//!
//! Four absolute variants share the quarterly inverse-vol core and differ
//! only in selection; the relative pass holds a variant long against the
//! baseline short on the variants' own equity-index series.

use factorlab_core::algos::{Rebalance, RunQuarterly, SelectAll, Strategy, WeighInvVol};
use factorlab_core::domain::{PriceFrame, WeightFrame};

use crate::algos::{SelectWhere, WeighTarget};
use crate::signals::SignalSet;

/// The always-invested baseline every variant is measured against.
pub const BASELINE: &str = "InvVol";

/// Variants that get a relative series against the baseline.
pub const RELATIVE_TARGETS: [&str; 3] = ["Trend", "Reversal", "BestCase"];

/// Names of the four absolute variants, in run order.
pub const VARIANT_NAMES: [&str; 4] = ["InvVol", "Trend", "Reversal", "BestCase"];

/// Build the four absolute strategy variants.
///
/// Selection runs ahead of the schedule so the basket reflects the
/// rebalance session's signal; the schedule then gates weighting and
/// trading to quarter boundaries.
pub fn absolute_variants(signals: &SignalSet, vol_lookback: usize) -> Vec<Strategy> {
    vec![
        Strategy::new(
            BASELINE,
            vec![
                Box::new(RunQuarterly),
                Box::new(SelectAll),
                Box::new(WeighInvVol::new(vol_lookback)),
                Box::new(Rebalance),
            ],
        ),
        Strategy::new(
            "Trend",
            vec![
                Box::new(SelectWhere::new(signals.trend.clone())),
                Box::new(RunQuarterly),
                Box::new(WeighInvVol::new(vol_lookback)),
                Box::new(Rebalance),
            ],
        ),
        Strategy::new(
            "Reversal",
            vec![
                Box::new(SelectWhere::new(signals.reversal.clone())),
                Box::new(RunQuarterly),
                Box::new(WeighInvVol::new(vol_lookback)),
                Box::new(Rebalance),
            ],
        ),
        Strategy::new(
            "BestCase",
            vec![
                Box::new(SelectWhere::new(signals.best_case.clone())),
                Box::new(RunQuarterly),
                Box::new(WeighInvVol::new(vol_lookback)),
                Box::new(Rebalance),
            ],
        ),
    ]
}

/// Build the long/short relative strategy for one variant.
///
/// Target weights are +1 on the variant and −1 on the baseline on every
/// session, traded quarterly over the variants' equity-index frame.
pub fn relative_variant(target: &str, index_frame: &PriceFrame) -> Strategy {
    let mut tw = WeightFrame::zeros(
        index_frame.dates().to_vec(),
        index_frame.columns().to_vec(),
    );
    tw.fill_column(BASELINE, -1.0);
    tw.fill_column(target, 1.0);

    Strategy::new(
        format!("{target}Relative"),
        vec![
            Box::new(WeighTarget::new(tw)),
            Box::new(RunQuarterly),
            Box::new(Rebalance),
        ],
    )
}
