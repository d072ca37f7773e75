//! The algo stack — a strategy is an ordered list of small steps.
//!
//! Each session the engine runs the stack top-down. An algo returning
//! `false` stops the stack for that session, so a schedule algo placed
//! before the weighting and rebalancing steps gates how often the
//! portfolio actually trades.

pub mod rebalance;
pub mod schedule;
pub mod select;
pub mod weigh;

pub use rebalance::Rebalance;
pub use schedule::RunQuarterly;
pub use select::SelectAll;
pub use weigh::WeighInvVol;

use crate::domain::{Portfolio, PriceFrame};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Mutable per-session state threaded through the stack.
pub struct AlgoContext<'a> {
    /// Row index of the current session on the frame's axis.
    pub index: usize,
    /// Date of the current session.
    pub date: NaiveDate,
    /// The price data the strategy trades on.
    pub frame: &'a PriceFrame,
    /// Symbols chosen by a selection algo; starts empty each session.
    pub selected: Vec<String>,
    /// Target weights produced by a weighting algo; starts empty each session.
    pub weights: HashMap<String, f64>,
    /// The strategy's portfolio.
    pub portfolio: &'a mut Portfolio,
}

impl<'a> AlgoContext<'a> {
    pub fn new(
        index: usize,
        frame: &'a PriceFrame,
        portfolio: &'a mut Portfolio,
    ) -> AlgoContext<'a> {
        AlgoContext {
            index,
            date: frame.dates()[index],
            frame,
            selected: Vec::new(),
            weights: HashMap::new(),
            portfolio,
        }
    }
}

/// One step in a strategy's daily stack.
///
/// Returning `false` stops the stack for the session — nothing after this
/// algo runs, and no rebalance happens unless one already did.
pub trait Algo: Send + Sync {
    fn name(&self) -> &str;
    fn run(&self, ctx: &mut AlgoContext<'_>) -> bool;
}

/// A named, ordered algo stack.
pub struct Strategy {
    pub name: String,
    pub algos: Vec<Box<dyn Algo>>,
}

impl Strategy {
    pub fn new(name: impl Into<String>, algos: Vec<Box<dyn Algo>>) -> Self {
        Self {
            name: name.into(),
            algos,
        }
    }
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.algos.iter().map(|a| a.name()).collect();
        f.debug_struct("Strategy")
            .field("name", &self.name)
            .field("algos", &names)
            .finish()
    }
}
