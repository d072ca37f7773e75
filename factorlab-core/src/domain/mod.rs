//! Domain types: aligned frames and the portfolio.

pub mod frame;
pub mod portfolio;
pub mod signal;

pub use frame::{PriceFrame, WeightFrame};
pub use portfolio::Portfolio;
pub use signal::SignalFrame;
