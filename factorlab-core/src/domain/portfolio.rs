//! Portfolio accounting: cash plus fractional long/short positions.
//!
//! Frictionless — no commission, no slippage, no borrow cost. Held symbols
//! are valued at their last observed price, so a void session never
//! NaN-poisons the equity curve.

use std::collections::HashMap;

/// Cash and open positions for a single strategy.
#[derive(Debug, Clone)]
pub struct Portfolio {
    cash: f64,
    /// Quantity per symbol; negative quantities are short.
    positions: HashMap<String, f64>,
    /// Last finite price seen per symbol, for marking across void sessions.
    last_price: HashMap<String, f64>,
}

impl Portfolio {
    pub fn new(cash: f64) -> Self {
        Self {
            cash,
            positions: HashMap::new(),
            last_price: HashMap::new(),
        }
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn position(&self, symbol: &str) -> f64 {
        self.positions.get(symbol).copied().unwrap_or(0.0)
    }

    /// Symbols with a nonzero position.
    pub fn held_symbols(&self) -> Vec<String> {
        self.positions.keys().cloned().collect()
    }

    /// Record an observed price. Non-finite prices are ignored.
    pub fn observe_price(&mut self, symbol: &str, price: f64) {
        if price.is_finite() && price > 0.0 {
            self.last_price.insert(symbol.to_string(), price);
        }
    }

    /// The marking price for a symbol, if one has ever been observed.
    pub fn marking_price(&self, symbol: &str) -> Option<f64> {
        self.last_price.get(symbol).copied()
    }

    /// Trade to an absolute quantity at the given price.
    ///
    /// Cash moves by the traded delta; a zero target removes the entry.
    /// Non-finite prices are rejected by doing nothing — callers gate on
    /// price validity before trading.
    pub fn set_position(&mut self, symbol: &str, quantity: f64, price: f64) {
        if !price.is_finite() || price <= 0.0 {
            return;
        }
        let current = self.position(symbol);
        let delta = quantity - current;
        self.cash -= delta * price;
        self.observe_price(symbol, price);
        if quantity == 0.0 {
            self.positions.remove(symbol);
        } else {
            self.positions.insert(symbol.to_string(), quantity);
        }
    }

    /// Mark-to-market equity: cash plus positions at last observed prices.
    pub fn equity(&self) -> f64 {
        let held: f64 = self
            .positions
            .iter()
            .map(|(sym, qty)| qty * self.last_price.get(sym).copied().unwrap_or(0.0))
            .sum();
        self.cash + held
    }
}
