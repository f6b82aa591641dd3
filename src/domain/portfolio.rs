//! Portfolio state: cash, holdings and the transaction log.

use chrono::NaiveDate;
use std::collections::BTreeMap;

/// One accepted trade, as recorded in the portfolio log.
///
/// Positive volume is a purchase, negative volume a disposal. The log only
/// ever grows, so replaying it from the opening state reproduces the
/// portfolio exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub symbol: String,
    pub volume: f64,
}

impl Transaction {
    pub fn new(date: NaiveDate, symbol: impl Into<String>, volume: f64) -> Self {
        Transaction {
            date,
            symbol: symbol.into(),
            volume,
        }
    }
}

/// Cash plus share holdings at a point in simulated time.
///
/// `date` never moves backwards. `holdings` keeps strictly positive volumes
/// only; selling a position down to zero removes its entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    pub date: NaiveDate,
    pub cash: f64,
    pub holdings: BTreeMap<String, f64>,
    pub transactions: Vec<Transaction>,
}

impl Portfolio {
    pub fn new(date: NaiveDate, cash: f64) -> Self {
        Portfolio {
            date,
            cash,
            holdings: BTreeMap::new(),
            transactions: Vec::new(),
        }
    }

    /// Held volume for a symbol, zero when there is no position.
    pub fn holding(&self, symbol: &str) -> f64 {
        self.holdings.get(symbol).copied().unwrap_or(0.0)
    }

    pub fn has_holding(&self, symbol: &str) -> bool {
        self.holdings.contains_key(symbol)
    }

    pub fn holding_count(&self) -> usize {
        self.holdings.len()
    }

    pub fn record_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }
}
