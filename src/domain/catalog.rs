//! In-memory price catalog keyed by symbol and date.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::domain::quote::Quote;

/// Daily quote series for every known symbol.
///
/// Symbols and dates both live in `BTreeMap`s, so iteration order is
/// deterministic: symbols alphabetically, dates ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceCatalog {
    series: BTreeMap<String, BTreeMap<NaiveDate, Quote>>,
}

impl PriceCatalog {
    pub fn new() -> Self {
        PriceCatalog {
            series: BTreeMap::new(),
        }
    }

    /// Add or replace the full series for one symbol.
    pub fn insert_series(&mut self, symbol: impl Into<String>, quotes: BTreeMap<NaiveDate, Quote>) {
        self.series.insert(symbol.into(), quotes);
    }

    pub fn quote(&self, symbol: &str, date: NaiveDate) -> Option<Quote> {
        self.series.get(symbol)?.get(&date).copied()
    }

    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.series.contains_key(symbol)
    }

    /// Known symbols in alphabetical order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn symbol_count(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn quote_count(&self, symbol: &str) -> usize {
        self.series.get(symbol).map_or(0, BTreeMap::len)
    }

    /// First and last quoted date for a symbol, if it has any quotes.
    pub fn span(&self, symbol: &str) -> Option<(NaiveDate, NaiveDate)> {
        let quotes = self.series.get(symbol)?;
        let first = quotes.keys().next()?;
        let last = quotes.keys().next_back()?;
        Some((*first, *last))
    }

    /// Union of all quoted dates across every symbol, ascending.
    ///
    /// This is the reference calendar for strategy runs: a date counts as a
    /// trading date as soon as any one symbol has a quote on it.
    pub fn trading_dates(&self) -> Vec<NaiveDate> {
        let union: BTreeSet<NaiveDate> = self
            .series
            .values()
            .flat_map(|quotes| quotes.keys().copied())
            .collect();
        union.into_iter().collect()
    }
}
