//! Quote data access port trait.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::error::TraderError;
use crate::domain::quote::Quote;

pub trait DataPort {
    /// Full daily quote series for one symbol.
    fn fetch_quotes(&self, symbol: &str) -> Result<BTreeMap<NaiveDate, Quote>, TraderError>;

    /// Symbols the source can provide, alphabetically.
    fn list_symbols(&self) -> Result<Vec<String>, TraderError>;
}
