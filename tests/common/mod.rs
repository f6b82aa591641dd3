#![allow(dead_code)]

use chrono::NaiveDate;
use papertrader::domain::catalog::PriceCatalog;
use papertrader::domain::error::TraderError;
use papertrader::domain::quote::Quote;
use papertrader::ports::data_port::DataPort;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

pub struct MockDataPort {
    pub data: HashMap<String, BTreeMap<NaiveDate, Quote>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_series(mut self, symbol: &str, quotes: BTreeMap<NaiveDate, Quote>) -> Self {
        self.data.insert(symbol.to_string(), quotes);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_quotes(&self, symbol: &str) -> Result<BTreeMap<NaiveDate, Quote>, TraderError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(TraderError::Ingest {
                file: format!("{}.csv", symbol),
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(symbol).cloned().unwrap_or_default())
    }

    fn list_symbols(&self) -> Result<Vec<String>, TraderError> {
        let mut symbols: Vec<String> = self
            .data
            .keys()
            .chain(self.errors.keys())
            .cloned()
            .collect();
        symbols.sort();
        symbols.dedup();
        Ok(symbols)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn quote(open: f64, high: f64, low: f64, close: f64) -> Quote {
    Quote::new(open, high, low, close)
}

pub fn flat_quote(price: f64) -> Quote {
    Quote::new(price, price, price, price)
}

pub fn make_catalog(series: &[(&str, &[(NaiveDate, Quote)])]) -> PriceCatalog {
    let mut catalog = PriceCatalog::new();
    for (symbol, quotes) in series {
        let map: BTreeMap<NaiveDate, Quote> = quotes.iter().copied().collect();
        catalog.insert_series(*symbol, map);
    }
    catalog
}

/// Three January 2012 sessions for SKY: the buy day, the 120-high spike and
/// the 90-low fade used by the worked buy/sell example.
pub fn sky_series() -> Vec<(NaiveDate, Quote)> {
    vec![
        (date(2012, 1, 16), quote(100.0, 105.0, 95.0, 100.0)),
        (date(2012, 1, 17), quote(110.0, 120.0, 108.0, 115.0)),
        (date(2012, 1, 18), quote(100.0, 102.0, 90.0, 95.0)),
    ]
}

/// Write `<dir>/<symbol>.csv` with the standard header and one row per
/// `(date, open, high, low, close)` tuple.
pub fn write_quote_file(dir: &Path, symbol: &str, rows: &[(&str, f64, f64, f64, f64)]) {
    let mut content = String::from("Date,Open,High,Low,Close\n");
    for (d, open, high, low, close) in rows {
        content.push_str(&format!("{},{},{},{},{}\n", d, open, high, low, close));
    }
    fs::write(dir.join(format!("{}.csv", symbol)), content).unwrap();
}
