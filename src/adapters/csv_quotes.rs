//! CSV quote file adapter.
//!
//! One file per symbol, `<dir>/<SYMBOL>.csv`, with a header row of
//! `Date,Open,High,Low,Close`. Columns past `Close` are ignored as long as
//! every row carries them.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::domain::date::normalize;
use crate::domain::error::TraderError;
use crate::domain::quote::Quote;
use crate::ports::data_port::DataPort;

pub struct CsvQuoteAdapter {
    base_path: PathBuf,
}

impl CsvQuoteAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn symbol_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

fn ingest_error(file: &PathBuf, reason: impl Into<String>) -> TraderError {
    TraderError::Ingest {
        file: file.display().to_string(),
        reason: reason.into(),
    }
}

fn parse_price(
    record: &csv::StringRecord,
    index: usize,
    column: &str,
    file: &PathBuf,
) -> Result<f64, TraderError> {
    let raw = record
        .get(index)
        .ok_or_else(|| ingest_error(file, format!("missing {} column", column)))?;
    raw.parse()
        .map_err(|e| ingest_error(file, format!("invalid {} value '{}': {}", column, raw, e)))
}

impl DataPort for CsvQuoteAdapter {
    fn fetch_quotes(&self, symbol: &str) -> Result<BTreeMap<NaiveDate, Quote>, TraderError> {
        let path = self.symbol_path(symbol);
        let content = fs::read_to_string(&path)
            .map_err(|e| ingest_error(&path, format!("failed to read: {}", e)))?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut quotes = BTreeMap::new();

        for result in rdr.records() {
            let record =
                result.map_err(|e| ingest_error(&path, format!("CSV parse error: {}", e)))?;

            let date_str = record
                .get(0)
                .ok_or_else(|| ingest_error(&path, "missing Date column"))?;
            let date = normalize(date_str)
                .map_err(|_| ingest_error(&path, format!("invalid date '{}'", date_str)))?;

            let open = parse_price(&record, 1, "Open", &path)?;
            let high = parse_price(&record, 2, "High", &path)?;
            let low = parse_price(&record, 3, "Low", &path)?;
            let close = parse_price(&record, 4, "Close", &path)?;

            quotes.insert(date, Quote::new(open, high, low, close));
        }

        Ok(quotes)
    }

    fn list_symbols(&self) -> Result<Vec<String>, TraderError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| {
            ingest_error(
                &self.base_path,
                format!("failed to read directory: {}", e),
            )
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| ingest_error(&self.base_path, format!("directory entry error: {}", e)))?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}
