//! Portfolio snapshot file adapter.
//!
//! The snapshot is a small CSV-shaped text file: the first line holds the
//! portfolio date, the second the cash balance, and every further line one
//! `symbol,volume` holding. The transaction log is not persisted.

use std::fs;
use std::path::PathBuf;

use crate::domain::date::normalize;
use crate::domain::error::TraderError;
use crate::domain::portfolio::Portfolio;
use crate::ports::snapshot_port::SnapshotPort;

pub struct PortfolioFileAdapter {
    path: PathBuf,
}

impl PortfolioFileAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn snapshot_error(&self, reason: impl Into<String>) -> TraderError {
        TraderError::Snapshot {
            file: self.path.display().to_string(),
            reason: reason.into(),
        }
    }
}

impl SnapshotPort for PortfolioFileAdapter {
    fn load(&self) -> Result<Portfolio, TraderError> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| self.snapshot_error(format!("failed to read: {}", e)))?;

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut records = Vec::new();
        for result in rdr.records() {
            let record =
                result.map_err(|e| self.snapshot_error(format!("parse error: {}", e)))?;
            records.push(record);
        }

        let date_record = records
            .first()
            .ok_or_else(|| self.snapshot_error("missing date line"))?;
        if date_record.len() != 1 {
            return Err(self.snapshot_error("date line must hold a single field"));
        }
        let date = normalize(&date_record[0])
            .map_err(|_| self.snapshot_error(format!("invalid date '{}'", &date_record[0])))?;

        let cash_record = records
            .get(1)
            .ok_or_else(|| self.snapshot_error("missing cash line"))?;
        if cash_record.len() != 1 {
            return Err(self.snapshot_error("cash line must hold a single field"));
        }
        let cash: f64 = cash_record[0]
            .parse()
            .map_err(|_| self.snapshot_error(format!("invalid cash '{}'", &cash_record[0])))?;
        if !cash.is_finite() || cash < 0.0 {
            return Err(self.snapshot_error(format!("cash must be non-negative, got {}", cash)));
        }

        let mut portfolio = Portfolio::new(date, cash);
        for record in &records[2..] {
            if record.len() != 2 {
                return Err(
                    self.snapshot_error("holding lines must be symbol,volume pairs")
                );
            }
            let symbol = record[0].trim();
            if symbol.is_empty() {
                return Err(self.snapshot_error("holding line with an empty symbol"));
            }
            let volume: f64 = record[1].parse().map_err(|_| {
                self.snapshot_error(format!("invalid volume '{}' for {}", &record[1], symbol))
            })?;
            if !volume.is_finite() || volume <= 0.0 {
                return Err(self.snapshot_error(format!(
                    "volume for {} must be positive, got {}",
                    symbol, volume
                )));
            }
            // a repeated symbol keeps its last line
            portfolio.holdings.insert(symbol.to_string(), volume);
        }

        Ok(portfolio)
    }

    fn save(&self, portfolio: &Portfolio) -> Result<(), TraderError> {
        let mut content = format!("{}\n{}\n", portfolio.date, portfolio.cash);
        for (symbol, volume) in &portfolio.holdings {
            content.push_str(&format!("{},{}\n", symbol, volume));
        }

        fs::write(&self.path, content)
            .map_err(|e| self.snapshot_error(format!("failed to write: {}", e)))
    }
}
