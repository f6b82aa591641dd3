//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for papertrader.
///
/// Every operation in the domain is all-or-nothing: an error means the
/// portfolio and its transaction log were left exactly as they were.
#[derive(Debug, thiserror::Error)]
pub enum TraderError {
    #[error("invalid date {input:?}: expected YYYY-MM-DD, YYYY/MM/DD or DD.MM.YYYY")]
    InvalidDate { input: String },

    #[error("date {requested} precedes the portfolio date {current}")]
    DateOrdering {
        requested: NaiveDate,
        current: NaiveDate,
    },

    #[error("symbol {symbol} is not in the price catalog")]
    UnknownSymbol { symbol: String },

    #[error("no position in {symbol} to sell")]
    NoPosition { symbol: String },

    #[error("cannot sell {requested} shares of {symbol}: only {held} held")]
    InsufficientShares {
        symbol: String,
        held: f64,
        requested: f64,
    },

    #[error("insufficient cash for {symbol}: need {required:.2}, have {available:.2}")]
    InsufficientCash {
        symbol: String,
        required: f64,
        available: f64,
    },

    #[error("no quote for {symbol} on {date}")]
    MissingQuote { symbol: String, date: NaiveDate },

    #[error("invalid volume {volume} for {symbol}: must be a nonzero finite number")]
    InvalidVolume { symbol: String, volume: f64 },

    #[error("portfolio snapshot error in {file}: {reason}")]
    Snapshot { file: String, reason: String },

    #[error("quote data error in {file}: {reason}")]
    Ingest { file: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TraderError> for std::process::ExitCode {
    fn from(err: &TraderError) -> Self {
        let code: u8 = match err {
            TraderError::Io(_) => 1,
            TraderError::ConfigParse { .. }
            | TraderError::ConfigMissing { .. }
            | TraderError::ConfigInvalid { .. } => 2,
            TraderError::Snapshot { .. } | TraderError::Ingest { .. } => 3,
            TraderError::InvalidDate { .. } | TraderError::DateOrdering { .. } => 4,
            TraderError::UnknownSymbol { .. }
            | TraderError::NoPosition { .. }
            | TraderError::InsufficientShares { .. }
            | TraderError::InsufficientCash { .. }
            | TraderError::MissingQuote { .. }
            | TraderError::InvalidVolume { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn messages_name_the_offending_values() {
        let err = TraderError::InsufficientShares {
            symbol: "SKY".into(),
            held: 4.0,
            requested: 5.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("SKY"));
        assert!(msg.contains('4'));
        assert!(msg.contains('5'));

        let err = TraderError::MissingQuote {
            symbol: "EZJ".into(),
            date: date(2012, 1, 17),
        };
        assert!(err.to_string().contains("2012-01-17"));
    }

    #[test]
    fn insufficient_cash_reports_shortfall_amounts() {
        let err = TraderError::InsufficientCash {
            symbol: "SKY".into(),
            required: 1200.0,
            available: 999.5,
        };
        let msg = err.to_string();
        assert!(msg.contains("1200.00"));
        assert!(msg.contains("999.50"));
    }

    #[test]
    fn date_ordering_shows_both_dates() {
        let err = TraderError::DateOrdering {
            requested: date(2012, 1, 10),
            current: date(2012, 1, 16),
        };
        let msg = err.to_string();
        assert!(msg.contains("2012-01-10"));
        assert!(msg.contains("2012-01-16"));
    }
}
