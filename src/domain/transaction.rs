//! Transaction validation and settlement.

use chrono::NaiveDate;

use super::catalog::PriceCatalog;
use super::error::TraderError;
use super::portfolio::{Portfolio, Transaction};

/// Settled outcome of one accepted transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSummary {
    pub date: NaiveDate,
    pub symbol: String,
    /// Signed volume as requested: positive bought, negative sold.
    pub volume: f64,
    /// Fill price per share: the day's high for purchases, low for sales.
    pub price: f64,
    /// Money moved, always positive.
    pub amount: f64,
    pub cash_after: f64,
}

/// Validate and settle one transaction against the portfolio.
///
/// Checks run in a fixed order, all before any state changes:
/// 1. The transaction date must not precede the portfolio date
/// 2. The symbol must exist in the catalog
/// 3. The volume must be finite and non-zero
/// 4. A sale needs an open position holding at least the requested shares
/// 5. The symbol needs a quote on the transaction date
/// 6. A purchase must not cost more than the available cash
///
/// On success the portfolio date advances to the transaction date, cash and
/// holdings settle at the day's high (purchase) or low (sale), and the
/// transaction is appended to the log. A rejected transaction leaves the
/// portfolio exactly as it was.
pub fn apply_transaction(
    portfolio: &mut Portfolio,
    catalog: &PriceCatalog,
    transaction: Transaction,
) -> Result<ExecutionSummary, TraderError> {
    if transaction.date < portfolio.date {
        return Err(TraderError::DateOrdering {
            requested: transaction.date,
            current: portfolio.date,
        });
    }

    if !catalog.contains_symbol(&transaction.symbol) {
        return Err(TraderError::UnknownSymbol {
            symbol: transaction.symbol,
        });
    }

    if transaction.volume == 0.0 || !transaction.volume.is_finite() {
        return Err(TraderError::InvalidVolume {
            symbol: transaction.symbol,
            volume: transaction.volume,
        });
    }

    if transaction.volume < 0.0 {
        if !portfolio.has_holding(&transaction.symbol) {
            return Err(TraderError::NoPosition {
                symbol: transaction.symbol,
            });
        }
        let held = portfolio.holding(&transaction.symbol);
        let requested = -transaction.volume;
        if requested > held {
            return Err(TraderError::InsufficientShares {
                symbol: transaction.symbol,
                held,
                requested,
            });
        }
    }

    let quote = catalog
        .quote(&transaction.symbol, transaction.date)
        .ok_or_else(|| TraderError::MissingQuote {
            symbol: transaction.symbol.clone(),
            date: transaction.date,
        })?;

    if transaction.volume > 0.0 {
        let required = transaction.volume * quote.high;
        if required > portfolio.cash {
            return Err(TraderError::InsufficientCash {
                symbol: transaction.symbol,
                required,
                available: portfolio.cash,
            });
        }
    }

    // All checks passed; settle.
    let (price, amount) = if transaction.volume > 0.0 {
        (quote.high, transaction.volume * quote.high)
    } else {
        (quote.low, -transaction.volume * quote.low)
    };

    if transaction.volume > 0.0 {
        portfolio.cash -= amount;
        *portfolio
            .holdings
            .entry(transaction.symbol.clone())
            .or_insert(0.0) += transaction.volume;
    } else {
        portfolio.cash += amount;
        let remaining = portfolio.holding(&transaction.symbol) + transaction.volume;
        if remaining == 0.0 {
            portfolio.holdings.remove(&transaction.symbol);
        } else {
            portfolio
                .holdings
                .insert(transaction.symbol.clone(), remaining);
        }
    }

    portfolio.date = transaction.date;

    let summary = ExecutionSummary {
        date: transaction.date,
        symbol: transaction.symbol.clone(),
        volume: transaction.volume,
        price,
        amount,
        cash_after: portfolio.cash,
    };

    portfolio.record_transaction(transaction);

    Ok(summary)
}
