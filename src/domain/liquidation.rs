//! Full liquidation of every open position.

use chrono::NaiveDate;

use super::catalog::PriceCatalog;
use super::error::TraderError;
use super::portfolio::{Portfolio, Transaction};
use super::transaction::{apply_transaction, ExecutionSummary};

/// Sell every holding at the given date's low prices.
///
/// With no date the sales settle on the portfolio's own date. Positions are
/// sold one at a time in alphabetical order, each through the normal
/// transaction path. If a sale fails the error propagates at once, leaving
/// the sales already settled in place; the transaction log shows exactly how
/// far the liquidation got.
pub fn sell_all(
    portfolio: &mut Portfolio,
    catalog: &PriceCatalog,
    date: Option<NaiveDate>,
) -> Result<Vec<ExecutionSummary>, TraderError> {
    let date = date.unwrap_or(portfolio.date);
    let positions: Vec<(String, f64)> = portfolio
        .holdings
        .iter()
        .map(|(symbol, &volume)| (symbol.clone(), volume))
        .collect();

    let mut summaries = Vec::with_capacity(positions.len());
    for (symbol, volume) in positions {
        let transaction = Transaction::new(date, symbol, -volume);
        summaries.push(apply_transaction(portfolio, catalog, transaction)?);
    }

    Ok(summaries)
}
