//! Momentum strategy: buy the strongest riser, hold until the price
//! leaves a band around the purchase price.

use chrono::NaiveDate;

use super::catalog::PriceCatalog;
use super::error::TraderError;
use super::liquidation::sell_all;
use super::portfolio::{Portfolio, Transaction};
use super::transaction::{apply_transaction, ExecutionSummary};

/// Tuning knobs for [`run_momentum`].
#[derive(Debug, Clone, PartialEq)]
pub struct MomentumParams {
    /// Window length, in trading dates, for the momentum ratio.
    pub lookback: usize,
    /// Sell when the day low divided by the purchase price drops below this.
    pub exit_floor: f64,
    /// Sell when the day low divided by the purchase price rises above this.
    pub exit_ceiling: f64,
}

impl Default for MomentumParams {
    fn default() -> Self {
        MomentumParams {
            lookback: 10,
            exit_floor: 0.7,
            exit_ceiling: 1.3,
        }
    }
}

/// Largest whole number of shares whose cost stays strictly under `cash`.
///
/// Spending every last unit of cash is never allowed, so an exact multiple
/// buys one share fewer.
pub fn max_affordable(cash: f64, price: f64) -> u64 {
    if !price.is_finite() || price <= 0.0 || cash <= 0.0 {
        return 0;
    }
    let mut volume = (cash / price).floor() as u64;
    // floor lands on the bound when cash is an exact multiple of the price
    while volume > 0 && volume as f64 * price >= cash {
        volume -= 1;
    }
    volume
}

/// Run the momentum strategy over the catalog's trading calendar.
///
/// Trading starts at the first date with a full lookback window behind it,
/// or at the portfolio date if that is later. Each round picks the symbol
/// whose high stands furthest above its average high over the window and
/// buys as many shares as cash strictly covers, at that day's high; a date
/// with no quotable candidate or no affordable share is skipped. The
/// position is then watched date by date until the first date where
/// low / purchase price leaves the `[exit_floor, exit_ceiling]` band, at
/// which point every open holding is liquidated at that day's lows.
/// Trading resumes on the date after the exit; a position that never
/// leaves the band stays open when the calendar runs out.
///
/// Returns the settlement summaries in execution order.
pub fn run_momentum(
    portfolio: &mut Portfolio,
    catalog: &PriceCatalog,
    params: &MomentumParams,
) -> Result<Vec<ExecutionSummary>, TraderError> {
    let axis = catalog.trading_dates();
    let mut summaries = Vec::new();

    if params.lookback == 0 || axis.len() < params.lookback {
        return Ok(summaries);
    }

    let start = axis[params.lookback - 1].max(portfolio.date);
    let Some(mut cursor) = axis.iter().position(|&d| d == start) else {
        // off-calendar start date, nothing to trade
        return Ok(summaries);
    };

    while cursor < axis.len() {
        let entry_date = axis[cursor];
        let window = &axis[cursor + 1 - params.lookback..=cursor];

        let Some((symbol, entry_high)) = pick_candidate(catalog, window, entry_date) else {
            cursor += 1;
            continue;
        };

        let volume = max_affordable(portfolio.cash, entry_high);
        if volume == 0 {
            cursor += 1;
            continue;
        }

        let purchase = Transaction::new(entry_date, symbol.clone(), volume as f64);
        summaries.push(apply_transaction(portfolio, catalog, purchase)?);

        let mut exit = None;
        for (offset, &d) in axis[cursor + 1..].iter().enumerate() {
            let Some(quote) = catalog.quote(&symbol, d) else {
                continue;
            };
            let qsell = quote.low / entry_high;
            if qsell < params.exit_floor || qsell > params.exit_ceiling {
                exit = Some((cursor + 1 + offset, d));
                break;
            }
        }

        let Some((exit_cursor, exit_date)) = exit else {
            // position never left the band; it stays open
            return Ok(summaries);
        };

        summaries.extend(sell_all(portfolio, catalog, Some(exit_date))?);

        cursor = exit_cursor + 1;
    }

    Ok(summaries)
}

/// Strongest momentum candidate on `entry_date`, with its entry price.
///
/// For each symbol quoted on every window date, the ratio is
/// `window length * entry high / sum of window highs`; ties keep the
/// alphabetically first symbol. The ratio only ranks candidates, it is
/// not an entry threshold: some symbol is always picked when one is
/// fully quoted.
fn pick_candidate(
    catalog: &PriceCatalog,
    window: &[NaiveDate],
    entry_date: NaiveDate,
) -> Option<(String, f64)> {
    let lookback = window.len() as f64;
    let mut best: Option<(f64, String, f64)> = None;

    for symbol in catalog.symbols() {
        let Some(entry_quote) = catalog.quote(symbol, entry_date) else {
            continue;
        };

        let mut high_sum = 0.0;
        let mut complete = true;
        for &d in window {
            match catalog.quote(symbol, d) {
                Some(quote) => high_sum += quote.high,
                None => {
                    complete = false;
                    break;
                }
            }
        }
        if !complete || high_sum <= 0.0 {
            continue;
        }

        let qbuy = lookback * entry_quote.high / high_sum;
        let beats_best = match &best {
            Some((best_qbuy, _, _)) => qbuy > *best_qbuy,
            None => true,
        };
        if beats_best {
            best = Some((qbuy, symbol.to_string(), entry_quote.high));
        }
    }

    best.map(|(_, symbol, entry_high)| (symbol, entry_high))
}
