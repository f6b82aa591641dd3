//! Portfolio valuation at a day's low prices.

use chrono::NaiveDate;

use super::catalog::PriceCatalog;
use super::error::TraderError;
use super::portfolio::Portfolio;

/// One row of a valuation report.
#[derive(Debug, Clone, PartialEq)]
pub enum CapitalComponent {
    Cash,
    Holding(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValuationLine {
    pub component: CapitalComponent,
    pub volume: f64,
    pub unit_value: f64,
    pub value: f64,
}

/// Itemised portfolio value on one date.
///
/// The cash row comes first, then one row per holding in alphabetical
/// order, each priced at the day's low.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationReport {
    pub date: NaiveDate,
    pub lines: Vec<ValuationLine>,
    pub total: f64,
}

/// Value every capital component at the given date.
///
/// With no date the portfolio is valued on its own date; an explicit date
/// must not precede it. Holdings are marked at the day's low, the least a
/// sale that day could have returned. Reading a value never touches the
/// portfolio, so the portfolio date stays where it is.
pub fn valuation_report(
    portfolio: &Portfolio,
    catalog: &PriceCatalog,
    date: Option<NaiveDate>,
) -> Result<ValuationReport, TraderError> {
    let date = date.unwrap_or(portfolio.date);
    if date < portfolio.date {
        return Err(TraderError::DateOrdering {
            requested: date,
            current: portfolio.date,
        });
    }

    let mut lines = vec![ValuationLine {
        component: CapitalComponent::Cash,
        volume: 1.0,
        unit_value: portfolio.cash,
        value: portfolio.cash,
    }];

    for (symbol, &volume) in &portfolio.holdings {
        if !catalog.contains_symbol(symbol) {
            return Err(TraderError::UnknownSymbol {
                symbol: symbol.clone(),
            });
        }
        let quote = catalog
            .quote(symbol, date)
            .ok_or_else(|| TraderError::MissingQuote {
                symbol: symbol.clone(),
                date,
            })?;
        lines.push(ValuationLine {
            component: CapitalComponent::Holding(symbol.clone()),
            volume,
            unit_value: quote.low,
            value: volume * quote.low,
        });
    }

    let total = lines.iter().map(|line| line.value).sum();

    Ok(ValuationReport { date, lines, total })
}

/// Total portfolio value at the given date: cash plus holdings at the low.
pub fn portfolio_value(
    portfolio: &Portfolio,
    catalog: &PriceCatalog,
    date: Option<NaiveDate>,
) -> Result<f64, TraderError> {
    valuation_report(portfolio, catalog, date).map(|report| report.total)
}
