//! Daily price quote for a single symbol.

/// One day of trading prices.
///
/// Purchases fill at `high` and disposals at `low`, so every simulated
/// trade costs the most and returns the least the day allowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Quote {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Quote {
            open,
            high,
            low,
            close,
        }
    }
}
