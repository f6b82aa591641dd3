//! Date-string normalization.
//!
//! Input dates arrive from snapshot files, quote CSVs and the command line
//! in three tolerated shapes: `YYYY-MM-DD`, `YYYY/MM/DD` and `DD.MM.YYYY`,
//! with one- or two-digit day/month and any mix of the three separators.
//! Everything past this boundary works with [`chrono::NaiveDate`], whose
//! ordering and `Display` give the canonical `YYYY-MM-DD` form.

use chrono::NaiveDate;

use crate::domain::error::TraderError;

/// Parse a tolerated date string into a `NaiveDate`.
///
/// The four-digit component is the year and must come first (year-month-day)
/// or last (day-month-year); the remaining components must be one or two
/// digits. Non-calendar dates (month 13, Feb 30, ...) are rejected.
pub fn normalize(input: &str) -> Result<NaiveDate, TraderError> {
    let invalid = || TraderError::InvalidDate {
        input: input.to_string(),
    };

    let unified: String = input
        .chars()
        .map(|c| if c == '/' || c == '.' { '-' } else { c })
        .collect();

    let parts: Vec<&str> = unified.split('-').collect();
    if parts.len() != 3 {
        return Err(invalid());
    }
    if parts
        .iter()
        .any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit()))
    {
        return Err(invalid());
    }

    let (year, month, day) = match (parts[0].len(), parts[1].len(), parts[2].len()) {
        (4, 1 | 2, 1 | 2) => (parts[0], parts[1], parts[2]),
        (1 | 2, 1 | 2, 4) => (parts[2], parts[1], parts[0]),
        _ => return Err(invalid()),
    };

    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let day: u32 = day.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}
