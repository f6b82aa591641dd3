//! Core domain types and logic.

pub mod catalog;
pub mod date;
pub mod error;
pub mod liquidation;
pub mod portfolio;
pub mod quote;
pub mod strategy;
pub mod transaction;
pub mod valuation;
