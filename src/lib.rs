//! papertrader — virtual stock trading against historical daily quotes.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`], console front end in [`cli`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
