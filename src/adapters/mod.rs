//! Concrete adapter implementations for the ports.

pub mod csv_quotes;
pub mod file_config_adapter;
pub mod portfolio_file;
