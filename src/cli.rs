//! CLI definition and dispatch. Every line of console output is formed
//! here; the domain only returns structured summaries.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_quotes::CsvQuoteAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::portfolio_file::PortfolioFileAdapter;
use crate::domain::catalog::PriceCatalog;
use crate::domain::date::normalize;
use crate::domain::error::TraderError;
use crate::domain::liquidation::sell_all;
use crate::domain::portfolio::{Portfolio, Transaction};
use crate::domain::strategy::{run_momentum, MomentumParams};
use crate::domain::transaction::{apply_transaction, ExecutionSummary};
use crate::domain::valuation::{
    portfolio_value, valuation_report, CapitalComponent, ValuationReport,
};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::snapshot_port::SnapshotPort;

#[derive(Parser, Debug)]
#[command(name = "papertrader", about = "Virtual stock trading simulator")]
pub struct Cli {
    #[arg(short, long, default_value = "papertrader.ini", global = true)]
    pub config: PathBuf,
    /// Override the quote directory from the config
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    /// Override the portfolio snapshot file from the config
    #[arg(long, global = true)]
    pub portfolio: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the portfolio value, itemised per capital component
    Value {
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Buy shares at the day's high price
    Buy {
        symbol: String,
        volume: f64,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        save: bool,
    },
    /// Sell shares at the day's low price
    Sell {
        symbol: String,
        volume: f64,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        save: bool,
    },
    /// Liquidate every holding at the day's low price
    SellAll {
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        save: bool,
    },
    /// Run the momentum strategy over the remaining price history
    Run {
        #[arg(long)]
        save: bool,
    },
    /// Show quote coverage per symbol and the portfolio holdings
    Info,
}

pub fn run(cli: Cli) -> ExitCode {
    let workspace = match open_workspace(&cli.config, cli.data_dir.as_ref(), cli.portfolio.as_ref())
    {
        Ok(w) => w,
        Err(code) => return code,
    };

    match cli.command {
        Command::Value { date } => run_value(workspace, date.as_deref()),
        Command::Buy {
            symbol,
            volume,
            date,
            save,
        } => run_buy(workspace, &symbol, volume, date.as_deref(), save),
        Command::Sell {
            symbol,
            volume,
            date,
            save,
        } => run_sell(workspace, &symbol, volume, date.as_deref(), save),
        Command::SellAll { date, save } => run_sell_all(workspace, date.as_deref(), save),
        Command::Run { save } => run_strategy(workspace, save),
        Command::Info => run_info(workspace),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

/// Everything a command needs: config, quote catalog, portfolio and the
/// snapshot adapter it came from.
struct Workspace {
    config: FileConfigAdapter,
    catalog: PriceCatalog,
    portfolio: Portfolio,
    snapshot: PortfolioFileAdapter,
    snapshot_path: PathBuf,
}

fn open_workspace(
    config_path: &PathBuf,
    data_dir: Option<&PathBuf>,
    snapshot_override: Option<&PathBuf>,
) -> Result<Workspace, ExitCode> {
    // Stage 1: Load config
    eprintln!("Loading config from {}", config_path.display());
    let config = load_config(config_path)?;

    // Stage 2: Ingest the quote catalog
    let dir = match resolve_data_dir(data_dir, &config) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return Err((&e).into());
        }
    };
    eprintln!("Loading quotes from {}", dir.display());
    let quotes = CsvQuoteAdapter::new(dir.clone());
    let catalog = match load_catalog(&quotes) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return Err((&e).into());
        }
    };
    if catalog.is_empty() {
        eprintln!("error: no quote data loaded from {}", dir.display());
        return Err(ExitCode::from(3));
    }
    eprintln!("{} symbols loaded", catalog.symbol_count());

    // Stage 3: Load the portfolio snapshot
    let snapshot_path = match resolve_snapshot_path(snapshot_override, &config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return Err((&e).into());
        }
    };
    eprintln!("Loading portfolio from {}", snapshot_path.display());
    let snapshot = PortfolioFileAdapter::new(snapshot_path.clone());
    let portfolio = match snapshot.load() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return Err((&e).into());
        }
    };

    Ok(Workspace {
        config,
        catalog,
        portfolio,
        snapshot,
        snapshot_path,
    })
}

fn run_value(workspace: Workspace, date: Option<&str>) -> ExitCode {
    let date = match date.map(parse_date_arg).transpose() {
        Ok(d) => d,
        Err(code) => return code,
    };

    let report = match valuation_report(&workspace.portfolio, &workspace.catalog, date) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    print_valuation(&report);
    ExitCode::SUCCESS
}

fn run_buy(
    workspace: Workspace,
    symbol: &str,
    volume: f64,
    date: Option<&str>,
    save: bool,
) -> ExitCode {
    if let Err(code) = check_volume_arg(symbol, volume) {
        return code;
    }
    run_trade(workspace, symbol, volume, date, save)
}

fn run_sell(
    workspace: Workspace,
    symbol: &str,
    volume: f64,
    date: Option<&str>,
    save: bool,
) -> ExitCode {
    if let Err(code) = check_volume_arg(symbol, volume) {
        return code;
    }
    run_trade(workspace, symbol, -volume, date, save)
}

fn run_trade(
    mut workspace: Workspace,
    symbol: &str,
    volume: f64,
    date: Option<&str>,
    save: bool,
) -> ExitCode {
    let date = match date.map(parse_date_arg).transpose() {
        Ok(d) => d,
        Err(code) => return code,
    };

    let transaction = Transaction::new(
        date.unwrap_or(workspace.portfolio.date),
        symbol.to_uppercase(),
        volume,
    );
    let summary = match apply_transaction(&mut workspace.portfolio, &workspace.catalog, transaction)
    {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    print_execution(&summary);
    if save {
        return save_portfolio(&workspace);
    }
    ExitCode::SUCCESS
}

fn run_sell_all(mut workspace: Workspace, date: Option<&str>, save: bool) -> ExitCode {
    let date = match date.map(parse_date_arg).transpose() {
        Ok(d) => d,
        Err(code) => return code,
    };

    let sales = match sell_all(&mut workspace.portfolio, &workspace.catalog, date) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if sales.is_empty() {
        eprintln!("Nothing to sell");
    }
    for summary in &sales {
        print_execution(summary);
    }

    if save {
        return save_portfolio(&workspace);
    }
    ExitCode::SUCCESS
}

fn run_strategy(mut workspace: Workspace, save: bool) -> ExitCode {
    let params = match build_momentum_params(&workspace.config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!(
        "Running momentum strategy: lookback {}, exit band {} to {}",
        params.lookback, params.exit_floor, params.exit_ceiling
    );

    let trades = match run_momentum(&mut workspace.portfolio, &workspace.catalog, &params) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for summary in &trades {
        print_execution(summary);
    }
    eprintln!("{} transactions executed", trades.len());

    let value = match portfolio_value(&workspace.portfolio, &workspace.catalog, None) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    println!(
        "Final portfolio value on {}: {:.2}",
        workspace.portfolio.date, value
    );

    if save {
        return save_portfolio(&workspace);
    }
    ExitCode::SUCCESS
}

fn run_info(workspace: Workspace) -> ExitCode {
    for symbol in workspace.catalog.symbols() {
        if let Some((first, last)) = workspace.catalog.span(symbol) {
            println!(
                "{}: {} quotes, {} to {}",
                symbol,
                workspace.catalog.quote_count(symbol),
                first,
                last
            );
        }
    }
    eprintln!(
        "{} symbols, {} trading dates",
        workspace.catalog.symbol_count(),
        workspace.catalog.trading_dates().len()
    );

    println!(
        "Portfolio on {}: cash {:.2}, {} holdings",
        workspace.portfolio.date,
        workspace.portfolio.cash,
        workspace.portfolio.holding_count()
    );
    for (symbol, volume) in &workspace.portfolio.holdings {
        println!("  {} shares of {}", volume, symbol);
    }
    ExitCode::SUCCESS
}

/// Strategy parameters from the `[strategy]` config section, with the
/// defaults filling any gap.
pub fn build_momentum_params(config: &dyn ConfigPort) -> Result<MomentumParams, TraderError> {
    let defaults = MomentumParams::default();

    let lookback = config.get_int("strategy", "lookback", defaults.lookback as i64);
    if lookback <= 0 {
        return Err(TraderError::ConfigInvalid {
            section: "strategy".into(),
            key: "lookback".into(),
            reason: format!("{} is not a positive window length", lookback),
        });
    }

    let exit_floor = config.get_double("strategy", "exit_floor", defaults.exit_floor);
    let exit_ceiling = config.get_double("strategy", "exit_ceiling", defaults.exit_ceiling);
    if !(exit_floor > 0.0 && exit_floor < exit_ceiling) {
        return Err(TraderError::ConfigInvalid {
            section: "strategy".into(),
            key: "exit_floor".into(),
            reason: format!(
                "band {} to {} must satisfy 0 < floor < ceiling",
                exit_floor, exit_ceiling
            ),
        });
    }

    Ok(MomentumParams {
        lookback: lookback as usize,
        exit_floor,
        exit_ceiling,
    })
}

pub fn resolve_data_dir(
    override_dir: Option<&PathBuf>,
    config: &dyn ConfigPort,
) -> Result<PathBuf, TraderError> {
    if let Some(dir) = override_dir {
        return Ok(dir.clone());
    }
    config
        .get_string("data", "dir")
        .map(PathBuf::from)
        .ok_or_else(|| TraderError::ConfigMissing {
            section: "data".into(),
            key: "dir".into(),
        })
}

pub fn resolve_snapshot_path(
    override_path: Option<&PathBuf>,
    config: &dyn ConfigPort,
) -> Result<PathBuf, TraderError> {
    if let Some(path) = override_path {
        return Ok(path.clone());
    }
    config
        .get_string("portfolio", "file")
        .map(PathBuf::from)
        .ok_or_else(|| TraderError::ConfigMissing {
            section: "portfolio".into(),
            key: "file".into(),
        })
}

/// Assemble a catalog from every symbol the port lists, skipping symbols
/// whose series fails to load with a warning on stderr.
pub fn load_catalog(port: &dyn DataPort) -> Result<PriceCatalog, TraderError> {
    let mut catalog = PriceCatalog::new();
    for symbol in port.list_symbols()? {
        let series = match port.fetch_quotes(&symbol) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("warning: skipping {} ({})", symbol, e);
                continue;
            }
        };
        catalog.insert_series(symbol, series);
    }
    Ok(catalog)
}

fn check_volume_arg(symbol: &str, volume: f64) -> Result<(), ExitCode> {
    if volume.is_finite() && volume > 0.0 {
        return Ok(());
    }
    eprintln!(
        "error: invalid volume {} for {}: must be a positive number of shares",
        volume,
        symbol.to_uppercase()
    );
    Err(ExitCode::from(5))
}

fn parse_date_arg(input: &str) -> Result<NaiveDate, ExitCode> {
    normalize(input).map_err(|e| {
        eprintln!("error: {e}");
        (&e).into()
    })
}

fn save_portfolio(workspace: &Workspace) -> ExitCode {
    if let Err(e) = workspace.snapshot.save(&workspace.portfolio) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    eprintln!("Portfolio saved to {}", workspace.snapshot_path.display());
    ExitCode::SUCCESS
}

fn print_execution(summary: &ExecutionSummary) {
    if summary.volume < 0.0 {
        println!(
            "> {}: Sold {} shares of {} for a total of {:.2}",
            summary.date, -summary.volume, summary.symbol, summary.amount
        );
        println!("Available cash: {:.2}", summary.cash_after);
    } else {
        println!(
            "> {}: Bought {} shares of {} for a total of {:.2}",
            summary.date, summary.volume, summary.symbol, summary.amount
        );
        println!("Remaining cash: {:.2}", summary.cash_after);
    }
}

fn print_valuation(report: &ValuationReport) {
    let rule = format!(
        "{}+{}+{}+{}",
        "-".repeat(23),
        "-".repeat(8),
        "-".repeat(11),
        "-".repeat(13)
    );

    println!("Your portfolio on {}:", report.date);
    println!(
        "[* share values based on the lowest price on {}]",
        report.date
    );
    println!();
    println!(
        " {:<22}|{:>7} |{:>10} |{:>12}",
        "Capital type", "Volume", "Val/Unit*", "Value in £*"
    );
    println!("{rule}");
    for line in &report.lines {
        let name = match &line.component {
            CapitalComponent::Cash => "Cash".to_string(),
            CapitalComponent::Holding(symbol) => format!("Shares of {}", symbol),
        };
        println!(
            " {:<22}|{:>7} |{:>10.2} |{:>12.2}",
            name, line.volume, line.unit_value, line.value
        );
    }
    println!("{rule}");
    println!(" {:<43} {:>12.2}", "TOTAL VALUE", report.total);
}
