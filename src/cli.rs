//! CLI definition and dispatch.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::adapters::csv_prices::load_price_file;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::fixed_hours_clock::FixedHoursClock;
use crate::adapters::price_chain::PriceChain;
use crate::adapters::sqlite_store::SqliteStore;
use crate::domain::error::TradefloorError;
use crate::domain::ledger::Ledger;
use crate::ports::clock_port::ClockPort;
use crate::ports::store_port::StorePort;

#[derive(Parser, Debug)]
#[command(name = "tradefloor", about = "Autonomous trading account ledger")]
pub struct Cli {
    /// INI configuration file
    #[arg(short, long, global = true, default_value = "tradefloor.ini")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database schema
    Init,
    /// Buy shares for an account
    Buy {
        #[arg(long)]
        name: String,
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        quantity: i64,
        #[arg(long)]
        rationale: String,
    },
    /// Sell shares held by an account
    Sell {
        #[arg(long)]
        name: String,
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        quantity: i64,
        #[arg(long)]
        rationale: String,
    },
    /// Deposit cash into an account
    Deposit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        amount: f64,
    },
    /// Withdraw cash from an account
    Withdraw {
        #[arg(long)]
        name: String,
        #[arg(long)]
        amount: f64,
    },
    /// Print the account report
    Report {
        #[arg(long)]
        name: String,
    },
    /// Show the strategy, or change it with --set
    Strategy {
        #[arg(long)]
        name: String,
        #[arg(long)]
        set: Option<String>,
    },
    /// Reset an account to its initial state
    Reset {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        strategy: String,
    },
    /// Show recent audit-log entries for an account
    Logs {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Load an end-of-day price file (symbol,close CSV) into the market table
    LoadPrices {
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        file: PathBuf,
    },
    /// Report whether the market session is open
    MarketStatus,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Init => run_init(&cli.config),
        Command::Buy {
            name,
            symbol,
            quantity,
            rationale,
        } => with_ledger(&cli.config, |ledger| {
            ledger.buy_shares(&name, &symbol, quantity, &rationale)
        }),
        Command::Sell {
            name,
            symbol,
            quantity,
            rationale,
        } => with_ledger(&cli.config, |ledger| {
            ledger.sell_shares(&name, &symbol, quantity, &rationale)
        }),
        Command::Deposit { name, amount } => {
            with_ledger(&cli.config, |ledger| ledger.deposit(&name, amount))
        }
        Command::Withdraw { name, amount } => {
            with_ledger(&cli.config, |ledger| ledger.withdraw(&name, amount))
        }
        Command::Report { name } => with_ledger(&cli.config, |ledger| ledger.report(&name)),
        Command::Strategy { name, set } => with_ledger(&cli.config, |ledger| match set {
            Some(strategy) => ledger.change_strategy(&name, &strategy),
            None => ledger.get_strategy(&name),
        }),
        Command::Reset { name, strategy } => with_ledger(&cli.config, |ledger| {
            ledger
                .reset(&name, &strategy)
                .map(|_| format!("Account {} reset.", name.trim().to_lowercase()))
        }),
        Command::Logs { name, limit } => run_logs(&cli.config, &name, limit),
        Command::LoadPrices { date, file } => run_load_prices(&cli.config, date, &file),
        Command::MarketStatus => run_market_status(),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|err| {
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn fail(err: &TradefloorError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(err)
}

fn open_store(config: &FileConfigAdapter) -> Result<Arc<SqliteStore>, TradefloorError> {
    let store = SqliteStore::from_config(config)?;
    store.initialize_schema()?;
    Ok(Arc::new(store))
}

fn open_ledger(config: &FileConfigAdapter) -> Result<Ledger, TradefloorError> {
    let store = open_store(config)?;
    let prices = PriceChain::from_config(config, store.clone() as Arc<dyn StorePort>);
    Ok(Ledger::new(store, Arc::new(prices)))
}

fn with_ledger(
    config_path: &PathBuf,
    op: impl FnOnce(&Ledger) -> Result<String, TradefloorError>,
) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let ledger = match open_ledger(&config) {
        Ok(ledger) => ledger,
        Err(err) => return fail(&err),
    };
    match op(&ledger) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => fail(&err),
    }
}

fn run_init(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(code) => return code,
    };
    match open_store(&config) {
        Ok(_) => {
            println!("Database schema initialized.");
            ExitCode::SUCCESS
        }
        Err(err) => fail(&err),
    }
}

fn run_logs(config_path: &PathBuf, name: &str, limit: usize) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let store = match open_store(&config) {
        Ok(store) => store,
        Err(err) => return fail(&err),
    };
    match store.read_logs(&name.trim().to_lowercase(), limit) {
        Ok(entries) => {
            for entry in entries {
                println!("{} [{}] {}", entry.datetime, entry.category, entry.message);
            }
            ExitCode::SUCCESS
        }
        Err(err) => fail(&err),
    }
}

fn run_load_prices(config_path: &PathBuf, date: Option<String>, file: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let store = match open_store(&config) {
        Ok(store) => store,
        Err(err) => return fail(&err),
    };

    let date =
        date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());

    eprintln!("Loading prices from {}", file.display());
    let prices = match load_price_file(file) {
        Ok(prices) => prices,
        Err(err) => return fail(&err),
    };
    if let Err(err) = store.write_market(&date, &prices) {
        return fail(&err);
    }
    println!("Loaded {} prices for {date}", prices.len());
    ExitCode::SUCCESS
}

fn run_market_status() -> ExitCode {
    let clock = FixedHoursClock;
    if clock.is_open() {
        println!("Market is open.");
    } else {
        println!("Market is closed.");
    }
    ExitCode::SUCCESS
}
