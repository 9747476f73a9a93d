/*
[INPUT]:  CLI arguments, optional YAML config, BINANCE_* environment (.env)
[OUTPUT]: One order placed (or simulated) and its result printed and logged
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or the startup flow
*/

mod cli;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use binance_futures_adapter::{BinanceClient, MockBinanceClient, OrderGateway, OrderRequest};
use binance_order_bot::logging::{default_log_file, init_logging};
use binance_order_bot::{BotConfig, FlowOptions, FlowOutcome, OrderManager, validate_order};

use crate::cli::confirm::TerminalPrompt;
use crate::cli::output;

const EXAMPLES: &str = "\
Examples:
  # Market order (buy 0.01 BTC)
  binance-order-bot --symbol BTCUSDT --side BUY --order-type MARKET --quantity 0.01

  # Limit order (sell 0.01 BTC at 50,000)
  binance-order-bot --symbol BTCUSDT --side SELL --order-type LIMIT --quantity 0.01 --price 50000

  # Demo mode (no real orders)
  binance-order-bot -s BTCUSDT --side BUY -t MARKET -q 0.01 --demo -y";

#[derive(Parser, Debug)]
#[command(
    name = "binance-order-bot",
    version,
    about = "Place orders on Binance Futures Testnet",
    after_help = EXAMPLES
)]
struct Cli {
    /// Trading pair symbol (e.g. BTCUSDT, ETHUSDT)
    #[arg(short = 's', long)]
    symbol: String,
    /// Order side: BUY or SELL
    #[arg(long)]
    side: String,
    /// Order type: MARKET or LIMIT
    #[arg(short = 't', long = "order-type")]
    order_type: String,
    /// Order quantity (e.g. 0.01)
    #[arg(short = 'q', long, allow_hyphen_values = true)]
    quantity: String,
    /// Order price (required for LIMIT orders)
    #[arg(short = 'p', long, allow_hyphen_values = true)]
    price: Option<String>,
    /// Path to log file (default: trading_bot_YYYY-MM-DD.log)
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Run in demo mode (no real API calls)
    #[arg(short = 'd', long)]
    demo: bool,
    /// Skip confirmation prompt
    #[arg(short = 'y', long = "auto-confirm")]
    auto_confirm: bool,
    /// Optional YAML config file; BINANCE_* variables override it
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    /// Console log level (file always gets debug)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    let log_file = args.log_file.clone().unwrap_or_else(default_log_file);
    let _guard = match init_logging(&args.log_level, &log_file) {
        Ok(guard) => guard,
        Err(err) => {
            output::print_error(format!("{err:#}"));
            return ExitCode::FAILURE;
        }
    };

    match run(args).await {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            output::print_error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> Result<ExitCode> {
    info!(log_level = %args.log_level, "Starting Trading Bot CLI");

    let config = BotConfig::load(args.config_path.as_deref()).context("load configuration")?;

    let credentials = if args.demo {
        info!("Running in DEMO mode (no real API calls)");
        output::print_demo_banner();
        None
    } else {
        match config.credentials() {
            Some(credentials) => Some(credentials),
            None => {
                error!("API credentials not found");
                output::print_missing_credentials();
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    info!(
        symbol = %args.symbol,
        side = %args.side,
        order_type = %args.order_type,
        quantity = %args.quantity,
        price = ?args.price,
        "Validating inputs"
    );
    let order = match validate_order(
        &args.symbol,
        &args.side,
        &args.order_type,
        &args.quantity,
        args.price.as_deref(),
    ) {
        Ok(order) => order,
        Err(err) => {
            error!("Validation failed: {err}");
            output::print_error(&err);
            return Ok(ExitCode::FAILURE);
        }
    };
    info!("All inputs validated successfully");

    let options = FlowOptions {
        auto_confirm: args.auto_confirm,
        verify_connection: !args.demo,
    };

    let outcome = match credentials {
        Some(credentials) => {
            let client = BinanceClient::with_config(config.client_config())
                .context("initialize client")?
                .with_credentials(credentials);
            run_flow(client, &order, options).await?
        }
        None => run_flow(MockBinanceClient::new(), &order, options).await?,
    };

    Ok(match outcome {
        FlowOutcome::Cancelled => ExitCode::SUCCESS,
        FlowOutcome::Completed(result) if result.is_success() => {
            if args.demo {
                output::print_demo_note();
            }
            ExitCode::SUCCESS
        }
        FlowOutcome::Completed(_) => ExitCode::FAILURE,
    })
}

async fn run_flow<G: OrderGateway>(
    gateway: G,
    order: &OrderRequest,
    options: FlowOptions,
) -> Result<FlowOutcome> {
    info!(gateway = gateway.name(), "Using {}", gateway.name());
    let manager = OrderManager::new(gateway);
    let mut prompt = TerminalPrompt::default();
    manager
        .execute(order, options, &mut prompt, &mut io::stdout())
        .await
}
