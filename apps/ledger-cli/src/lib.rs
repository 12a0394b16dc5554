//! # Cart Ledger CLI Library
//!
//! Command-line front end for `ledger-core`.
//! This is the main entry point that loads configuration and runs a session.
//!
//! ## Module Organization
//! ```text
//! ledger_cli/
//! ├── lib.rs          ◄─── You are here (argument parsing & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── ledger.rs   ◄─── Shared ledger behind a Mutex
//! │   └── config.rs   ◄─── TOML + environment configuration
//! ├── commands/
//! │   ├── mod.rs      ◄─── Session command parsing & dispatch
//! │   ├── catalog.rs  ◄─── Catalog listing
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   └── payment.rs  ◄─── Pay, balance, receipt
//! ├── render.rs       ◄─── Text / JSON output
//! ├── session.rs      ◄─── Line-by-line script runner
//! └── error.rs        ◄─── CLI error type
//! ```
//!
//! ## Example Session
//! ```text
//! $ printf 'add 1\nadd 2\npay 3\npay 4\n' | cart-ledger
//!    1  Cherry                 1 x    $2.00 =      $2.00
//! items: 1  quantity: 1  total: $2.00  balance: $0.00
//!    1  Cherry                 1 x    $2.00 =      $2.00
//!    2  Orange                 1 x    $3.00 =      $3.00
//! items: 2  quantity: 2  total: $5.00  balance: $0.00
//! paid $3.00: owed $2.00 (balance $3.00)
//! paid $4.00: settled, change due $2.00
//! ```

pub mod commands;
pub mod error;
pub mod render;
pub mod session;
pub mod state;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ledger_core::CartLedger;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::CliError;
use render::Renderer;
use session::{Session, SessionSummary};
use state::{AppConfig, LedgerState, OutputFormat};

/// Runs a shopping-cart session from a script or stdin.
#[derive(Debug, Parser)]
#[command(name = "cart-ledger", author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: platform config dir `cart-ledger/config.toml`)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// JSON catalog file, overrides the configured catalog
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Output format, overrides the configured format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// More logging on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Session script; stdin when omitted or `-`
    pub script: Option<PathBuf>,
}

/// Parses arguments and runs the session.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Session Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, stderr only                   │
/// │     • Default: WARN, raised by -v / RUST_LOG                            │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → config.toml → CART_LEDGER_* → flags                    │
/// │                                                                         │
/// │  3. Build Catalog ────────────────────────────────────────────────────► │
/// │     • JSON file, inline products, or the fruit stand                    │
/// │     • Invalid catalog is fatal (exit 1)                                 │
/// │                                                                         │
/// │  4. Run Session ──────────────────────────────────────────────────────► │
/// │     • One command per line, results on stdout                           │
/// │     • Bad lines reported on stderr, session continues                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run_with(cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("cart-ledger: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Runs a session for already-parsed arguments against the process stdio.
pub fn run_with(cli: Cli) -> Result<SessionSummary, CliError> {
    let config = load_config(&cli)?;
    let catalog = config.build_catalog()?;
    info!(
        store = %config.store.name,
        products = catalog.len(),
        "Starting cart ledger session"
    );

    let session = Session::new(
        LedgerState::new(CartLedger::new(catalog)),
        Renderer::from_config(&config),
    );

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    match cli.script.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path).map_err(|e| CliError::file(path, e))?;
            session.run(BufReader::new(file), &mut out, &mut err)
        }
        _ => session.run(io::stdin().lock(), &mut out, &mut err),
    }
}

/// Loads configuration and applies command-line overrides.
pub fn load_config(cli: &Cli) -> Result<AppConfig, CliError> {
    let mut config = AppConfig::load(cli.config.clone())?;

    if let Some(path) = &cli.catalog {
        config.catalog.path = Some(path.clone());
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }

    Ok(config)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=ledger_core=debug` - Show every cart mutation
/// - Default: WARN, or INFO / DEBUG with `-v` / `-vv`
fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
