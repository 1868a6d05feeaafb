//! Command line interface
//!
//! | Command | Description |
//! |---------|-------------|
//! | `lock <name>` | Take a lock, hold it, release it |
//! | `stock init/consume/show` | Manage a countable resource |
//! | `rate <operation> <key>` | Count one call against a rate limit |
//! | `simulate` | Concurrent workers selling stock under a lock |
//! | `health` | Ping the store |
//!
//! Every command prints one JSON document on stdout. The exit status is 0
//! when the command was admitted, 1 when it was rejected (busy, rate limited,
//! insufficient) or failed.

mod commands;

pub use commands::{Report, execute};

use clap::{Args, Parser, Subcommand};
use kvguard_infrastructure::config::ConfigLoader;
use kvguard_infrastructure::{init_app, logging::init_logging};
use std::path::PathBuf;
use std::process::ExitCode;

/// Command line interface for kvguard
#[derive(Parser, Debug)]
#[command(name = "kvguard")]
#[command(about = "Distributed lock, bounded decrement and rate limiting on a shared store")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured store provider ("redis", "memory")
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// kvguard commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Acquire a lock, hold it for a while, then release it
    Lock {
        /// Lock name
        name: String,
        /// Lock TTL in seconds (defaults to `lock.default_ttl_secs`)
        #[arg(long)]
        ttl_secs: Option<u64>,
        /// How long to hold the lock, in milliseconds
        #[arg(long, default_value_t = 1000)]
        hold_ms: u64,
    },

    /// Countable resource operations
    #[command(subcommand)]
    Stock(StockCommand),

    /// Count one call against a rate limit
    Rate {
        /// Operation name
        operation: String,
        /// Caller-defined resource key (user id, client IP)
        key: String,
        /// Inline policy; both flags replace the declared policy of the operation
        #[command(flatten)]
        policy: InlinePolicy,
    },

    /// Run concurrent workers, each selling one unit under a lock
    Simulate(SimulateArgs),

    /// Ping the configured store
    Health,
}

/// Stock subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum StockCommand {
    /// Set the quantity of a resource
    Init {
        /// Resource id
        resource: String,
        /// Starting quantity
        quantity: i64,
    },
    /// Take units if enough are left
    Consume {
        /// Resource id
        resource: String,
        /// Units to take
        #[arg(long, default_value_t = 1)]
        amount: i64,
    },
    /// Show the current quantity (display only)
    Show {
        /// Resource id
        resource: String,
    },
}

/// Rate limit given on the command line
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct InlinePolicy {
    /// Window length in seconds
    #[arg(long, requires = "max_count")]
    pub window_secs: Option<u64>,
    /// Calls admitted per window
    #[arg(long, requires = "window_secs")]
    pub max_count: Option<u32>,
}

/// `simulate` arguments
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SimulateArgs {
    /// Resource to sell
    #[arg(long, default_value = "stock-demo")]
    pub resource: String,
    /// Quantity written before the workers start
    #[arg(long, default_value_t = 1000)]
    pub initial: i64,
    /// Number of concurrent workers
    #[arg(long, default_value_t = 10)]
    pub workers: usize,
    /// Lock name shared by the workers
    #[arg(long, default_value = "lock-key")]
    pub lock: String,
    /// Lock TTL in seconds (defaults to `lock.default_ttl_secs`)
    #[arg(long)]
    pub ttl_secs: Option<u64>,
    /// Time each worker spends inside the lock, in milliseconds
    #[arg(long, default_value_t = 0)]
    pub hold_ms: u64,
}

/// Load configuration, set up logging and the store, then run the command
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let mut config = loader.load()?;
    if let Some(provider) = cli.store {
        config.store.provider = provider;
    }

    init_logging(&config.logging)?;

    let context = init_app(config).await?;
    let report = execute(&context, cli.command).await?;

    println!("{}", serde_json::to_string_pretty(&report.body)?);
    Ok(if report.admitted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
