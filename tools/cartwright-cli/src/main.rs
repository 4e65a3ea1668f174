//! Cartwright CLI - drives the shopping cart from the command line.
//!
//! Commands:
//! - `cartwright checkout` - Build the configured cart, apply discounts, and pay
//! - `cartwright discounts` - List the discount codes
//! - `cartwright bank` - Run deposits and withdrawals against configured accounts
//! - `cartwright order` - Process an order and print the customer email
//! - `cartwright config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BankArgs, CheckoutArgs, ConfigArgs, OrderArgs};

/// Cartwright - shopping cart, discounts and payment strategies
#[derive(Parser)]
#[command(name = "cartwright")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart, apply discounts and take payment
    Checkout(CheckoutArgs),

    /// List available discount codes
    Discounts,

    /// Deposit into and withdraw from the configured accounts
    Bank(BankArgs),

    /// Process an order and print the notification email
    Order(OrderArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Checkout(args) => commands::checkout::run(args, &ctx),
        Commands::Discounts => commands::discounts::run(&ctx),
        Commands::Bank(args) => commands::bank::run(args, &ctx),
        Commands::Order(args) => commands::order::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` when set.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
