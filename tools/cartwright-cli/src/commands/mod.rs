//! CLI command implementations.

pub mod bank;
pub mod checkout;
pub mod config;
pub mod discounts;
pub mod order;

use clap::{Args, Subcommand, ValueEnum};
use rust_decimal::Decimal;

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Discount code to apply (repeatable).
    #[arg(short, long = "discount")]
    pub discounts: Vec<String>,

    /// Change an item's quantity, as NAME=QUANTITY (repeatable).
    #[arg(long = "set-quantity", value_parser = parse_key_value::<i64>)]
    pub set_quantity: Vec<(String, i64)>,

    /// Change an item's price, as NAME=PRICE (repeatable).
    #[arg(long = "set-price", value_parser = parse_key_value::<Decimal>)]
    pub set_price: Vec<(String, Decimal)>,

    /// Remove an item by name (repeatable).
    #[arg(long = "remove")]
    pub remove: Vec<String>,

    /// Payment method key (cc, paypal, apple). Prompted for if omitted.
    #[arg(short, long)]
    pub method: Option<String>,

    /// Payment credential, as FIELD=VALUE (repeatable). Missing ones are prompted for.
    #[arg(long = "credential", value_parser = parse_key_value::<String>)]
    pub credentials: Vec<(String, String)>,

    /// Skip the payment confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,

    /// Only show the cart, don't take payment.
    #[arg(long)]
    pub no_pay: bool,
}

/// Arguments for the bank command.
#[derive(Args)]
pub struct BankArgs {
    /// Amount to deposit into each account.
    #[arg(long, default_value = "200")]
    pub deposit: Decimal,

    /// Amount to withdraw from each account.
    #[arg(long, default_value = "100")]
    pub withdraw: Decimal,
}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    /// Order number.
    #[arg(long, default_value = "1")]
    pub id: String,

    /// Fulfillment type.
    #[arg(short = 't', long = "type", value_enum, default_value_t = OrderKind::Online)]
    pub order_type: OrderKind,

    /// Customer email address.
    #[arg(short, long)]
    pub email: String,

    /// Item price (repeatable). When given, the order total is printed.
    #[arg(short, long = "price")]
    pub prices: Vec<Decimal>,

    /// Fraction taken off the order total (e.g. 0.1).
    #[arg(long, default_value = "0")]
    pub discount_rate: Decimal,
}

/// Order fulfillment type.
#[derive(Clone, Copy, ValueEnum)]
pub enum OrderKind {
    Online,
    InStore,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate configuration.
    Validate,
}

/// Parse a `KEY=VALUE` argument.
fn parse_key_value<T>(s: &str) -> Result<(String, T), String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let value = value
        .parse::<T>()
        .map_err(|e| format!("invalid value '{}': {}", value, e))?;
    Ok((key.to_string(), value))
}
