//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(built-in defaults)"),
    }
    ctx.output.kv("currency", ctx.config.currency.code());

    ctx.output.info("");
    ctx.output.info("[[items]]");
    for item in &ctx.config.items {
        ctx.output.kv(&item.name, &format!("{} x {}", item.price, item.quantity));
    }

    if !ctx.config.discounts.is_empty() {
        ctx.output.info("");
        ctx.output.info("[discounts]");
        for (code, discount) in &ctx.config.discounts {
            ctx.output.kv(
                code,
                &format!("fixed {} + {} of subtotal", discount.fixed, discount.percentage),
            );
        }
    }

    ctx.output.info("");
    ctx.output.info("[payment]");
    let api_key = if ctx.config.payment.api_key.is_some() {
        "(set)"
    } else {
        "(not set)"
    };
    ctx.output.kv("api_key", api_key);

    ctx.output.info("");
    ctx.output.info("[[bank.accounts]]");
    for account in &ctx.config.bank.accounts {
        ctx.output.kv(&account.id, &format!("{} {}", account.kind, account.balance));
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if let Err(e) = ctx.config.cart() {
        errors.push(format!("items: {:#}", e));
    }
    if let Err(e) = ctx.config.discount_catalog() {
        errors.push(format!("discounts: {:#}", e));
    }
    if let Err(e) = ctx.config.accounts() {
        errors.push(format!("bank.accounts: {:#}", e));
    }

    if ctx.config.items.is_empty() {
        warnings.push("items is empty; checkout will show an empty cart".to_string());
    }
    if ctx.config.payment.api_key.is_none() {
        warnings.push("payment.api_key is not set".to_string());
    }

    // Print results
    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
