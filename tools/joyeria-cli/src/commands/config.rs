//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Get { key } => get_config(&key, ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    // API section
    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);
    for key in ctx.config.api.headers.keys() {
        ctx.output.kv(&format!("headers.{}", key), "********");
    }

    // Timeouts section
    let t = &ctx.config.timeouts;
    ctx.output.info("");
    ctx.output.info("[timeouts]");
    ctx.output.kv("connect_ms", &t.connect_ms.to_string());
    ctx.output.kv("cart_read_ms", &t.cart_read_ms.to_string());
    ctx.output.kv("cart_write_ms", &t.cart_write_ms.to_string());
    ctx.output.kv("checkout_ms", &t.checkout_ms.to_string());
    ctx.output.kv("catalog_ms", &t.catalog_ms.to_string());

    // Cart section
    ctx.output.info("");
    ctx.output.info("[cart]");
    ctx.output.kv("id_strategy", &format!("{:?}", ctx.config.cart.id_strategy).to_lowercase());
    ctx.output.kv("store_path", &ctx.store_path().display().to_string());
    ctx.output.kv("shipping_fee", &ctx.config.cart.shipping_fee.to_string());
    ctx.output.kv("currency", &ctx.config.cart.currency);

    // Log section
    ctx.output.info("");
    ctx.output.info("[log]");
    ctx.output.kv("format", &format!("{:?}", ctx.config.log.format).to_lowercase());
    ctx.output.kv("level", &ctx.config.log.level);

    // Environments
    if !ctx.config.environments.is_empty() {
        ctx.output.info("");
        ctx.output.info("Environments:");
        let mut names: Vec<&String> = ctx.config.environments.keys().collect();
        names.sort();
        for env in names {
            ctx.output.list_item(env);
        }
    }

    Ok(())
}

async fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        match &value {
            serde_json::Value::String(s) => println!("{}", s),
            other => println!("{}", other),
        }
    }

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
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

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let report = ctx.config.check();

    // Print results
    if report.errors.is_empty() && report.warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &report.errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &report.warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !report.errors.is_empty() {
        bail!("Configuration has {} error(s)", report.errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<serde_json::Value> {
    let mut value = serde_json::to_value(config)?;
    for part in key.split('.') {
        value = match value {
            serde_json::Value::Object(mut map) => match map.remove(part) {
                Some(next) => next,
                None => bail!("Unknown config key: {}", key),
            },
            _ => bail!("Unknown config key: {}", key),
        };
    }
    Ok(value)
}
