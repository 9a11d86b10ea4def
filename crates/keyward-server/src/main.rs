//! Keyward: create and restore custodial wallets from the command line.
//!
//! Each command prints one JSON response (see [`response::ApiResponse`])
//! on stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! keyward --config /path/to/keyward.toml create --name Main
//! KEYWARD_SECRET_PHRASE="..." keyward restore
//! keyward --validate
//! ```

mod commands;
mod config;
mod response;

use anyhow::{Context, Result};
use keyward_wallet::{CancelFlag, CreateWalletRequest, RestoreWalletRequest};
use serde::Serialize;
use std::path::PathBuf;

const DEFAULT_CONFIG_PATH: &str = "/config/keyward.toml";

enum Command {
    Create(CreateWalletRequest),
    Restore(RestoreWalletRequest),
}

fn main() -> Result<()> {
    // Parse CLI args (minimal, no clap dependency needed)
    let args: Vec<String> = std::env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut validate_only = false;
    let mut subcommand: Option<String> = None;
    let mut name: Option<String> = None;
    let mut phrase: Option<String> = None;
    let mut passphrase: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => config_path = Some(PathBuf::from(value_of(&args, &mut i)?)),
            "--name" | "-n" => name = Some(value_of(&args, &mut i)?),
            "--phrase" => phrase = Some(value_of(&args, &mut i)?),
            "--passphrase" | "-p" => passphrase = Some(value_of(&args, &mut i)?),
            "--validate" => {
                validate_only = true;
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--version" | "-V" => {
                println!("keyward {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            cmd @ ("create" | "restore") if subcommand.is_none() => {
                subcommand = Some(cmd.to_string());
            }
            other => {
                anyhow::bail!("Unknown argument: {}", other);
            }
        }
        i += 1;
    }

    // Load config; a missing file is only fine at the default location
    let mut keyward_config = match config_path {
        Some(path) => config::KeywardConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_PATH);
            if path.exists() {
                config::KeywardConfig::from_file(&path)
                    .with_context(|| format!("Failed to load config from {}", path.display()))?
            } else {
                config::KeywardConfig::default()
            }
        }
    };

    // Apply env overrides
    keyward_config.apply_env_overrides();

    // Validate
    keyward_config
        .validate()
        .context("Configuration validation failed")?;

    // Init logger
    std::env::set_var("RUST_LOG", &keyward_config.server.log_level);
    env_logger::init();

    if validate_only {
        println!("✅ Configuration is valid.");
        println!("  Data dir:   {}", keyward_config.server.data_dir.display());
        println!("  Database:   {}", keyward_config.db_path().display());
        println!("  Log level:  {}", keyward_config.server.log_level);
        println!(
            "  Name limits: {}-{} characters",
            keyward_config.wallet.min_name_len, keyward_config.wallet.max_name_len
        );
        return Ok(());
    }

    let passphrase = passphrase
        .or_else(|| std::env::var("KEYWARD_PASSPHRASE").ok())
        .unwrap_or_default();

    let command = match subcommand.as_deref() {
        Some("create") => Command::Create(CreateWalletRequest::new(
            name.unwrap_or_default(),
            passphrase,
        )),
        Some("restore") => {
            let secret_phrase = phrase
                .or_else(|| std::env::var("KEYWARD_SECRET_PHRASE").ok())
                .unwrap_or_default();
            let mut req = RestoreWalletRequest::new(secret_phrase, passphrase);
            req.wallet_name = name;
            Command::Restore(req)
        }
        _ => {
            print_help();
            anyhow::bail!("No command given");
        }
    };

    let service = commands::open_service(&keyward_config)?;

    // Build tokio runtime
    let rt = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;

    let success = match command {
        Command::Create(req) => emit(&rt.block_on(commands::create(service, req))?)?,
        Command::Restore(req) => {
            emit(&rt.block_on(commands::restore(service, req, CancelFlag::new()))?)?
        }
    };

    if !success {
        std::process::exit(1);
    }

    Ok(())
}

/// Take the value following the flag at `args[*i]`.
fn value_of(args: &[String], i: &mut usize) -> Result<String> {
    let flag = &args[*i];
    *i += 1;
    match args.get(*i) {
        Some(v) => Ok(v.clone()),
        None => anyhow::bail!("{} requires a value", flag),
    }
}

/// Print the response and report whether it was a success.
fn emit<T: Serialize>(resp: &response::ApiResponse<T>) -> Result<bool> {
    println!("{}", resp.to_json().context("Failed to encode response")?);
    Ok(resp.success)
}

fn print_help() {
    println!(
        r#"Keyward: custodial wallet creation and restoration

USAGE:
    keyward [OPTIONS] <COMMAND>

COMMANDS:
    create                Create a wallet (requires --name)
    restore               Restore a wallet from its secret phrase

OPTIONS:
    -c, --config <PATH>       Config file path (default: /config/keyward.toml)
    -n, --name <NAME>         Wallet name
    --phrase <PHRASE>         Secret phrase to restore from
    -p, --passphrase <PASS>   Optional wallet passphrase
    --validate                Validate config file and exit
    -h, --help                Show this help message
    -V, --version             Show version

ENVIRONMENT VARIABLES:
    KEYWARD_DATA_DIR          Data directory path (overrides config)
    KEYWARD_LOG_LEVEL         Log level (error/warn/info/debug/trace)
    KEYWARD_PASSPHRASE        Passphrase, if --passphrase is not given
    KEYWARD_SECRET_PHRASE     Secret phrase, if --phrase is not given

EXAMPLES:
    # Create a passphrase-protected wallet
    KEYWARD_PASSPHRASE=hunter2 keyward create --name Savings

    # Restore (keeps the phrase out of shell history)
    KEYWARD_SECRET_PHRASE="legal winner ..." keyward restore

    # Validate configuration
    keyward --config keyward.toml --validate
"#
    );
}
