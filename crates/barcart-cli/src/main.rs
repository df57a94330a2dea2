//! barcart - command-line client for the barcart cocktail service.
//!
//! Every subcommand maps to one `ApiClient` operation and prints the
//! server's JSON response on stdout.

mod cli;

use std::io;

use anyhow::{Context, Result};
use barcart_core::{ApiClient, Config, TokenProvider};
use clap::Parser;
use serde_json::Value;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Args, Command};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    init_tracing();

    let mut config = Config::load().context("Failed to load config")?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }

    let tokens = config.token_provider()?;
    let api = ApiClient::from_config(&config, tokens.clone())?;
    info!(base_url = api.base_url(), "barcart starting");

    match args.command {
        Command::MostLiked => {
            let drinks = api.fetch_most_liked_drinks_with_details().await?;
            print_json(&drinks)?;
        }
        Command::Cocktails => {
            let cocktails = api.get_all_cocktails().await?;
            print_json(&cocktails)?;
        }
        Command::Register { username, password } => {
            let password = match password {
                Some(p) => p,
                None => rpassword::prompt_password("Password: ")
                    .context("Failed to read password")?,
            };
            let user = api.register(&username, &password).await?;
            print_json(&user)?;
        }
        Command::Profile => {
            let user = api.get_user().await?;
            print_json(&user)?;
        }
        Command::AddFave { id } => match api.add_favourite(&id).await? {
            Some(user) => print_json(&user)?,
            None => eprintln!("Favourite was not saved (see log for details)"),
        },
        Command::RemoveFave { id } => {
            let user = api.remove_favourite(&id).await?;
            print_json(&user)?;
        }
        Command::Login { token } => {
            tokens.set(&token)?;
            eprintln!("Token stored");
        }
        Command::Logout => {
            tokens.clear()?;
            eprintln!("Token cleared");
        }
        Command::Status => {
            let mut status = serde_json::json!({
                "base_url": api.base_url(),
                "detail_base_url": &config.detail_base_url,
                "token_store": config.token_store,
                "authenticated": tokens.is_authenticated(),
            });
            if let Some(saved_at) = tokens.saved_at() {
                status["token_saved_at"] = Value::String(saved_at.to_rfc3339());
            }
            print_json(&status)?;
        }
    }

    Ok(())
}
