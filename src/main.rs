//! wallet-kit CLI
//!
//! Drives a provider backed by the unsafe burner wallet.
//!
//! ```text
//! wallet-kit [--config kit.toml] wallets
//! wallet-kit sign-message "hello"
//! wallet-kit sign-transaction 0x02f86c...
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use alloy::primitives::hex;
use clap::{Parser, Subcommand};
use serde_json::json;

use wallet_kit::config::validation::validate_config;
use wallet_kit::config::{load_config, ConfigError, KitConfig};
use wallet_kit::hooks::{
    use_connect_wallet, use_sign_personal_message, use_sign_transaction, ConnectWalletArgs,
    MutationOptions, SignPersonalMessageArgs, SignTransactionArgs,
};
use wallet_kit::observability::logging::init_logging;
use wallet_kit::wallet::UNSAFE_BURNER_WALLET_NAME;
use wallet_kit::{Wallet, WalletProvider, WalletRegistry};

#[derive(Parser)]
#[command(name = "wallet-kit")]
#[command(about = "Inspect wallets and sign with the unsafe burner wallet", long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the wallets the provider exposes
    Wallets,
    /// Sign a UTF-8 message with the burner wallet
    SignMessage { message: String },
    /// Sign hex-encoded transaction bytes with the burner wallet
    SignTransaction { hex: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = cli_config(cli.config.as_deref())?;
    init_logging(&config.observability)?;

    let provider = WalletProvider::new(WalletRegistry::new(), config.provider.clone());

    match cli.command {
        Commands::Wallets => {
            let wallets: Vec<_> = provider.wallets().iter().map(describe).collect();
            print_json(&json!(wallets))?;
        }
        Commands::SignMessage { message } => {
            connect_burner(&provider).await?;
            let signed = use_sign_personal_message(&provider, MutationOptions::new())
                .mutate(SignPersonalMessageArgs::new(message.into_bytes()))
                .await?;
            print_json(&json!(signed))?;
        }
        Commands::SignTransaction { hex: encoded } => {
            let bytes = hex::decode(encoded.trim_start_matches("0x"))?;
            connect_burner(&provider).await?;
            let signed = use_sign_transaction(&provider, MutationOptions::new())
                .mutate(SignTransactionArgs::new(bytes))
                .await?;
            print_json(&json!(signed))?;
        }
    }

    Ok(())
}

/// Load the config and turn the burner on. Validation runs again so burner
/// settings are checked even when the file left the burner off.
fn cli_config(path: Option<&Path>) -> Result<KitConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => KitConfig::default(),
    };
    config.provider.enable_unsafe_burner = true;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

async fn connect_burner(provider: &WalletProvider) -> Result<(), Box<dyn std::error::Error>> {
    let burner = provider
        .wallets()
        .into_iter()
        .find(|w| w.name() == UNSAFE_BURNER_WALLET_NAME)
        .ok_or("unsafe burner wallet is not available")?;

    use_connect_wallet(provider, MutationOptions::new())
        .mutate(ConnectWalletArgs::new(burner))
        .await?;
    Ok(())
}

fn describe(wallet: &Arc<dyn Wallet>) -> serde_json::Value {
    json!({
        "name": wallet.name(),
        "version": wallet.version(),
        "chains": wallet.chains(),
        "features": wallet.features(),
        "accounts": wallet.accounts(),
    })
}

fn print_json(value: &serde_json::Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
