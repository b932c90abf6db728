// SPDX-License-Identifier: GPL-3.0-only

mod config;
mod logging;
mod passphrase;
mod review;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use storage_contracts::client::{PartitioningClient, connection};
use storage_core::{ReviewInput, build_review, lookup_encryption_status, validate_requests};
use storage_types::InstallationScenario;

use crate::config::ReviewConfig;
use crate::review::ReviewFile;

/// Storage review and disk encryption checks of the installer
#[derive(Debug, Parser)]
#[command(name = "installer-storage")]
#[command(about = "Storage review and disk encryption checks for the installer", long_about = None)]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/installer-storage/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output; repeat for more
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the storage review for a discovery snapshot
    Review {
        /// JSON file with `selected-disks`, `devices` and `requests`
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "erase-all")]
        scenario: InstallationScenario,
        #[arg(long = "os", default_value = "")]
        operating_system: String,
        #[arg(long, default_value = "")]
        language: String,
        /// Encryption flag to show instead of asking the installer
        #[arg(long, conflicts_with = "query_encryption")]
        encrypted: Option<bool>,
        /// Ask the installer storage module whether encryption is enabled
        #[arg(long)]
        query_encryption: bool,
        #[arg(long)]
        json: bool,
    },
    /// Check a passphrase and its confirmation, read as two lines from stdin
    Passphrase {
        /// Report rule states without requiring them to pass
        #[arg(long)]
        no_encrypt: bool,
        #[arg(long)]
        json: bool,
    },
    /// Show whether the applied automatic partitioning encrypts the disks
    EncryptionStatus,
}

async fn partitioning_client(config: &ReviewConfig) -> anyhow::Result<PartitioningClient> {
    let client = match &config.bus_address {
        Some(address) => {
            let connection = connection::connect(address).await?;
            PartitioningClient::with_connection(connection).await?
        }
        None => PartitioningClient::new().await?,
    };
    Ok(client)
}

async fn encryption_status(config: &ReviewConfig) -> Option<bool> {
    match partitioning_client(config).await {
        Ok(client) => lookup_encryption_status(&client).await,
        Err(e) => {
            tracing::warn!("installer storage module unreachable: {e:#}");
            None
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ReviewConfig::load(cli.config.as_deref())?;
    logging::init(config.log_level.raised(cli.verbose), config.log_to_disk);

    match cli.command {
        Command::Review {
            input,
            scenario,
            operating_system,
            language,
            encrypted,
            query_encryption,
            json,
        } => {
            let file = ReviewFile::load(&input)?;
            let encryption = if query_encryption {
                encryption_status(&config).await
            } else {
                encrypted
            };

            let review_input = ReviewInput {
                operating_system: &operating_system,
                language: &language,
                scenario,
                selected_disks: &file.selected_disks,
                devices: &file.devices,
                requests: &file.requests,
            };
            let (summary, diagnostics) = build_review(&review_input, encryption);

            let issues = if scenario.shows_requests() {
                validate_requests(&file.requests, &file.devices)
            } else {
                Vec::new()
            };
            review::report_problems(&diagnostics, &issues);

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", review::render(&summary));
            }
        }
        Command::Passphrase { no_encrypt, json } => {
            let oracle = passphrase::oracle(&config)?;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let snapshot =
                passphrase::validate(stdin, oracle, config.validator_settings(), !no_encrypt)
                    .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{}", passphrase::render(&snapshot));
            }

            if snapshot.blocks_navigation() {
                std::process::exit(1);
            }
        }
        Command::EncryptionStatus => {
            let client = partitioning_client(&config)
                .await
                .context("failed to reach the installer storage module")?;
            match lookup_encryption_status(&client).await {
                Some(true) => println!("enabled"),
                Some(false) => println!("disabled"),
                None => println!("unknown"),
            }
        }
    }

    Ok(())
}
