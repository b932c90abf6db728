// SPDX-License-Identifier: GPL-3.0-only

//! `passphrase` command: validate a passphrase the way the encryption screen does

use std::sync::Arc;

use anyhow::Context;
use storage_contracts::PasswordQualityOracle;
use storage_contracts::client::PwscoreOracle;
use storage_core::{EncryptionValidator, ValidatorSettings};
use storage_types::{EncryptionState, ValidationSnapshot};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::config::ReviewConfig;

pub fn oracle(config: &ReviewConfig) -> anyhow::Result<Arc<dyn PasswordQualityOracle>> {
    let oracle = match &config.pwscore_path {
        Some(path) => PwscoreOracle::with_binary(path),
        None => PwscoreOracle::new().context("password quality checks need pwscore")?,
    };
    tracing::debug!("scoring with {}", oracle.binary().display());
    Ok(Arc::new(oracle))
}

/// Feed the passphrase and its confirmation (one per line) through a validator.
pub async fn validate<R>(
    input: R,
    oracle: Arc<dyn PasswordQualityOracle>,
    settings: ValidatorSettings,
    encrypt: bool,
) -> anyhow::Result<ValidationSnapshot>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let password = lines.next_line().await?.unwrap_or_default();
    let confirm_password = lines.next_line().await?.unwrap_or_default();

    let validator =
        EncryptionValidator::spawn(oracle, EncryptionState::new("", "", encrypt), settings);
    validator.set_password(password);
    validator.set_confirm_password(confirm_password);

    let snapshot = validator.settled().await;
    validator.leave().await;
    Ok(snapshot)
}

fn mark(state: storage_types::RuleState) -> &'static str {
    match state {
        storage_types::RuleState::Success => "ok",
        storage_types::RuleState::Error => "failed",
        storage_types::RuleState::Indeterminate => "-",
    }
}

pub fn render(snapshot: &ValidationSnapshot) -> String {
    let strength = snapshot
        .strength_label()
        .map_or("-", |level| level.label);

    format!(
        "at least 8 characters: {}\npassphrases match: {}\nstrength: {}\nacceptable: {}\n",
        mark(snapshot.rule_length),
        mark(snapshot.rule_confirm_matches),
        strength,
        if snapshot.is_form_valid { "yes" } else { "no" },
    )
}
