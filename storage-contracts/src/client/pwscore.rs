// SPDX-License-Identifier: GPL-3.0-only

//! Password quality scoring through libpwquality's `pwscore`
//!
//! `pwscore` reads the password on stdin and prints a 0-100 score. It exits non-zero with a
//! reason on stderr when the password fails the configured quality checks.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::client::error::ClientError;
use crate::{PasswordQuality, PasswordQualityOracle, StorageError, StorageErrorKind};

pub const PWSCORE_BINARY: &str = "pwscore";

/// Outcome of one `pwscore` run
#[derive(Debug, Clone, PartialEq, Eq)]
enum PwscoreVerdict {
    Scored(i64),
    Rejected(String),
}

pub struct PwscoreOracle {
    binary: PathBuf,
}

impl PwscoreOracle {
    /// Locate `pwscore` on `PATH`
    pub fn new() -> Result<Self, ClientError> {
        let binary = which::which(PWSCORE_BINARY)
            .map_err(|e| ClientError::NotInstalled(format!("{PWSCORE_BINARY}: {e}")))?;
        Ok(Self { binary })
    }

    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    async fn run(&self, password: &str) -> Result<PwscoreVerdict, ClientError> {
        let mut child = Command::new(&self.binary)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ClientError::Process(format!("Failed to spawn {}: {}", self.binary.display(), e))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(password.as_bytes())
                .await
                .map_err(|e| ClientError::Process(format!("Failed to write password: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| ClientError::Process(format!("Failed to wait for pwscore: {e}")))?;

        parse_output(
            output.status.success(),
            &String::from_utf8_lossy(&output.stdout),
            &String::from_utf8_lossy(&output.stderr),
        )
    }
}

fn parse_output(success: bool, stdout: &str, stderr: &str) -> Result<PwscoreVerdict, ClientError> {
    if !success {
        let reason = stderr.trim();
        let reason = if reason.is_empty() {
            "Password is not acceptable"
        } else {
            reason
        };
        return Ok(PwscoreVerdict::Rejected(reason.to_string()));
    }

    let value = stdout
        .trim()
        .parse::<i64>()
        .map_err(|e| ClientError::ParseError(format!("Unexpected pwscore output {stdout:?}: {e}")))?;

    if value == 0 {
        Ok(PwscoreVerdict::Rejected("Password is too weak".to_string()))
    } else {
        Ok(PwscoreVerdict::Scored(value))
    }
}

fn into_quality(verdict: PwscoreVerdict, force: bool) -> Result<PasswordQuality, StorageError> {
    match verdict {
        PwscoreVerdict::Scored(value) => Ok(PasswordQuality {
            value,
            message: (value == 100).then(|| "Excellent password".to_string()),
        }),
        PwscoreVerdict::Rejected(_) if force => Ok(PasswordQuality::new(0)),
        PwscoreVerdict::Rejected(reason) => {
            Err(StorageError::new(StorageErrorKind::Rejected, reason))
        }
    }
}

#[async_trait]
impl PasswordQualityOracle for PwscoreOracle {
    async fn score_password(
        &self,
        password: &str,
        force: bool,
    ) -> Result<PasswordQuality, StorageError> {
        let verdict = self.run(password).await?;
        into_quality(verdict, force)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_output_is_a_score() {
        let verdict = parse_output(true, "57\n", "").unwrap();
        assert_eq!(verdict, PwscoreVerdict::Scored(57));
        assert_eq!(into_quality(verdict, false).unwrap().value, 57);
    }

    #[test]
    fn perfect_score_carries_message() {
        let quality = into_quality(PwscoreVerdict::Scored(100), false).unwrap();
        assert_eq!(quality.message.as_deref(), Some("Excellent password"));
    }

    #[test]
    fn rejection_is_zero_when_forced() {
        let verdict = parse_output(false, "", "The password is shorter than 8 characters\n").unwrap();

        assert_eq!(into_quality(verdict.clone(), true).unwrap().value, 0);

        let err = into_quality(verdict, false).unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::Rejected);
        assert_eq!(err.message, "The password is shorter than 8 characters");
    }

    #[test]
    fn zero_score_counts_as_rejection() {
        let verdict = parse_output(true, "0", "").unwrap();
        assert!(matches!(verdict, PwscoreVerdict::Rejected(_)));
        assert_eq!(into_quality(verdict, true).unwrap().value, 0);
    }

    #[test]
    fn garbage_output_is_a_parse_error() {
        assert!(matches!(
            parse_output(true, "n/a", ""),
            Err(ClientError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn missing_binary_is_an_error_even_when_forced() {
        let oracle = PwscoreOracle::with_binary("/nonexistent/bin/pwscore");
        let err = oracle.score_password("secret", true).await.unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::Internal);
    }
}
