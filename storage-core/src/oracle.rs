// SPDX-License-Identifier: GPL-3.0-only

//! Passphrase quality scoring through a [`PasswordQualityOracle`]

use std::sync::Arc;
use std::time::Duration;

use storage_contracts::PasswordQualityOracle;
use storage_types::{Strength, level_for_score};

use crate::error::OracleError;
use crate::settings::DEFAULT_ORACLE_TIMEOUT;

/// Maps oracle scores onto strength buckets
#[derive(Clone)]
pub struct QualityOracleClient {
    oracle: Arc<dyn PasswordQualityOracle>,
    timeout: Duration,
}

impl std::fmt::Debug for QualityOracleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QualityOracleClient")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl QualityOracleClient {
    pub fn new(oracle: Arc<dyn PasswordQualityOracle>) -> Self {
        Self {
            oracle,
            timeout: DEFAULT_ORACLE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Score `password` in forced mode and bucket the result.
    pub async fn score(&self, password: &str) -> Result<Strength, OracleError> {
        let quality = tokio::time::timeout(self.timeout, self.oracle.score_password(password, true))
            .await
            .map_err(|_| OracleError::Timeout(self.timeout))??;

        let level = level_for_score(quality.value).ok_or(OracleError::OutOfRange(quality.value))?;
        tracing::debug!(score = quality.value, "passphrase scored {}", level.label);
        Ok(level.strength)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use storage_contracts::{PasswordQuality, StorageError};

    use super::*;

    struct FixedOracle(Result<i64, StorageError>);

    #[async_trait]
    impl PasswordQualityOracle for FixedOracle {
        async fn score_password(
            &self,
            _password: &str,
            force: bool,
        ) -> Result<PasswordQuality, StorageError> {
            assert!(force, "scoring must always be forced");
            self.0.clone().map(PasswordQuality::new)
        }
    }

    struct StalledOracle;

    #[async_trait]
    impl PasswordQualityOracle for StalledOracle {
        async fn score_password(
            &self,
            _password: &str,
            _force: bool,
        ) -> Result<PasswordQuality, StorageError> {
            std::future::pending().await
        }
    }

    fn client(score: Result<i64, StorageError>) -> QualityOracleClient {
        QualityOracleClient::new(Arc::new(FixedOracle(score)))
    }

    #[tokio::test]
    async fn scores_map_to_buckets() {
        for (score, strength) in [
            (0, Strength::Weak),
            (29, Strength::Weak),
            (30, Strength::Medium),
            (69, Strength::Medium),
            (70, Strength::Strong),
            (100, Strength::Strong),
        ] {
            assert_eq!(client(Ok(score)).score("pw").await, Ok(strength), "{score}");
        }
    }

    #[tokio::test]
    async fn out_of_range_score_is_an_error() {
        assert_eq!(
            client(Ok(101)).score("pw").await,
            Err(OracleError::OutOfRange(101))
        );
        assert_eq!(
            client(Ok(-5)).score("pw").await,
            Err(OracleError::OutOfRange(-5))
        );
    }

    #[tokio::test]
    async fn service_failure_is_an_error() {
        let failure = StorageError::unavailable("pwscore not installed");
        assert_eq!(
            client(Err(failure.clone())).score("pw").await,
            Err(OracleError::Service(failure))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_oracle_times_out() {
        let client = QualityOracleClient::new(Arc::new(StalledOracle))
            .with_timeout(Duration::from_millis(250));

        assert_eq!(
            client.score("pw").await,
            Err(OracleError::Timeout(Duration::from_millis(250)))
        );
    }
}
