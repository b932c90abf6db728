// SPDX-License-Identifier: GPL-3.0-only

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::StorageError;

/// Raw answer of a password quality service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordQuality {
    /// Quality score, nominally 0..=100
    pub value: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PasswordQuality {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            message: None,
        }
    }
}

#[async_trait]
pub trait PasswordQualityOracle: Send + Sync {
    /// Score `password`.
    ///
    /// With `force` set, a password the service would reject still gets a score (0)
    /// instead of an error.
    async fn score_password(
        &self,
        password: &str,
        force: bool,
    ) -> Result<PasswordQuality, StorageError>;
}
