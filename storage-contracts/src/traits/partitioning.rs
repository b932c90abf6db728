// SPDX-License-Identifier: GPL-3.0-only

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::StorageError;

/// How the applied partitioning was configured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartitioningMethod {
    Automatic,
    Custom,
    Manual,
    Interactive,
    Blivet,
    Other(String),
}

impl PartitioningMethod {
    pub fn from_wire(method: &str) -> Self {
        match method {
            "AUTOMATIC" => Self::Automatic,
            "CUSTOM" => Self::Custom,
            "MANUAL" => Self::Manual,
            "INTERACTIVE" => Self::Interactive,
            "BLIVET" => Self::Blivet,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            Self::Automatic => "AUTOMATIC",
            Self::Custom => "CUSTOM",
            Self::Manual => "MANUAL",
            Self::Interactive => "INTERACTIVE",
            Self::Blivet => "BLIVET",
            Self::Other(other) => other,
        }
    }
}

impl fmt::Display for PartitioningMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// The parts of an automatic partitioning request the review screen reads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomaticRequest {
    pub encrypted: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub luks_version: Option<String>,
}

/// Read-only lookups against the installer's storage module
#[async_trait]
pub trait PartitioningQuery: Send + Sync {
    /// Object path of the partitioning that was applied
    async fn applied_partitioning(&self) -> Result<String, StorageError>;

    async fn partitioning_method(
        &self,
        partitioning: &str,
    ) -> Result<PartitioningMethod, StorageError>;

    /// Only meaningful for automatic partitioning
    async fn partitioning_request(
        &self,
        partitioning: &str,
    ) -> Result<AutomaticRequest, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_roundtrip() {
        for wire in ["AUTOMATIC", "CUSTOM", "MANUAL", "INTERACTIVE", "BLIVET", "NEW"] {
            assert_eq!(PartitioningMethod::from_wire(wire).as_wire(), wire);
        }
        assert_eq!(
            PartitioningMethod::from_wire("AUTOMATIC"),
            PartitioningMethod::Automatic
        );
    }
}
