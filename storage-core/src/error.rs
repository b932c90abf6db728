// SPDX-License-Identifier: GPL-3.0-only

use std::time::Duration;

use storage_contracts::StorageError;
use thiserror::Error;

/// Device table integrity faults
///
/// These are recovered locally (treated as non-membership) and reported as diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("device '{0}' is not present in the device table")]
    MissingDevice(String),

    #[error("no device named '{0}'")]
    UnknownDeviceName(String),

    #[error("device name '{name}' is shared by {count} devices; using '{chosen}'")]
    DuplicateName {
        name: String,
        count: usize,
        chosen: String,
    },

    #[error("parent chain of '{device}' does not terminate within {limit} steps")]
    CycleDetected { device: String, limit: usize },
}

/// Quality oracle failures; the validator treats all of them as "strength unknown"
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("quality service failed: {0}")]
    Service(#[from] StorageError),

    #[error("quality score {0} is outside 0..=100")]
    OutOfRange(i64),

    #[error("quality service did not answer within {0:?}")]
    Timeout(Duration),
}
