// SPDX-License-Identifier: GPL-3.0-only

use std::time::Duration;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);
pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Timing knobs of the encryption validator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorSettings {
    /// Quiet period after the last edit before the passphrase is scored
    pub debounce: Duration,
    pub oracle_timeout: Duration,
}

impl Default for ValidatorSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            oracle_timeout: DEFAULT_ORACLE_TIMEOUT,
        }
    }
}

impl ValidatorSettings {
    pub fn from_millis(debounce_ms: u64, oracle_timeout_ms: u64) -> Self {
        Self {
            debounce: Duration::from_millis(debounce_ms),
            oracle_timeout: Duration::from_millis(oracle_timeout_ms),
        }
    }
}
