// SPDX-License-Identifier: GPL-3.0-only

//! Passphrase rule states

use storage_types::{RuleState, Strength};

/// Passphrases shorter than this (in characters) fail the length rule
pub const MIN_PASSPHRASE_LENGTH: usize = 8;

pub fn rule_length(password: &str) -> RuleState {
    match password.chars().count() {
        0 => RuleState::Indeterminate,
        n if n < MIN_PASSPHRASE_LENGTH => RuleState::Error,
        _ => RuleState::Success,
    }
}

pub fn rule_confirm_matches(password: &str, confirm_password: &str) -> RuleState {
    if password.is_empty() {
        RuleState::Indeterminate
    } else if password == confirm_password {
        RuleState::Success
    } else {
        RuleState::Error
    }
}

/// Both rule states, always computed together
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassphraseRules {
    pub length: RuleState,
    pub confirm_matches: RuleState,
}

impl PassphraseRules {
    pub fn evaluate(password: &str, confirm_password: &str) -> Self {
        Self {
            length: rule_length(password),
            confirm_matches: rule_confirm_matches(password, confirm_password),
        }
    }

    pub fn all_pass(&self) -> bool {
        self.length.is_success() && self.confirm_matches.is_success()
    }
}

/// Overall validity; rules only gate the form while encryption is enabled
pub fn is_form_valid(encrypt: bool, rules: &PassphraseRules, strength: Strength) -> bool {
    !encrypt || (rules.all_pass() && strength.is_valid())
}
