// SPDX-License-Identifier: GPL-3.0-only

//! Disk encryption passphrase models
//!
//! The strength catalog is the single place the acceptance policy lives:
//! flipping a level's `valid` flag tightens validation without touching the validator.

use serde::{Deserialize, Serialize};

/// State of an individual passphrase rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleState {
    /// Nothing entered yet
    #[default]
    Indeterminate,
    Error,
    Success,
}

impl RuleState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Indeterminate => "indeterminate",
            Self::Error => "error",
            Self::Success => "success",
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Discrete passphrase strength
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    /// Not scored yet, or the quality oracle failed
    #[default]
    Unknown,
    Weak,
    Medium,
    Strong,
}

impl Strength {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Weak => "weak",
            Self::Medium => "medium",
            Self::Strong => "strong",
        }
    }

    pub fn level(self) -> Option<&'static StrengthLevel> {
        STRENGTH_LEVELS.iter().find(|level| level.strength == self)
    }

    /// Whether this strength is acceptable for encryption
    pub fn is_valid(self) -> bool {
        self.level().is_some_and(|level| level.valid)
    }
}

/// Visual variant presentation uses for a strength label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelVariant {
    Error,
    Warning,
    Success,
}

/// One contiguous score bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthLevel {
    pub strength: Strength,
    pub label: &'static str,
    pub variant: LevelVariant,

    /// Inclusive lower score bound
    pub lower_bound: u8,

    /// Inclusive upper score bound
    pub upper_bound: u8,

    pub valid: bool,
}

impl StrengthLevel {
    pub fn contains(&self, score: i64) -> bool {
        i64::from(self.lower_bound) <= score && score <= i64::from(self.upper_bound)
    }
}

pub const MIN_SCORE: i64 = 0;
pub const MAX_SCORE: i64 = 100;

pub const STRENGTH_LEVELS: [StrengthLevel; 3] = [
    StrengthLevel {
        strength: Strength::Weak,
        label: "Weak",
        variant: LevelVariant::Error,
        lower_bound: 0,
        upper_bound: 29,
        valid: true,
    },
    StrengthLevel {
        strength: Strength::Medium,
        label: "Medium",
        variant: LevelVariant::Warning,
        lower_bound: 30,
        upper_bound: 69,
        valid: true,
    },
    StrengthLevel {
        strength: Strength::Strong,
        label: "Strong",
        variant: LevelVariant::Success,
        lower_bound: 70,
        upper_bound: 100,
        valid: true,
    },
];

/// Bucket for a quality score, `None` outside 0..=100
pub fn level_for_score(score: i64) -> Option<&'static StrengthLevel> {
    STRENGTH_LEVELS.iter().find(|level| level.contains(score))
}

/// Passphrase values the wizard hands back and forth with the encryption screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionState {
    pub password: String,
    pub confirm_password: String,
    pub encrypt: bool,
}

impl EncryptionState {
    pub fn new(
        password: impl Into<String>,
        confirm_password: impl Into<String>,
        encrypt: bool,
    ) -> Self {
        Self {
            password: password.into(),
            confirm_password: confirm_password.into(),
            encrypt,
        }
    }

    pub fn with_password(&self, password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            ..self.clone()
        }
    }

    pub fn with_confirm_password(&self, confirm_password: impl Into<String>) -> Self {
        Self {
            confirm_password: confirm_password.into(),
            ..self.clone()
        }
    }

    pub fn with_encrypt(&self, encrypt: bool) -> Self {
        Self {
            encrypt,
            ..self.clone()
        }
    }
}

/// Where the validator is in its edit/score cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPhase {
    /// Settled on an empty passphrase
    #[default]
    Empty,
    /// Waiting for the debounce window to close
    Typing,
    /// Quality query in flight
    Scoring,
    Settled,
}

/// Rule states and validity published after each settled recomputation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSnapshot {
    /// Number of edits folded into this snapshot
    pub revision: u64,
    pub phase: ValidationPhase,
    pub rule_length: RuleState,
    pub rule_confirm_matches: RuleState,
    pub strength: Strength,
    pub encrypt: bool,
    pub is_form_valid: bool,
}

impl ValidationSnapshot {
    /// Label to show next to the passphrase field, only once the length rule passes
    pub fn strength_label(&self) -> Option<&'static StrengthLevel> {
        if self.rule_length.is_success() {
            self.strength.level()
        } else {
            None
        }
    }

    /// Whether no debounce or quality query is pending
    pub fn is_settled(&self) -> bool {
        matches!(self.phase, ValidationPhase::Empty | ValidationPhase::Settled)
    }

    /// Whether the wizard must refuse to move past the encryption screen
    pub fn blocks_navigation(&self) -> bool {
        self.encrypt && (!self.is_form_valid || !self.is_settled())
    }
}
