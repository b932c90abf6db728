// SPDX-License-Identifier: GPL-3.0-only

//! Storage review and disk encryption core
//!
//! Pure data in, plain data out: presentation feeds device and request tables into
//! [`build_summary`]/[`build_review`] and passphrase edits into [`EncryptionValidator`], then
//! renders what comes back.
//!
//! ## Modules
//!
//! - [`graph`]: first-parent subtree membership over a device table
//! - [`attribution`]: mount point requests beneath one disk, with action summaries
//! - [`summary`]: per-disk summaries and the full review
//! - [`rules`], [`oracle`], [`validator`]: passphrase rules, strength scoring and the
//!   debounced validation task
//! - [`status`]: initial encryption flag from the applied partitioning

pub mod attribution;
pub mod error;
pub mod graph;
pub mod oracle;
pub mod rules;
pub mod settings;
pub mod status;
pub mod summary;
pub mod validation;
pub mod validator;

pub use attribution::{Attribution, action_summary, attribute};
pub use error::{GraphError, OracleError};
pub use graph::{DeviceGraph, is_descendant_of};
pub use oracle::QualityOracleClient;
pub use rules::{
    MIN_PASSPHRASE_LENGTH, PassphraseRules, is_form_valid, rule_confirm_matches, rule_length,
};
pub use settings::ValidatorSettings;
pub use status::lookup_encryption_status;
pub use summary::{ReviewInput, StorageSummary, build_review, build_summary};
pub use validation::{RequestIssue, validate_requests};
pub use validator::EncryptionValidator;
