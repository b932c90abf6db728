// SPDX-License-Identifier: GPL-3.0-only

//! Canonical domain models for the installer storage review
//!
//! This crate defines the plain data exchanged between the review core and its collaborators:
//!
//! - **storage-contracts**: quality oracle and partitioning lookups speak these types
//! - **storage-core**: builds summaries and validation snapshots from them
//! - presentation: renders whatever the core returns
//!
//! ## Architecture
//!
//! Devices are a flat table (`DeviceTable`) connected through parent ids. Review output is
//! a list of `DiskSummary`, one per selected disk, in caller order.

pub mod common;
pub mod device;
pub mod encryption;
pub mod scenario;
pub mod summary;

pub use common::{bytes_to_pretty, join_present};
pub use device::{Device, DeviceTable, MountPointRequest};
pub use encryption::{
    EncryptionState, LevelVariant, MAX_SCORE, MIN_SCORE, RuleState, STRENGTH_LEVELS, Strength,
    StrengthLevel, ValidationPhase, ValidationSnapshot, level_for_score,
};
pub use scenario::InstallationScenario;
pub use summary::{DiskSummary, ReviewSummary, SummaryRow};
