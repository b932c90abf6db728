// SPDX-License-Identifier: GPL-3.0-only

pub mod partitioning;
pub mod quality;

pub use partitioning::{AutomaticRequest, PartitioningMethod, PartitioningQuery};
pub use quality::{PasswordQuality, PasswordQualityOracle};
