// SPDX-License-Identifier: GPL-3.0-only

//! Clients for the external collaborators of the review screens

pub mod connection;
pub mod error;
pub mod partitioning;
pub mod pwscore;

pub use error::ClientError;
pub use partitioning::PartitioningClient;
pub use pwscore::PwscoreOracle;
