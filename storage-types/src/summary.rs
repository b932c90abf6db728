// SPDX-License-Identifier: GPL-3.0-only

//! Review summary models consumed by presentation

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{InstallationScenario, bytes_to_pretty};

/// One attributed request beneath a disk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryRow {
    pub device_spec: String,

    /// Comma-separated actions; may be empty
    pub action_summary: String,
}

impl fmt::Display for SummaryRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.device_spec, self.action_summary)
    }
}

/// Summary of one selected disk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiskSummary {
    pub disk_id: String,
    pub size_bytes: u64,
    pub name: String,
    pub description: String,
    pub rows: Vec<SummaryRow>,
}

impl DiskSummary {
    /// Heading line, e.g. "465.76 GB sda (ATA Samsung SSD)"
    pub fn heading(&self) -> String {
        format!(
            "{} {} ({})",
            bytes_to_pretty(&self.size_bytes, false),
            self.name,
            self.description
        )
    }
}

/// Everything the review screen shows before installation starts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewSummary {
    pub operating_system: String,
    pub language: String,
    pub scenario: InstallationScenario,

    /// `None` when the scenario hides the encryption line
    pub encryption: Option<bool>,

    pub disks: Vec<DiskSummary>,
}

impl ReviewSummary {
    pub fn encryption_label(&self) -> Option<&'static str> {
        self.encryption
            .map(|enabled| if enabled { "Enabled" } else { "Disabled" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_renders_spec_and_actions() {
        let row = SummaryRow {
            device_spec: "sda1".to_string(),
            action_summary: "format as ext4, /boot".to_string(),
        };
        assert_eq!(row.to_string(), "sda1: format as ext4, /boot");
    }

    #[test]
    fn heading_includes_size_name_and_description() {
        let disk = DiskSummary {
            disk_id: "sda".to_string(),
            size_bytes: 2 * 1024 * 1024 * 1024,
            name: "sda".to_string(),
            description: "QEMU HARDDISK".to_string(),
            rows: Vec::new(),
        };
        assert_eq!(disk.heading(), "2.00 GB sda (QEMU HARDDISK)");
    }
}
