// SPDX-License-Identifier: GPL-3.0-only

//! `review` command: storage summary from a discovery snapshot

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use storage_core::{GraphError, RequestIssue};
use storage_types::{DeviceTable, MountPointRequest, ReviewSummary};

/// Snapshot of what storage discovery and the partitioning plan reported
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReviewFile {
    pub selected_disks: Vec<String>,
    pub devices: DeviceTable,
    #[serde(default)]
    pub requests: Vec<MountPointRequest>,
}

impl ReviewFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("invalid review input {}", path.display()))
    }
}

pub fn render(summary: &ReviewSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Operating system: {}", summary.operating_system);
    let _ = writeln!(out, "Language: {}", summary.language);
    let _ = writeln!(out, "Installation type: {}", summary.scenario.label());
    if let Some(label) = summary.encryption_label() {
        let _ = writeln!(out, "Disk encryption: {label}");
    }

    let _ = writeln!(out, "Storage:");
    for disk in &summary.disks {
        let _ = writeln!(out, "  {}", disk.heading());
        for row in &disk.rows {
            let _ = writeln!(out, "    {row}");
        }
    }

    out
}

pub fn report_problems(diagnostics: &[GraphError], issues: &[RequestIssue]) {
    for fault in diagnostics {
        eprintln!("warning: {fault}");
    }
    for issue in issues {
        eprintln!("warning: {issue}");
    }
}
