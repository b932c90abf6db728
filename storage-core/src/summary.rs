// SPDX-License-Identifier: GPL-3.0-only

//! Review summary composition
//!
//! One [`DiskSummary`] per selected disk, in the caller's order. Request rows are only
//! attached when the caller passes requests.

use storage_types::{
    DeviceTable, DiskSummary, InstallationScenario, MountPointRequest, ReviewSummary,
};

use crate::attribution::attribute;
use crate::error::GraphError;
use crate::graph::DeviceGraph;

/// Disk summaries plus data-integrity diagnostics collected while building them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageSummary {
    pub disks: Vec<DiskSummary>,
    pub diagnostics: Vec<GraphError>,
}

pub fn build_summary(
    selected_disks: &[String],
    devices: &DeviceTable,
    requests: Option<&[MountPointRequest]>,
) -> StorageSummary {
    let graph = DeviceGraph::new(devices);
    let mut summary = StorageSummary::default();

    if requests.is_some() {
        summary.diagnostics.extend_from_slice(graph.faults());
    }

    for disk_id in selected_disks {
        let Some(disk) = graph.device(disk_id) else {
            tracing::warn!("selected disk '{disk_id}' is missing from the device table");
            summary
                .diagnostics
                .push(GraphError::MissingDevice(disk_id.clone()));
            continue;
        };

        let rows = match requests {
            Some(requests) => {
                let attribution = attribute(&graph, disk_id, requests);
                summary.diagnostics.extend(attribution.faults);
                attribution.rows
            }
            None => Vec::new(),
        };

        summary.disks.push(DiskSummary {
            disk_id: disk.id.clone(),
            size_bytes: disk.size_bytes,
            name: disk.name.clone(),
            description: disk.description.clone(),
            rows,
        });
    }

    dedup_in_order(&mut summary.diagnostics);
    summary
}

// The same unresolvable request is hit once per selected disk.
fn dedup_in_order(diagnostics: &mut Vec<GraphError>) {
    let mut seen = Vec::with_capacity(diagnostics.len());
    diagnostics.retain(|fault| {
        if seen.contains(fault) {
            false
        } else {
            seen.push(fault.clone());
            true
        }
    });
}

/// Inputs of the review screen
#[derive(Debug, Clone)]
pub struct ReviewInput<'a> {
    pub operating_system: &'a str,
    pub language: &'a str,
    pub scenario: InstallationScenario,
    pub selected_disks: &'a [String],
    pub devices: &'a DeviceTable,
    pub requests: &'a [MountPointRequest],
}

/// Compose the full review summary.
///
/// `encryption` is the looked-up automatic encryption flag; `None` (not looked up, or not
/// automatic partitioning) renders as disabled.
pub fn build_review(
    input: &ReviewInput<'_>,
    encryption: Option<bool>,
) -> (ReviewSummary, Vec<GraphError>) {
    let requests = input.scenario.shows_requests().then_some(input.requests);
    let storage = build_summary(input.selected_disks, input.devices, requests);

    let review = ReviewSummary {
        operating_system: input.operating_system.to_string(),
        language: input.language.to_string(),
        scenario: input.scenario,
        encryption: input
            .scenario
            .shows_encryption()
            .then(|| encryption.unwrap_or(false)),
        disks: storage.disks,
    };

    (review, storage.diagnostics)
}
