// SPDX-License-Identifier: GPL-3.0-only

//! Sanity checks on mount point requests
//!
//! Issues are diagnostics only; summaries are still built for whatever resolves.

use storage_types::{DeviceTable, MountPointRequest};
use thiserror::Error;

use crate::error::GraphError;
use crate::graph::DeviceGraph;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestIssue {
    #[error("Unknown or invalid device '{0}' specified")]
    UnknownDevice(String),

    #[error("Device name '{name}' matches {count} devices")]
    AmbiguousDevice { name: String, count: usize },

    #[error("No format on device '{0}'")]
    NoFormat(String),
}

pub fn validate_requests(
    requests: &[MountPointRequest],
    devices: &DeviceTable,
) -> Vec<RequestIssue> {
    let graph = DeviceGraph::new(devices);
    let mut issues = Vec::new();

    for request in requests {
        let spec = request.device_spec.as_str();

        let device_id = match graph.resolve_name(spec) {
            Ok(id) => id,
            Err(_) => {
                issues.push(RequestIssue::UnknownDevice(spec.to_string()));
                continue;
            }
        };

        let ambiguous = graph.faults().iter().find_map(|fault| match fault {
            GraphError::DuplicateName { name, count, .. } if name == spec => Some(*count),
            _ => None,
        });
        if let Some(count) = ambiguous {
            issues.push(RequestIssue::AmbiguousDevice {
                name: spec.to_string(),
                count,
            });
        }

        let existing_format = graph
            .device(device_id)
            .and_then(|device| device.format_type.as_deref());
        if request.reformat && request.format_type.is_none() && existing_format.is_none() {
            issues.push(RequestIssue::NoFormat(spec.to_string()));
        }
    }

    for issue in &issues {
        tracing::warn!("mount point request: {issue}");
    }

    issues
}
