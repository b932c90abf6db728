// SPDX-License-Identifier: GPL-3.0-only

//! Attribution of mount point requests to a disk's subtree

use storage_types::{MountPointRequest, SummaryRow, join_present};

use crate::error::GraphError;
use crate::graph::DeviceGraph;

/// Rows attributed to one root, plus any faults hit while resolving requests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attribution {
    pub rows: Vec<SummaryRow>,
    pub faults: Vec<GraphError>,
}

/// Compact description of what a request does, e.g. "format as xfs, /var, reformat"
pub fn action_summary(request: &MountPointRequest) -> String {
    let format = request
        .format_type
        .as_deref()
        .map(|format_type| format!("format as {format_type}"));

    join_present([
        format.as_deref(),
        request.mount_point.as_deref(),
        request.reformat.then_some("reformat"),
    ])
}

/// Requests whose device lies beneath `root_id`, in request order
pub fn attribute(
    graph: &DeviceGraph<'_>,
    root_id: &str,
    requests: &[MountPointRequest],
) -> Attribution {
    let mut attribution = Attribution::default();

    for request in requests {
        let device_id = match graph.resolve_name(&request.device_spec) {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!("skipping request: {err}");
                attribution.faults.push(err);
                continue;
            }
        };

        match graph.check_descendant(device_id, root_id) {
            Ok(true) => attribution.rows.push(SummaryRow {
                device_spec: request.device_spec.clone(),
                action_summary: action_summary(request),
            }),
            Ok(false) => {}
            Err(err) => {
                tracing::warn!(
                    root = root_id,
                    "request '{}' not attributed: {err}",
                    request.device_spec
                );
                attribution.faults.push(err);
            }
        }
    }

    tracing::debug!(
        root = root_id,
        "attributed {} of {} requests",
        attribution.rows.len(),
        requests.len()
    );

    attribution
}

#[cfg(test)]
mod tests {
    use storage_types::{Device, DeviceTable};

    use super::*;

    fn table() -> DeviceTable {
        [
            Device::new("A", "vda", 100),
            Device::new("B", "vda1", 50).with_parent("A"),
            Device::new("C", "vda1-home", 40).with_parent("B"),
            Device::new("S", "vdb", 100),
            Device::new("S1", "vdb1", 100).with_parent("S"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn nested_request_is_attributed_to_every_ancestor() {
        let table = table();
        let graph = DeviceGraph::new(&table);
        let requests = vec![MountPointRequest::new("vda1-home").with_mount_point("/home")];

        let expected = vec![SummaryRow {
            device_spec: "vda1-home".to_string(),
            action_summary: "/home".to_string(),
        }];

        assert_eq!(attribute(&graph, "A", &requests).rows, expected);
        assert_eq!(attribute(&graph, "B", &requests).rows, expected);
        assert!(attribute(&graph, "S", &requests).rows.is_empty());
    }

    #[test]
    fn summary_joins_present_fields_in_fixed_order() {
        let request = MountPointRequest::new("vda1")
            .with_reformat(true)
            .with_mount_point("/boot")
            .with_format("ext4");
        assert_eq!(action_summary(&request), "format as ext4, /boot, reformat");

        let request = MountPointRequest::new("vda1").with_format("swap");
        assert_eq!(action_summary(&request), "format as swap");

        let request = MountPointRequest::new("vda1").with_reformat(true);
        assert_eq!(action_summary(&request), "reformat");
    }

    #[test]
    fn request_without_actions_is_still_listed() {
        let table = table();
        let graph = DeviceGraph::new(&table);
        let requests = vec![MountPointRequest::new("vda1")];

        let rows = attribute(&graph, "A", &requests).rows;

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].action_summary, "");
        assert_eq!(rows[0].to_string(), "vda1: ");
    }

    #[test]
    fn output_keeps_request_order() {
        let table = table();
        let graph = DeviceGraph::new(&table);
        let requests = vec![
            MountPointRequest::new("vda1-home").with_mount_point("/home"),
            MountPointRequest::new("vdb1").with_mount_point("/srv"),
            MountPointRequest::new("vda1").with_mount_point("/"),
        ];

        let specs: Vec<_> = attribute(&graph, "A", &requests)
            .rows
            .into_iter()
            .map(|row| row.device_spec)
            .collect();

        assert_eq!(specs, ["vda1-home", "vda1"]);
    }

    #[test]
    fn unknown_device_spec_is_a_fault() {
        let table = table();
        let graph = DeviceGraph::new(&table);
        let requests = vec![MountPointRequest::new("nvme0n1p1").with_mount_point("/data")];

        let attribution = attribute(&graph, "A", &requests);

        assert!(attribution.rows.is_empty());
        assert_eq!(
            attribution.faults,
            vec![GraphError::UnknownDeviceName("nvme0n1p1".to_string())]
        );
    }

    #[test]
    fn root_device_itself_is_not_attributed() {
        let table = table();
        let graph = DeviceGraph::new(&table);
        let requests = vec![MountPointRequest::new("vda").with_format("xfs")];

        assert!(attribute(&graph, "A", &requests).rows.is_empty());
    }
}
