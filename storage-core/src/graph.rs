// SPDX-License-Identifier: GPL-3.0-only

//! Subtree membership over the flat device table
//!
//! The table is flattened into an arena once; membership is then an index walk along the
//! first-parent edge, bounded by the arena size.

use std::collections::HashMap;

use storage_types::{Device, DeviceTable};

use crate::error::GraphError;

#[derive(Debug, Clone, Copy)]
struct ParentLink<'a> {
    id: &'a str,
    /// Arena slot of the parent, `None` when the parent id is missing from the table
    slot: Option<usize>,
}

/// Read-only view of one device table snapshot
#[derive(Debug)]
pub struct DeviceGraph<'a> {
    devices: Vec<&'a Device>,
    by_id: HashMap<&'a str, usize>,
    by_name: HashMap<&'a str, usize>,
    parents: Vec<Option<ParentLink<'a>>>,
    faults: Vec<GraphError>,
}

impl<'a> DeviceGraph<'a> {
    pub fn new(table: &'a DeviceTable) -> Self {
        let devices: Vec<&Device> = table.iter().collect();
        let by_id: HashMap<&str, usize> = devices
            .iter()
            .enumerate()
            .map(|(slot, device)| (device.id.as_str(), slot))
            .collect();

        let parents = devices
            .iter()
            .map(|device| {
                device.first_parent().map(|id| ParentLink {
                    id,
                    slot: by_id.get(id).copied(),
                })
            })
            .collect();

        // First device (in table order) wins a name; later holders are reported.
        let mut by_name: HashMap<&str, usize> = HashMap::new();
        let mut name_counts: HashMap<&str, usize> = HashMap::new();
        for (slot, device) in devices.iter().enumerate() {
            by_name.entry(device.name.as_str()).or_insert(slot);
            *name_counts.entry(device.name.as_str()).or_default() += 1;
        }

        let mut faults: Vec<GraphError> = name_counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, count)| GraphError::DuplicateName {
                name: name.to_string(),
                count,
                chosen: devices[by_name[name]].id.clone(),
            })
            .collect();
        faults.sort_by(|a, b| a.to_string().cmp(&b.to_string()));

        for fault in &faults {
            tracing::warn!("device table: {fault}");
        }

        Self {
            devices,
            by_id,
            by_name,
            parents,
            faults,
        }
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn device(&self, id: &str) -> Option<&'a Device> {
        self.by_id.get(id).map(|slot| self.devices[*slot])
    }

    /// Faults found while indexing the table (duplicate names)
    pub fn faults(&self) -> &[GraphError] {
        &self.faults
    }

    /// Resolve a request's device spec to a device id by exact name match
    pub fn resolve_name(&self, name: &str) -> Result<&'a str, GraphError> {
        self.by_name
            .get(name)
            .map(|slot| self.devices[*slot].id.as_str())
            .ok_or_else(|| GraphError::UnknownDeviceName(name.to_string()))
    }

    /// Whether `device_id` sits strictly beneath `root_id` along first-parent edges.
    ///
    /// A device is never its own descendant. Missing ids and cycles are errors.
    pub fn check_descendant(&self, device_id: &str, root_id: &str) -> Result<bool, GraphError> {
        let mut current = *self
            .by_id
            .get(device_id)
            .ok_or_else(|| GraphError::MissingDevice(device_id.to_string()))?;

        if device_id == root_id {
            return Ok(false);
        }

        // An acyclic chain visits every slot at most once.
        for _ in 0..self.devices.len() {
            let Some(parent) = self.parents[current] else {
                return Ok(false);
            };

            if parent.id == root_id {
                return Ok(true);
            }

            current = parent
                .slot
                .ok_or_else(|| GraphError::MissingDevice(parent.id.to_string()))?;
        }

        Err(GraphError::CycleDetected {
            device: device_id.to_string(),
            limit: self.devices.len(),
        })
    }

    /// Like [`check_descendant`](Self::check_descendant), with faults logged and read as `false`
    pub fn is_descendant_of(&self, device_id: &str, root_id: &str) -> bool {
        match self.check_descendant(device_id, root_id) {
            Ok(member) => member,
            Err(err @ GraphError::CycleDetected { .. }) => {
                tracing::error!("device table inconsistent: {err}");
                false
            }
            Err(err) => {
                tracing::warn!("device table fault: {err}");
                false
            }
        }
    }
}

/// One-shot membership test against `table`
pub fn is_descendant_of(device_id: &str, root_id: &str, table: &DeviceTable) -> bool {
    DeviceGraph::new(table).is_descendant_of(device_id, root_id)
}
