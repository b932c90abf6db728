// SPDX-License-Identifier: GPL-3.0-only

//! Device and mount point request models
//!
//! Devices arrive as a flat table keyed by id, connected through their `parents` lists.
//! Requests name their target device by `name`, never by id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A storage device as reported by storage discovery
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Device {
    /// Opaque identifier, unique across the table
    pub id: String,

    /// Stable device name (e.g., "sda1"); mount point requests match on this
    pub name: String,

    /// Total size in bytes
    #[serde(alias = "size")]
    pub size_bytes: u64,

    /// Human-readable label (e.g., "ATA Samsung SSD")
    #[serde(default)]
    pub description: String,

    /// Parent device ids; only the first entry is used for subtree membership
    #[serde(default)]
    pub parents: Vec<String>,

    /// Existing on-disk format, if discovery reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_type: Option<String>,
}

impl Device {
    pub fn new(id: impl Into<String>, name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            size_bytes,
            description: String::new(),
            parents: Vec::new(),
            format_type: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parents.push(parent.into());
        self
    }

    pub fn with_format(mut self, format_type: impl Into<String>) -> Self {
        self.format_type = Some(format_type.into());
        self
    }

    /// The parent that decides subtree membership
    pub fn first_parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Immutable snapshot of the device table, keyed by device id
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct DeviceTable {
    devices: BTreeMap<String, Device>,
}

impl DeviceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, device: Device) -> Option<Device> {
        self.devices.insert(device.id.clone(), device)
    }

    pub fn get(&self, id: &str) -> Option<&Device> {
        self.devices.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.devices.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Devices in id order
    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }
}

impl FromIterator<Device> for DeviceTable {
    fn from_iter<T: IntoIterator<Item = Device>>(iter: T) -> Self {
        let mut table = Self::new();
        for device in iter {
            table.insert(device);
        }
        table
    }
}

/// A mount/format request from the partitioning plan
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct MountPointRequest {
    /// Name of the target device
    pub device_spec: String,

    /// Filesystem the device will be reformatted with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount_point: Option<String>,

    #[serde(default)]
    pub reformat: bool,
}

impl MountPointRequest {
    pub fn new(device_spec: impl Into<String>) -> Self {
        Self {
            device_spec: device_spec.into(),
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format_type: impl Into<String>) -> Self {
        self.format_type = Some(format_type.into());
        self
    }

    pub fn with_mount_point(mut self, mount_point: impl Into<String>) -> Self {
        self.mount_point = Some(mount_point.into());
        self
    }

    pub fn with_reformat(mut self, reformat: bool) -> Self {
        self.reformat = reformat;
        self
    }
}
