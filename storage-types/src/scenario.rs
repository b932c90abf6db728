// SPDX-License-Identifier: GPL-3.0-only

//! Installation scenario catalog

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the installer will use the selected disks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstallationScenario {
    EraseAll,
    UseFreeSpace,
    MountPointMapping,
}

impl InstallationScenario {
    pub const ALL: [InstallationScenario; 3] = [
        Self::EraseAll,
        Self::UseFreeSpace,
        Self::MountPointMapping,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::EraseAll => "erase-all",
            Self::UseFreeSpace => "use-free-space",
            Self::MountPointMapping => "mount-point-mapping",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::EraseAll => "Erase data and install",
            Self::UseFreeSpace => "Use free space for the installation",
            Self::MountPointMapping => "Mount point assignment",
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            Self::EraseAll => "Erase data and install",
            Self::UseFreeSpace | Self::MountPointMapping => "Install",
        }
    }

    /// Whether confirming this scenario destroys existing data
    pub fn is_destructive(self) -> bool {
        matches!(self, Self::EraseAll)
    }

    pub fn dialog_warning_title(self) -> &'static str {
        match self {
            Self::EraseAll => "Erase data and install?",
            Self::UseFreeSpace | Self::MountPointMapping => "Install on the selected disks?",
        }
    }

    pub fn dialog_warning(self) -> &'static str {
        match self {
            Self::EraseAll => {
                "The selected disks will be erased, this cannot be undone. \
                 Are you sure you want to continue with the installation?"
            }
            Self::UseFreeSpace => {
                "The installation will use the available space on your devices \
                 and will not erase any device data."
            }
            Self::MountPointMapping => {
                "The installation will use your configured partitioning layout."
            }
        }
    }

    /// Mount point mapping lists per-device requests and manages encryption itself
    pub fn shows_requests(self) -> bool {
        matches!(self, Self::MountPointMapping)
    }

    pub fn shows_encryption(self) -> bool {
        !matches!(self, Self::MountPointMapping)
    }
}

impl fmt::Display for InstallationScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for InstallationScenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.id() == s)
            .ok_or_else(|| format!("unknown installation scenario: {s}"))
    }
}
