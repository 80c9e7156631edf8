// Copyright 2025 RustFS Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::units::{multiplier, to_bytes};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Cloud marketplace the console runs in. Non-default integrations pick a
/// storage type from a fixed catalog instead of a namespace storage class.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Integration {
    #[default]
    Default,
    Aws,
    Gcp,
    Azure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveSize {
    pub size: &'static str,
    pub unit: &'static str,
}

impl DriveSize {
    pub fn bytes(&self) -> Option<u64> {
        to_bytes(self.size, self.unit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageTypePreset {
    pub type_selection: &'static str,
    pub storage_class: &'static str,
    pub drive_size: DriveSize,
    pub drives_per_server: u64,
    pub cpu: u64,
    pub memory_gib: u64,
    pub minimum_drive_size: Option<DriveSize>,
}

const AWS: &[StorageTypePreset] = &[
    StorageTypePreset {
        type_selection: "performance",
        storage_class: "gp3",
        drive_size: DriveSize { size: "1", unit: "Ti" },
        drives_per_server: 4,
        cpu: 16,
        memory_gib: 64,
        minimum_drive_size: None,
    },
    StorageTypePreset {
        type_selection: "capacity",
        storage_class: "st1",
        drive_size: DriveSize { size: "8", unit: "Ti" },
        drives_per_server: 4,
        cpu: 8,
        memory_gib: 32,
        minimum_drive_size: Some(DriveSize { size: "125", unit: "Gi" }),
    },
    StorageTypePreset {
        type_selection: "archive",
        storage_class: "sc1",
        drive_size: DriveSize { size: "12", unit: "Ti" },
        drives_per_server: 4,
        cpu: 8,
        memory_gib: 32,
        minimum_drive_size: Some(DriveSize { size: "125", unit: "Gi" }),
    },
];

const GCP: &[StorageTypePreset] = &[
    StorageTypePreset {
        type_selection: "performance",
        storage_class: "pd-ssd",
        drive_size: DriveSize { size: "1", unit: "Ti" },
        drives_per_server: 4,
        cpu: 16,
        memory_gib: 64,
        minimum_drive_size: None,
    },
    StorageTypePreset {
        type_selection: "capacity",
        storage_class: "pd-standard",
        drive_size: DriveSize { size: "4", unit: "Ti" },
        drives_per_server: 4,
        cpu: 8,
        memory_gib: 32,
        minimum_drive_size: Some(DriveSize { size: "200", unit: "Gi" }),
    },
];

const AZURE: &[StorageTypePreset] = &[
    StorageTypePreset {
        type_selection: "performance",
        storage_class: "managed-premium",
        drive_size: DriveSize { size: "1", unit: "Ti" },
        drives_per_server: 4,
        cpu: 16,
        memory_gib: 64,
        minimum_drive_size: Some(DriveSize { size: "32", unit: "Gi" }),
    },
    StorageTypePreset {
        type_selection: "capacity",
        storage_class: "managed-standard",
        drive_size: DriveSize { size: "4", unit: "Ti" },
        drives_per_server: 4,
        cpu: 8,
        memory_gib: 32,
        minimum_drive_size: Some(DriveSize { size: "32", unit: "Gi" }),
    },
];

impl Integration {
    pub fn presets(self) -> &'static [StorageTypePreset] {
        match self {
            Integration::Default => &[],
            Integration::Aws => AWS,
            Integration::Gcp => GCP,
            Integration::Azure => AZURE,
        }
    }

    pub fn preset(self, type_selection: &str) -> Option<&'static StorageTypePreset> {
        self.presets()
            .iter()
            .find(|p| p.type_selection == type_selection)
    }
}

/// Raises a total volume size that is below `nodes * drives` drives of the
/// preset minimum drive size. Returns the new `(size, unit)`, or `None`
/// when the entered size already satisfies the minimum.
pub fn minimum_volume_size(
    preset: &StorageTypePreset,
    nodes: Option<i64>,
    drives_per_server: Option<i64>,
    size: &str,
    unit: &str,
) -> Option<(String, String)> {
    let minimum = preset.minimum_drive_size?;
    let drives = u64::try_from(nodes?.checked_mul(drives_per_server?)?).ok()?;
    let per_drive = minimum.size.parse::<u64>().ok()?;

    let minimum_total = drives.checked_mul(per_drive)?;
    let minimum_bytes = minimum_total.checked_mul(multiplier(minimum.unit)?)?;

    match to_bytes(size, unit) {
        Some(current) if current >= minimum_bytes => None,
        _ => Some((minimum_total.to_string(), minimum.unit.to_string())),
    }
}
