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

use super::units::{GIB, TIB, nice_bytes, to_bytes};
use serde::{Deserialize, Serialize};

/// Largest drive a pool may request.
pub const DRIVE_SIZE_LIMIT: u64 = 12 * TIB;

/// How a requested capacity is spread over the pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distribution {
    pub error: String,
    pub nodes: u64,
    pub persistent_volumes: u64,
    pub disks: u64,
    /// Size of each persistent volume, in bytes.
    pub pv_size: u64,
}

impl Distribution {
    fn failed(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            ..Default::default()
        }
    }
}

/// Splits `size`/`unit` evenly across `nodes * drives_per_server` volumes.
pub fn calculate(
    size: &str,
    unit: &str,
    nodes: Option<i64>,
    drives_per_server: Option<i64>,
    drive_limit: u64,
) -> Distribution {
    let total = match to_bytes(size, unit) {
        Some(total) if total >= GIB => total,
        _ => return Distribution::failed("The total size must be at least 1Gi"),
    };
    let nodes = match nodes {
        Some(n) if n >= 4 => n as u64,
        _ => return Distribution::failed("Number of nodes cannot be less than 4"),
    };
    let drives = match drives_per_server {
        Some(d) if d >= 1 => d as u64,
        _ => return Distribution::failed("There must be at least one drive per node"),
    };

    let Some(volumes) = nodes.checked_mul(drives) else {
        return Distribution::failed("Too many drives, use fewer nodes or drives per node");
    };
    let pv_size = total / volumes;
    if pv_size < GIB {
        return Distribution::failed(
            "The drive size must be at least 1Gi, increase the total size or use fewer drives",
        );
    }
    if pv_size > drive_limit {
        return Distribution::failed(format!(
            "The drive size cannot exceed {}, add more nodes or drives",
            nice_bytes(drive_limit)
        ));
    }

    Distribution {
        error: String::new(),
        nodes,
        persistent_volumes: volumes,
        disks: drives,
        pv_size,
    }
}
