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

use super::units::GIB;
use crate::types::cluster::AllocatableResources;
use serde::{Deserialize, Serialize};

/// Per-node CPU and memory ceiling with recommended requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCeiling {
    pub error: String,
    pub max_cpu: u64,
    pub max_memory_gib: u64,
    pub default_cpu_request: u64,
    pub default_memory_request: u64,
}

impl ResourceCeiling {
    /// False until an allocatable lookup has produced a ceiling.
    pub fn is_known(&self) -> bool {
        !self.error.is_empty() || self.max_cpu > 0 || self.max_memory_gib > 0
    }
}

pub fn ceiling(allocatable: &AllocatableResources) -> ResourceCeiling {
    if allocatable.min_allocatable_mem.is_none() || allocatable.min_allocatable_cpu.is_none() {
        return ResourceCeiling {
            error: "The cluster did not report allocatable CPU and memory".to_string(),
            ..Default::default()
        };
    }

    let max_cpu = allocatable.cpu_priority.max_allocatable_cpu;
    let max_memory_gib = allocatable.mem_priority.max_allocatable_mem / GIB;

    ResourceCeiling {
        error: String::new(),
        max_cpu,
        max_memory_gib,
        default_cpu_request: (max_cpu / 2).max(1),
        default_memory_request: (max_memory_gib / 2).max(2),
    }
}

/// Requested per-node resources; `None` is an unparseable entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceInputs {
    pub cpu_request: Option<i64>,
    pub memory_request_gib: Option<i64>,
    pub cpu_limit: Option<i64>,
    pub memory_limit_gib: Option<i64>,
}

/// Resources sent with the pool. Memory is in bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcesSize {
    pub error: String,
    pub memory_request: u64,
    pub memory_limit: u64,
    pub cpu_request: u64,
    pub cpu_limit: u64,
}

impl ResourcesSize {
    fn failed(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            ..Default::default()
        }
    }
}

/// Checks requests against the ceiling. Limits default to the requests.
pub fn size(inputs: ResourceInputs, ceiling: &ResourceCeiling) -> ResourcesSize {
    if !ceiling.error.is_empty() {
        return ResourcesSize::failed(ceiling.error.clone());
    }

    let (Some(cpu), Some(memory)) = (inputs.cpu_request, inputs.memory_request_gib) else {
        return ResourcesSize::failed("CPU and memory requests must be numbers");
    };
    if cpu < 1 {
        return ResourcesSize::failed("At least one CPU core must be requested");
    }
    if memory < 2 {
        return ResourcesSize::failed("At least 2Gi of memory must be requested");
    }

    let (cpu, memory) = (cpu as u64, memory as u64);
    if ceiling.is_known() {
        if cpu > ceiling.max_cpu {
            return ResourcesSize::failed(format!(
                "There are not enough CPU cores on the nodes ({} available)",
                ceiling.max_cpu
            ));
        }
        if memory > ceiling.max_memory_gib {
            return ResourcesSize::failed(format!(
                "There is not enough memory on the nodes ({}Gi available)",
                ceiling.max_memory_gib
            ));
        }
    }

    let cpu_limit = inputs.cpu_limit.map_or(cpu, |l| l.max(0) as u64);
    let memory_limit = inputs.memory_limit_gib.map_or(memory, |l| l.max(0) as u64);
    if cpu_limit < cpu || memory_limit < memory {
        return ResourcesSize::failed("Limits cannot be lower than requests");
    }

    let (Some(memory_request), Some(memory_bytes_limit)) =
        (memory.checked_mul(GIB), memory_limit.checked_mul(GIB))
    else {
        return ResourcesSize::failed("Memory request is too large");
    };

    ResourcesSize {
        error: String::new(),
        memory_request,
        memory_limit: memory_bytes_limit,
        cpu_request: cpu,
        cpu_limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::cluster::NodeMaxAllocatable;

    fn allocatable(cpu: u64, mem_gib: u64) -> AllocatableResources {
        AllocatableResources {
            min_allocatable_mem: Some(mem_gib * GIB),
            min_allocatable_cpu: Some(cpu),
            cpu_priority: NodeMaxAllocatable {
                max_allocatable_cpu: cpu,
                max_allocatable_mem: mem_gib * GIB,
            },
            mem_priority: NodeMaxAllocatable {
                max_allocatable_cpu: cpu,
                max_allocatable_mem: mem_gib * GIB,
            },
        }
    }

    #[test]
    fn test_default_cpu_request_boundaries() {
        assert_eq!(ceiling(&allocatable(10, 64)).default_cpu_request, 5);
        assert_eq!(ceiling(&allocatable(1, 64)).default_cpu_request, 1);
        assert_eq!(ceiling(&allocatable(0, 64)).default_cpu_request, 1);
    }

    #[test]
    fn test_default_memory_request_boundaries() {
        assert_eq!(ceiling(&allocatable(4, 64)).default_memory_request, 32);
        assert_eq!(ceiling(&allocatable(4, 3)).default_memory_request, 2);
    }

    #[test]
    fn test_missing_capability_zeroes_ceiling() {
        let mut res = allocatable(10, 64);
        res.min_allocatable_mem = None;
        let c = ceiling(&res);
        assert!(!c.error.is_empty());
        assert_eq!(c.max_cpu, 0);
        assert_eq!(c.max_memory_gib, 0);
        assert_eq!(c.default_cpu_request, 0);
        assert_eq!(c.default_memory_request, 0);
    }

    #[test]
    fn test_size_against_ceiling() {
        let c = ceiling(&allocatable(8, 32));
        let inputs = ResourceInputs {
            cpu_request: Some(4),
            memory_request_gib: Some(16),
            ..Default::default()
        };
        let s = size(inputs, &c);
        assert_eq!(s.error, "");
        assert_eq!(s.cpu_limit, 4);
        assert_eq!(s.memory_request, 16 * GIB);

        let too_big = ResourceInputs {
            cpu_request: Some(9),
            ..inputs
        };
        assert!(!size(too_big, &c).error.is_empty());

        let low_limit = ResourceInputs {
            cpu_limit: Some(2),
            ..inputs
        };
        assert!(!size(low_limit, &c).error.is_empty());
    }

    #[test]
    fn test_size_without_ceiling() {
        let s = size(
            ResourceInputs {
                cpu_request: Some(64),
                memory_request_gib: Some(256),
                ..Default::default()
            },
            &ResourceCeiling::default(),
        );
        assert_eq!(s.error, "");
    }

    #[test]
    fn test_huge_memory_request_fails_softly() {
        let s = size(
            ResourceInputs {
                cpu_request: Some(4),
                memory_request_gib: Some(i64::MAX),
                ..Default::default()
            },
            &ResourceCeiling::default(),
        );
        assert!(!s.error.is_empty());
        assert_eq!(s.memory_request, 0);
    }
}
