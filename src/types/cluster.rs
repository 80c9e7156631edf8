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

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum per-node allocation for one prioritisation strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMaxAllocatable {
    #[serde(default)]
    pub max_allocatable_cpu: u64,
    /// Bytes.
    #[serde(default)]
    pub max_allocatable_mem: u64,
}

/// Allocatable resources the cluster reports for a number of nodes.
///
/// A missing `min_allocatable_*` means the cluster could not report that
/// capability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatableResources {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_allocatable_mem: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_allocatable_cpu: Option<u64>,
    #[serde(default)]
    pub cpu_priority: NodeMaxAllocatable,
    #[serde(default)]
    pub mem_priority: NodeMaxAllocatable,
}

/// What the wizard needs to know about a target namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceInfo {
    /// The namespace already holds a tenant.
    pub has_tenants: bool,
    /// Storage classes allowed by the namespace storage quota.
    pub storage_classes: Vec<String>,
    /// Quota limit in bytes per storage class.
    pub limit_sizes: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TenantList {
    #[serde(default)]
    pub tenants: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuotaElement {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub hard: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Quotas {
    #[serde(default)]
    pub elements: Vec<QuotaElement>,
}

const STORAGE_CLASS_SUFFIX: &str = ".storageclass.storage.k8s.io/requests.storage";

impl Quotas {
    /// Storage class names and their hard limits, in quota order.
    pub fn storage_limits(&self) -> Vec<(String, u64)> {
        self.elements
            .iter()
            .filter_map(|element| {
                let class = element.name.split(STORAGE_CLASS_SUFFIX).next()?;
                (!class.is_empty()).then(|| (class.to_string(), element.hard))
            })
            .collect()
    }
}

impl NamespaceInfo {
    pub fn from_lookup(tenants: &TenantList, quotas: &Quotas) -> Self {
        let has_tenants = tenants.tenants.as_ref().is_some_and(|t| !t.is_empty());
        let limits = quotas.storage_limits();
        Self {
            has_tenants,
            storage_classes: limits.iter().map(|(class, _)| class.clone()).collect(),
            limit_sizes: limits.into_iter().collect(),
        }
    }
}

/// Credentials handed back for the tenant console.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleCredential {
    #[serde(default)]
    pub access_key: String,
    #[serde(default)]
    pub secret_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConsoleCredentials {
    One(ConsoleCredential),
    Many(Vec<ConsoleCredential>),
}

impl ConsoleCredentials {
    pub fn into_vec(self) -> Vec<ConsoleCredential> {
        match self {
            ConsoleCredentials::One(c) => vec![c],
            ConsoleCredentials::Many(v) => v,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTenantResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console: Option<ConsoleCredentials>,
    #[serde(default, rename = "externalIDP")]
    pub external_idp: bool,
}
