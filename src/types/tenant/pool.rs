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

use k8s_openapi::api::core::v1 as corev1;
use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const TENANT_LABEL: &str = "v1.min.io/tenant";
pub const POOL_LABEL: &str = "v1.min.io/pool";
const HOSTNAME_TOPOLOGY: &str = "kubernetes.io/hostname";

/// Name of the pool at `index` in a new tenant.
pub fn pool_name(index: usize) -> String {
    format!("pool-{}", index)
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
pub struct Pool {
    pub name: String,
    pub servers: u64,
    pub volumes_per_server: u64,
    pub volume_configuration: VolumeConfiguration,
    pub resources: corev1::ResourceRequirements,

    #[serde(rename = "securityContext", default, skip_serializing_if = "Option::is_none")]
    pub security_context: Option<corev1::PodSecurityContext>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affinity: Option<corev1::Affinity>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Eq)]
pub struct VolumeConfiguration {
    /// Bytes per volume.
    pub size: u64,
    pub storage_class_name: String,
}

fn in_values(key: &str, value: &str) -> metav1::LabelSelectorRequirement {
    metav1::LabelSelectorRequirement {
        key: key.to_string(),
        operator: "In".to_string(),
        values: Some(vec![value.to_string()]),
    }
}

fn pod_anti_affinity(tenant: &str, pool: &str) -> corev1::PodAntiAffinity {
    corev1::PodAntiAffinity {
        required_during_scheduling_ignored_during_execution: Some(vec![corev1::PodAffinityTerm {
            label_selector: Some(metav1::LabelSelector {
                match_expressions: Some(vec![
                    in_values(TENANT_LABEL, tenant),
                    in_values(POOL_LABEL, pool),
                ]),
                ..Default::default()
            }),
            topology_key: HOSTNAME_TOPOLOGY.to_string(),
            ..Default::default()
        }]),
        ..Default::default()
    }
}

/// Spreads the pool servers over distinct nodes.
pub fn default_affinity(tenant: &str, pool: &str) -> corev1::Affinity {
    corev1::Affinity {
        pod_anti_affinity: Some(pod_anti_affinity(tenant, pool)),
        ..Default::default()
    }
}

/// Schedules the pool on nodes carrying every label of `labels`, optionally
/// one server per node.
pub fn node_selector_affinity(
    labels: &[(String, String)],
    with_pod_anti_affinity: bool,
    tenant: &str,
    pool: &str,
) -> corev1::Affinity {
    let match_expressions = labels
        .iter()
        .map(|(key, value)| corev1::NodeSelectorRequirement {
            key: key.clone(),
            operator: "In".to_string(),
            values: Some(vec![value.clone()]),
        })
        .collect();

    corev1::Affinity {
        node_affinity: Some(corev1::NodeAffinity {
            required_during_scheduling_ignored_during_execution: Some(corev1::NodeSelector {
                node_selector_terms: vec![corev1::NodeSelectorTerm {
                    match_expressions: Some(match_expressions),
                    ..Default::default()
                }],
            }),
            ..Default::default()
        }),
        pod_anti_affinity: with_pod_anti_affinity.then(|| pod_anti_affinity(tenant, pool)),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_affinity_selects_tenant_pool() {
        let affinity = default_affinity("tenant-a", "pool-0");
        let terms = affinity
            .pod_anti_affinity
            .unwrap()
            .required_during_scheduling_ignored_during_execution
            .unwrap();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].topology_key, HOSTNAME_TOPOLOGY);

        let expressions = terms[0]
            .label_selector
            .as_ref()
            .unwrap()
            .match_expressions
            .as_ref()
            .unwrap();
        assert_eq!(expressions[0].key, TENANT_LABEL);
        assert_eq!(expressions[0].values, Some(vec!["tenant-a".to_string()]));
        assert_eq!(expressions[1].values, Some(vec!["pool-0".to_string()]));
        assert!(affinity.node_affinity.is_none());
    }

    #[test]
    fn test_node_selector_affinity() {
        let labels = vec![
            ("disk".to_string(), "ssd".to_string()),
            ("zone".to_string(), "a".to_string()),
        ];
        let affinity = node_selector_affinity(&labels, false, "tenant-a", "pool-0");
        assert!(affinity.pod_anti_affinity.is_none());

        let terms = affinity
            .node_affinity
            .unwrap()
            .required_during_scheduling_ignored_during_execution
            .unwrap()
            .node_selector_terms;
        let expressions = terms[0].match_expressions.as_ref().unwrap();
        assert_eq!(expressions.len(), 2);
        assert_eq!(expressions[1].key, "zone");
        assert_eq!(expressions[1].operator, "In");

        let spread = node_selector_affinity(&labels, true, "tenant-a", "pool-0");
        assert!(spread.pod_anti_affinity.is_some());
    }

    #[test]
    fn test_pool_name() {
        assert_eq!(pool_name(0), "pool-0");
    }
}
