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

//! Request accepted by `POST /api/v1/tenants`.

use k8s_openapi::api::core::v1 as corev1;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod encryption;
pub mod idp;
pub mod pool;
pub mod tls;

pub use encryption::EncryptionConfiguration;
pub use idp::IdpConfiguration;
pub use pool::Pool;
pub use tls::{KeyPair, TlsConfiguration};

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
pub struct CreateTenantRequest {
    pub name: String,
    pub namespace: String,

    /// Custom MinIO image, empty for the operator default.
    #[serde(default)]
    pub image: String,

    pub enable_tls: bool,
    pub enable_console: bool,
    pub enable_prometheus: bool,
    pub expose_minio: bool,
    pub expose_console: bool,

    pub pools: Vec<Pool>,

    #[serde(rename = "erasureCodingParity")]
    pub erasure_coding_parity: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_registry: Option<ImageRegistry>,

    #[serde(
        rename = "logSearchConfiguration",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub log_search_configuration: Option<LogSearchConfiguration>,

    #[serde(rename = "prometheusConfiguration")]
    pub prometheus_configuration: PrometheusConfiguration,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsConfiguration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption: Option<EncryptionConfiguration>,

    pub idp: IdpConfiguration,
}

/// Credentials of a private image registry.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Eq)]
pub struct ImageRegistry {
    pub registry: String,
    pub username: String,
    pub password: String,
}

/// Log search API and its Postgres database. Storage settings are only sent
/// when customized.
#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema, PartialEq)]
pub struct LogSearchConfiguration {
    #[serde(rename = "storageClass", default, skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,

    /// Size in Gi.
    #[serde(rename = "storageSize", default, skip_serializing_if = "Option::is_none")]
    pub storage_size: Option<i64>,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub postgres_image: String,

    #[serde(default)]
    pub postgres_init_image: String,

    #[serde(rename = "securityContext", default, skip_serializing_if = "Option::is_none")]
    pub security_context: Option<corev1::PodSecurityContext>,

    #[serde(
        rename = "postgres_securityContext",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub postgres_security_context: Option<corev1::PodSecurityContext>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema, PartialEq)]
pub struct PrometheusConfiguration {
    #[serde(rename = "storageClass", default, skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,

    /// Size in Gi.
    #[serde(rename = "storageSize", default, skip_serializing_if = "Option::is_none")]
    pub storage_size: Option<i64>,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub sidecar_image: String,

    #[serde(default)]
    pub init_image: String,

    #[serde(rename = "securityContext", default, skip_serializing_if = "Option::is_none")]
    pub security_context: Option<corev1::PodSecurityContext>,
}
