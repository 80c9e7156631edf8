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

//! KES encryption settings and the key management backends it can use.

use super::tls::KeyPair;
use k8s_openapi::api::core::v1 as corev1;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq)]
pub struct EncryptionConfiguration {
    pub replicas: String,

    #[serde(rename = "securityContext", default, skip_serializing_if = "Option::is_none")]
    pub security_context: Option<corev1::PodSecurityContext>,

    #[serde(default)]
    pub image: String,

    /// KES server certificate, generated by the operator when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<KeyPair>,

    /// mTLS client certificate MinIO presents to KES.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<KeyPair>,

    #[serde(flatten)]
    pub backend: KmsBackend,
}

/// Serialized as a single key named after the backend.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KmsBackend {
    Vault(VaultConfiguration),
    Aws(AwsConfiguration),
    Gemalto(GemaltoConfiguration),
    Gcp(GcpConfiguration),
    Azure(AzureConfiguration),
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Eq)]
pub struct VaultConfiguration {
    pub endpoint: String,
    #[serde(default)]
    pub engine: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub prefix: String,
    pub approle: VaultAppRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<VaultTls>,
    pub status: VaultStatus,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Eq)]
pub struct VaultAppRole {
    #[serde(default)]
    pub engine: String,
    pub id: String,
    pub secret: String,
    /// Seconds between login retries.
    pub retry: i64,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema, PartialEq, Eq)]
pub struct VaultTls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Eq)]
pub struct VaultStatus {
    /// Seconds between health pings.
    pub ping: i64,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Eq)]
pub struct AwsConfiguration {
    pub secretsmanager: AwsSecretsManager,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Eq)]
pub struct AwsSecretsManager {
    pub endpoint: String,
    pub region: String,
    #[serde(default)]
    pub kmskey: String,
    pub credentials: AwsCredentials,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Eq)]
pub struct AwsCredentials {
    pub accesskey: String,
    pub secretkey: String,
    #[serde(default)]
    pub token: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Eq)]
pub struct GemaltoConfiguration {
    pub keysecure: GemaltoKeySecure,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Eq)]
pub struct GemaltoKeySecure {
    pub endpoint: String,
    pub credentials: GemaltoCredentials,
    #[serde(default)]
    pub tls: GemaltoTls,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Eq)]
pub struct GemaltoCredentials {
    pub token: String,
    pub domain: String,
    pub retry: i64,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema, PartialEq, Eq)]
pub struct GemaltoTls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Eq)]
pub struct GcpConfiguration {
    pub secretmanager: GcpSecretManager,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Eq)]
pub struct GcpSecretManager {
    pub project_id: String,
    #[serde(default)]
    pub endpoint: String,
    pub credentials: GcpCredentials,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema, PartialEq, Eq)]
pub struct GcpCredentials {
    #[serde(default)]
    pub client_email: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub private_key_id: String,
    #[serde(default)]
    pub private_key: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Eq)]
pub struct AzureConfiguration {
    pub keyvault: AzureKeyVault,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Eq)]
pub struct AzureKeyVault {
    pub endpoint: String,
    pub credentials: AzureCredentials,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Eq)]
pub struct AzureCredentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}
