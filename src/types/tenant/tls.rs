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

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Base64 encoded PEM certificate and private key.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Eq)]
pub struct KeyPair {
    pub crt: String,
    pub key: String,
}

/// User provided certificates. Empty parts are omitted.
#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema, PartialEq, Eq)]
pub struct TlsConfiguration {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub minio: Vec<KeyPair>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console: Option<KeyPair>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ca_certificates: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub console_ca_certificates: Vec<String>,
}

impl TlsConfiguration {
    pub fn is_empty(&self) -> bool {
        self.minio.is_empty()
            && self.console.is_none()
            && self.ca_certificates.is_empty()
            && self.console_ca_certificates.is_empty()
    }
}
