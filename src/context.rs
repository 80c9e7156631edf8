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

use crate::types;
use crate::types::cluster::{
    AllocatableResources, CreateTenantResponse, NamespaceInfo, Quotas, TenantList,
};
use crate::types::tenant::CreateTenantRequest;
use crate::wizard::pages::name_tenant::is_namespace_name;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu, ensure};
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("request to {} failed: {}", url, source))]
    Http { url: String, source: reqwest::Error },

    #[snafu(display("{} responded with {}: {}", url, status, message))]
    Status {
        url: String,
        status: u16,
        message: String,
    },

    #[snafu(display("'{}' is not a valid namespace name", namespace))]
    InvalidNamespace { namespace: String },

    #[snafu(display("failed to build http client: {}", source))]
    Client { source: reqwest::Error },

    #[snafu(transparent)]
    Types { source: types::error::Error },

    #[snafu(transparent)]
    Serde { source: serde_json::Error },
}

impl Error {
    /// Message shown to the user next to the field the lookup serves.
    pub fn user_message(&self) -> String {
        match self {
            Error::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Cluster queries and the submission endpoint the wizard depends on.
#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// Erasure code parity labels (`EC:n`) for a pool shape.
    async fn parity_choices(&self, nodes: u64, drives_per_server: u64)
    -> Result<Vec<String>, Error>;

    async fn allocatable_resources(&self, nodes: u64) -> Result<AllocatableResources, Error>;

    /// Existing tenants and storage quotas of `namespace`.
    async fn namespace_info(&self, namespace: &str) -> Result<NamespaceInfo, Error>;

    async fn create_tenant(
        &self,
        request: &CreateTenantRequest,
    ) -> Result<CreateTenantResponse, Error>;
}

/// Error body of the operator API.
#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "detailedMessage")]
    detailed_message: String,
}

/// [`ClusterApi`] over the operator REST API.
pub struct Context {
    pub(crate) client: reqwest::Client,
    pub(crate) endpoint: String,
}

impl Context {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context(ClientSnafu)?;
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Ok(Self { client, endpoint })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    async fn decode<T>(url: String, response: reqwest::Response) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let body = response.bytes().await.context(HttpSnafu { url: &url })?;
        if !status.is_success() {
            let message = match serde_json::from_slice::<ApiError>(&body) {
                Ok(err) if !err.detailed_message.is_empty() => err.detailed_message,
                Ok(err) if !err.message.is_empty() => err.message,
                _ => String::from_utf8_lossy(&body).into_owned(),
            };
            return StatusSnafu {
                url,
                status: status.as_u16(),
                message,
            }
            .fail();
        }
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn get<T>(&self, path: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context(HttpSnafu { url: &url })?;
        Self::decode(url, response).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .context(HttpSnafu { url: &url })?;
        Self::decode(url, response).await
    }
}

#[async_trait]
impl ClusterApi for Context {
    async fn parity_choices(
        &self,
        nodes: u64,
        drives_per_server: u64,
    ) -> Result<Vec<String>, Error> {
        self.get(&format!("/api/v1/get-parity/{}/{}", nodes, drives_per_server))
            .await
    }

    async fn allocatable_resources(&self, nodes: u64) -> Result<AllocatableResources, Error> {
        self.get(&format!(
            "/api/v1/cluster/allocatable-resources?num_nodes={}",
            nodes
        ))
        .await
    }

    async fn namespace_info(&self, namespace: &str) -> Result<NamespaceInfo, Error> {
        ensure!(
            is_namespace_name(namespace),
            InvalidNamespaceSnafu { namespace }
        );
        let tenants: TenantList = self
            .get(&format!("/api/v1/namespaces/{}/tenants", namespace))
            .await?;
        let quotas: Quotas = self
            .get(&format!(
                "/api/v1/namespaces/{0}/resourcequotas/{0}-storagequota",
                namespace
            ))
            .await?;
        Ok(NamespaceInfo::from_lookup(&tenants, &quotas))
    }

    async fn create_tenant(
        &self,
        request: &CreateTenantRequest,
    ) -> Result<CreateTenantResponse, Error> {
        self.post("/api/v1/tenants", request).await
    }
}
