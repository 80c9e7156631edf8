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

use crate::console::server;
use crate::console::state::AppState;
use crate::context::Context;
use crate::types::tenant::CreateTenantRequest;
use crate::wizard::calc::presets::Integration;
use std::pin::Pin;
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod console;
pub mod context;
pub mod stream;
pub mod types;
pub mod utils;
pub mod wizard;


/// Serves the wizard console, sending lookups and submissions to the
/// operator API at `endpoint`.
pub async fn run(
    port: u16,
    endpoint: String,
    integration: Integration,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    info!(%endpoint, %integration, "using operator api");
    let context = Context::new(endpoint)?;
    let state = AppState::new(Arc::new(context), integration);
    server::run(port, state).await
}

/// Writes the JSON schema of the tenant creation request as YAML.
pub async fn schema(file: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer: Pin<Box<dyn AsyncWrite + Send>> = if let Some(file) = file {
        Box::pin(
            tokio::fs::OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .open(file)
                .await?,
        )
    } else {
        Box::pin(tokio::io::stdout())
    };

    let schema = schemars::schema_for!(CreateTenantRequest);
    writer
        .write_all(serde_yaml_ng::to_string(&schema)?.as_bytes())
        .await?;
    writer.flush().await?;

    Ok(())
}
