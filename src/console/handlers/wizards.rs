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

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;
use uuid::Uuid;

use crate::console::{error::Result, models::wizard::*, state::AppState};
use crate::types::cluster::CreateTenantResponse;
use crate::wizard::{Page, Session};

async fn summary(state: &AppState, id: Uuid) -> Result<Json<WizardSummary>> {
    let session = state.session(id).await?;
    let wizard = session.lock().await;
    Ok(Json(WizardSummary::new(id, &wizard)))
}

/// Start a wizard
pub async fn create_wizard(
    State(state): State<AppState>,
    Json(request): Json<CreateWizardRequest>,
) -> Result<(StatusCode, Json<WizardSummary>)> {
    let integration = request.integration.unwrap_or(state.integration);
    let session = Session::start(state.api.clone(), integration).await?;
    let id = state.insert(session).await;
    info!(%id, %integration, "wizard started");

    let Json(body) = summary(&state, id).await?;
    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn get_wizard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardSummary>> {
    summary(&state, id).await
}

pub async fn delete_wizard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.remove(id).await?;
    info!(%id, "wizard discarded");
    Ok(StatusCode::NO_CONTENT)
}

/// Move to another page, optionally toggling advanced mode
pub async fn set_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetPageRequest>,
) -> Result<Json<WizardSummary>> {
    let session = state.session(id).await?;
    let mut wizard = session.lock().await;
    wizard.set_page(request.page)?;
    if let Some(advanced) = request.advanced_mode {
        wizard.set_advanced_mode(advanced);
    }
    Ok(Json(WizardSummary::new(id, &wizard)))
}

pub async fn get_field(
    State(state): State<AppState>,
    Path((id, page, field)): Path<(Uuid, String, String)>,
) -> Result<Json<FieldResponse>> {
    let page = Page::parse(&page)?;
    let session = state.session(id).await?;
    let wizard = session.lock().await;
    let value = wizard.field_value(page, &field)?.clone();
    Ok(Json(FieldResponse { page, field, value }))
}

/// Edit a field; answers once the lookups the edit started have settled
pub async fn set_field(
    State(state): State<AppState>,
    Path((id, page, field)): Path<(Uuid, String, String)>,
    Json(request): Json<SetFieldRequest>,
) -> Result<Json<FieldResponse>> {
    let page = Page::parse(&page)?;
    let session = state.session(id).await?;
    session.update_field(page, &field, request.value).await?;

    let wizard = session.lock().await;
    let value = wizard.field_value(page, &field)?.clone();
    Ok(Json(FieldResponse { page, field, value }))
}

pub async fn get_errors(
    State(state): State<AppState>,
    Path((id, page)): Path<(Uuid, String)>,
) -> Result<Json<ErrorsResponse>> {
    let page = Page::parse(&page)?;
    let session = state.session(id).await?;
    let wizard = session.lock().await;
    Ok(Json(ErrorsResponse {
        page,
        valid: wizard.page_validity().contains(&page),
        errors: wizard.validation_errors(page),
    }))
}

pub async fn get_derived(
    State(state): State<AppState>,
    Path((id, page, key)): Path<(Uuid, String, String)>,
) -> Result<Json<DerivedResponse>> {
    let page = Page::parse(&page)?;
    let session = state.session(id).await?;
    let wizard = session.lock().await;
    let value = wizard.derived_value(page, &key)?.clone();
    Ok(Json(DerivedResponse { page, key, value }))
}

pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CreateTenantResponse>> {
    let session = state.session(id).await?;
    Ok(Json(session.submit().await?))
}

pub async fn reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardSummary>> {
    let session = state.session(id).await?;
    session.reset().await?;
    summary(&state, id).await
}
