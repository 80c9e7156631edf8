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
use uuid::Uuid;

use crate::wizard::calc::presets::Integration;
use crate::wizard::lookup::LookupKind;
use crate::wizard::pages::NamespaceStatus;
use crate::wizard::validation::ValidationResult;
use crate::wizard::{DerivedValue, FieldValue, Page, Phase, WizardController};

#[derive(Debug, Default, Deserialize)]
pub struct CreateWizardRequest {
    #[serde(default)]
    pub integration: Option<Integration>,
}

/// Overview of one wizard session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSummary {
    pub id: Uuid,
    pub page: Page,
    pub page_index: usize,
    pub phase: Phase,
    pub integration: Integration,
    pub advanced_mode: bool,
    pub valid_pages: Vec<Page>,
    pub pending_lookups: Vec<LookupKind>,
    pub namespace: NamespaceStatus,
    pub can_submit: bool,
}

impl WizardSummary {
    pub fn new(id: Uuid, wizard: &WizardController) -> Self {
        Self {
            id,
            page: wizard.current_page(),
            page_index: wizard.current_page().index(),
            phase: wizard.phase(),
            integration: wizard.integration(),
            advanced_mode: wizard.advanced_mode(),
            valid_pages: wizard.page_validity().iter().copied().collect(),
            pending_lookups: [
                LookupKind::Namespace,
                LookupKind::ParityChoices,
                LookupKind::Allocatable,
            ]
            .into_iter()
            .filter(|kind| wizard.is_pending(*kind))
            .collect(),
            namespace: wizard.namespace_status().clone(),
            can_submit: wizard.can_submit(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPageRequest {
    pub page: usize,
    #[serde(default)]
    pub advanced_mode: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct SetFieldRequest {
    pub value: FieldValue,
}

#[derive(Debug, Serialize)]
pub struct FieldResponse {
    pub page: Page,
    pub field: String,
    pub value: FieldValue,
}

#[derive(Debug, Serialize)]
pub struct DerivedResponse {
    pub page: Page,
    pub key: String,
    pub value: DerivedValue,
}

#[derive(Debug, Serialize)]
pub struct ErrorsResponse {
    pub page: Page,
    pub valid: bool,
    pub errors: ValidationResult,
}
