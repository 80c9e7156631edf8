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

//! One validator per wizard page.

use crate::types::cluster::NamespaceInfo;
use crate::wizard::calc::presets::Integration;
use crate::wizard::certificates::Certificates;
use crate::wizard::lookup::{LookupKind, Sequencer};
use crate::wizard::page::Page;
use crate::wizard::store::FieldStore;
use crate::wizard::validation::PageCheck;
use serde::Serialize;
use std::collections::BTreeMap;

pub mod affinity;
pub mod configure;
pub mod encryption;
pub mod identity_provider;
pub mod name_tenant;
pub mod security;
pub mod tenant_size;

/// Result of the namespace lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum NamespaceStatus {
    #[default]
    Unchecked,
    Checking,
    Checked(NamespaceInfo),
    Failed { message: String },
}

impl NamespaceStatus {
    pub fn info(&self) -> Option<&NamespaceInfo> {
        match self {
            NamespaceStatus::Checked(info) => Some(info),
            _ => None,
        }
    }
}

/// State outside the field store that validators read.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    pub namespace: &'a NamespaceStatus,
    pub integration: Integration,
    pub certificates: &'a Certificates,
    pub lookups: &'a Sequencer,
    pub lookup_errors: &'a BTreeMap<LookupKind, String>,
}

impl ValidationContext<'_> {
    pub fn is_pending(&self, kind: LookupKind) -> bool {
        self.lookups.is_pending(kind)
    }

    pub fn lookup_error(&self, kind: LookupKind) -> Option<&str> {
        self.lookup_errors.get(&kind).map(String::as_str)
    }
}

pub fn validate(page: Page, store: &FieldStore, ctx: &ValidationContext<'_>) -> PageCheck {
    match page {
        Page::NameTenant => name_tenant::validate(store, ctx),
        Page::TenantSize => tenant_size::validate(store, ctx),
        Page::Configure => configure::validate(store),
        Page::Affinity => affinity::validate(store),
        Page::IdentityProvider => identity_provider::validate(store),
        Page::Security => security::validate(store, ctx),
        Page::Encryption => encryption::validate(store, ctx),
    }
}
