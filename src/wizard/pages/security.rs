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

use super::ValidationContext;
use crate::wizard::certificates::CertificateList;
use crate::wizard::page::Page;
use crate::wizard::store::FieldStore;
use crate::wizard::validation::{PageCheck, ValidationResult};

pub fn validate(store: &FieldStore, ctx: &ValidationContext<'_>) -> PageCheck {
    let fields = store.page(Page::Security);
    let mut errors = ValidationResult::new();

    if !fields.flag("enableTLS") {
        return PageCheck::new(errors, true);
    }

    let certs = ctx.certificates;
    if fields.flag("enableCustomCerts") {
        for (list, prefix) in [
            (CertificateList::Minio, "minioCertificates"),
            (CertificateList::Ca, "caCertificates"),
            (CertificateList::ConsoleCa, "consoleCaCertificates"),
        ] {
            for entry in certs.list(list).iter().filter(|e| !e.error.is_empty()) {
                errors.insert(format!("{prefix}.{}", entry.id), entry.error.clone());
            }
        }
        if !certs.console_certificate.error.is_empty() {
            errors.insert(
                "consoleCertificate".to_string(),
                certs.console_certificate.error.clone(),
            );
        }
    }

    if fields.flag("enableAutoCert") {
        return PageCheck::new(errors, true);
    }

    let custom = fields.flag("enableCustomCerts");
    if custom && !certs.has_valid_tenant_pair() {
        errors
            .entry("minioCertificates".to_string())
            .or_insert_with(|| "At least one matching key pair is required".to_string());
    }

    PageCheck::new(errors, custom)
}
