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

use super::{NamespaceStatus, ValidationContext};
use crate::wizard::calc::presets::Integration;
use crate::wizard::page::Page;
use crate::wizard::store::FieldStore;
use crate::wizard::validation::{PageCheck, Rule, validate as run_rules};
use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static TENANT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]{3,63}$").expect("tenant name pattern"));

#[allow(clippy::expect_used)]
static NAMESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]{0,61}[a-z0-9])?$").expect("namespace pattern")
});

const NAMESPACE_MESSAGE: &str = "Namespace only can contain lowercase letters, numbers and '-', \
    and must start and end with a letter or number";

/// A namespace name is a DNS-1123 label.
pub fn is_namespace_name(namespace: &str) -> bool {
    NAMESPACE.is_match(namespace)
}

const TENANT_NAME_MESSAGE: &str =
    "Name only can contain lowercase letters, numbers and '-'. Min. Length: 3";

pub fn validate(store: &FieldStore, ctx: &ValidationContext<'_>) -> PageCheck {
    let fields = store.page(Page::NameTenant);

    let namespace_error = match ctx.namespace {
        NamespaceStatus::Checked(info) if info.has_tenants => {
            Some("You can only create one tenant per namespace".to_string())
        }
        NamespaceStatus::Checked(info) if info.storage_classes.is_empty() => {
            Some("Please enter a valid namespace".to_string())
        }
        NamespaceStatus::Failed { message } => Some(message.clone()),
        _ => None,
    };

    let mut namespace_rule = Rule::new("namespace", fields.text("namespace"))
        .required()
        .matches(&NAMESPACE, NAMESPACE_MESSAGE);
    if let Some(message) = namespace_error {
        namespace_rule = namespace_rule.check(true, message);
    }

    let errors = run_rules([
        Rule::new("tenantName", fields.text("tenantName"))
            .required()
            .matches(&TENANT_NAME, TENANT_NAME_MESSAGE),
        namespace_rule,
    ]);

    let storage_chosen = match ctx.integration {
        Integration::Default => ctx
            .namespace
            .info()
            .is_some_and(|info| !info.storage_classes.is_empty())
            && !fields.text("selectedStorageClass").is_empty(),
        _ => !fields.text("selectedStorageType").is_empty(),
    };
    let checked = matches!(ctx.namespace, NamespaceStatus::Checked(_));

    PageCheck::new(errors, checked && storage_chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{ContextFixture, namespace_info};

    fn named(name: &str, namespace: &str) -> FieldStore {
        let mut store = FieldStore::new();
        store.set(Page::NameTenant, "tenantName", name.into()).unwrap();
        store.set(Page::NameTenant, "namespace", namespace.into()).unwrap();
        store
    }

    #[test]
    fn test_required_fields() {
        let fixture = ContextFixture::default();
        let check = validate(&FieldStore::new(), &fixture.ctx());
        assert!(!check.valid);
        assert_eq!(check.errors["tenantName"], "Field cannot be empty");
        assert_eq!(check.errors["namespace"], "Field cannot be empty");
    }

    #[test]
    fn test_name_pattern() {
        let fixture = ContextFixture::default();
        let check = validate(&named("My_Tenant", "ns"), &fixture.ctx());
        assert_eq!(check.errors["tenantName"], TENANT_NAME_MESSAGE);
    }

    #[test]
    fn test_namespace_pattern() {
        let fixture = ContextFixture::default();
        for namespace in ["a/../x", "Tenants", "-ns", "ns-", "ns.a"] {
            let check = validate(&named("tenant-a", namespace), &fixture.ctx());
            assert_eq!(check.errors["namespace"], NAMESPACE_MESSAGE, "{}", namespace);
        }
        assert!(is_namespace_name("tenants-1"));
        assert!(is_namespace_name("a"));
        assert!(!is_namespace_name(&"a".repeat(64)));
    }

    #[test]
    fn test_valid_after_namespace_lookup() {
        let mut fixture = ContextFixture::default();
        fixture.namespace = NamespaceStatus::Checked(namespace_info(&["standard"]));
        let mut store = named("tenant-a", "ns");
        store
            .set(Page::NameTenant, "selectedStorageClass", "standard".into())
            .unwrap();

        let check = validate(&store, &fixture.ctx());
        assert!(check.errors.is_empty());
        assert!(check.valid);
    }

    #[test]
    fn test_pending_lookup_keeps_page_invalid() {
        let mut fixture = ContextFixture::default();
        fixture.namespace = NamespaceStatus::Checking;
        let check = validate(&named("tenant-a", "ns"), &fixture.ctx());
        assert!(check.errors.is_empty());
        assert!(!check.valid);
    }

    #[test]
    fn test_namespace_lookup_errors() {
        let mut fixture = ContextFixture::default();
        let mut info = namespace_info(&["standard"]);
        info.has_tenants = true;
        fixture.namespace = NamespaceStatus::Checked(info);
        let check = validate(&named("tenant-a", "ns"), &fixture.ctx());
        assert_eq!(
            check.errors["namespace"],
            "You can only create one tenant per namespace"
        );

        fixture.namespace = NamespaceStatus::Checked(namespace_info(&[]));
        let check = validate(&named("tenant-a", "ns"), &fixture.ctx());
        assert_eq!(check.errors["namespace"], "Please enter a valid namespace");
    }

    #[test]
    fn test_preset_integration_needs_storage_type() {
        let mut fixture = ContextFixture::default();
        fixture.integration = Integration::Aws;
        fixture.namespace = NamespaceStatus::Checked(namespace_info(&["gp3"]));
        let mut store = named("tenant-a", "ns");
        assert!(!validate(&store, &fixture.ctx()).valid);

        store
            .set(Page::NameTenant, "selectedStorageType", "performance".into())
            .unwrap();
        assert!(validate(&store, &fixture.ctx()).valid);
    }
}
