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

use crate::wizard::page::Page;
use crate::wizard::value::{DerivedKind, DerivedValue, FieldValue};
use rand::Rng;
use rand::distributions::Alphanumeric;
use std::collections::BTreeMap;

pub type Fields = BTreeMap<String, FieldValue>;

pub const ACCESS_KEY_LEN: usize = 16;
pub const SECRET_KEY_LEN: usize = 32;

pub fn random_key(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

fn text(value: &str) -> FieldValue {
    FieldValue::Text(value.to_string())
}

fn list(values: &[&str]) -> FieldValue {
    FieldValue::List(values.iter().map(|v| v.to_string()).collect())
}

fn derived(kind: DerivedKind) -> FieldValue {
    FieldValue::Derived(DerivedValue::empty(kind))
}

fn security_context(id: &str) -> FieldValue {
    FieldValue::Record(
        [
            ("runAsUser", text(id)),
            ("runAsGroup", text(id)),
            ("fsGroup", text(id)),
            ("runAsNonRoot", FieldValue::Flag(true)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect(),
    )
}

fn fields<const N: usize>(entries: [(&str, FieldValue); N]) -> Fields {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Initial field values of `page`. Key pairs are freshly generated.
pub fn defaults(page: Page) -> Fields {
    match page {
        Page::NameTenant => fields([
            ("tenantName", text("")),
            ("namespace", text("")),
            ("selectedStorageClass", text("")),
            ("selectedStorageType", text("")),
        ]),
        Page::TenantSize => fields([
            ("nodes", text("4")),
            ("drivesPerServer", text("4")),
            ("volumeSize", text("1024")),
            ("sizeFactor", text("Gi")),
            ("ecParity", text("")),
            ("ecParityChoices", list(&[])),
            ("untouchedECField", FieldValue::Flag(true)),
            ("resourcesSpecifyLimit", FieldValue::Flag(false)),
            ("resourcesCPURequest", text("")),
            ("resourcesCPULimit", text("")),
            ("resourcesMemoryRequest", text("")),
            ("resourcesMemoryLimit", text("")),
            ("distribution", derived(DerivedKind::Distribution)),
            ("ecParityCalc", derived(DerivedKind::ErasureCode)),
            ("maxAllocatableResources", derived(DerivedKind::Allocatable)),
            ("resourceCeiling", derived(DerivedKind::ResourceCeiling)),
            ("resourcesSize", derived(DerivedKind::ResourcesSize)),
        ]),
        Page::Configure => fields([
            ("customImage", FieldValue::Flag(false)),
            ("imageName", text("")),
            ("kesImage", text("")),
            ("customDockerhub", FieldValue::Flag(false)),
            ("imageRegistry", text("")),
            ("imageRegistryUsername", text("")),
            ("imageRegistryPassword", text("")),
            ("exposeMinIO", FieldValue::Flag(true)),
            ("exposeConsole", FieldValue::Flag(true)),
            ("tenantCustom", FieldValue::Flag(false)),
            ("tenantSecurityContext", security_context("1000")),
            ("logSearchEnabled", FieldValue::Flag(true)),
            ("logSearchCustom", FieldValue::Flag(false)),
            ("logSearchVolumeSize", text("5")),
            ("logSearchSizeFactor", text("Gi")),
            ("logSearchSelectedStorageClass", text("default")),
            ("logSearchImage", text("")),
            ("logSearchPostgresImage", text("")),
            ("logSearchPostgresInitImage", text("")),
            ("logSearchSecurityContext", security_context("1000")),
            ("logSearchPostgresSecurityContext", security_context("999")),
            ("prometheusEnabled", FieldValue::Flag(true)),
            ("prometheusCustom", FieldValue::Flag(false)),
            ("prometheusVolumeSize", text("5")),
            ("prometheusSizeFactor", text("Gi")),
            ("prometheusSelectedStorageClass", text("default")),
            ("prometheusImage", text("")),
            ("prometheusSidecarImage", text("")),
            ("prometheusInitImage", text("")),
            ("prometheusSecurityContext", security_context("1000")),
        ]),
        Page::Affinity => fields([
            ("podAffinity", text("default")),
            ("nodeSelectorLabels", text("")),
            ("withPodAntiAffinity", FieldValue::Flag(true)),
        ]),
        Page::IdentityProvider => fields([
            ("idpSelection", text("Built-in")),
            (
                "accessKeys",
                FieldValue::List(vec![random_key(ACCESS_KEY_LEN)]),
            ),
            (
                "secretKeys",
                FieldValue::List(vec![random_key(SECRET_KEY_LEN)]),
            ),
            ("openIDConfigurationURL", text("")),
            ("openIDClientID", text("")),
            ("openIDSecretID", text("")),
            ("openIDCallbackURL", text("")),
            ("openIDClaimName", text("")),
            ("openIDScopes", text("")),
            ("ADURL", text("")),
            ("ADSkipTLS", FieldValue::Flag(false)),
            ("ADServerInsecure", FieldValue::Flag(false)),
            ("ADServerStartTLS", FieldValue::Flag(false)),
            ("ADGroupSearchBaseDN", text("")),
            ("ADGroupSearchFilter", text("")),
            ("ADUserDNs", list(&[])),
            ("ADLookupBindDN", text("")),
            ("ADLookupBindPassword", text("")),
            ("ADUserDNSearchBaseDN", text("")),
            ("ADUserDNSearchFilter", text("")),
        ]),
        Page::Security => fields([
            ("enableTLS", FieldValue::Flag(true)),
            ("enableAutoCert", FieldValue::Flag(true)),
            ("enableCustomCerts", FieldValue::Flag(false)),
        ]),
        Page::Encryption => fields([
            ("enableEncryption", FieldValue::Flag(false)),
            ("encryptionType", text("vault")),
            ("replicas", text("1")),
            ("kesSecurityContext", security_context("1000")),
            ("enableCustomCertsForKES", FieldValue::Flag(false)),
            ("vaultEndpoint", text("")),
            ("vaultEngine", text("")),
            ("vaultNamespace", text("")),
            ("vaultPrefix", text("")),
            ("vaultAppRoleEngine", text("")),
            ("vaultId", text("")),
            ("vaultSecret", text("")),
            ("vaultRetry", text("0")),
            ("vaultPing", text("0")),
            ("awsEndpoint", text("")),
            ("awsRegion", text("")),
            ("awsKMSKey", text("")),
            ("awsAccessKey", text("")),
            ("awsSecretKey", text("")),
            ("awsToken", text("")),
            ("gemaltoEndpoint", text("")),
            ("gemaltoToken", text("")),
            ("gemaltoDomain", text("")),
            ("gemaltoRetry", text("0")),
            ("gcpProjectID", text("")),
            ("gcpEndpoint", text("")),
            ("gcpClientEmail", text("")),
            ("gcpClientID", text("")),
            ("gcpPrivateKeyID", text("")),
            ("gcpPrivateKey", text("")),
            ("azureEndpoint", text("")),
            ("azureTenantID", text("")),
            ("azureClientID", text("")),
            ("azureClientSecret", text("")),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_page_has_defaults() {
        for page in Page::ALL {
            assert!(!defaults(page).is_empty(), "{page} has no fields");
        }
    }

    #[test]
    fn test_generated_keys() {
        let idp = defaults(Page::IdentityProvider);
        let access = idp["accessKeys"].as_list().unwrap();
        let secret = idp["secretKeys"].as_list().unwrap();
        assert_eq!(access[0].len(), ACCESS_KEY_LEN);
        assert_eq!(secret[0].len(), SECRET_KEY_LEN);
        assert!(access[0].chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(defaults(Page::IdentityProvider)["accessKeys"], idp["accessKeys"]);
    }
}
