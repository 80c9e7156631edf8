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
use super::configure::security_context_rules;
use crate::wizard::page::Page;
use crate::wizard::store::FieldStore;
use crate::wizard::validation::{PageCheck, Rule, is_below, validate as run_rules};
use std::str::FromStr;
use strum::{Display, EnumString};

/// Key management backends KES can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum KmsKind {
    Vault,
    Aws,
    Gemalto,
    Gcp,
    Azure,
}

impl KmsKind {
    /// Fields that must be filled for the backend.
    fn required(self) -> &'static [&'static str] {
        match self {
            KmsKind::Vault => &["vaultEndpoint", "vaultId", "vaultSecret"],
            KmsKind::Aws => &["awsEndpoint", "awsRegion", "awsAccessKey", "awsSecretKey"],
            KmsKind::Gemalto => &["gemaltoEndpoint", "gemaltoToken", "gemaltoDomain"],
            KmsKind::Gcp => &["gcpProjectID"],
            KmsKind::Azure => &[
                "azureEndpoint",
                "azureTenantID",
                "azureClientID",
                "azureClientSecret",
            ],
        }
    }

    /// Optional counters that cannot go negative.
    fn counters(self) -> &'static [&'static str] {
        match self {
            KmsKind::Vault => &["vaultPing", "vaultRetry"],
            KmsKind::Gemalto => &["gemaltoRetry"],
            _ => &[],
        }
    }
}

pub fn validate(store: &FieldStore, ctx: &ValidationContext<'_>) -> PageCheck {
    let fields = store.page(Page::Encryption);
    if !fields.flag("enableEncryption") {
        return PageCheck::new(Default::default(), true);
    }

    let replicas = fields.text("replicas");
    let mut rules = vec![
        Rule::new("replicas", replicas)
            .required()
            .check(is_below(replicas, 1), "Replicas needs to be 1 or greater"),
    ];
    rules.extend(security_context_rules(fields, "kesSecurityContext"));

    let security = store.page(Page::Security);
    if security.flag("enableCustomCerts") {
        let auto_cert = security.flag("enableAutoCert");
        let server = &ctx.certificates.server_certificate;
        let client = &ctx.certificates.client_certificate;
        for (key, value, error) in [
            ("serverKey", &server.encoded_key, ""),
            ("serverCert", &server.encoded_cert, server.error.as_str()),
            ("clientKey", &client.encoded_key, ""),
            ("clientCert", &client.encoded_cert, client.error.as_str()),
        ] {
            rules.push(
                Rule::new(key, value)
                    .required_if(!auto_cert)
                    .check(!error.is_empty(), error),
            );
        }
    }

    let backend = fields.text("encryptionType");
    match KmsKind::from_str(backend) {
        Ok(kind) => {
            for key in kind.required() {
                rules.push(Rule::new(*key, fields.text(key)).required());
            }
            for key in kind.counters() {
                let value = fields.text(key);
                rules.push(
                    Rule::new(*key, value)
                        .check(is_below(value, 0), "Value needs to be 0 or greater"),
                );
            }
        }
        Err(_) => rules.push(
            Rule::new("encryptionType", backend)
                .required()
                .check(true, format!("Unsupported encryption backend '{backend}'")),
        ),
    }

    PageCheck::new(run_rules(rules), true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::ContextFixture;

    fn enabled(kind: &str) -> FieldStore {
        let mut store = FieldStore::new();
        store.set(Page::Encryption, "enableEncryption", true.into()).unwrap();
        store.set(Page::Encryption, "encryptionType", kind.into()).unwrap();
        store
    }

    #[test]
    fn test_disabled_is_valid() {
        let fixture = ContextFixture::default();
        assert!(validate(&FieldStore::new(), &fixture.ctx()).valid);
    }

    #[test]
    fn test_backend_required_fields() {
        let fixture = ContextFixture::default();
        for (kind, count) in [("vault", 3), ("aws", 4), ("gemalto", 3), ("gcp", 1), ("azure", 4)] {
            let check = validate(&enabled(kind), &fixture.ctx());
            assert_eq!(check.errors.len(), count, "{kind}: {:?}", check.errors);
            assert!(!check.valid);
        }
    }

    #[test]
    fn test_vault_counters() {
        let fixture = ContextFixture::default();
        let mut store = enabled("vault");
        for key in ["vaultEndpoint", "vaultId", "vaultSecret"] {
            store.set(Page::Encryption, key, "x".into()).unwrap();
        }
        assert!(validate(&store, &fixture.ctx()).valid);

        store.set(Page::Encryption, "vaultPing", "-5".into()).unwrap();
        store.set(Page::Encryption, "vaultRetry", "soon".into()).unwrap();
        let check = validate(&store, &fixture.ctx());
        assert_eq!(check.errors["vaultPing"], "Value needs to be 0 or greater");
        assert_eq!(check.errors["vaultRetry"], "Value needs to be 0 or greater");
    }

    #[test]
    fn test_replicas() {
        let fixture = ContextFixture::default();
        let mut store = enabled("gcp");
        store.set(Page::Encryption, "gcpProjectID", "p".into()).unwrap();
        store.set(Page::Encryption, "replicas", "0".into()).unwrap();
        let check = validate(&store, &fixture.ctx());
        assert_eq!(check.errors["replicas"], "Replicas needs to be 1 or greater");
    }

    #[test]
    fn test_kes_certificates_with_custom_certs() {
        let fixture = ContextFixture::default();
        let mut store = enabled("gcp");
        store.set(Page::Encryption, "gcpProjectID", "p".into()).unwrap();
        store.set(Page::Security, "enableCustomCerts", true.into()).unwrap();
        assert!(validate(&store, &fixture.ctx()).valid);

        store.set(Page::Security, "enableAutoCert", false.into()).unwrap();
        let check = validate(&store, &fixture.ctx());
        assert_eq!(check.errors.len(), 4);
    }

    #[test]
    fn test_unknown_backend() {
        let fixture = ContextFixture::default();
        let check = validate(&enabled("hsm"), &fixture.ctx());
        assert_eq!(check.errors["encryptionType"], "Unsupported encryption backend 'hsm'");
    }
}
