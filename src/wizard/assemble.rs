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

//! Shapes a field store snapshot into a [`CreateTenantRequest`].

use crate::types::error::{Error, InvalidParitySnafu, UnsupportedSelectionSnafu};
use crate::types::tenant::encryption::{
    AwsConfiguration, AwsCredentials, AwsSecretsManager, AzureConfiguration, AzureCredentials,
    AzureKeyVault, EncryptionConfiguration, GcpConfiguration, GcpCredentials, GcpSecretManager,
    GemaltoConfiguration, GemaltoCredentials, GemaltoKeySecure, GemaltoTls, KmsBackend,
    VaultAppRole, VaultConfiguration, VaultStatus, VaultTls,
};
use crate::types::tenant::idp::{
    AccessKeyPair, ActiveDirectoryConfiguration, IdpConfiguration, OidcConfiguration,
};
use crate::types::tenant::pool::{self, Pool, VolumeConfiguration};
use crate::types::tenant::{
    CreateTenantRequest, ImageRegistry, KeyPair, LogSearchConfiguration, PrometheusConfiguration,
    TlsConfiguration,
};
use crate::wizard::calc::distribution::Distribution;
use crate::wizard::calc::erasure::parity_of;
use crate::wizard::calc::resources::ResourcesSize;
use crate::wizard::certificates::{Certificates, KeyPairFile};
use crate::wizard::page::Page;
use crate::wizard::pages::affinity::parse_labels;
use crate::wizard::pages::encryption::KmsKind;
use crate::wizard::pages::identity_provider::{ACTIVE_DIRECTORY, BUILT_IN, OPENID};
use crate::wizard::store::{FieldStore, PageView};
use crate::wizard::validation::parse_int;
use crate::wizard::value::DerivedValue;
use k8s_openapi::api::core::v1 as corev1;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use snafu::OptionExt;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Storage class value meaning "the cluster default".
const DEFAULT_STORAGE_CLASS: &str = "default";

fn security_context(fields: PageView<'_>, record: &str) -> corev1::PodSecurityContext {
    corev1::PodSecurityContext {
        run_as_user: parse_int(fields.record_text(record, "runAsUser")),
        run_as_group: parse_int(fields.record_text(record, "runAsGroup")),
        fs_group: parse_int(fields.record_text(record, "fsGroup")),
        run_as_non_root: Some(fields.record_flag(record, "runAsNonRoot")),
        ..Default::default()
    }
}

fn storage_class(fields: PageView<'_>, key: &str) -> Option<String> {
    let class = fields.text(key);
    (class != DEFAULT_STORAGE_CLASS).then(|| class.to_string())
}

fn key_pair(file: &KeyPairFile) -> Option<KeyPair> {
    file.has_pair().then(|| KeyPair {
        crt: file.encoded_cert.clone(),
        key: file.encoded_key.clone(),
    })
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn quantities(cpu: u64, memory: u64) -> BTreeMap<String, Quantity> {
    BTreeMap::from([
        ("cpu".to_string(), Quantity(cpu.to_string())),
        ("memory".to_string(), Quantity(memory.to_string())),
    ])
}

fn pool(store: &FieldStore, tenant: &str) -> Pool {
    let size = store.page(Page::TenantSize);
    let configure = store.page(Page::Configure);
    let affinity = store.page(Page::Affinity);

    let dist = match size.derived("distribution") {
        Some(DerivedValue::Distribution(dist)) => dist.clone(),
        _ => Distribution::default(),
    };
    let resources = match size.derived("resourcesSize") {
        Some(DerivedValue::ResourcesSize(resources)) => resources.clone(),
        _ => ResourcesSize::default(),
    };

    let name = pool::pool_name(0);
    let affinity = match affinity.text("podAffinity") {
        "default" => Some(pool::default_affinity(tenant, &name)),
        "nodeSelector" => Some(pool::node_selector_affinity(
            &parse_labels(affinity.text("nodeSelectorLabels")).unwrap_or_default(),
            affinity.flag("withPodAntiAffinity"),
            tenant,
            &name,
        )),
        _ => None,
    };

    Pool {
        servers: dist.nodes,
        volumes_per_server: dist.disks,
        volume_configuration: VolumeConfiguration {
            size: dist.pv_size,
            storage_class_name: store
                .text(Page::NameTenant, "selectedStorageClass")
                .to_string(),
        },
        resources: corev1::ResourceRequirements {
            requests: Some(quantities(resources.cpu_request, resources.memory_request)),
            limits: Some(quantities(resources.cpu_limit, resources.memory_limit)),
            ..Default::default()
        },
        security_context: configure
            .flag("tenantCustom")
            .then(|| security_context(configure, "tenantSecurityContext")),
        affinity,
        name,
    }
}

fn log_search(configure: PageView<'_>) -> Option<LogSearchConfiguration> {
    if !configure.flag("logSearchEnabled") {
        return None;
    }

    let mut config = LogSearchConfiguration {
        image: configure.text("logSearchImage").to_string(),
        postgres_image: configure.text("logSearchPostgresImage").to_string(),
        postgres_init_image: configure.text("logSearchPostgresInitImage").to_string(),
        ..Default::default()
    };
    if configure.flag("logSearchCustom") {
        config.storage_class = storage_class(configure, "logSearchSelectedStorageClass");
        config.storage_size = configure.int("logSearchVolumeSize");
        config.security_context = Some(security_context(configure, "logSearchSecurityContext"));
        config.postgres_security_context =
            Some(security_context(configure, "logSearchPostgresSecurityContext"));
    }
    Some(config)
}

fn prometheus(configure: PageView<'_>) -> PrometheusConfiguration {
    let mut config = PrometheusConfiguration {
        image: configure.text("prometheusImage").to_string(),
        sidecar_image: configure.text("prometheusSidecarImage").to_string(),
        init_image: configure.text("prometheusInitImage").to_string(),
        ..Default::default()
    };
    if configure.flag("prometheusCustom") {
        config.storage_class = storage_class(configure, "prometheusSelectedStorageClass");
        config.storage_size = configure.int("prometheusVolumeSize");
        config.security_context = Some(security_context(configure, "prometheusSecurityContext"));
    }
    config
}

/// Certificates are only sent for TLS with custom certificates.
fn tls(store: &FieldStore, certs: &Certificates) -> Option<TlsConfiguration> {
    let security = store.page(Page::Security);
    if !security.flag("enableTLS") || !security.flag("enableCustomCerts") {
        return None;
    }

    let encoded_certs = |entries: &[KeyPairFile]| {
        entries
            .iter()
            .filter_map(|entry| non_empty(&entry.encoded_cert))
            .collect()
    };
    let config = TlsConfiguration {
        minio: certs.minio_certificates.iter().filter_map(key_pair).collect(),
        console: key_pair(&certs.console_certificate),
        ca_certificates: encoded_certs(&certs.ca_certificates),
        console_ca_certificates: encoded_certs(&certs.console_ca_certificates),
    };
    (!config.is_empty()).then_some(config)
}

fn counter(fields: PageView<'_>, key: &str) -> i64 {
    fields.int(key).unwrap_or(0)
}

fn kms_backend(fields: PageView<'_>, certs: &Certificates) -> Result<KmsBackend, Error> {
    let kind = fields.text("encryptionType");
    let kind = KmsKind::from_str(kind).ok().context(UnsupportedSelectionSnafu {
        page: Page::Encryption,
        field: "encryptionType",
        value: kind,
    })?;
    let text = |key: &str| fields.text(key).to_string();

    let backend = match kind {
        KmsKind::Vault => {
            let tls = VaultTls {
                key: non_empty(&certs.vault_certificate.encoded_key),
                crt: non_empty(&certs.vault_certificate.encoded_cert),
                ca: non_empty(&certs.vault_ca.encoded_cert),
            };
            KmsBackend::Vault(VaultConfiguration {
                endpoint: text("vaultEndpoint"),
                engine: text("vaultEngine"),
                namespace: text("vaultNamespace"),
                prefix: text("vaultPrefix"),
                approle: VaultAppRole {
                    engine: text("vaultAppRoleEngine"),
                    id: text("vaultId"),
                    secret: text("vaultSecret"),
                    retry: counter(fields, "vaultRetry"),
                },
                tls: (tls != VaultTls::default()).then_some(tls),
                status: VaultStatus {
                    ping: counter(fields, "vaultPing"),
                },
            })
        }
        KmsKind::Aws => KmsBackend::Aws(AwsConfiguration {
            secretsmanager: AwsSecretsManager {
                endpoint: text("awsEndpoint"),
                region: text("awsRegion"),
                kmskey: text("awsKMSKey"),
                credentials: AwsCredentials {
                    accesskey: text("awsAccessKey"),
                    secretkey: text("awsSecretKey"),
                    token: text("awsToken"),
                },
            },
        }),
        KmsKind::Gemalto => KmsBackend::Gemalto(GemaltoConfiguration {
            keysecure: GemaltoKeySecure {
                endpoint: text("gemaltoEndpoint"),
                credentials: GemaltoCredentials {
                    token: text("gemaltoToken"),
                    domain: text("gemaltoDomain"),
                    retry: counter(fields, "gemaltoRetry"),
                },
                tls: GemaltoTls {
                    ca: non_empty(&certs.gemalto_ca.encoded_cert),
                },
            },
        }),
        KmsKind::Gcp => KmsBackend::Gcp(GcpConfiguration {
            secretmanager: GcpSecretManager {
                project_id: text("gcpProjectID"),
                endpoint: text("gcpEndpoint"),
                credentials: GcpCredentials {
                    client_email: text("gcpClientEmail"),
                    client_id: text("gcpClientID"),
                    private_key_id: text("gcpPrivateKeyID"),
                    private_key: text("gcpPrivateKey"),
                },
            },
        }),
        KmsKind::Azure => KmsBackend::Azure(AzureConfiguration {
            keyvault: AzureKeyVault {
                endpoint: text("azureEndpoint"),
                credentials: AzureCredentials {
                    tenant_id: text("azureTenantID"),
                    client_id: text("azureClientID"),
                    client_secret: text("azureClientSecret"),
                },
            },
        }),
    };
    Ok(backend)
}

fn encryption(
    store: &FieldStore,
    certs: &Certificates,
) -> Result<Option<EncryptionConfiguration>, Error> {
    let fields = store.page(Page::Encryption);
    if !fields.flag("enableEncryption") {
        return Ok(None);
    }

    Ok(Some(EncryptionConfiguration {
        replicas: fields.text("replicas").to_string(),
        security_context: Some(security_context(fields, "kesSecurityContext")),
        image: store.text(Page::Configure, "kesImage").to_string(),
        server: key_pair(&certs.server_certificate),
        client: key_pair(&certs.client_certificate),
        backend: kms_backend(fields, certs)?,
    }))
}

fn idp(fields: PageView<'_>) -> Result<IdpConfiguration, Error> {
    let text = |key: &str| fields.text(key).to_string();

    let config = match fields.text("idpSelection") {
        BUILT_IN => IdpConfiguration::Keys(
            fields
                .list("accessKeys")
                .iter()
                .zip(fields.list("secretKeys"))
                .map(|(access_key, secret_key)| AccessKeyPair {
                    access_key: access_key.clone(),
                    secret_key: secret_key.clone(),
                })
                .collect(),
        ),
        OPENID => IdpConfiguration::Oidc(OidcConfiguration {
            configuration_url: text("openIDConfigurationURL"),
            client_id: text("openIDClientID"),
            secret_id: text("openIDSecretID"),
            claim_name: text("openIDClaimName"),
            callback_url: text("openIDCallbackURL"),
            scopes: text("openIDScopes"),
        }),
        ACTIVE_DIRECTORY => IdpConfiguration::ActiveDirectory(ActiveDirectoryConfiguration {
            url: text("ADURL"),
            lookup_bind_dn: text("ADLookupBindDN"),
            lookup_bind_password: text("ADLookupBindPassword"),
            skip_tls_verification: fields.flag("ADSkipTLS"),
            server_insecure: fields.flag("ADServerInsecure"),
            server_start_tls: fields.flag("ADServerStartTLS"),
            group_search_base_dn: text("ADGroupSearchBaseDN"),
            group_search_filter: text("ADGroupSearchFilter"),
            user_dn_search_base_dn: text("ADUserDNSearchBaseDN"),
            user_dn_search_filter: text("ADUserDNSearchFilter"),
            user_dns: fields.list("ADUserDNs").to_vec(),
        }),
        other => {
            return UnsupportedSelectionSnafu {
                page: Page::IdentityProvider,
                field: "idpSelection",
                value: other,
            }
            .fail();
        }
    };
    Ok(config)
}

/// Builds the creation request. Validity of the pages is the caller's
/// concern; this only fails on values no page validator accepts.
pub fn assemble(store: &FieldStore, certs: &Certificates) -> Result<CreateTenantRequest, Error> {
    let name = store.text(Page::NameTenant, "tenantName").trim().to_string();
    let namespace = store.text(Page::NameTenant, "namespace").trim().to_string();
    let configure = store.page(Page::Configure);
    let security = store.page(Page::Security);

    let parity = store.text(Page::TenantSize, "ecParity");
    let erasure_coding_parity = parity_of(parity).context(InvalidParitySnafu { parity })?;

    let custom_image = configure.flag("customImage");
    let image_registry = (custom_image && configure.flag("customDockerhub")).then(|| ImageRegistry {
        registry: configure.text("imageRegistry").to_string(),
        username: configure.text("imageRegistryUsername").to_string(),
        password: configure.text("imageRegistryPassword").to_string(),
    });

    Ok(CreateTenantRequest {
        pools: vec![pool(store, &name)],
        image: if custom_image {
            configure.text("imageName").to_string()
        } else {
            String::new()
        },
        enable_tls: security.flag("enableTLS") && security.flag("enableAutoCert"),
        enable_console: true,
        enable_prometheus: configure.flag("prometheusEnabled"),
        expose_minio: configure.flag("exposeMinIO"),
        expose_console: configure.flag("exposeConsole"),
        erasure_coding_parity,
        image_registry,
        log_search_configuration: log_search(configure),
        prometheus_configuration: prometheus(configure),
        tls: tls(store, certs),
        encryption: encryption(store, certs)?,
        idp: idp(store.page(Page::IdentityProvider))?,
        name,
        namespace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::ready_controller;
    use crate::utils::tls::tests::{EC_CERT, EC_KEY, encode};
    use crate::wizard::calc::units::GIB;
    use crate::wizard::certificates::{CertificateList, CertificatePart, CertificateSlot};
    use crate::wizard::controller::WizardController;

    fn submit(wizard: &WizardController) -> CreateTenantRequest {
        wizard.assemble_submission().unwrap()
    }

    #[test]
    fn test_default_request_shape() {
        let request = submit(&ready_controller());
        assert_eq!(request.name, "tenant-a");
        assert_eq!(request.namespace, "tenants");
        assert_eq!(request.erasure_coding_parity, 4);
        assert!(request.enable_tls);
        assert!(request.tls.is_none());
        assert!(request.encryption.is_none());
        assert!(request.image_registry.is_none());

        let pool = &request.pools[0];
        assert_eq!(pool.name, "pool-0");
        assert_eq!(pool.servers, 4);
        assert_eq!(pool.volumes_per_server, 4);
        assert_eq!(pool.volume_configuration.size, 64 * GIB);
        assert_eq!(pool.volume_configuration.storage_class_name, "standard");
        assert!(pool.security_context.is_none());
        assert!(pool.affinity.as_ref().unwrap().pod_anti_affinity.is_some());

        let requests = pool.resources.requests.as_ref().unwrap();
        assert_eq!(requests["cpu"], Quantity("4".to_string()));
        assert_eq!(requests["memory"], Quantity((16 * GIB).to_string()));

        match &request.idp {
            IdpConfiguration::Keys(keys) => {
                assert_eq!(keys.len(), 1);
                assert_eq!(keys[0].access_key.len(), 16);
                assert_eq!(keys[0].secret_key.len(), 32);
            }
            other => panic!("unexpected idp {other:?}"),
        }
    }

    #[test]
    fn test_wire_names() {
        let value = serde_json::to_value(submit(&ready_controller())).unwrap();
        assert_eq!(value["erasureCodingParity"], 4);
        assert_eq!(value["pools"][0]["volumes_per_server"], 4);
        assert!(value["idp"]["keys"].is_array());
        assert!(value["prometheusConfiguration"].is_object());
        assert!(value.get("encryption").is_none());
    }

    #[test]
    fn test_node_selector_affinity() {
        let mut wizard = ready_controller();
        wizard
            .update_field(Page::Affinity, "podAffinity", "nodeSelector".into())
            .unwrap();
        wizard
            .update_field(Page::Affinity, "nodeSelectorLabels", "disk=ssd".into())
            .unwrap();
        wizard
            .update_field(Page::Affinity, "withPodAntiAffinity", false.into())
            .unwrap();

        let affinity = submit(&wizard).pools[0].affinity.clone().unwrap();
        assert!(affinity.node_affinity.is_some());
        assert!(affinity.pod_anti_affinity.is_none());
    }

    #[test]
    fn test_no_affinity() {
        let mut wizard = ready_controller();
        wizard
            .update_field(Page::Affinity, "podAffinity", "none".into())
            .unwrap();
        assert!(submit(&wizard).pools[0].affinity.is_none());
    }

    #[test]
    fn test_encryption_backends() {
        let vault: &[(&str, &str)] = &[
            ("vaultEndpoint", "https://vault"),
            ("vaultId", "id"),
            ("vaultSecret", "s"),
        ];
        let aws: &[(&str, &str)] = &[
            ("awsEndpoint", "e"),
            ("awsRegion", "r"),
            ("awsAccessKey", "a"),
            ("awsSecretKey", "s"),
        ];
        let gemalto: &[(&str, &str)] = &[
            ("gemaltoEndpoint", "e"),
            ("gemaltoToken", "t"),
            ("gemaltoDomain", "d"),
        ];
        let gcp: &[(&str, &str)] = &[("gcpProjectID", "p")];
        let azure: &[(&str, &str)] = &[
            ("azureEndpoint", "e"),
            ("azureTenantID", "t"),
            ("azureClientID", "c"),
            ("azureClientSecret", "s"),
        ];
        let cases = [
            ("vault", vault),
            ("aws", aws),
            ("gemalto", gemalto),
            ("gcp", gcp),
            ("azure", azure),
        ];

        for (kind, fields) in cases {
            let mut wizard = ready_controller();
            wizard
                .update_field(Page::Encryption, "enableEncryption", true.into())
                .unwrap();
            wizard
                .update_field(Page::Encryption, "encryptionType", kind.into())
                .unwrap();
            for (field, value) in fields {
                wizard
                    .update_field(Page::Encryption, field, (*value).into())
                    .unwrap();
            }
            assert!(
                wizard.can_submit(),
                "{kind}: {:?}",
                wizard.validation_errors(Page::Encryption)
            );

            let encryption = submit(&wizard).encryption.unwrap();
            let value = serde_json::to_value(&encryption).unwrap();
            assert!(value.get(kind).is_some(), "{kind}: {value}");
            assert_eq!(encryption.replicas, "1");
        }
    }

    #[test]
    fn test_vault_tls_material() {
        let mut wizard = ready_controller();
        wizard
            .attach_certificate_slot(
                CertificateSlot::VaultCa,
                CertificatePart::Cert,
                "ca.crt",
                "Y2E=",
            )
            .unwrap();
        let request = assemble(&wizard.store().snapshot(), wizard.certificates());
        // Encryption is still disabled.
        assert!(request.unwrap().encryption.is_none());

        let mut store = wizard.store().snapshot();
        store
            .set(Page::Encryption, "enableEncryption", true.into())
            .unwrap();
        let encryption = assemble(&store, wizard.certificates())
            .unwrap()
            .encryption
            .unwrap();
        match encryption.backend {
            KmsBackend::Vault(vault) => {
                let tls = vault.tls.unwrap();
                assert_eq!(tls.ca.as_deref(), Some("Y2E="));
                assert!(tls.key.is_none());
            }
            other => panic!("unexpected backend {other:?}"),
        }
    }

    #[test]
    fn test_custom_certificates() {
        let mut wizard = ready_controller();
        wizard
            .update_field(Page::Security, "enableAutoCert", false.into())
            .unwrap();
        wizard
            .update_field(Page::Security, "enableCustomCerts", true.into())
            .unwrap();
        let id = wizard.certificates().minio_certificates[0].id.clone();
        wizard
            .attach_certificate(
                CertificateList::Minio,
                &id,
                CertificatePart::Cert,
                "tls.crt",
                &encode(EC_CERT),
            )
            .unwrap();
        wizard
            .attach_certificate(
                CertificateList::Minio,
                &id,
                CertificatePart::Key,
                "tls.key",
                &encode(EC_KEY),
            )
            .unwrap();

        let request = submit(&wizard);
        assert!(!request.enable_tls);
        let tls = request.tls.unwrap();
        assert_eq!(tls.minio.len(), 1);
        assert_eq!(tls.minio[0].crt, encode(EC_CERT));
        assert!(tls.console.is_none());
        assert!(tls.ca_certificates.is_empty());
    }

    #[test]
    fn test_openid_and_active_directory() {
        let mut store = ready_controller().store().snapshot();
        store
            .set(Page::IdentityProvider, "idpSelection", OPENID.into())
            .unwrap();
        store
            .set(Page::IdentityProvider, "openIDClientID", "client".into())
            .unwrap();
        match assemble(&store, &Certificates::default()).unwrap().idp {
            IdpConfiguration::Oidc(oidc) => assert_eq!(oidc.client_id, "client"),
            other => panic!("unexpected idp {other:?}"),
        }

        store
            .set(Page::IdentityProvider, "idpSelection", ACTIVE_DIRECTORY.into())
            .unwrap();
        store
            .set(Page::IdentityProvider, "ADURL", "ldaps://ad".into())
            .unwrap();
        match assemble(&store, &Certificates::default()).unwrap().idp {
            IdpConfiguration::ActiveDirectory(ad) => assert_eq!(ad.url, "ldaps://ad"),
            other => panic!("unexpected idp {other:?}"),
        }

        store
            .set(Page::IdentityProvider, "idpSelection", "LDAP".into())
            .unwrap();
        assert!(matches!(
            assemble(&store, &Certificates::default()).unwrap_err(),
            Error::UnsupportedSelection { .. }
        ));
    }

    #[test]
    fn test_invalid_parity() {
        let mut store = ready_controller().store().snapshot();
        store.set(Page::TenantSize, "ecParity", "four".into()).unwrap();
        assert!(matches!(
            assemble(&store, &Certificates::default()).unwrap_err(),
            Error::InvalidParity { .. }
        ));
    }

    #[test]
    fn test_custom_monitoring_storage() {
        let mut store = ready_controller().store().snapshot();
        store.set(Page::Configure, "prometheusCustom", true.into()).unwrap();
        store
            .set(Page::Configure, "prometheusSelectedStorageClass", "default".into())
            .unwrap();
        store.set(Page::Configure, "logSearchCustom", true.into()).unwrap();
        store.set(Page::Configure, "logSearchVolumeSize", "10".into()).unwrap();

        let request = assemble(&store, &Certificates::default()).unwrap();
        assert!(request.prometheus_configuration.storage_class.is_none());
        assert_eq!(request.prometheus_configuration.storage_size, Some(5));
        let log_search = request.log_search_configuration.unwrap();
        assert_eq!(log_search.storage_class.as_deref(), Some("standard"));
        assert_eq!(log_search.storage_size, Some(10));
        assert_eq!(
            log_search
                .postgres_security_context
                .unwrap()
                .run_as_user,
            Some(999)
        );
    }
}
