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

//! Certificate material uploaded through the security and encryption pages.

use crate::utils::tls;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use strum::{Display, EnumString};
use tracing::debug;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn new_id() -> String {
    let n = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", chrono::Utc::now().timestamp_millis(), n)
}

/// One uploaded key/certificate pair. `key` and `cert` hold file names,
/// the `encoded_*` fields the base64 file content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPairFile {
    pub id: String,
    pub key: String,
    pub cert: String,
    pub encoded_key: String,
    pub encoded_cert: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

impl KeyPairFile {
    fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn has_pair(&self) -> bool {
        !self.encoded_key.is_empty() && !self.encoded_cert.is_empty()
    }

    /// Both halves present and matching.
    pub fn is_complete(&self) -> bool {
        self.has_pair() && self.error.is_empty()
    }

    fn attach(&mut self, part: CertificatePart, file_name: &str, encoded: &str) {
        match part {
            CertificatePart::Key => {
                self.key = file_name.to_string();
                self.encoded_key = encoded.to_string();
            }
            CertificatePart::Cert => {
                self.cert = file_name.to_string();
                self.encoded_cert = encoded.to_string();
            }
        }
        self.check(false);
    }

    fn check(&mut self, cert_only: bool) {
        let result = if cert_only {
            if self.encoded_cert.is_empty() {
                Ok(())
            } else {
                tls::validate_encoded_certificate(&self.encoded_cert)
            }
        } else if self.has_pair() {
            tls::validate_encoded_key_pair(&self.encoded_cert, &self.encoded_key)
        } else {
            Ok(())
        };

        self.error = match result {
            Ok(()) => String::new(),
            Err(e) => {
                debug!(id = %self.id, "rejected certificate material: {}", e);
                e.to_string()
            }
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum CertificatePart {
    Key,
    Cert,
}

/// Lists that grow and shrink. Each always keeps at least one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum CertificateList {
    Minio,
    Ca,
    ConsoleCa,
}

impl CertificateList {
    fn cert_only(self) -> bool {
        !matches!(self, CertificateList::Minio)
    }
}

/// Fixed single-entry slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum CertificateSlot {
    Console,
    KesServer,
    KesClient,
    VaultClient,
    VaultCa,
    GemaltoCa,
}

impl CertificateSlot {
    fn cert_only(self) -> bool {
        matches!(self, CertificateSlot::VaultCa | CertificateSlot::GemaltoCa)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificates {
    pub minio_certificates: Vec<KeyPairFile>,
    pub ca_certificates: Vec<KeyPairFile>,
    pub console_ca_certificates: Vec<KeyPairFile>,
    pub console_certificate: KeyPairFile,
    pub server_certificate: KeyPairFile,
    pub client_certificate: KeyPairFile,
    pub vault_certificate: KeyPairFile,
    #[serde(rename = "vaultCA")]
    pub vault_ca: KeyPairFile,
    #[serde(rename = "gemaltoCA")]
    pub gemalto_ca: KeyPairFile,
}

impl Default for Certificates {
    fn default() -> Self {
        Self {
            minio_certificates: vec![KeyPairFile::with_id(new_id())],
            ca_certificates: vec![KeyPairFile::with_id(new_id())],
            console_ca_certificates: vec![KeyPairFile::with_id(new_id())],
            console_certificate: KeyPairFile::with_id("console_cert_pair"),
            server_certificate: KeyPairFile::with_id("encryptionServerCertificate"),
            client_certificate: KeyPairFile::with_id("encryptionClientCertificate"),
            vault_certificate: KeyPairFile::with_id("encryptionVaultCertificate"),
            vault_ca: KeyPairFile::with_id("encryptionVaultCA"),
            gemalto_ca: KeyPairFile::with_id("encryptionGemaltoCA"),
        }
    }
}

impl Certificates {
    pub fn list(&self, list: CertificateList) -> &[KeyPairFile] {
        match list {
            CertificateList::Minio => &self.minio_certificates,
            CertificateList::Ca => &self.ca_certificates,
            CertificateList::ConsoleCa => &self.console_ca_certificates,
        }
    }

    fn list_mut(&mut self, list: CertificateList) -> &mut Vec<KeyPairFile> {
        match list {
            CertificateList::Minio => &mut self.minio_certificates,
            CertificateList::Ca => &mut self.ca_certificates,
            CertificateList::ConsoleCa => &mut self.console_ca_certificates,
        }
    }

    pub fn slot(&self, slot: CertificateSlot) -> &KeyPairFile {
        match slot {
            CertificateSlot::Console => &self.console_certificate,
            CertificateSlot::KesServer => &self.server_certificate,
            CertificateSlot::KesClient => &self.client_certificate,
            CertificateSlot::VaultClient => &self.vault_certificate,
            CertificateSlot::VaultCa => &self.vault_ca,
            CertificateSlot::GemaltoCa => &self.gemalto_ca,
        }
    }

    fn slot_mut(&mut self, slot: CertificateSlot) -> &mut KeyPairFile {
        match slot {
            CertificateSlot::Console => &mut self.console_certificate,
            CertificateSlot::KesServer => &mut self.server_certificate,
            CertificateSlot::KesClient => &mut self.client_certificate,
            CertificateSlot::VaultClient => &mut self.vault_certificate,
            CertificateSlot::VaultCa => &mut self.vault_ca,
            CertificateSlot::GemaltoCa => &mut self.gemalto_ca,
        }
    }

    /// Appends an empty entry and returns its id.
    pub fn add(&mut self, list: CertificateList) -> String {
        let entry = KeyPairFile::with_id(new_id());
        let id = entry.id.clone();
        self.list_mut(list).push(entry);
        id
    }

    /// Removes an entry unless it is the last one of its list.
    pub fn remove(&mut self, list: CertificateList, id: &str) -> bool {
        let entries = self.list_mut(list);
        if entries.len() <= 1 {
            return false;
        }
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        entries.len() != before
    }

    /// Stores uploaded content on a list entry. Returns false for an unknown id.
    pub fn attach(
        &mut self,
        list: CertificateList,
        id: &str,
        part: CertificatePart,
        file_name: &str,
        encoded: &str,
    ) -> bool {
        let cert_only = list.cert_only();
        let Some(entry) = self.list_mut(list).iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if cert_only {
            entry.cert = file_name.to_string();
            entry.encoded_cert = encoded.to_string();
            entry.check(true);
        } else {
            entry.attach(part, file_name, encoded);
        }
        true
    }

    pub fn attach_slot(
        &mut self,
        slot: CertificateSlot,
        part: CertificatePart,
        file_name: &str,
        encoded: &str,
    ) {
        let cert_only = slot.cert_only();
        let entry = self.slot_mut(slot);
        if cert_only {
            entry.cert = file_name.to_string();
            entry.encoded_cert = encoded.to_string();
            entry.check(true);
        } else {
            entry.attach(part, file_name, encoded);
        }
    }

    /// At least one complete and matching tenant key pair, and no rejected one.
    pub fn has_valid_tenant_pair(&self) -> bool {
        self.minio_certificates.iter().any(KeyPairFile::is_complete)
            && self.minio_certificates.iter().all(|e| e.error.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::tls::tests::{EC_CERT, EC_KEY, RSA_CERT, encode};

    #[test]
    fn test_defaults_have_one_entry_per_list() {
        let certs = Certificates::default();
        assert_eq!(certs.minio_certificates.len(), 1);
        assert_eq!(certs.console_certificate.id, "console_cert_pair");
        assert!(!certs.has_valid_tenant_pair());
    }

    #[test]
    fn test_add_and_remove_keep_one() {
        let mut certs = Certificates::default();
        let first = certs.minio_certificates[0].id.clone();
        assert!(!certs.remove(CertificateList::Minio, &first));

        let second = certs.add(CertificateList::Minio);
        assert_ne!(first, second);
        assert!(certs.remove(CertificateList::Minio, &first));
        assert_eq!(certs.minio_certificates.len(), 1);
        assert_eq!(certs.minio_certificates[0].id, second);
    }

    #[test]
    fn test_attach_matching_pair() {
        let mut certs = Certificates::default();
        let id = certs.minio_certificates[0].id.clone();
        assert!(certs.attach(
            CertificateList::Minio,
            &id,
            CertificatePart::Cert,
            "tls.crt",
            &encode(EC_CERT),
        ));
        assert!(!certs.has_valid_tenant_pair());
        assert!(certs.attach(
            CertificateList::Minio,
            &id,
            CertificatePart::Key,
            "tls.key",
            &encode(EC_KEY),
        ));
        assert!(certs.has_valid_tenant_pair());
        assert!(!certs.attach(CertificateList::Minio, "missing", CertificatePart::Key, "x", "y"));
    }

    #[test]
    fn test_attach_mismatched_pair() {
        let mut certs = Certificates::default();
        certs.attach_slot(CertificateSlot::Console, CertificatePart::Cert, "c", &encode(RSA_CERT));
        certs.attach_slot(CertificateSlot::Console, CertificatePart::Key, "k", &encode(EC_KEY));
        assert!(certs.console_certificate.has_pair());
        assert!(!certs.console_certificate.is_complete());
        assert!(!certs.console_certificate.error.is_empty());
    }

    #[test]
    fn test_ca_slots_take_certificates_only() {
        let mut certs = Certificates::default();
        certs.attach_slot(
            CertificateSlot::VaultCa,
            CertificatePart::Key,
            "ca.crt",
            &encode(EC_CERT),
        );
        assert_eq!(certs.vault_ca.cert, "ca.crt");
        assert!(certs.vault_ca.encoded_key.is_empty());
        assert!(certs.vault_ca.error.is_empty());

        let id = certs.ca_certificates[0].id.clone();
        certs.attach(CertificateList::Ca, &id, CertificatePart::Cert, "bad", &encode("nope"));
        assert!(!certs.ca_certificates[0].error.is_empty());
    }
}
