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

//! The wizard controller.
//!
//! Owns the field store of one tenant creation session. Every field update
//! runs the effects subscribed to that field: derived values are recomputed,
//! remote lookups are issued and the affected pages are revalidated. Lookups
//! are not performed here. They are queued with a ticket, taken by the
//! caller and answered through [`WizardController::apply`].

use crate::types::cluster::{AllocatableResources, NamespaceInfo};
use crate::types::error::{
    Error, FieldTypeMismatchSnafu, NotReadySnafu, PageOutOfRangeSnafu, ReadOnlyFieldSnafu,
};
use crate::types::tenant::CreateTenantRequest;
use crate::wizard::assemble;
use crate::wizard::calc::distribution::{self, DRIVE_SIZE_LIMIT, Distribution};
use crate::wizard::calc::erasure;
use crate::wizard::calc::presets::{Integration, StorageTypePreset, minimum_volume_size};
use crate::wizard::calc::resources::{self, ResourceCeiling, ResourceInputs};
use crate::wizard::certificates::{
    CertificateList, CertificatePart, CertificateSlot, Certificates,
};
use crate::wizard::lookup::{Lookup, LookupKind, LookupOutcome, Sequencer};
use crate::wizard::page::Page;
use crate::wizard::pages::{self, NamespaceStatus, ValidationContext, name_tenant};
use crate::wizard::schema::{ACCESS_KEY_LEN, SECRET_KEY_LEN, random_key};
use crate::wizard::store::FieldStore;
use crate::wizard::validation::ValidationResult;
use crate::wizard::value::{DerivedKind, DerivedValue, FieldValue};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use strum::Display;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Phase {
    #[default]
    Editing,
    /// A submission was accepted and the session started over.
    Submitted,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Effect {
    MinimumVolume,
    Distribution,
    ResourcesSize,
    StoragePreset,
    ParityLookup,
    AllocatableLookup,
    NamespaceLookup,
    Validate(Page),
}

const NAMESPACE_EFFECTS: &[Effect] = &[
    Effect::NamespaceLookup,
    Effect::Validate(Page::NameTenant),
];

const STORAGE_TYPE_EFFECTS: &[Effect] = &[
    Effect::StoragePreset,
    Effect::MinimumVolume,
    Effect::Distribution,
    Effect::ParityLookup,
    Effect::ResourcesSize,
    Effect::Validate(Page::NameTenant),
    Effect::Validate(Page::TenantSize),
];

const STORAGE_CLASS_EFFECTS: &[Effect] = &[
    Effect::Validate(Page::NameTenant),
    Effect::Validate(Page::TenantSize),
];

const NODE_EFFECTS: &[Effect] = &[
    Effect::MinimumVolume,
    Effect::Distribution,
    Effect::ParityLookup,
    Effect::AllocatableLookup,
    Effect::ResourcesSize,
    Effect::Validate(Page::TenantSize),
];

const SIZE_EFFECTS: &[Effect] = &[
    Effect::MinimumVolume,
    Effect::Distribution,
    Effect::ParityLookup,
    Effect::Validate(Page::TenantSize),
];

const RESOURCE_EFFECTS: &[Effect] = &[Effect::ResourcesSize, Effect::Validate(Page::TenantSize)];

const TLS_EFFECTS: &[Effect] = &[
    Effect::Validate(Page::Security),
    Effect::Validate(Page::Encryption),
];

/// Effects run after `field` of `page` changed, in order.
fn subscriptions(page: Page, field: &str) -> &'static [Effect] {
    match (page, field) {
        (Page::NameTenant, "namespace") => NAMESPACE_EFFECTS,
        (Page::NameTenant, "selectedStorageType") => STORAGE_TYPE_EFFECTS,
        (Page::NameTenant, "selectedStorageClass") => STORAGE_CLASS_EFFECTS,
        (Page::TenantSize, "nodes") => NODE_EFFECTS,
        (Page::TenantSize, "drivesPerServer" | "volumeSize" | "sizeFactor") => SIZE_EFFECTS,
        (
            Page::TenantSize,
            "resourcesSpecifyLimit"
            | "resourcesCPURequest"
            | "resourcesCPULimit"
            | "resourcesMemoryRequest"
            | "resourcesMemoryLimit",
        ) => RESOURCE_EFFECTS,
        (Page::Security, _) => TLS_EFFECTS,
        (page, _) => validate_only(page),
    }
}

fn validate_only(page: Page) -> &'static [Effect] {
    match page {
        Page::NameTenant => &[Effect::Validate(Page::NameTenant)],
        Page::TenantSize => &[Effect::Validate(Page::TenantSize)],
        Page::Configure => &[Effect::Validate(Page::Configure)],
        Page::Affinity => &[Effect::Validate(Page::Affinity)],
        Page::IdentityProvider => &[Effect::Validate(Page::IdentityProvider)],
        Page::Security => &[Effect::Validate(Page::Security)],
        Page::Encryption => &[Effect::Validate(Page::Encryption)],
    }
}

fn initial_validity() -> BTreeSet<Page> {
    Page::ALL
        .into_iter()
        .filter(|page| page.initially_valid())
        .collect()
}

/// State machine of one tenant creation session.
#[derive(Debug)]
pub struct WizardController {
    store: FieldStore,
    certificates: Certificates,
    integration: Integration,
    page: Page,
    advanced_mode: bool,
    valid_pages: BTreeSet<Page>,
    errors: BTreeMap<Page, ValidationResult>,
    namespace: NamespaceStatus,
    lookups: Sequencer,
    lookup_errors: BTreeMap<LookupKind, String>,
    outbox: Vec<Lookup>,
    phase: Phase,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new(Integration::Default)
    }
}

impl WizardController {
    pub fn new(integration: Integration) -> Self {
        Self {
            store: FieldStore::new(),
            certificates: Certificates::default(),
            integration,
            page: Page::NameTenant,
            advanced_mode: false,
            valid_pages: initial_validity(),
            errors: BTreeMap::new(),
            namespace: NamespaceStatus::Unchecked,
            lookups: Sequencer::default(),
            lookup_errors: BTreeMap::new(),
            outbox: Vec::new(),
            phase: Phase::Editing,
        }
    }

    /// Computes the tenant size page the way a `nodes` change would, which
    /// queues the parity and allocatable lookups for the default sizing.
    pub fn bootstrap(&mut self) -> Result<(), Error> {
        self.run(NODE_EFFECTS)
    }

    pub fn set_page(&mut self, index: usize) -> Result<(), Error> {
        self.page = Page::from_index(index)?;
        Ok(())
    }

    pub fn update_field(
        &mut self,
        page: Page,
        field: &str,
        value: FieldValue,
    ) -> Result<(), Error> {
        if let FieldValue::Derived(_) = self.store.get(page, field)? {
            return ReadOnlyFieldSnafu { page, field }.fail();
        }
        self.store.set(page, field, value)?;
        if page == Page::TenantSize && field == "ecParity" {
            self.store.set(page, "untouchedECField", FieldValue::Flag(false))?;
        }

        debug!(%page, field, "field updated");
        self.phase = Phase::Editing;
        self.run(subscriptions(page, field))
    }

    pub fn mark_page_valid(&mut self, page: Page, valid: bool) {
        if valid {
            self.valid_pages.insert(page);
        } else {
            self.valid_pages.remove(&page);
        }
    }

    pub fn can_submit(&self) -> bool {
        Page::ALL.iter().all(|page| self.valid_pages.contains(page))
    }

    /// Discards the session. Responses to lookups issued before the reset
    /// are dropped.
    pub fn reset(&mut self) {
        self.clear();
        self.phase = Phase::Cancelled;
        info!("wizard reset");
    }

    /// Starts over after the submission was accepted.
    pub fn mark_submitted(&mut self) {
        self.clear();
        self.phase = Phase::Submitted;
        info!("tenant submitted, wizard reset");
    }

    fn clear(&mut self) {
        self.store.reset();
        self.certificates = Certificates::default();
        self.page = Page::NameTenant;
        self.advanced_mode = false;
        self.valid_pages = initial_validity();
        self.errors.clear();
        self.namespace = NamespaceStatus::Unchecked;
        self.lookups.clear();
        self.lookup_errors.clear();
        self.outbox.clear();
    }

    /// Shapes the session into a creation request. Fails with the names of
    /// the pages that are not valid yet.
    pub fn assemble_submission(&self) -> Result<CreateTenantRequest, Error> {
        let pages: Vec<String> = Page::ALL
            .iter()
            .filter(|page| !self.valid_pages.contains(page))
            .map(ToString::to_string)
            .collect();
        if !pages.is_empty() {
            return NotReadySnafu { pages }.fail();
        }
        assemble::assemble(&self.store.snapshot(), &self.certificates)
    }

    /// Lookups issued since the last call that are still current.
    pub fn take_lookups(&mut self) -> Vec<Lookup> {
        let queued = std::mem::take(&mut self.outbox);
        queued
            .into_iter()
            .filter(|lookup| self.lookups.is_current(lookup.ticket()))
            .collect()
    }

    /// Applies a lookup response. Returns false, changing nothing, when a
    /// newer lookup of the same kind was issued since.
    pub fn apply(&mut self, outcome: LookupOutcome) -> Result<bool, Error> {
        let ticket = outcome.ticket();
        if !self.lookups.complete(ticket) {
            debug!(kind = %ticket.kind, seq = ticket.seq, "discarding stale lookup response");
            return Ok(false);
        }

        match outcome {
            LookupOutcome::Namespace(_, result) => self.apply_namespace(result)?,
            LookupOutcome::ParityChoices(_, result) => self.apply_parity_choices(result)?,
            LookupOutcome::Allocatable(_, result) => self.apply_allocatable(result)?,
        }
        Ok(true)
    }

    fn apply_namespace(&mut self, result: Result<NamespaceInfo, String>) -> Result<(), Error> {
        match result {
            Ok(info) => {
                if let (Integration::Default, Some(first)) =
                    (self.integration, info.storage_classes.first())
                {
                    self.store.set_text(Page::NameTenant, "selectedStorageClass", first.as_str())?;
                    for field in [
                        "prometheusSelectedStorageClass",
                        "logSearchSelectedStorageClass",
                    ] {
                        let current = self.store.text(Page::Configure, field);
                        if !info.storage_classes.iter().any(|class| class == current) {
                            self.store.set_text(Page::Configure, field, first.as_str())?;
                        }
                    }
                }
                self.namespace = NamespaceStatus::Checked(info);
            }
            Err(message) => {
                warn!(%message, "namespace lookup failed");
                self.namespace = NamespaceStatus::Failed { message };
            }
        }

        self.run(&[
            Effect::Validate(Page::NameTenant),
            Effect::Validate(Page::TenantSize),
            Effect::Validate(Page::Configure),
        ])
    }

    fn apply_parity_choices(&mut self, result: Result<Vec<String>, String>) -> Result<(), Error> {
        let (choices, calc) = match result {
            Ok(choices) => {
                let dist = self.distribution();
                let calc = erasure::calculate(
                    &choices,
                    dist.persistent_volumes,
                    dist.pv_size,
                    dist.nodes,
                );
                (choices, DerivedValue::ErasureCode(calc))
            }
            Err(message) => {
                warn!(%message, "erasure code parity lookup failed");
                self.lookup_errors.insert(LookupKind::ParityChoices, message);
                (Vec::new(), DerivedValue::empty(DerivedKind::ErasureCode))
            }
        };

        let current = self.store.text(Page::TenantSize, "ecParity");
        let keep = !self.store.flag(Page::TenantSize, "untouchedECField")
            && choices.iter().any(|choice| choice == current);
        if !keep {
            let default_ec = match &calc {
                DerivedValue::ErasureCode(calc) => calc.default_ec.clone(),
                _ => String::new(),
            };
            self.store.set_text(Page::TenantSize, "ecParity", default_ec)?;
        }
        self.store.set(Page::TenantSize, "ecParityChoices", FieldValue::List(choices))?;
        self.store.set_derived(Page::TenantSize, "ecParityCalc", calc)?;

        self.run(&[Effect::Validate(Page::TenantSize)])
    }

    fn apply_allocatable(
        &mut self,
        result: Result<AllocatableResources, String>,
    ) -> Result<(), Error> {
        match result {
            Ok(allocatable) => {
                let ceiling = resources::ceiling(&allocatable);
                if ceiling.error.is_empty() {
                    for (field, max, default) in [
                        ("resourcesCPURequest", ceiling.max_cpu, ceiling.default_cpu_request),
                        (
                            "resourcesMemoryRequest",
                            ceiling.max_memory_gib,
                            ceiling.default_memory_request,
                        ),
                    ] {
                        let unset = self.store.text(Page::TenantSize, field).trim().is_empty();
                        let too_large = self
                            .store
                            .int(Page::TenantSize, field)
                            .and_then(|value| u64::try_from(value).ok())
                            .is_some_and(|value| value > max);
                        if unset || too_large {
                            self.store.set_text(Page::TenantSize, field, default.to_string())?;
                        }
                    }
                }
                self.store.set_derived(
                    Page::TenantSize,
                    "maxAllocatableResources",
                    DerivedValue::Allocatable(allocatable),
                )?;
                self.store.set_derived(
                    Page::TenantSize,
                    "resourceCeiling",
                    DerivedValue::ResourceCeiling(ceiling),
                )?;
            }
            Err(message) => {
                warn!(%message, "allocatable resources lookup failed");
                self.lookup_errors.insert(LookupKind::Allocatable, message);
            }
        }

        self.run(&[Effect::ResourcesSize, Effect::Validate(Page::TenantSize)])
    }

    fn run(&mut self, effects: &[Effect]) -> Result<(), Error> {
        for effect in effects {
            match *effect {
                Effect::MinimumVolume => self.raise_minimum_volume()?,
                Effect::Distribution => self.recompute_distribution()?,
                Effect::ResourcesSize => self.recompute_resources()?,
                Effect::StoragePreset => self.apply_storage_preset()?,
                Effect::ParityLookup => self.request_parity()?,
                Effect::AllocatableLookup => self.request_allocatable()?,
                Effect::NamespaceLookup => self.request_namespace()?,
                Effect::Validate(page) => self.revalidate(page),
            }
        }
        Ok(())
    }

    fn preset(&self) -> Option<&'static StorageTypePreset> {
        self.integration
            .preset(self.store.text(Page::NameTenant, "selectedStorageType"))
    }

    fn distribution(&self) -> Distribution {
        match self.store.derived(Page::TenantSize, "distribution") {
            Some(DerivedValue::Distribution(dist)) => dist.clone(),
            _ => Distribution::default(),
        }
    }

    fn ceiling(&self) -> ResourceCeiling {
        match self.store.derived(Page::TenantSize, "resourceCeiling") {
            Some(DerivedValue::ResourceCeiling(ceiling)) => ceiling.clone(),
            _ => ResourceCeiling::default(),
        }
    }

    fn apply_storage_preset(&mut self) -> Result<(), Error> {
        let Some(preset) = self.preset() else {
            return Ok(());
        };

        self.store.set_text(Page::NameTenant, "selectedStorageClass", preset.storage_class)?;
        self.store.set_text(
            Page::TenantSize,
            "drivesPerServer",
            preset.drives_per_server.to_string(),
        )?;
        for (field, value) in [
            ("resourcesCPURequest", preset.cpu),
            ("resourcesMemoryRequest", preset.memory_gib),
        ] {
            if self.store.text(Page::TenantSize, field).trim().is_empty() {
                self.store.set_text(Page::TenantSize, field, value.to_string())?;
            }
        }
        Ok(())
    }

    fn raise_minimum_volume(&mut self) -> Result<(), Error> {
        let Some(preset) = self.preset() else {
            return Ok(());
        };

        let size = self.store.page(Page::TenantSize);
        let raised = minimum_volume_size(
            preset,
            size.int("nodes"),
            size.int("drivesPerServer"),
            size.text("volumeSize"),
            size.text("sizeFactor"),
        );
        if let Some((value, unit)) = raised {
            debug!(%value, %unit, "raising volume size to the storage type minimum");
            self.store.set_text(Page::TenantSize, "volumeSize", value)?;
            self.store.set_text(Page::TenantSize, "sizeFactor", unit)?;
        }
        Ok(())
    }

    /// Splits the requested size across the drives. Storage type presets
    /// cap each drive at the preset drive size.
    fn recompute_distribution(&mut self) -> Result<(), Error> {
        let limit = self
            .preset()
            .and_then(|preset| preset.drive_size.bytes())
            .unwrap_or(DRIVE_SIZE_LIMIT);
        let size = self.store.page(Page::TenantSize);
        let dist = distribution::calculate(
            size.text("volumeSize"),
            size.text("sizeFactor"),
            size.int("nodes"),
            size.int("drivesPerServer"),
            limit,
        );
        self.store
            .set_derived(Page::TenantSize, "distribution", DerivedValue::Distribution(dist))
    }

    fn recompute_resources(&mut self) -> Result<(), Error> {
        let size = self.store.page(Page::TenantSize);
        let limits = size.flag("resourcesSpecifyLimit");
        let inputs = ResourceInputs {
            cpu_request: size.int("resourcesCPURequest"),
            memory_request_gib: size.int("resourcesMemoryRequest"),
            cpu_limit: limits.then(|| size.int("resourcesCPULimit")).flatten(),
            memory_limit_gib: limits
                .then(|| size.int("resourcesMemoryLimit"))
                .flatten(),
        };
        let sized = resources::size(inputs, &self.ceiling());
        self.store
            .set_derived(Page::TenantSize, "resourcesSize", DerivedValue::ResourcesSize(sized))
    }

    fn request_parity(&mut self) -> Result<(), Error> {
        self.store.set_derived(
            Page::TenantSize,
            "ecParityCalc",
            DerivedValue::empty(DerivedKind::ErasureCode),
        )?;
        self.lookup_errors.remove(&LookupKind::ParityChoices);

        let dist = self.distribution();
        if !dist.error.is_empty() || dist.nodes == 0 || dist.disks == 0 {
            self.lookups.cancel(LookupKind::ParityChoices);
            return Ok(());
        }

        let ticket = self.lookups.issue(LookupKind::ParityChoices);
        self.outbox.push(Lookup::ParityChoices {
            ticket,
            nodes: dist.nodes,
            drives_per_server: dist.disks,
        });
        Ok(())
    }

    fn request_allocatable(&mut self) -> Result<(), Error> {
        self.store.set_derived(
            Page::TenantSize,
            "maxAllocatableResources",
            DerivedValue::empty(DerivedKind::Allocatable),
        )?;
        self.store.set_derived(
            Page::TenantSize,
            "resourceCeiling",
            DerivedValue::empty(DerivedKind::ResourceCeiling),
        )?;
        self.lookup_errors.remove(&LookupKind::Allocatable);

        let nodes = self
            .store
            .int(Page::TenantSize, "nodes")
            .and_then(|nodes| u64::try_from(nodes).ok())
            .filter(|nodes| *nodes > 0);
        match nodes {
            Some(nodes) => {
                let ticket = self.lookups.issue(LookupKind::Allocatable);
                self.outbox.push(Lookup::Allocatable { ticket, nodes });
            }
            None => self.lookups.cancel(LookupKind::Allocatable),
        }
        Ok(())
    }

    fn request_namespace(&mut self) -> Result<(), Error> {
        if self.integration == Integration::Default {
            self.store.set_text(Page::NameTenant, "selectedStorageClass", "")?;
        }

        let namespace = self.store.text(Page::NameTenant, "namespace").to_string();
        if !name_tenant::is_namespace_name(&namespace) {
            self.lookups.cancel(LookupKind::Namespace);
            self.namespace = NamespaceStatus::Unchecked;
            return Ok(());
        }

        let ticket = self.lookups.issue(LookupKind::Namespace);
        self.namespace = NamespaceStatus::Checking;
        self.outbox.push(Lookup::Namespace { ticket, namespace });
        Ok(())
    }

    fn validation_context(&self) -> ValidationContext<'_> {
        ValidationContext {
            namespace: &self.namespace,
            integration: self.integration,
            certificates: &self.certificates,
            lookups: &self.lookups,
            lookup_errors: &self.lookup_errors,
        }
    }

    fn revalidate(&mut self, page: Page) {
        let check = pages::validate(page, &self.store, &self.validation_context());
        self.errors.insert(page, check.errors);
        self.mark_page_valid(page, check.valid);
    }

    pub fn add_idp_key_pair(&mut self) -> Result<(), Error> {
        self.store
            .list_mut(Page::IdentityProvider, "accessKeys")?
            .push(random_key(ACCESS_KEY_LEN));
        self.store
            .list_mut(Page::IdentityProvider, "secretKeys")?
            .push(random_key(SECRET_KEY_LEN));
        self.phase = Phase::Editing;
        self.run(validate_only(Page::IdentityProvider))
    }

    /// Removes the access/secret key pair at `index`. The last pair stays.
    pub fn remove_idp_key_pair(&mut self, index: usize) -> Result<bool, Error> {
        let access = self.store.list(Page::IdentityProvider, "accessKeys").len();
        let secret = self.store.list(Page::IdentityProvider, "secretKeys").len();
        if access <= 1 || index >= access.max(secret) {
            return Ok(false);
        }

        for field in ["accessKeys", "secretKeys"] {
            let keys = self.store.list_mut(Page::IdentityProvider, field)?;
            if index < keys.len() {
                keys.remove(index);
            }
        }
        self.phase = Phase::Editing;
        self.run(validate_only(Page::IdentityProvider))?;
        Ok(true)
    }

    pub fn add_certificate(&mut self, list: CertificateList) -> Result<String, Error> {
        let id = self.certificates.add(list);
        self.certificates_changed()?;
        Ok(id)
    }

    pub fn remove_certificate(&mut self, list: CertificateList, id: &str) -> Result<bool, Error> {
        let removed = self.certificates.remove(list, id);
        self.certificates_changed()?;
        Ok(removed)
    }

    /// Stores base64 encoded PEM content on a list entry.
    pub fn attach_certificate(
        &mut self,
        list: CertificateList,
        id: &str,
        part: CertificatePart,
        file_name: &str,
        encoded: &str,
    ) -> Result<bool, Error> {
        let attached = self
            .certificates
            .attach(list, id, part, file_name, encoded);
        self.certificates_changed()?;
        Ok(attached)
    }

    pub fn attach_certificate_slot(
        &mut self,
        slot: CertificateSlot,
        part: CertificatePart,
        file_name: &str,
        encoded: &str,
    ) -> Result<(), Error> {
        self.certificates.attach_slot(slot, part, file_name, encoded);
        self.certificates_changed()
    }

    fn certificates_changed(&mut self) -> Result<(), Error> {
        self.phase = Phase::Editing;
        self.run(TLS_EFFECTS)
    }

    pub fn field_value(&self, page: Page, field: &str) -> Result<&FieldValue, Error> {
        self.store.get(page, field)
    }

    pub fn derived_value(&self, page: Page, field: &str) -> Result<&DerivedValue, Error> {
        match self.store.get(page, field)? {
            FieldValue::Derived(value) => Ok(value),
            other => FieldTypeMismatchSnafu {
                page,
                field,
                expected: "derived",
                actual: other.kind().to_string(),
            }
            .fail(),
        }
    }

    pub fn page_validity(&self) -> &BTreeSet<Page> {
        &self.valid_pages
    }

    /// Errors of the last validation of `page`.
    pub fn validation_errors(&self, page: Page) -> ValidationResult {
        self.errors.get(&page).cloned().unwrap_or_default()
    }

    pub fn current_page(&self) -> Page {
        self.page
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn integration(&self) -> Integration {
        self.integration
    }

    pub fn advanced_mode(&self) -> bool {
        self.advanced_mode
    }

    /// Advanced mode only changes what a front end shows.
    pub fn set_advanced_mode(&mut self, advanced: bool) {
        self.advanced_mode = advanced;
    }

    pub fn namespace_status(&self) -> &NamespaceStatus {
        &self.namespace
    }

    pub fn certificates(&self) -> &Certificates {
        &self.certificates
    }

    pub fn store(&self) -> &FieldStore {
        &self.store
    }

    pub fn is_pending(&self, kind: LookupKind) -> bool {
        self.lookups.is_pending(kind)
    }
}
