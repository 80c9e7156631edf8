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

use crate::context::ClusterApi;
use crate::types::cluster::CreateTenantResponse;
use crate::types::error::{Error, SubmissionRejectedSnafu};
use crate::wizard::calc::presets::Integration;
use crate::wizard::controller::WizardController;
use crate::wizard::lookup::{Lookup, LookupOutcome};
use crate::wizard::page::Page;
use crate::wizard::value::FieldValue;
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Performs one lookup. Failures are carried back as their user-facing
/// message so the controller can show them on the page.
pub async fn resolve(api: &dyn ClusterApi, lookup: Lookup) -> LookupOutcome {
    match lookup {
        Lookup::Namespace { ticket, namespace } => LookupOutcome::Namespace(
            ticket,
            api.namespace_info(&namespace)
                .await
                .map_err(|e| e.user_message()),
        ),
        Lookup::ParityChoices {
            ticket,
            nodes,
            drives_per_server,
        } => LookupOutcome::ParityChoices(
            ticket,
            api.parity_choices(nodes, drives_per_server)
                .await
                .map_err(|e| e.user_message()),
        ),
        Lookup::Allocatable { ticket, nodes } => LookupOutcome::Allocatable(
            ticket,
            api.allocatable_resources(nodes)
                .await
                .map_err(|e| e.user_message()),
        ),
    }
}

/// A wizard bound to the cluster it creates the tenant in.
///
/// The controller is only locked while it is read or changed; lookups run
/// without the lock so edits made meanwhile issue newer tickets and the
/// older responses are dropped on arrival.
pub struct Session {
    wizard: Mutex<WizardController>,
    api: Arc<dyn ClusterApi>,
}

impl Session {
    pub async fn start(api: Arc<dyn ClusterApi>, integration: Integration) -> Result<Self, Error> {
        let mut wizard = WizardController::new(integration);
        wizard.bootstrap()?;
        let session = Self {
            wizard: Mutex::new(wizard),
            api,
        };
        session.settle().await?;
        Ok(session)
    }

    pub async fn lock(&self) -> MutexGuard<'_, WizardController> {
        self.wizard.lock().await
    }

    /// Runs queued lookups until none are left. Returns how many responses
    /// were applied.
    pub async fn settle(&self) -> Result<usize, Error> {
        let mut applied = 0;
        loop {
            let lookups = self.wizard.lock().await.take_lookups();
            if lookups.is_empty() {
                return Ok(applied);
            }
            debug!(count = lookups.len(), "running lookups");

            let outcomes = join_all(
                lookups
                    .into_iter()
                    .map(|lookup| resolve(self.api.as_ref(), lookup)),
            )
            .await;

            let mut wizard = self.wizard.lock().await;
            for outcome in outcomes {
                if wizard.apply(outcome)? {
                    applied += 1;
                }
            }
        }
    }

    /// Edits a field and waits for the lookups the edit triggered.
    pub async fn update_field(
        &self,
        page: Page,
        field: &str,
        value: FieldValue,
    ) -> Result<(), Error> {
        self.wizard.lock().await.update_field(page, field, value)?;
        self.settle().await?;
        Ok(())
    }

    pub async fn reset(&self) -> Result<(), Error> {
        {
            let mut wizard = self.wizard.lock().await;
            wizard.reset();
            wizard.bootstrap()?;
        }
        self.settle().await?;
        Ok(())
    }

    /// Sends the assembled request. The wizard starts over once the cluster
    /// accepted it; a rejection leaves every field as it was.
    pub async fn submit(&self) -> Result<CreateTenantResponse, Error> {
        let request = self.wizard.lock().await.assemble_submission()?;

        match self.api.create_tenant(&request).await {
            Ok(response) => {
                info!(tenant = %request.name, namespace = %request.namespace, "tenant created");
                let mut wizard = self.wizard.lock().await;
                wizard.mark_submitted();
                wizard.bootstrap()?;
                drop(wizard);
                self.settle().await?;
                Ok(response)
            }
            Err(err) => {
                warn!(tenant = %request.name, error = %err, "tenant creation failed");
                SubmissionRejectedSnafu {
                    message: err.user_message(),
                }
                .fail()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::FakeClusterApi;
    use crate::wizard::controller::Phase;
    use crate::wizard::lookup::LookupKind;

    async fn named(api: Arc<FakeClusterApi>) -> Session {
        let session = Session::start(api, Integration::Default).await.unwrap();
        session
            .update_field(Page::NameTenant, "tenantName", "tenant-a".into())
            .await
            .unwrap();
        session
            .update_field(Page::NameTenant, "namespace", "tenants".into())
            .await
            .unwrap();
        session
    }

    #[tokio::test]
    async fn test_start_settles_bootstrap_lookups() {
        let api = Arc::new(FakeClusterApi::default());
        let session = Session::start(api.clone(), Integration::Default)
            .await
            .unwrap();

        let wizard = session.lock().await;
        assert!(!wizard.is_pending(LookupKind::ParityChoices));
        assert!(!wizard.is_pending(LookupKind::Allocatable));
        assert!(wizard.page_validity().contains(&Page::TenantSize));
        assert!(!wizard.can_submit());
    }

    #[tokio::test]
    async fn test_named_session_can_submit() {
        let api = Arc::new(FakeClusterApi::default());
        let session = named(api).await;
        assert!(session.lock().await.can_submit());
    }

    #[tokio::test]
    async fn test_lookup_failure_is_shown_on_page() {
        let api = Arc::new(FakeClusterApi {
            parity: Err("invalid number of nodes".to_string()),
            ..Default::default()
        });
        let session = named(api).await;

        let wizard = session.lock().await;
        assert!(!wizard.page_validity().contains(&Page::TenantSize));
        assert!(!wizard.can_submit());
    }

    #[tokio::test]
    async fn test_accepted_submission_starts_over() {
        let api = Arc::new(FakeClusterApi::default());
        let session = named(api.clone()).await;

        session.submit().await.unwrap();

        let submitted = api.submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].name, "tenant-a");
        assert_eq!(submitted[0].namespace, "tenants");

        let wizard = session.lock().await;
        assert_eq!(wizard.phase(), Phase::Submitted);
        assert_eq!(
            wizard
                .field_value(Page::NameTenant, "tenantName")
                .unwrap()
                .as_text(),
            Some("")
        );
    }

    #[tokio::test]
    async fn test_rejected_submission_keeps_fields() {
        let api = Arc::new(FakeClusterApi {
            submit: Err("tenant already exists".to_string()),
            ..Default::default()
        });
        let session = named(api).await;

        let err = session.submit().await.unwrap_err();
        assert!(matches!(
            err,
            Error::SubmissionRejected { ref message } if message == "tenant already exists"
        ));

        let wizard = session.lock().await;
        assert_eq!(wizard.phase(), Phase::Editing);
        assert!(wizard.can_submit());
        assert_eq!(
            wizard
                .field_value(Page::NameTenant, "tenantName")
                .unwrap()
                .as_text(),
            Some("tenant-a")
        );
    }

    #[tokio::test]
    async fn test_incomplete_wizard_is_not_sent() {
        let api = Arc::new(FakeClusterApi::default());
        let session = Session::start(api.clone(), Integration::Default)
            .await
            .unwrap();

        let err = session.submit().await.unwrap_err();
        assert!(matches!(err, Error::NotReady { .. }));
        assert!(api.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_reset_restarts_lookups() {
        let api = Arc::new(FakeClusterApi::default());
        let session = named(api).await;

        session.reset().await.unwrap();

        let wizard = session.lock().await;
        assert_eq!(wizard.phase(), Phase::Cancelled);
        assert!(wizard.page_validity().contains(&Page::TenantSize));
        assert!(!wizard.page_validity().contains(&Page::NameTenant));
    }
}
