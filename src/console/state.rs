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

use crate::console::error::{self, Result};
use crate::context::ClusterApi;
use crate::wizard::Session;
use crate::wizard::calc::presets::Integration;
use snafu::OptionExt;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

/// Wizards untouched for this long are dropped.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

struct Entry {
    session: Arc<Session>,
    last_used: Instant,
}

/// Console state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn ClusterApi>,
    /// Integration new wizards start with unless the request names one.
    pub integration: Integration,
    idle_timeout: Duration,
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
}

impl AppState {
    pub fn new(api: Arc<dyn ClusterApi>, integration: Integration) -> Self {
        Self {
            api,
            integration,
            idle_timeout: SESSION_IDLE_TIMEOUT,
            sessions: Arc::default(),
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    fn not_found(id: Uuid) -> error::NotFoundSnafu<String> {
        error::NotFoundSnafu {
            resource: format!("wizard {}", id),
        }
    }

    /// Stores `session` and drops wizards that sat idle past the timeout.
    pub async fn insert(&self, session: Session) -> Uuid {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_used) < self.idle_timeout);
        let expired = before - sessions.len();
        if expired > 0 {
            info!(expired, "dropped idle wizards");
        }

        let id = Uuid::new_v4();
        sessions.insert(
            id,
            Entry {
                session: Arc::new(session),
                last_used: now,
            },
        );
        id
    }

    pub async fn session(&self, id: Uuid) -> Result<Arc<Session>> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id).context(Self::not_found(id))?;
        if now.duration_since(entry.last_used) >= self.idle_timeout {
            sessions.remove(&id);
            info!(%id, "wizard expired");
            return Self::not_found(id).fail();
        }
        entry.last_used = now;
        Ok(entry.session.clone())
    }

    pub async fn remove(&self, id: Uuid) -> Result<()> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .context(Self::not_found(id))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::error::Error;
    use crate::tests::FakeClusterApi;

    async fn start(state: &AppState) -> Uuid {
        let session = Session::start(state.api.clone(), Integration::Default)
            .await
            .unwrap();
        state.insert(session).await
    }

    fn state() -> AppState {
        AppState::new(Arc::new(FakeClusterApi::default()), Integration::Default)
            .with_idle_timeout(Duration::from_secs(60))
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_wizard_expires() {
        let state = state();
        let id = start(&state).await;
        assert!(state.session(id).await.is_ok());

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(matches!(
            state.session(id).await,
            Err(Error::NotFound { .. })
        ));
        assert_eq!(state.len().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_wizard_drops_idle_ones() {
        let state = state();
        let used = start(&state).await;
        let idle = start(&state).await;

        tokio::time::advance(Duration::from_secs(30)).await;
        state.session(used).await.unwrap();
        tokio::time::advance(Duration::from_secs(40)).await;

        let fresh = start(&state).await;
        assert_eq!(state.len().await, 2);
        assert!(state.session(used).await.is_ok());
        assert!(state.session(fresh).await.is_ok());
        assert!(state.session(idle).await.is_err());
    }
}
