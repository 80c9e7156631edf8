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

use crate::types::cluster::{AllocatableResources, NamespaceInfo};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::Display;

/// Remote lookups a wizard depends on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum LookupKind {
    Namespace,
    ParityChoices,
    Allocatable,
}

/// Identifies one issued lookup. Only the latest ticket of a kind applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub kind: LookupKind,
    pub seq: u64,
}

/// A lookup the controller wants performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Lookup {
    Namespace {
        ticket: Ticket,
        namespace: String,
    },
    ParityChoices {
        ticket: Ticket,
        nodes: u64,
        drives_per_server: u64,
    },
    Allocatable {
        ticket: Ticket,
        nodes: u64,
    },
}

impl Lookup {
    pub fn ticket(&self) -> Ticket {
        match self {
            Lookup::Namespace { ticket, .. }
            | Lookup::ParityChoices { ticket, .. }
            | Lookup::Allocatable { ticket, .. } => *ticket,
        }
    }
}

/// Response to a [`Lookup`], carried back with its ticket. Failures hold the
/// collaborator's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Namespace(Ticket, Result<NamespaceInfo, String>),
    ParityChoices(Ticket, Result<Vec<String>, String>),
    Allocatable(Ticket, Result<AllocatableResources, String>),
}

impl LookupOutcome {
    pub fn ticket(&self) -> Ticket {
        match self {
            LookupOutcome::Namespace(ticket, _)
            | LookupOutcome::ParityChoices(ticket, _)
            | LookupOutcome::Allocatable(ticket, _) => *ticket,
        }
    }
}

/// Last-request-wins bookkeeping. Sequence numbers keep increasing across
/// `clear`, so tickets issued before a reset never match again.
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    next: u64,
    pending: BTreeMap<LookupKind, u64>,
}

impl Sequencer {
    pub fn issue(&mut self, kind: LookupKind) -> Ticket {
        self.next += 1;
        self.pending.insert(kind, self.next);
        Ticket {
            kind,
            seq: self.next,
        }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.pending.get(&ticket.kind) == Some(&ticket.seq)
    }

    /// Settles `ticket` if it is the latest of its kind.
    pub fn complete(&mut self, ticket: Ticket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.pending.remove(&ticket.kind);
        true
    }

    /// Forgets the outstanding lookup of `kind`; its response will be dropped.
    pub fn cancel(&mut self, kind: LookupKind) {
        self.pending.remove(&kind);
    }

    pub fn is_pending(&self, kind: LookupKind) -> bool {
        self.pending.contains_key(&kind)
    }

    pub fn any_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
