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
use crate::wizard::store::FieldStore;
use crate::wizard::validation::{PageCheck, Rule, validate as run_rules};

/// Parses `key=value&key2=value2`. Every pair needs a key and a value.
pub fn parse_labels(labels: &str) -> Option<Vec<(String, String)>> {
    if labels.trim().is_empty() {
        return None;
    }
    labels
        .split('&')
        .map(|pair| match pair.split('=').collect::<Vec<_>>().as_slice() {
            [key, value] if !key.is_empty() && !value.is_empty() => {
                Some((key.to_string(), value.to_string()))
            }
            _ => None,
        })
        .collect()
}

pub fn validate(store: &FieldStore) -> PageCheck {
    let fields = store.page(Page::Affinity);
    let mut rules = Vec::new();

    if fields.text("podAffinity") == "nodeSelector" {
        let labels = fields.text("nodeSelectorLabels");
        rules.push(
            Rule::new("nodeSelectorLabels", labels)
                .required()
                .check(
                    parse_labels(labels).is_none(),
                    "You need to add at least one label key-pair",
                ),
        );
    }

    PageCheck::new(run_rules(rules), true)
}
