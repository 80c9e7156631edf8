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
use crate::wizard::store::{FieldStore, PageView};
use crate::wizard::validation::{PageCheck, Rule, is_below, validate as run_rules};
use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^((.*?)/(.*?):(.+))$").expect("image pattern"));

const IMAGES: [(&str, &str); 5] = [
    ("imageName", "Format must be of form: 'minio/minio:VERSION'"),
    ("logSearchImage", "Format must be of form: 'minio/logsearchapi:VERSION'"),
    ("kesImage", "Format must be of form: 'minio/kes:VERSION'"),
    ("logSearchPostgresImage", "Format must be of form: 'library/postgres:VERSION'"),
    ("prometheusImage", "Format must be of form: 'minio/prometheus:VERSION'"),
];

/// Rules for a `runAsUser`/`runAsGroup`/`fsGroup` record.
pub(crate) fn security_context_rules<'a>(fields: PageView<'a>, record: &str) -> Vec<Rule<'a>> {
    ["runAsUser", "runAsGroup", "fsGroup"]
        .into_iter()
        .map(|id| {
            let value = fields.record_text(record, id);
            Rule::new(format!("{record}.{id}"), value)
                .required()
                .check(is_below(value, 0), format!("{id} must be present and be 0 or more"))
        })
        .collect()
}

fn storage_rules<'a>(fields: PageView<'a>, prefix: &str) -> Vec<Rule<'a>> {
    let class_key = format!("{prefix}SelectedStorageClass");
    let size_key = format!("{prefix}VolumeSize");
    let size = fields.text(&size_key);
    vec![
        Rule::new(class_key.clone(), fields.text(&class_key)).required(),
        Rule::new(size_key, size)
            .required()
            .check(is_below(size, 1), "Volume size must be present and be greater than 0"),
    ]
}

pub fn validate(store: &FieldStore) -> PageCheck {
    let fields = store.page(Page::Configure);
    let mut rules = Vec::new();

    if fields.flag("prometheusCustom") {
        rules.extend(storage_rules(fields, "prometheus"));
        rules.extend(security_context_rules(fields, "prometheusSecurityContext"));
    }
    if fields.flag("logSearchCustom") {
        rules.extend(storage_rules(fields, "logSearch"));
        rules.extend(security_context_rules(fields, "logSearchSecurityContext"));
        rules.extend(security_context_rules(fields, "logSearchPostgresSecurityContext"));
    }
    if fields.flag("tenantCustom") {
        rules.extend(security_context_rules(fields, "tenantSecurityContext"));
    }

    if fields.flag("customImage") {
        for (key, message) in IMAGES {
            rules.push(Rule::new(key, fields.text(key)).matches(&IMAGE, message));
        }
        if fields.flag("customDockerhub") {
            for key in ["imageRegistry", "imageRegistryUsername", "imageRegistryPassword"] {
                rules.push(Rule::new(key, fields.text(key)).required());
            }
        }
    }

    PageCheck::new(run_rules(rules), true)
}
