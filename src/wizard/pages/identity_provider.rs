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

pub const BUILT_IN: &str = "Built-in";
pub const OPENID: &str = "OpenID";
pub const ACTIVE_DIRECTORY: &str = "AD";

pub fn validate(store: &FieldStore) -> PageCheck {
    let fields = store.page(Page::IdentityProvider);
    let mut rules = Vec::new();
    let mut conditions = true;

    match fields.text("idpSelection") {
        BUILT_IN => {
            let access = fields.list("accessKeys");
            let secret = fields.list("secretKeys");
            conditions = !access.is_empty() && access.len() == secret.len();

            for (i, key) in access.iter().enumerate() {
                rules.push(
                    Rule::new(format!("accessKeys.{i}"), key)
                        .required()
                        .check(key.chars().count() < 3, "Access key must be at least 3 characters"),
                );
            }
            for (i, key) in secret.iter().enumerate() {
                rules.push(
                    Rule::new(format!("secretKeys.{i}"), key)
                        .required()
                        .check(key.chars().count() < 8, "Secret key must be at least 8 characters"),
                );
            }
        }
        OPENID => {
            for key in ["openIDConfigurationURL", "openIDClientID", "openIDSecretID"] {
                rules.push(Rule::new(key, fields.text(key)).required());
            }
        }
        ACTIVE_DIRECTORY => {
            for key in ["ADURL", "ADLookupBindDN"] {
                rules.push(Rule::new(key, fields.text(key)).required());
            }
        }
        other => {
            rules.push(
                Rule::new("idpSelection", other)
                    .required()
                    .check(true, format!("Unsupported identity provider '{other}'")),
            );
        }
    }

    PageCheck::new(run_rules(rules), conditions)
}
