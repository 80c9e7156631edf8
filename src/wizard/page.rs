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

use crate::types::error::{Error, PageOutOfRangeSnafu, UnknownPageSnafu};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString, IntoStaticStr};

/// One step of the tenant creation wizard.
///
/// The declaration order is the wizard order, `index()` follows it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Page {
    NameTenant,
    TenantSize,
    Configure,
    Affinity,
    IdentityProvider,
    Security,
    Encryption,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::NameTenant,
        Page::TenantSize,
        Page::Configure,
        Page::Affinity,
        Page::IdentityProvider,
        Page::Security,
        Page::Encryption,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Result<Page, Error> {
        Page::ALL.get(index).copied().ok_or_else(|| {
            PageOutOfRangeSnafu {
                index,
                count: Page::ALL.len(),
            }
            .build()
        })
    }

    pub fn parse(name: &str) -> Result<Page, Error> {
        Page::from_str(name).map_err(|_| UnknownPageSnafu { name }.build())
    }

    /// Every page except `nameTenant` is valid with its defaults: a tenant
    /// name and a namespace have to be chosen first.
    pub fn initially_valid(self) -> bool {
        self != Page::NameTenant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_order_matches_index() {
        for (i, page) in Page::ALL.iter().enumerate() {
            assert_eq!(page.index(), i);
            assert_eq!(Page::from_index(i).unwrap(), *page);
        }
        assert!(matches!(
            Page::from_index(7),
            Err(Error::PageOutOfRange { index: 7, count: 7 })
        ));
    }

    #[test]
    fn test_page_names_are_camel_case() {
        assert_eq!(Page::NameTenant.to_string(), "nameTenant");
        assert_eq!(Page::parse("identityProvider").unwrap(), Page::IdentityProvider);
        assert_eq!(
            serde_json::to_string(&Page::TenantSize).unwrap(),
            "\"tenantSize\""
        );
        assert!(Page::parse("images").is_err());
    }
}
