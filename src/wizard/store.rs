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

use crate::types::error::{Error, FieldTypeMismatchSnafu, UnknownFieldSnafu};
use crate::wizard::page::Page;
use crate::wizard::schema::{self, Fields};
use crate::wizard::validation::parse_int;
use crate::wizard::value::{DerivedValue, FieldValue};
use serde::Serialize;
use snafu::OptionExt;
use std::collections::BTreeMap;

/// Page-keyed field values of one wizard session.
///
/// Every page is always present. The store only stores: validation and
/// derived values are the controller's business.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldStore {
    pages: BTreeMap<Page, Fields>,
}

impl Default for FieldStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldStore {
    pub fn new() -> Self {
        Self {
            pages: Page::ALL
                .into_iter()
                .map(|page| (page, schema::defaults(page)))
                .collect(),
        }
    }

    pub fn get(&self, page: Page, field: &str) -> Result<&FieldValue, Error> {
        self.pages
            .get(&page)
            .and_then(|fields| fields.get(field))
            .context(UnknownFieldSnafu { page, field })
    }

    /// Replaces a value. The new value must have the kind of the current one.
    pub fn set(&mut self, page: Page, field: &str, value: FieldValue) -> Result<(), Error> {
        let slot = self
            .pages
            .get_mut(&page)
            .and_then(|fields| fields.get_mut(field))
            .context(UnknownFieldSnafu { page, field })?;

        if slot.kind() != value.kind() {
            return FieldTypeMismatchSnafu {
                page,
                field,
                expected: slot.kind().to_string(),
                actual: value.kind().to_string(),
            }
            .fail();
        }

        *slot = value;
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Immutable copy of every page.
    pub fn snapshot(&self) -> FieldStore {
        self.clone()
    }

    pub fn page(&self, page: Page) -> PageView<'_> {
        PageView {
            fields: self.pages.get(&page),
        }
    }

    pub fn fields(&self, page: Page) -> Option<&Fields> {
        self.pages.get(&page)
    }

    pub fn text(&self, page: Page, field: &str) -> &str {
        self.page(page).text(field)
    }

    pub fn flag(&self, page: Page, field: &str) -> bool {
        self.page(page).flag(field)
    }

    pub fn list(&self, page: Page, field: &str) -> &[String] {
        self.page(page).list(field)
    }

    pub fn int(&self, page: Page, field: &str) -> Option<i64> {
        self.page(page).int(field)
    }

    pub fn derived(&self, page: Page, field: &str) -> Option<&DerivedValue> {
        self.page(page).derived(field)
    }

    pub(crate) fn set_text(
        &mut self,
        page: Page,
        field: &str,
        value: impl Into<String>,
    ) -> Result<(), Error> {
        self.set(page, field, FieldValue::Text(value.into()))
    }

    pub(crate) fn set_derived(
        &mut self,
        page: Page,
        field: &str,
        value: DerivedValue,
    ) -> Result<(), Error> {
        self.set(page, field, FieldValue::Derived(value))
    }

    pub(crate) fn list_mut(&mut self, page: Page, field: &str) -> Result<&mut Vec<String>, Error> {
        match self
            .pages
            .get_mut(&page)
            .and_then(|fields| fields.get_mut(field))
        {
            Some(FieldValue::List(list)) => Ok(list),
            Some(other) => FieldTypeMismatchSnafu {
                page,
                field,
                expected: "list",
                actual: other.kind().to_string(),
            }
            .fail(),
            None => UnknownFieldSnafu { page, field }.fail(),
        }
    }
}

/// Lenient read access to one page. Missing fields and other kinds read
/// as empty values.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    fields: Option<&'a Fields>,
}

impl<'a> PageView<'a> {
    fn value(&self, field: &str) -> Option<&'a FieldValue> {
        self.fields?.get(field)
    }

    pub fn text(&self, field: &str) -> &'a str {
        self.value(field).and_then(FieldValue::as_text).unwrap_or("")
    }

    pub fn flag(&self, field: &str) -> bool {
        self.value(field)
            .and_then(FieldValue::as_flag)
            .unwrap_or(false)
    }

    pub fn list(&self, field: &str) -> &'a [String] {
        self.value(field).and_then(FieldValue::as_list).unwrap_or(&[])
    }

    pub fn int(&self, field: &str) -> Option<i64> {
        parse_int(self.text(field))
    }

    /// Text of `record.field`, e.g. `tenantSecurityContext.runAsUser`.
    pub fn record_text(&self, record: &str, field: &str) -> &'a str {
        self.value(record)
            .and_then(FieldValue::as_record)
            .and_then(|r| r.get(field))
            .and_then(FieldValue::as_text)
            .unwrap_or("")
    }

    pub fn record_flag(&self, record: &str, field: &str) -> bool {
        self.value(record)
            .and_then(FieldValue::as_record)
            .and_then(|r| r.get(field))
            .and_then(FieldValue::as_flag)
            .unwrap_or(false)
    }

    pub fn derived(&self, field: &str) -> Option<&'a DerivedValue> {
        self.value(field).and_then(FieldValue::as_derived)
    }
}
