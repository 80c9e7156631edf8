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

use crate::types::cluster::AllocatableResources;
use crate::wizard::calc::distribution::Distribution;
use crate::wizard::calc::erasure::ErasureCodeCalc;
use crate::wizard::calc::resources::{ResourceCeiling, ResourcesSize};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use strum::Display;

/// A computed record stored under its page. Always replaced as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DerivedValue {
    Distribution(Distribution),
    ErasureCode(ErasureCodeCalc),
    Allocatable(AllocatableResources),
    ResourceCeiling(ResourceCeiling),
    ResourcesSize(ResourcesSize),
}

impl DerivedValue {
    pub fn kind(&self) -> DerivedKind {
        match self {
            DerivedValue::Distribution(_) => DerivedKind::Distribution,
            DerivedValue::ErasureCode(_) => DerivedKind::ErasureCode,
            DerivedValue::Allocatable(_) => DerivedKind::Allocatable,
            DerivedValue::ResourceCeiling(_) => DerivedKind::ResourceCeiling,
            DerivedValue::ResourcesSize(_) => DerivedKind::ResourcesSize,
        }
    }

    /// The inline error message, empty when the value is usable.
    pub fn error(&self) -> &str {
        match self {
            DerivedValue::Distribution(d) => &d.error,
            DerivedValue::ErasureCode(e) => &e.error,
            DerivedValue::Allocatable(_) => "",
            DerivedValue::ResourceCeiling(c) => &c.error,
            DerivedValue::ResourcesSize(s) => &s.error,
        }
    }

    /// The zeroed value of a kind.
    pub fn empty(kind: DerivedKind) -> Self {
        match kind {
            DerivedKind::Distribution => DerivedValue::Distribution(Default::default()),
            DerivedKind::ErasureCode => DerivedValue::ErasureCode(ErasureCodeCalc {
                raw_capacity: "0".to_string(),
                ..Default::default()
            }),
            DerivedKind::Allocatable => DerivedValue::Allocatable(Default::default()),
            DerivedKind::ResourceCeiling => DerivedValue::ResourceCeiling(Default::default()),
            DerivedKind::ResourcesSize => DerivedValue::ResourcesSize(Default::default()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "camelCase")]
pub enum DerivedKind {
    Distribution,
    ErasureCode,
    Allocatable,
    ResourceCeiling,
    ResourcesSize,
}

/// Value of one wizard field.
///
/// Numbers are kept as text the way they were typed; validators parse them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
    List(Vec<String>),
    Derived(DerivedValue),
    Record(BTreeMap<String, FieldValue>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Flag,
    Text,
    List,
    Record,
    Derived(DerivedKind),
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Flag => f.write_str("flag"),
            FieldKind::Text => f.write_str("text"),
            FieldKind::List => f.write_str("list"),
            FieldKind::Record => f.write_str("record"),
            FieldKind::Derived(kind) => write!(f, "{kind}"),
        }
    }
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Flag(_) => FieldKind::Flag,
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::List(_) => FieldKind::List,
            FieldValue::Record(_) => FieldKind::Record,
            FieldValue::Derived(d) => FieldKind::Derived(d.kind()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&BTreeMap<String, FieldValue>> {
        match self {
            FieldValue::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_derived(&self) -> Option<&DerivedValue> {
        match self {
            FieldValue::Derived(d) => Some(d),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<DerivedValue> for FieldValue {
    fn from(value: DerivedValue) -> Self {
        FieldValue::Derived(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::calc::distribution::Distribution;

    #[test]
    fn test_untagged_json_shapes() {
        let flag: FieldValue = serde_json::from_str("true").unwrap();
        assert_eq!(flag, FieldValue::Flag(true));

        let text: FieldValue = serde_json::from_str("\"4\"").unwrap();
        assert_eq!(text.kind(), FieldKind::Text);

        let record: FieldValue =
            serde_json::from_str(r#"{"runAsUser": "1000", "runAsNonRoot": true}"#).unwrap();
        assert_eq!(record.kind(), FieldKind::Record);
    }

    #[test]
    fn test_derived_round_trips_with_kind_tag() {
        let value = FieldValue::Derived(DerivedValue::Distribution(Distribution {
            nodes: 4,
            ..Default::default()
        }));
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["kind"], "distribution");
        assert_eq!(json["persistentVolumes"], 0);

        let back: FieldValue = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind(), FieldKind::Derived(DerivedKind::Distribution));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(FieldKind::Text.to_string(), "text");
        assert_eq!(
            FieldKind::Derived(DerivedKind::ErasureCode).to_string(),
            "erasureCode"
        );
    }
}
