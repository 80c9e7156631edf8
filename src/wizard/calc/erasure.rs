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

use serde::{Deserialize, Serialize};

/// Capacity figures for one parity choice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageFactor {
    pub erasure_code: String,
    pub storage_factor: f64,
    /// Usable bytes, as a decimal string.
    pub max_capacity: String,
    pub max_failure_tolerations: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErasureCodeCalc {
    pub error: String,
    #[serde(rename = "defaultEC")]
    pub default_ec: String,
    pub erasure_code_set: u64,
    #[serde(rename = "maxEC")]
    pub max_ec: String,
    /// Raw bytes, as a decimal string.
    pub raw_capacity: String,
    pub storage_factors: Vec<StorageFactor>,
}

impl ErasureCodeCalc {
    fn failed(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            raw_capacity: "0".to_string(),
            ..Default::default()
        }
    }
}

/// Parity of an `EC:n` label.
pub fn parity_of(label: &str) -> Option<u64> {
    label.strip_prefix("EC:")?.trim().parse().ok()
}

/// Parity picked when the cluster offers it.
pub const PREFERRED_PARITY: &str = "EC:4";

/// Capacity figures for every offered parity. The erasure set spans twice
/// the highest offered parity; the default is [`PREFERRED_PARITY`] when
/// offered, the highest parity otherwise.
pub fn calculate(
    choices: &[String],
    persistent_volumes: u64,
    pv_size: u64,
    nodes: u64,
) -> ErasureCodeCalc {
    if choices.is_empty() {
        return ErasureCodeCalc::failed("No erasure code parity choices are available");
    }
    if nodes == 0 || persistent_volumes == 0 || pv_size == 0 {
        return ErasureCodeCalc::failed("Not enough nodes or drives to calculate erasure code");
    }

    let offered: Vec<(&String, u64)> = choices
        .iter()
        .filter_map(|label| parity_of(label).map(|parity| (label, parity)))
        .collect();
    let Some(&(max_label, max_parity)) = offered.iter().max_by_key(|(_, parity)| *parity) else {
        return ErasureCodeCalc::failed("No valid erasure code parity choices are available");
    };
    if max_parity == 0 {
        return ErasureCodeCalc::failed("Erasure code parity must be at least EC:1");
    }
    let set_size = max_parity.saturating_mul(2);

    let Some(raw) = persistent_volumes.checked_mul(pv_size) else {
        return ErasureCodeCalc::failed("Total capacity is too large");
    };

    let storage_factors = offered
        .iter()
        .map(|&(label, parity)| {
            let factor = set_size as f64 / (set_size - parity) as f64;
            let usable = (raw as f64 / factor).floor() as u64;
            let kept = (persistent_volumes as f64 / factor).floor() as u64;
            StorageFactor {
                erasure_code: label.clone(),
                storage_factor: factor,
                max_capacity: usable.to_string(),
                max_failure_tolerations: persistent_volumes.saturating_sub(kept),
            }
        })
        .collect();

    let default_ec = offered
        .iter()
        .find(|(label, _)| label.as_str() == PREFERRED_PARITY)
        .map_or(max_label, |(label, _)| *label)
        .clone();

    ErasureCodeCalc {
        error: String::new(),
        default_ec,
        erasure_code_set: set_size,
        max_ec: max_label.clone(),
        raw_capacity: raw.to_string(),
        storage_factors,
    }
}
