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

use super::ValidationContext;
use crate::wizard::calc::resources::ResourceCeiling;
use crate::wizard::calc::units::{GIB, nice_bytes, to_bytes};
use crate::wizard::lookup::LookupKind;
use crate::wizard::page::Page;
use crate::wizard::store::FieldStore;
use crate::wizard::validation::{PageCheck, Rule, is_below, parse_int, validate as run_rules};
use crate::wizard::value::DerivedValue;

fn ceiling(store: &FieldStore) -> ResourceCeiling {
    match store.derived(Page::TenantSize, "resourceCeiling") {
        Some(DerivedValue::ResourceCeiling(c)) => c.clone(),
        _ => ResourceCeiling::default(),
    }
}

fn derived_error<'a>(store: &'a FieldStore, field: &str) -> &'a str {
    store
        .derived(Page::TenantSize, field)
        .map(DerivedValue::error)
        .unwrap_or("")
}

pub fn validate(store: &FieldStore, ctx: &ValidationContext<'_>) -> PageCheck {
    let fields = store.page(Page::TenantSize);
    let ceiling = ceiling(store);
    let known = ceiling.is_known();

    let nodes = fields.text("nodes");
    let mut nodes_rule = Rule::new("nodes", nodes)
        .required()
        .check(is_below(nodes, 4), "Number of nodes cannot be less than 4");
    if let Some(message) = ctx.lookup_error(LookupKind::Allocatable) {
        nodes_rule = nodes_rule.check(true, message);
    }

    let volume_size = fields.text("volumeSize");
    let storage_class = store.text(Page::NameTenant, "selectedStorageClass");
    let limit = ctx
        .namespace
        .info()
        .and_then(|info| info.limit_sizes.get(storage_class))
        .copied();
    let bytes = to_bytes(volume_size, fields.text("sizeFactor"));
    let volume_out_of_range =
        bytes.is_none_or(|b| b < GIB || limit.is_some_and(|limit| b > limit));
    let volume_message = match limit {
        Some(limit) => format!(
            "Volume size must be greater than 1Gi and less than {}",
            nice_bytes(limit)
        ),
        None => "Volume size must be greater than 1Gi".to_string(),
    };

    let drives = fields.text("drivesPerServer");

    let max_cpu = i64::try_from(ceiling.max_cpu).unwrap_or(i64::MAX);
    let max_memory = i64::try_from(ceiling.max_memory_gib).unwrap_or(i64::MAX);

    let cpu = fields.text("resourcesCPURequest");
    let cpu_value = parse_int(cpu);
    let memory = fields.text("resourcesMemoryRequest");
    let memory_value = parse_int(memory);

    let mut rules = vec![
        nodes_rule,
        Rule::new("volumeSize", volume_size)
            .required()
            .check(volume_out_of_range, volume_message),
        Rule::new("drivesPerServer", drives)
            .required()
            .check(is_below(drives, 1), "There must be at least one drive"),
        Rule::new("resourcesCPURequest", cpu)
            .required()
            .check(cpu_value.is_none(), "Invalid number")
            .check(
                known && cpu_value.is_some_and(|v| v > max_cpu),
                format!("Request exceeds available cores ({})", ceiling.max_cpu),
            )
            .check(is_below(cpu, 1), "At least one core must be requested"),
        Rule::new("resourcesMemoryRequest", memory)
            .required()
            .check(memory_value.is_none(), "Invalid number")
            .check(
                known && memory_value.is_some_and(|v| v > max_memory),
                format!(
                    "Request exceeds available memory across a single node ({}Gi)",
                    ceiling.max_memory_gib
                ),
            )
            .check(is_below(memory, 2), "Memory request must be at least 2Gi"),
    ];

    if fields.flag("resourcesSpecifyLimit") {
        let cpu_limit = fields.text("resourcesCPULimit");
        let memory_limit = fields.text("resourcesMemoryLimit");
        rules.push(
            Rule::new("resourcesCPULimit", cpu_limit)
                .check(parse_int(cpu_limit).is_none(), "Invalid number")
                .check(
                    cpu_value.is_some_and(|r| is_below(cpu_limit, r)),
                    "CPU limit cannot be lower than the request",
                ),
        );
        rules.push(
            Rule::new("resourcesMemoryLimit", memory_limit)
                .check(parse_int(memory_limit).is_none(), "Invalid number")
                .check(
                    memory_value.is_some_and(|r| is_below(memory_limit, r)),
                    "Memory limit cannot be lower than the request",
                ),
        );
    }

    let mut errors = run_rules(rules);
    if let Some(message) = ctx.lookup_error(LookupKind::ParityChoices) {
        errors
            .entry("ecParity".to_string())
            .or_insert_with(|| message.to_string());
    }

    let conditions = derived_error(store, "distribution").is_empty()
        && derived_error(store, "ecParityCalc").is_empty()
        && derived_error(store, "resourcesSize").is_empty()
        && !is_below(nodes, 4)
        && !fields.text("ecParity").is_empty()
        && !ctx.is_pending(LookupKind::ParityChoices)
        && !ctx.is_pending(LookupKind::Allocatable);

    PageCheck::new(errors, conditions)
}
