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

//! Declarative field rules.
//!
//! Rules are evaluated in order and the first failing rule for a field is
//! the one reported. Numbers are read with a decimal prefix parse, so `"12Gi"`
//! reads as 12 while `"abc"` has no value and fails every numeric bound.

use regex::Regex;
use std::collections::BTreeMap;

/// Field key to message, scoped to one page.
pub type ValidationResult = BTreeMap<String, String>;

pub const EMPTY_FIELD: &str = "Field cannot be empty";

/// Reads the leading decimal integer of `value`, skipping leading whitespace.
pub fn parse_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let parsed: i64 = digits[..end].parse().ok()?;
    Some(if negative { -parsed } else { parsed })
}

/// True when `value` is not a number or is below `min`.
pub fn is_below(value: &str, min: i64) -> bool {
    parse_int(value).is_none_or(|v| v < min)
}

/// True when `value` is not a number or is above `max`.
pub fn is_above(value: &str, max: i64) -> bool {
    parse_int(value).is_none_or(|v| v > max)
}

#[derive(Debug, Clone)]
pub struct Rule<'a> {
    key: String,
    value: &'a str,
    required: bool,
    pattern: Option<(&'a Regex, &'a str)>,
    checks: Vec<(bool, String)>,
}

impl<'a> Rule<'a> {
    pub fn new(key: impl Into<String>, value: &'a str) -> Self {
        Self {
            key: key.into(),
            value,
            required: false,
            pattern: None,
            checks: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn required_if(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// A pattern mismatch reports `message` and skips the custom checks.
    pub fn matches(mut self, pattern: &'a Regex, message: &'a str) -> Self {
        self.pattern = Some((pattern, message));
        self
    }

    /// Adds a custom check; `failed` is evaluated by the caller.
    pub fn check(mut self, failed: bool, message: impl Into<String>) -> Self {
        self.checks.push((failed, message.into()));
        self
    }

    fn evaluate(&self) -> Option<String> {
        if self.value.trim().is_empty() {
            return self.required.then(|| EMPTY_FIELD.to_string());
        }

        if let Some((pattern, message)) = self.pattern {
            if !pattern.is_match(self.value) {
                return Some(message.to_string());
            }
        }

        self.checks
            .iter()
            .find(|(failed, _)| *failed)
            .map(|(_, message)| message.clone())
    }
}

pub fn validate<'a>(rules: impl IntoIterator<Item = Rule<'a>>) -> ValidationResult {
    let mut result = ValidationResult::new();
    for rule in rules {
        if result.contains_key(&rule.key) {
            continue;
        }
        if let Some(message) = rule.evaluate() {
            result.insert(rule.key, message);
        }
    }
    result
}

/// Outcome of validating one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCheck {
    pub errors: ValidationResult,
    pub valid: bool,
}

impl PageCheck {
    /// A page is valid when no field failed and `conditions` hold.
    pub fn new(errors: ValidationResult, conditions: bool) -> Self {
        let valid = errors.is_empty() && conditions;
        Self { errors, valid }
    }
}
