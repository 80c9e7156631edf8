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

use crate::wizard::validation::parse_int;

pub const KIB: u64 = 1 << 10;
pub const GIB: u64 = 1 << 30;
pub const TIB: u64 = 1 << 40;

const BINARY: [&str; 7] = ["B", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei"];
const DECIMAL: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];
const NICE: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

/// Bytes in one `unit`, binary (`Gi`) or decimal (`GB`).
pub fn multiplier(unit: &str) -> Option<u64> {
    if let Some(exp) = BINARY.iter().position(|u| *u == unit) {
        return 1024u64.checked_pow(exp as u32);
    }
    DECIMAL
        .iter()
        .position(|u| *u == unit)
        .and_then(|exp| 1000u64.checked_pow(exp as u32))
}

/// Converts `value` of `unit` to bytes. Negative, non-numeric or
/// overflowing values have no byte count.
pub fn to_bytes(value: &str, unit: &str) -> Option<u64> {
    let amount = u64::try_from(parse_int(value)?).ok()?;
    amount.checked_mul(multiplier(unit)?)
}

/// Human readable binary size, e.g. `12 TiB` or `1.5 GiB`.
pub fn nice_bytes(bytes: u64) -> String {
    let mut level = 0;
    let mut n = bytes as f64;
    while n >= 1024.0 && level < BINARY.len() - 1 {
        n /= 1024.0;
        level += 1;
    }

    let unit = NICE[level];
    if n >= 10.0 || level == 0 {
        format!("{:.0} {}", n, unit)
    } else {
        format!("{:.1} {}", n, unit)
    }
}
