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
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("unknown field '{}' on page {}", field, page))]
    UnknownField { page: Page, field: String },

    #[snafu(display(
        "field '{}' on page {} expects a {} value, got {}",
        field,
        page,
        expected,
        actual
    ))]
    FieldTypeMismatch {
        page: Page,
        field: String,
        expected: String,
        actual: String,
    },

    #[snafu(display("field '{}' on page {} is computed and cannot be edited", field, page))]
    ReadOnlyField { page: Page, field: String },

    #[snafu(display("wizard page index {} is out of range (0..{})", index, count))]
    PageOutOfRange { index: usize, count: usize },

    #[snafu(display("unknown wizard page '{}'", name))]
    UnknownPage { name: String },

    #[snafu(display("tenant is not ready to be submitted, invalid pages: {}", pages.join(", ")))]
    NotReady { pages: Vec<String> },

    #[snafu(display("selected erasure code parity '{}' is not valid", parity))]
    InvalidParity { parity: String },

    #[snafu(display("'{}' is not a supported value for field '{}' on page {}", value, field, page))]
    UnsupportedSelection {
        page: Page,
        field: String,
        value: String,
    },

    #[snafu(display("tenant submission rejected: {}", message))]
    SubmissionRejected { message: String },

    #[snafu(display("serde_json error: {}", source))]
    SerdeJson { source: serde_json::Error },
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::SerdeJson { source }
    }
}
