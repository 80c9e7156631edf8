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

//! State engine of the "Create Tenant" wizard.

pub mod assemble;
pub mod calc;
pub mod certificates;
pub mod controller;
pub mod lookup;
pub mod page;
pub mod pages;
pub mod schema;
pub mod session;
pub mod store;
pub mod validation;
pub mod value;

pub use controller::{Phase, WizardController};
pub use page::Page;
pub use session::Session;
pub use value::{DerivedValue, FieldValue};
