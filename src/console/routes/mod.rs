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

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::console::{handlers, state::AppState};

/// Wizard session routes
pub fn wizard_routes() -> Router<AppState> {
    Router::new()
        .route("/wizards", post(handlers::wizards::create_wizard))
        .route(
            "/wizards/{id}",
            get(handlers::wizards::get_wizard).delete(handlers::wizards::delete_wizard),
        )
        .route("/wizards/{id}/page", put(handlers::wizards::set_page))
        .route(
            "/wizards/{id}/pages/{page}/fields/{field}",
            get(handlers::wizards::get_field).put(handlers::wizards::set_field),
        )
        .route(
            "/wizards/{id}/pages/{page}/errors",
            get(handlers::wizards::get_errors),
        )
        .route(
            "/wizards/{id}/pages/{page}/derived/{key}",
            get(handlers::wizards::get_derived),
        )
        .route("/wizards/{id}/submit", post(handlers::wizards::submit))
        .route("/wizards/{id}/reset", post(handlers::wizards::reset))
}
