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
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use snafu::Snafu;

use crate::types;

/// Console API error.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Not found: {}", resource))]
    NotFound { resource: String },

    #[snafu(display("Bad request: {}", message))]
    BadRequest { message: String },

    #[snafu(transparent)]
    Wizard { source: types::error::Error },
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

impl Error {
    fn parts(&self) -> (StatusCode, &'static str, Option<Vec<String>>) {
        use types::error::Error as W;
        match self {
            Error::NotFound { .. } => (StatusCode::NOT_FOUND, "NotFound", None),
            Error::BadRequest { .. } => (StatusCode::BAD_REQUEST, "BadRequest", None),
            Error::Wizard { source } => match source {
                W::UnknownField { .. } | W::UnknownPage { .. } => {
                    (StatusCode::NOT_FOUND, "NotFound", None)
                }
                W::NotReady { pages } => (StatusCode::CONFLICT, "NotReady", Some(pages.clone())),
                W::SubmissionRejected { .. } => {
                    (StatusCode::BAD_GATEWAY, "SubmissionRejected", None)
                }
                W::SerdeJson { .. } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalServerError",
                    None,
                ),
                W::FieldTypeMismatch { .. }
                | W::ReadOnlyField { .. }
                | W::PageOutOfRange { .. }
                | W::InvalidParity { .. }
                | W::UnsupportedSelection { .. } => (StatusCode::BAD_REQUEST, "BadRequest", None),
            },
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type, details) = self.parts();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let message = match &self {
            Error::Wizard {
                source: types::error::Error::SubmissionRejected { message },
            } => message.clone(),
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Result type for Console API
pub type Result<T> = std::result::Result<T, Error>;
