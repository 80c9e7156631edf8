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

use axum::http::{HeaderValue, Method, header};
use axum::{Router, http::StatusCode, response::IntoResponse, routing::get};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::console::{routes, state::AppState};

const CONSOLE_ORIGIN: &str = "http://localhost:3000";

/// Builds the console application.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/readyz", get(ready_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(HeaderValue::from_static(CONSOLE_ORIGIN))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
}

/// Serves the console on `port` until the process stops.
pub async fn run(port: u16, state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting tenant wizard console on port {}", port);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Console server listening on http://{}", addr);
    tracing::info!("API endpoints:");
    tracing::info!("  - POST /api/v1/wizards");
    tracing::info!("  - PUT  /api/v1/wizards/{{id}}/pages/{{page}}/fields/{{field}}");
    tracing::info!("  - POST /api/v1/wizards/{{id}}/submit");
    tracing::info!("  - GET  /healthz");

    axum::serve(listener, app(state)).await?;

    Ok(())
}

fn api_routes() -> Router<AppState> {
    Router::new().merge(routes::wizard_routes())
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn ready_check() -> impl IntoResponse {
    (StatusCode::OK, "Ready")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::FakeClusterApi;
    use crate::wizard::calc::presets::Integration;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state(api: FakeClusterApi) -> AppState {
        AppState::new(Arc::new(api), Integration::Default)
    }

    async fn call(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        let request = match body {
            Some(body) => request.body(Body::from(body.to_string())).unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn start(app: &Router) -> String {
        let (status, body) = call(app, Method::POST, "/api/v1/wizards", Some(json!({}))).await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    async fn set(app: &Router, id: &str, page: &str, field: &str, value: Value) -> StatusCode {
        call(
            app,
            Method::PUT,
            &format!("/api/v1/wizards/{}/pages/{}/fields/{}", id, page, field),
            Some(json!({ "value": value })),
        )
        .await
        .0
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = app(state(FakeClusterApi::default()));
        let request = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let request = Request::builder().uri("/readyz").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_wizard_flow() {
        let api = Arc::new(FakeClusterApi::default());
        let app = app(AppState::new(api.clone(), Integration::Default));
        let id = start(&app).await;

        let (status, body) = call(
            &app,
            Method::GET,
            &format!("/api/v1/wizards/{}", id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["canSubmit"], json!(false));
        assert_eq!(body["phase"], json!("editing"));

        let (status, body) = call(
            &app,
            Method::GET,
            &format!("/api/v1/wizards/{}/pages/nameTenant/errors", id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], json!(false));

        assert_eq!(
            set(&app, &id, "nameTenant", "tenantName", json!("tenant-a")).await,
            StatusCode::OK
        );
        assert_eq!(
            set(&app, &id, "nameTenant", "namespace", json!("tenants")).await,
            StatusCode::OK
        );

        let (_, body) = call(&app, Method::GET, &format!("/api/v1/wizards/{}", id), None).await;
        assert_eq!(body["canSubmit"], json!(true), "{}", body);

        let (status, body) = call(
            &app,
            Method::GET,
            &format!("/api/v1/wizards/{}/pages/nameTenant/fields/tenantName", id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["value"], json!("tenant-a"));

        let (status, _) = call(
            &app,
            Method::POST,
            &format!("/api/v1/wizards/{}/submit", id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(api.submitted().len(), 1);

        let (_, body) = call(&app, Method::GET, &format!("/api/v1/wizards/{}", id), None).await;
        assert_eq!(body["phase"], json!("submitted"));
    }

    #[tokio::test]
    async fn test_submit_before_ready_is_conflict() {
        let app = app(state(FakeClusterApi::default()));
        let id = start(&app).await;

        let (status, body) = call(
            &app,
            Method::POST,
            &format!("/api/v1/wizards/{}/submit", id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], json!("NotReady"));
        assert_eq!(body["details"], json!(["nameTenant"]));
    }

    #[tokio::test]
    async fn test_derived_fields_are_read_only() {
        let app = app(state(FakeClusterApi::default()));
        let id = start(&app).await;

        let (status, body) = call(
            &app,
            Method::GET,
            &format!("/api/v1/wizards/{}/pages/tenantSize/derived/distribution", id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["key"], json!("distribution"));

        let status = set(&app, &id, "tenantSize", "distribution", json!("x")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_wizard_and_page() {
        let app = app(state(FakeClusterApi::default()));
        let id = start(&app).await;

        let (status, _) = call(
            &app,
            Method::GET,
            &format!("/api/v1/wizards/{}", uuid::Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let status = set(&app, &id, "summary", "tenantName", json!("a")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(
            &app,
            Method::PUT,
            &format!("/api/v1/wizards/{}/page", id),
            Some(json!({ "page": 42 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rejected_submission_is_bad_gateway() {
        let app = app(state(FakeClusterApi {
            submit: Err("namespace quota exceeded".to_string()),
            ..Default::default()
        }));
        let id = start(&app).await;
        set(&app, &id, "nameTenant", "tenantName", json!("tenant-a")).await;
        set(&app, &id, "nameTenant", "namespace", json!("tenants")).await;

        let (status, body) = call(
            &app,
            Method::POST,
            &format!("/api/v1/wizards/{}/submit", id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["message"], json!("namespace quota exceeded"));

        let (_, body) = call(&app, Method::GET, &format!("/api/v1/wizards/{}", id), None).await;
        assert_eq!(body["canSubmit"], json!(true));
    }

    #[tokio::test]
    async fn test_delete_and_reset() {
        let app = app(state(FakeClusterApi::default()));
        let id = start(&app).await;

        let (status, body) = call(
            &app,
            Method::POST,
            &format!("/api/v1/wizards/{}/reset", id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phase"], json!("cancelled"));

        let (status, _) = call(
            &app,
            Method::DELETE,
            &format!("/api/v1/wizards/{}", id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = call(&app, Method::GET, &format!("/api/v1/wizards/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
