//! Shared helpers for the HTTP integration tests

use airdesk::{api::create_router, config::Config, state::AppState};
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde::Serialize;
use serde_json::{json, Value};
use std::future::Future;
use std::pin::Pin;
use tempfile::TempDir;
use tower::ServiceExt;

pub type TestFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>>>>;

/// A router over its own temporary data directory.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub data_dir: TempDir,
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Vec<u8>>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Vec<u8>)> {
        self.request_with_extra_headers(method, uri, body, &[]).await
    }

    pub async fn request_with_extra_headers(
        &self,
        method: Method,
        uri: &str,
        body: Option<Vec<u8>>,
        extra_headers: &[(&str, &str)],
    ) -> anyhow::Result<(StatusCode, HeaderMap, Vec<u8>)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        for (name, value) in extra_headers {
            builder = builder.header(*name, *value);
        }
        let request = builder.body(body.map(Body::from).unwrap_or_else(Body::empty))?;

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await?.to_bytes();
        Ok((status, headers, bytes.to_vec()))
    }

    /// Send `body` as JSON and decode the JSON response (`null` when empty).
    pub async fn json(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Value)> {
        let body = body.map(|v| to_json_body(&v)).transpose()?;
        let (status, headers, bytes) = self.request(method, uri, body).await?;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((status, headers, value))
    }
}

pub async fn with_test_app<F>(test: F) -> anyhow::Result<()>
where
    F: FnOnce(TestApp) -> TestFuture,
{
    with_test_app_with_config(|_| {}, test).await
}

pub async fn with_test_app_with_config<C, F>(configure: C, test: F) -> anyhow::Result<()>
where
    C: FnOnce(&mut Config),
    F: FnOnce(TestApp) -> TestFuture,
{
    let data_dir = TempDir::new()?;
    let mut config = Config::default();
    config.storage.data_dir = data_dir.path().to_path_buf();
    configure(&mut config);

    let state = AppState::new(config)?;
    let router = create_router(state.clone());
    test(TestApp {
        router,
        state,
        data_dir,
    })
    .await
}

pub fn to_json_body<T: Serialize>(value: &T) -> anyhow::Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

pub fn assert_status(actual: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(
        actual, expected,
        "{context}: expected {expected}, got {actual}"
    );
}

/// Assert the error envelope carries `code`.
pub fn assert_error_code(body: &Value, code: &str) {
    assert_eq!(body["error"]["code"], code, "unexpected error body: {body}");
    assert!(body["error"]["message"].is_string(), "missing message: {body}");
}

pub fn client_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "type": "business",
        "name": name,
        "address_line1": "Avenida Central",
        "city": "San José",
        "country": "Costa Rica",
    })
}

pub fn airline_json(id: i64, company_name: &str) -> Value {
    json!({ "id": id, "type": "national", "company_name": company_name })
}

pub fn flight_json(client_id: i64, airline_id: i64, date: &str) -> Value {
    json!({
        "client_id": client_id,
        "airline_id": airline_id,
        "date": date,
        "start_city": "San José",
        "end_city": "Lima",
    })
}

/// Create one client and one airline with id 1.
pub async fn seed_client_and_airline(app: &TestApp) -> anyhow::Result<()> {
    let (status, _, _) = app
        .json(Method::POST, "/api/v1/clients", Some(client_json(1, "Alice")))
        .await?;
    assert_status(status, StatusCode::CREATED, "seed client");
    let (status, _, _) = app
        .json(Method::POST, "/api/v1/airlines", Some(airline_json(1, "Air One")))
        .await?;
    assert_status(status, StatusCode::CREATED, "seed airline");
    Ok(())
}
