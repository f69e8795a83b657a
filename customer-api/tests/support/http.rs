use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use customer_api::{create_api_router, ApiConfig, AppState, CustomerService};
use customer_storage::{CacheConfig, CustomerRepository, InMemoryCacheBackend, ReadThroughCache};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

/// Router over `repo` with the read-through cache enabled.
pub fn cached_router(repo: Arc<dyn CustomerRepository>) -> Router {
    let cache = ReadThroughCache::new(Arc::new(InMemoryCacheBackend::new()), CacheConfig::default());
    let service = CustomerService::new(repo, Some(cache));
    create_api_router(AppState::new(service), &ApiConfig::default())
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, String> {
        serde_json::from_slice(&self.body)
            .map_err(|e| format!("Invalid JSON body ({}): {}", e, String::from_utf8_lossy(&self.body)))
    }
}

/// Send one request through the router and collect the response.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Result<TestResponse, String> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .map_err(|e| e.to_string())?;

    let response = app
        .clone()
        .oneshot(request)
        .await
        .map_err(|e| format!("Request failed: {:?}", e))?;
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .map_err(|e| format!("Failed to read body: {:?}", e))?;

    Ok(TestResponse {
        status,
        body: body.to_vec(),
    })
}
