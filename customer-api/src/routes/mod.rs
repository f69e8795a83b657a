//! REST API Routes Module
//!
//! Includes:
//! - Customer CRUD routes under /api/customer
//! - Health check endpoints (Kubernetes-compatible)
//! - Prometheus metrics
//! - CORS support for browser-based clients

pub mod customer;
pub mod health;

use std::any::Any;
use std::time::Duration;

use axum::{
    http::{header, request::Parts as RequestParts, HeaderValue, Method},
    middleware::from_fn,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ApiConfig;
use crate::error::{ApiError, ErrorCode};
use crate::state::AppState;
use crate::telemetry::{metrics_handler, observability_middleware};

pub use customer::create_router as customer_router;
pub use health::create_router as health_router;

/// Base path of the customer resource.
pub const CUSTOMER_BASE_PATH: &str = "/api/customer";

// ============================================================================
// FALLBACKS
// ============================================================================

async fn route_not_found() -> ApiError {
    ApiError::from_code(ErrorCode::RouteNotFound)
}

/// Render a handler panic as the generic 500 body.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    ApiError::internal_error(format!("Handler panicked: {}", detail)).into_response()
}

// ============================================================================
// CORS LAYER
// ============================================================================

/// Build the CORS layer from ApiConfig.
///
/// In development mode (empty origins), allows all origins.
/// Otherwise only the configured origins are allowed.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if config.cors_origins.is_empty() {
        tracing::info!("CORS: Development mode - allowing all origins");
        cors.allow_origin(AnyOrigin)
    } else {
        tracing::info!(
            "CORS: Restricted mode - allowing origins: {:?}",
            config.cors_origins
        );
        let config = config.clone();
        cors.allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &RequestParts| {
                origin
                    .to_str()
                    .map(|o| config.is_origin_allowed(o))
                    .unwrap_or(false)
            },
        ))
    }
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the complete API router.
///
/// - Customer routes at /api/customer
/// - Health checks at /health/*
/// - Metrics at /metrics
///
/// # Middleware Order (outer to inner)
/// 1. CORS (outermost) - handles preflight requests
/// 2. Catch panic - turns handler panics into a JSON 500
/// 3. Trace - per-request spans from tower-http
/// 4. Observability - metrics and completion logs
pub fn create_api_router(state: AppState, config: &ApiConfig) -> Router {
    Router::new()
        .nest(CUSTOMER_BASE_PATH, customer::create_router())
        .nest("/health", health::create_router())
        .route("/metrics", get(metrics_handler))
        .fallback(route_not_found)
        .with_state(state)
        .layer(from_fn(observability_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(build_cors_layer(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::CustomerService;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use customer_storage::InMemoryCustomerRepository;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let service = CustomerService::uncached(Arc::new(InMemoryCustomerRepository::new()));
        create_api_router(AppState::new(service), &ApiConfig::default())
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() -> Result<(), String> {
        let request = Request::builder()
            .uri("/nope")
            .body(Body::empty())
            .map_err(|e| e.to_string())?;
        let response = test_router()
            .oneshot(request)
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| format!("Failed to read body: {:?}", e))?;
        let err: ApiError = serde_json::from_slice(&body).map_err(|e| e.to_string())?;
        assert_eq!(err.code, ErrorCode::RouteNotFound);
        Ok(())
    }

    #[tokio::test]
    async fn test_panic_becomes_generic_500() -> Result<(), String> {
        async fn boom() -> &'static str {
            panic!("boom")
        }
        let app = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(panic_response));

        let request = Request::builder()
            .uri("/boom")
            .body(Body::empty())
            .map_err(|e| e.to_string())?;
        let response = app
            .oneshot(request)
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| format!("Failed to read body: {:?}", e))?;
        let err: ApiError = serde_json::from_slice(&body).map_err(|e| e.to_string())?;
        assert_eq!(err.message, crate::error::GENERIC_ERROR_MESSAGE);
        assert_eq!(err.status_code, 500);
        Ok(())
    }

    #[tokio::test]
    async fn test_cors_only_echoes_configured_origins() -> Result<(), String> {
        let service = CustomerService::uncached(Arc::new(InMemoryCustomerRepository::new()));
        let mut config = ApiConfig::default();
        config.cors_origins = vec!["https://customers.example.com".to_string()];
        let app = create_api_router(AppState::new(service), &config);

        for (origin, allowed) in [
            ("https://customers.example.com", true),
            ("https://evil.example.com", false),
        ] {
            let request = Request::builder()
                .uri("/health/ping")
                .header(header::ORIGIN, origin)
                .body(Body::empty())
                .map_err(|e| e.to_string())?;
            let response = app
                .clone()
                .oneshot(request)
                .await
                .map_err(|e| format!("Request failed: {:?}", e))?;
            assert_eq!(response.status(), StatusCode::OK);
            let echoed = response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok());
            if allowed {
                assert_eq!(echoed, Some(origin));
            } else {
                assert_eq!(echoed, None);
            }
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_health_endpoints() -> Result<(), String> {
        for (uri, expected) in [
            ("/health/ping", StatusCode::OK),
            ("/health/live", StatusCode::OK),
            ("/health/ready", StatusCode::OK),
            ("/metrics", StatusCode::OK),
        ] {
            let request = Request::builder()
                .uri(uri)
                .body(Body::empty())
                .map_err(|e| e.to_string())?;
            let response = test_router()
                .oneshot(request)
                .await
                .map_err(|e| format!("Request failed: {:?}", e))?;
            assert_eq!(response.status(), expected, "unexpected status for {}", uri);
        }
        Ok(())
    }
}
