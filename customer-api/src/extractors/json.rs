//! Body and query extractors with JSON rejections.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Like `Json<T>`, but a body that fails to parse becomes a 400 `ApiError`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::invalid_input(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Like `Query<T>`, but an unparseable query string becomes a 400 `ApiError`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::invalid_input(rejection.body_text()))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::types::{CustomerRequest, ListCustomersQuery};
    use axum::{body::Body, http::Request as HttpRequest, routing::get, routing::post, Router};
    use tower::ServiceExt;

    async fn accept_body(ApiJson(req): ApiJson<CustomerRequest>) -> String {
        req.name
    }

    async fn accept_query(ApiQuery(query): ApiQuery<ListCustomersQuery>) -> String {
        format!("{:?}", query.skip)
    }

    async fn error_of(response: axum::response::Response) -> Result<ApiError, String> {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| format!("Failed to read body: {:?}", e))?;
        serde_json::from_slice(&body).map_err(|e| e.to_string())
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() -> Result<(), String> {
        let app = Router::new().route("/", post(accept_body));
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from("{ not json"))
            .map_err(|e| e.to_string())?;

        let response = app.oneshot(request).await.map_err(|e| format!("{:?}", e))?;
        assert_eq!(response.status(), 400);
        assert_eq!(error_of(response).await?.code, ErrorCode::InvalidInput);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() -> Result<(), String> {
        let app = Router::new().route("/", post(accept_body));
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"name":"A"}"#))
            .map_err(|e| e.to_string())?;

        let response = app.oneshot(request).await.map_err(|e| format!("{:?}", e))?;
        assert_eq!(response.status(), 400);
        Ok(())
    }

    #[tokio::test]
    async fn test_bad_query_is_bad_request() -> Result<(), String> {
        let app = Router::new().route("/", get(accept_query));
        let request = HttpRequest::builder()
            .uri("/?skip=minus-one")
            .body(Body::empty())
            .map_err(|e| e.to_string())?;

        let response = app.oneshot(request).await.map_err(|e| format!("{:?}", e))?;
        assert_eq!(response.status(), 400);
        assert_eq!(error_of(response).await?.code, ErrorCode::InvalidInput);
        Ok(())
    }
}
