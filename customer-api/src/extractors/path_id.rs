//! Path extractor for customer ids.
//!
//! Provides `CustomerIdPath`, which works like `Path<Uuid>` but rejects
//! malformed ids with a 400 `ApiError` instead of axum's plain-text body.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use customer_core::CustomerId;

use crate::error::ApiError;

/// Extractor for the `{id}` segment of customer routes.
///
/// # Example
///
/// ```rust,ignore
/// async fn get_customer(
///     CustomerIdPath(id): CustomerIdPath,
/// ) -> ApiResult<impl IntoResponse> {
///     service.get_by_id(id).await
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerIdPath(pub CustomerId);

#[async_trait]
impl<S> FromRequestParts<S> for CustomerIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_string();
        let Path(id): Path<CustomerId> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                ApiError::invalid_format("id", "a UUID").with_detail(serde_json::json!({
                    "path": path,
                    "reason": e.body_text(),
                }))
            })?;

        Ok(CustomerIdPath(id))
    }
}
