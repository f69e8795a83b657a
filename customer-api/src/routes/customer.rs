//! Customer REST API Routes
//!
//! Axum handlers for `/api/customer`. Request bodies are validated here,
//! before the service is called.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::{
    error::ApiResult,
    extractors::{ApiJson, ApiQuery, CustomerIdPath},
    services::CustomerService,
    state::AppState,
    types::{CustomerRequest, ListCustomersQuery},
    validation::ValidateRequest,
};

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /api/customer - List live customers, optionally paginated
pub async fn list_customers(
    State(service): State<CustomerService>,
    ApiQuery(query): ApiQuery<ListCustomersQuery>,
) -> ApiResult<impl IntoResponse> {
    let customers = service.list(query.into_filter()).await?;
    Ok(Json(customers))
}

/// POST /api/customer - Create a customer
pub async fn create_customer(
    State(service): State<CustomerService>,
    ApiJson(req): ApiJson<CustomerRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate()?;

    let customer = service.add(req).await?;
    Ok((StatusCode::OK, Json(customer)))
}

/// GET /api/customer/{id} - Get a customer by ID
pub async fn get_customer(
    State(service): State<CustomerService>,
    CustomerIdPath(id): CustomerIdPath,
) -> ApiResult<impl IntoResponse> {
    let customer = service.get_by_id(id).await?;
    Ok(Json(customer))
}

/// PUT /api/customer/{id} - Overwrite a customer
pub async fn update_customer(
    State(service): State<CustomerService>,
    CustomerIdPath(id): CustomerIdPath,
    ApiJson(req): ApiJson<CustomerRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate()?;

    service.update(id, req).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/customer/{id} - Soft-delete a customer
pub async fn delete_customer(
    State(service): State<CustomerService>,
    CustomerIdPath(id): CustomerIdPath,
) -> ApiResult<impl IntoResponse> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the customer router, mounted at `/api/customer`.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}
