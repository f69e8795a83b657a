//! Customer API - REST Layer
//!
//! Exposes customer CRUD over HTTP/JSON with Axum. Handlers validate
//! requests, the service maps them onto the repository and keeps the
//! read-through cache coherent, and every failure is rendered as the JSON
//! error body.

pub mod config;
pub mod error;
pub mod extractors;
pub mod macros;
pub mod mapping;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use config::{ApiConfig, StorageKind};
pub use error::{ApiError, ApiResult, ErrorCode, GENERIC_ERROR_MESSAGE};
pub use routes::{create_api_router, CUSTOMER_BASE_PATH};
pub use services::{ApiCache, CustomerService};
pub use state::AppState;
pub use types::*;
