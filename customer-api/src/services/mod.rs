//! Service Layer
//!
//! Business logic between the route handlers and the repository.

mod customer_service;

pub use customer_service::*;
