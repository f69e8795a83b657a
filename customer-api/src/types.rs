//! Request and response types for the customer endpoints.
//!
//! These are the wire shapes. Field names are camelCase on the wire.

use customer_core::{CustomerId, ListFilter, Timestamp};
use serde::{Deserialize, Serialize};

// ============================================================================
// REQUESTS
// ============================================================================

/// Body of `POST /api/customer` and `PUT /api/customer/{id}`.
///
/// Missing string fields deserialize as empty so they surface as field
/// validation errors rather than a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    /// Accepted for client convenience; the server never uses it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CustomerId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_no: Option<String>,
}

/// Query string of `GET /api/customer`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCustomersQuery {
    pub skip: Option<usize>,
    pub take: Option<usize>,
}

impl ListCustomersQuery {
    pub fn into_filter(self) -> ListFilter {
        ListFilter::new(self.skip, self.take)
    }
}

// ============================================================================
// RESPONSES
// ============================================================================

/// A customer as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub address: String,
    pub mobile_no: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}
