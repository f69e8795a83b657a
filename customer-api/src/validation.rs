//! Validation Traits
//!
//! Request validation runs in the handler, before the service is called.

use customer_core::validate_customer_fields;

use crate::error::{ApiError, ApiResult};
use crate::types::CustomerRequest;

/// Trait for request bodies that must be checked before reaching the service.
///
/// # Example
/// ```ignore
/// use customer_api::validation::ValidateRequest;
///
/// async fn create(ApiJson(req): ApiJson<CustomerRequest>) -> ApiResult<()> {
///     req.validate()?;
///     // ... rest of logic
/// }
/// ```
pub trait ValidateRequest {
    /// Validate every field, reporting all failures at once.
    ///
    /// # Errors
    /// Returns `ApiError::from_validation_errors` listing each failed field.
    fn validate(&self) -> ApiResult<()>;
}

impl ValidateRequest for CustomerRequest {
    fn validate(&self) -> ApiResult<()> {
        validate_customer_fields(
            &self.name,
            &self.email,
            &self.address,
            self.mobile_no.as_deref(),
        )
        .map_err(|errors| ApiError::from_validation_errors(&errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn valid() -> CustomerRequest {
        CustomerRequest {
            id: None,
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            address: "1 St".to_string(),
            mobile_no: None,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_every_failure_is_reported() {
        let req = CustomerRequest {
            name: " ".to_string(),
            email: "not-an-email".to_string(),
            mobile_no: Some("abc".to_string()),
            ..valid()
        };
        let err = match req.validate() {
            Err(err) => err,
            Ok(()) => panic!("expected validation failure"),
        };
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.detail.as_ref().and_then(|d| d.as_array()).map(Vec::len), Some(3));
    }

    #[test]
    fn test_overlong_email_rejected() {
        let req = CustomerRequest {
            email: format!("{}@x.com", "a".repeat(100)),
            ..valid()
        };
        assert!(req.validate().is_err());
    }
}
