//! Customer Core - Entity Types
//!
//! Data structures, identifiers, field rules and the error taxonomy shared by
//! every other crate in the workspace.

pub mod entities;
pub mod error;
pub mod identity;
pub mod validation;

pub use entities::{Customer, CustomerChanges, ListFilter, NewCustomer};
pub use error::{
    CacheError, ConfigError, CustomerError, CustomerResult, StorageError, ValidationError,
};
pub use identity::{new_customer_id, CustomerId, Timestamp};
pub use validation::{
    validate_customer_fields, validate_email, validate_mobile, validate_required,
    EMAIL_MAX_LEN, MOBILE_MAX_LEN,
};
