//! Customer Test Utilities
//!
//! Shared test infrastructure for the workspace:
//! - Proptest generators for customer payloads and pagination windows
//! - Fixtures for common scenarios
//! - Assertions for the customer error taxonomy

// Re-export core types for convenience
pub use customer_core::{
    Customer, CustomerChanges, CustomerError, CustomerId, CustomerResult, ListFilter,
    NewCustomer, StorageError, Timestamp, ValidationError,
};

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for generating customer data.

    use super::*;
    use proptest::prelude::*;
    use uuid::Uuid;

    /// Generate a random UUID.
    pub fn arb_uuid() -> impl Strategy<Value = Uuid> {
        any::<[u8; 16]>().prop_map(Uuid::from_bytes)
    }

    /// Non-blank display name.
    pub fn arb_name() -> impl Strategy<Value = String> {
        "[A-Z][a-z]{1,12}( [A-Z][a-z]{1,12})?"
    }

    /// Well-formed email, always well under the 100 character limit.
    pub fn arb_email() -> impl Strategy<Value = String> {
        ("[a-z][a-z0-9]{0,15}", "[a-z]{2,12}", "(com|org|net|io)")
            .prop_map(|(local, domain, tld)| format!("{}@{}.{}", local, domain, tld))
    }

    pub fn arb_address() -> impl Strategy<Value = String> {
        ("[1-9][0-9]{0,3}", "[A-Z][a-z]{2,10}", "(Street|Road|Lane|Avenue)")
            .prop_map(|(number, street, suffix)| format!("{} {} {}", number, street, suffix))
    }

    /// Optional E.164 mobile number.
    pub fn arb_mobile_no() -> impl Strategy<Value = Option<String>> {
        proptest::option::of("\\+?[1-9][0-9]{6,13}")
    }

    pub fn arb_new_customer() -> impl Strategy<Value = NewCustomer> {
        (arb_name(), arb_email(), arb_address(), arb_mobile_no()).prop_map(
            |(name, email, address, mobile_no)| NewCustomer {
                name,
                email,
                address,
                mobile_no,
            },
        )
    }

    pub fn arb_customer_changes() -> impl Strategy<Value = CustomerChanges> {
        arb_new_customer().prop_map(|new| CustomerChanges {
            name: new.name,
            email: new.email,
            address: new.address,
            mobile_no: new.mobile_no,
        })
    }

    /// Between `0` and `max` customers whose emails are pairwise distinct.
    pub fn arb_new_customers(max: usize) -> impl Strategy<Value = Vec<NewCustomer>> {
        proptest::collection::vec(arb_new_customer(), 0..=max).prop_map(|customers| {
            customers
                .into_iter()
                .enumerate()
                .map(|(i, mut customer)| {
                    customer.email = format!("n{}.{}", i, customer.email);
                    customer
                })
                .collect()
        })
    }

    pub fn arb_list_filter() -> impl Strategy<Value = ListFilter> {
        (
            proptest::option::of(0usize..8),
            proptest::option::of(0usize..8),
        )
            .prop_map(|(skip, take)| ListFilter::new(skip, take))
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built test fixtures for common testing scenarios.

    use super::*;

    /// A valid customer whose email is unique per `n`.
    pub fn new_customer(n: usize) -> NewCustomer {
        NewCustomer {
            name: format!("User{} Last{}", n, n),
            email: format!("user{}@example.com", n),
            address: format!("{} street{} city{}", n, n, n),
            mobile_no: Some(format!("+44{:010}", n)),
        }
    }

    pub fn changes_for(n: usize) -> CustomerChanges {
        let new = new_customer(n);
        CustomerChanges {
            name: new.name,
            email: new.email,
            address: new.address,
            mobile_no: new.mobile_no,
        }
    }

    /// JSON body for `POST /api/customer` matching the minimal create payload.
    pub fn create_body(name: &str, email: &str, address: &str) -> serde_json::Value {
        serde_json::json!({
            "name": name,
            "email": email,
            "address": address,
        })
    }

    /// JSON body built from a fixture customer, mobile number included.
    pub fn customer_body(n: usize) -> serde_json::Value {
        let new = new_customer(n);
        serde_json::json!({
            "name": new.name,
            "email": new.email,
            "address": new.address,
            "mobileNo": new.mobile_no,
        })
    }
}

// ============================================================================
// ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertion helpers for the customer error taxonomy.

    use super::*;

    /// Assert that a CustomerResult is Ok.
    #[track_caller]
    pub fn assert_ok<T: std::fmt::Debug>(result: &CustomerResult<T>) {
        assert!(result.is_ok(), "Expected Ok, got Err: {:?}", result);
    }

    /// Assert that a CustomerResult is a NotFound for the given operation.
    #[track_caller]
    pub fn assert_not_found<T: std::fmt::Debug>(result: &CustomerResult<T>, operation: &str) {
        match result {
            Err(CustomerError::NotFound { operation: op, .. }) if op == operation => {}
            other => panic!("Expected NotFound for {}, got: {:?}", operation, other),
        }
    }

    /// Assert that a CustomerResult is a duplicate email conflict.
    #[track_caller]
    pub fn assert_duplicate_email<T: std::fmt::Debug>(result: &CustomerResult<T>) {
        match result {
            Err(CustomerError::Storage(StorageError::DuplicateEmail { .. })) => {}
            other => panic!("Expected DuplicateEmail, got: {:?}", other),
        }
    }

    /// Assert that a CustomerResult is a validation failure.
    #[track_caller]
    pub fn assert_validation_error<T: std::fmt::Debug>(result: &CustomerResult<T>) {
        match result {
            Err(CustomerError::Validation(_)) => {}
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    /// Assert that ids are strictly ascending.
    #[track_caller]
    pub fn assert_ascending_ids(customers: &[Customer]) {
        for pair in customers.windows(2) {
            assert!(
                pair[0].id < pair[1].id,
                "Expected ascending ids, got {} then {}",
                pair[0].id,
                pair[1].id
            );
        }
    }
}
