//! Conversions between wire types and domain types.

use customer_core::{Customer, CustomerChanges, NewCustomer};

use crate::types::{CustomerRequest, CustomerResponse};

fn normalize_mobile(mobile_no: Option<&str>) -> Option<String> {
    mobile_no
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Build an insert payload. Any client-supplied id is dropped.
pub fn to_new_customer(request: &CustomerRequest) -> NewCustomer {
    NewCustomer {
        name: request.name.trim().to_string(),
        email: request.email.trim().to_string(),
        address: request.address.trim().to_string(),
        mobile_no: normalize_mobile(request.mobile_no.as_deref()),
    }
}

pub fn to_changes(request: &CustomerRequest) -> CustomerChanges {
    CustomerChanges {
        name: request.name.trim().to_string(),
        email: request.email.trim().to_string(),
        address: request.address.trim().to_string(),
        mobile_no: normalize_mobile(request.mobile_no.as_deref()),
    }
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            address: customer.address,
            mobile_no: customer.mobile_no,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use customer_test_utils::generators::arb_new_customer;
    use proptest::prelude::*;
    use uuid::Uuid;

    fn request() -> CustomerRequest {
        CustomerRequest {
            id: Some(Uuid::now_v7()),
            name: "  Ada  ".to_string(),
            email: "ada@example.com ".to_string(),
            address: "1 Way".to_string(),
            mobile_no: Some("   ".to_string()),
        }
    }

    #[test]
    fn test_new_customer_trims_and_drops_blank_mobile() {
        let new = to_new_customer(&request());
        assert_eq!(new.name, "Ada");
        assert_eq!(new.email, "ada@example.com");
        assert!(new.mobile_no.is_none());
    }

    #[test]
    fn test_changes_match_new_customer_fields() {
        let req = request();
        let new = to_new_customer(&req);
        let changes = to_changes(&req);
        assert_eq!(changes.name, new.name);
        assert_eq!(changes.email, new.email);
        assert_eq!(changes.address, new.address);
        assert_eq!(changes.mobile_no, new.mobile_no);
    }

    #[test]
    fn test_response_copies_every_field() {
        let customer = Customer::create(to_new_customer(&request()));
        let response = CustomerResponse::from(customer.clone());
        assert_eq!(response.id, customer.id);
        assert_eq!(response.created_at, customer.created_at);
        assert_eq!(response.updated_at, None);
    }

    proptest! {
        #[test]
        fn prop_mapping_preserves_clean_fields(new in arb_new_customer()) {
            let req = CustomerRequest {
                id: None,
                name: new.name.clone(),
                email: new.email.clone(),
                address: new.address.clone(),
                mobile_no: new.mobile_no.clone(),
            };
            prop_assert_eq!(to_new_customer(&req), new);
        }
    }
}
