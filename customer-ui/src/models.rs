//! Form model for customer screens.

use std::collections::BTreeMap;

use customer_api::types::{CustomerRequest, CustomerResponse};
use customer_core::{validate_customer_fields, CustomerId, ValidationError, Timestamp};
use serde::{Deserialize, Serialize};

/// What the create and edit forms hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerViewModel {
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
    #[serde(default, skip_serializing)]
    pub created_at: Option<Timestamp>,
}

/// Messages shown next to form fields, plus form-level messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub fields: BTreeMap<String, String>,
    pub general: Vec<String>,
}

impl FormErrors {
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            fields: BTreeMap::new(),
            general: vec![message.into()],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.general.is_empty()
    }
}

impl CustomerViewModel {
    /// Check the form with the same rules the API applies.
    pub fn validate(&self) -> Result<(), FormErrors> {
        validate_customer_fields(
            &self.name,
            &self.email,
            &self.address,
            self.mobile_no.as_deref(),
        )
        .map_err(|errors| FormErrors {
            fields: errors
                .iter()
                .map(|e| (e.field().to_string(), field_message(e)))
                .collect(),
            general: Vec::new(),
        })
    }

    pub fn to_request(&self) -> CustomerRequest {
        CustomerRequest {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
            mobile_no: self.mobile_no.clone(),
        }
    }
}

impl From<CustomerResponse> for CustomerViewModel {
    fn from(response: CustomerResponse) -> Self {
        Self {
            id: Some(response.id),
            name: response.name,
            email: response.email,
            address: response.address,
            mobile_no: response.mobile_no,
            created_at: Some(response.created_at),
        }
    }
}

fn field_label(field: &str) -> &str {
    match field {
        "name" => "Name",
        "email" => "Email",
        "address" => "Address",
        "mobile_no" => "Mobile Number",
        other => other,
    }
}

fn field_message(error: &ValidationError) -> String {
    let label = field_label(error.field());
    match error {
        ValidationError::RequiredFieldMissing { .. } => format!("The {} field is required.", label),
        ValidationError::InvalidValue { field, .. } if field == "email" => {
            "Invalid Email Address.".to_string()
        }
        ValidationError::InvalidValue { .. } => format!("Invalid {}.", label),
        ValidationError::TooLong { max, .. } => {
            format!("{} must not exceed {} characters.", label, max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use customer_test_utils::generators::arb_new_customer;
    use proptest::prelude::*;

    #[test]
    fn empty_form_reports_required_fields() {
        let errors = match CustomerViewModel::default().validate() {
            Err(errors) => errors,
            Ok(()) => panic!("empty form should not validate"),
        };
        assert_eq!(
            errors.fields.get("name").map(String::as_str),
            Some("The Name field is required.")
        );
        assert!(errors.fields.contains_key("email"));
        assert!(errors.fields.contains_key("address"));
        assert!(!errors.fields.contains_key("mobile_no"));
        assert!(errors.general.is_empty());
    }

    #[test]
    fn bad_email_and_mobile_have_friendly_messages() {
        let model = CustomerViewModel {
            name: "A".to_string(),
            email: "nope".to_string(),
            address: "1 St".to_string(),
            mobile_no: Some("0123".to_string()),
            ..Default::default()
        };
        let errors = model.validate().err().unwrap_or_default();
        assert_eq!(errors.fields.get("email").map(String::as_str), Some("Invalid Email Address."));
        assert_eq!(
            errors.fields.get("mobile_no").map(String::as_str),
            Some("Invalid Mobile Number.")
        );
    }

    #[test]
    fn response_round_trips_into_request() {
        let response = CustomerResponse {
            id: uuid::Uuid::now_v7(),
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            address: "1 St".to_string(),
            mobile_no: Some("+441234567".to_string()),
            created_at: chrono::Utc::now(),
            updated_at: None,
        };
        let model = CustomerViewModel::from(response.clone());
        let request = model.to_request();
        assert_eq!(request.id, Some(response.id));
        assert_eq!(request.email, response.email);
        assert_eq!(request.mobile_no, response.mobile_no);
    }

    proptest! {
        #[test]
        fn prop_generated_customers_pass_form_validation(new in arb_new_customer()) {
            let model = CustomerViewModel {
                name: new.name,
                email: new.email,
                address: new.address,
                mobile_no: new.mobile_no,
                ..Default::default()
            };
            prop_assert!(model.validate().is_ok());
        }
    }
}
