//! Field rules shared by the API and the UI client.
//!
//! Both tiers validate the same payload shape before anything reaches
//! storage, so the rules live here rather than in either crate.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;

/// Maximum stored length of an email address.
pub const EMAIL_MAX_LEN: usize = 100;

/// Maximum stored length of a mobile number (E.164 with leading `+`).
pub const MOBILE_MAX_LEN: usize = 15;

static EMAIL_PATTERN: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$"));

static MOBILE_PATTERN: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"^\+?[1-9]\d{1,14}$"));

fn matches(pattern: &Lazy<Result<Regex, regex::Error>>, field: &str, value: &str) -> Result<bool, ValidationError> {
    match pattern.as_ref() {
        Ok(re) => Ok(re.is_match(value)),
        Err(e) => Err(ValidationError::InvalidValue {
            field: field.to_string(),
            reason: format!("validation pattern unavailable: {}", e),
        }),
    }
}

/// Reject empty or whitespace-only values.
pub fn validate_required(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::RequiredFieldMissing {
            field: field.to_string(),
        });
    }
    Ok(())
}

pub fn validate_max_len(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

/// Required, well-formed, at most [`EMAIL_MAX_LEN`] characters once trimmed.
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    validate_required("email", value)?;
    validate_max_len("email", value, EMAIL_MAX_LEN)?;
    if !matches(&EMAIL_PATTERN, "email", value)? {
        return Err(ValidationError::InvalidValue {
            field: "email".to_string(),
            reason: "must be a valid email address".to_string(),
        });
    }
    Ok(())
}

/// Optional; when present it must be a phone number in E.164 shape.
pub fn validate_mobile(value: Option<&str>) -> Result<(), ValidationError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(());
    };
    validate_max_len("mobile_no", value, MOBILE_MAX_LEN)?;
    if !matches(&MOBILE_PATTERN, "mobile_no", value)? {
        return Err(ValidationError::InvalidValue {
            field: "mobile_no".to_string(),
            reason: "must be a valid phone number".to_string(),
        });
    }
    Ok(())
}

/// Validate a full customer payload, collecting every failure.
pub fn validate_customer_fields(
    name: &str,
    email: &str,
    address: &str,
    mobile_no: Option<&str>,
) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<ValidationError> = [
        validate_required("name", name),
        validate_email(email),
        validate_required("address", address),
        validate_mobile(mobile_no),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
