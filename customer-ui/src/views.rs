//! Views returned by controller actions and their text rendering.

use std::fmt;

use crate::models::{CustomerViewModel, FormErrors};

/// Which form is being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Create,
    Edit,
}

/// Where a successful submit sends the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Index,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Customer listing.
    List(Vec<CustomerViewModel>),
    /// Create or edit form, with any errors from the last submit.
    Form {
        kind: FormKind,
        model: CustomerViewModel,
        errors: FormErrors,
    },
    /// Read-only record, shown before a delete is confirmed.
    Details(CustomerViewModel),
    Redirect(Route),
    NotFound,
    /// Generic failure page. The request id ties it to the logged error.
    Error { request_id: String },
}

impl View {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(customers) => {
                writeln!(f, "Customers ({})", customers.len())?;
                writeln!(
                    f,
                    "{:<36}  {:<24}  {:<32}  {:<16}  {}",
                    "ID", "NAME", "EMAIL", "MOBILE", "ADDRESS"
                )?;
                for customer in customers {
                    writeln!(
                        f,
                        "{:<36}  {:<24}  {:<32}  {:<16}  {}",
                        customer.id.map(|id| id.to_string()).unwrap_or_default(),
                        customer.name,
                        customer.email,
                        customer.mobile_no.as_deref().unwrap_or("-"),
                        customer.address
                    )?;
                }
                Ok(())
            }
            Self::Form { kind, model, errors } => {
                let title = match kind {
                    FormKind::Create => "Create customer",
                    FormKind::Edit => "Edit customer",
                };
                writeln!(f, "{}", title)?;
                for message in &errors.general {
                    writeln!(f, "! {}", message)?;
                }
                write_field(f, "Name", &model.name, errors.fields.get("name"))?;
                write_field(f, "Email", &model.email, errors.fields.get("email"))?;
                write_field(f, "Address", &model.address, errors.fields.get("address"))?;
                write_field(
                    f,
                    "Mobile",
                    model.mobile_no.as_deref().unwrap_or(""),
                    errors.fields.get("mobile_no"),
                )
            }
            Self::Details(model) => {
                writeln!(f, "Are you sure you want to delete this customer?")?;
                if let Some(id) = model.id {
                    writeln!(f, "  ID:      {}", id)?;
                }
                writeln!(f, "  Name:    {}", model.name)?;
                writeln!(f, "  Email:   {}", model.email)?;
                writeln!(f, "  Address: {}", model.address)?;
                writeln!(f, "  Mobile:  {}", model.mobile_no.as_deref().unwrap_or("-"))?;
                if let Some(created_at) = model.created_at {
                    writeln!(f, "  Created: {}", created_at.to_rfc3339())?;
                }
                Ok(())
            }
            Self::Redirect(Route::Index) => writeln!(f, "Done. Returning to the customer list."),
            Self::NotFound => writeln!(f, "Customer not found."),
            Self::Error { request_id } => {
                writeln!(f, "An error occurred while processing your request.")?;
                writeln!(f, "Request ID: {}", request_id)
            }
        }
    }
}

fn write_field(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: &str,
    error: Option<&String>,
) -> fmt::Result {
    match error {
        Some(message) => writeln!(f, "  {:<8} {}  <- {}", label, value, message),
        None => writeln!(f, "  {:<8} {}", label, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_view_shows_request_id() {
        let view = View::Error {
            request_id: "abc-123".to_string(),
        };
        assert!(view.is_error());
        assert!(view.to_string().contains("Request ID: abc-123"));
    }

    #[test]
    fn form_view_shows_field_and_general_errors() {
        let mut errors = FormErrors::general("Failed to create customer.");
        errors
            .fields
            .insert("email".to_string(), "Invalid Email Address.".to_string());
        let view = View::Form {
            kind: FormKind::Create,
            model: CustomerViewModel {
                email: "nope".to_string(),
                ..Default::default()
            },
            errors,
        };
        let rendered = view.to_string();
        assert!(rendered.starts_with("Create customer"));
        assert!(rendered.contains("! Failed to create customer."));
        assert!(rendered.contains("nope  <- Invalid Email Address."));
    }

    #[test]
    fn list_view_counts_rows() {
        let view = View::List(vec![CustomerViewModel::default(), CustomerViewModel::default()]);
        let rendered = view.to_string();
        assert!(rendered.starts_with("Customers (2)"));
        assert_eq!(rendered.lines().count(), 4);
    }
}
