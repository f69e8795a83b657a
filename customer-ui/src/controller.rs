//! Customer screens: each action calls the API and picks a view.
//!
//! Load failures render the generic error view. Submit failures re-render
//! the form with a form-level message. Neither leaks API details to the user;
//! the client has already logged them.

use customer_api::types::ListCustomersQuery;
use customer_core::CustomerId;

use crate::api_client::{ApiClientError, CustomerApiClient};
use crate::models::{CustomerViewModel, FormErrors};
use crate::views::{FormKind, Route, View};

pub const CREATE_FAILED: &str = "Failed to create customer.";
pub const UPDATE_FAILED: &str = "Failed to update customer.";

#[derive(Debug, Clone)]
pub struct CustomerController {
    api: CustomerApiClient,
}

impl CustomerController {
    pub fn new(api: CustomerApiClient) -> Self {
        Self { api }
    }

    pub async fn index(&self) -> View {
        match self.api.list(&ListCustomersQuery::default()).await {
            Ok(customers) => View::List(customers.into_iter().map(CustomerViewModel::from).collect()),
            Err(err) => error_view("Error loading customers.", &err),
        }
    }

    pub fn create_form(&self) -> View {
        View::Form {
            kind: FormKind::Create,
            model: CustomerViewModel::default(),
            errors: FormErrors::default(),
        }
    }

    pub async fn create(&self, model: CustomerViewModel) -> View {
        if let Err(errors) = model.validate() {
            return form(FormKind::Create, model, errors);
        }
        match self.api.add(&model.to_request()).await {
            Ok(_) => View::Redirect(Route::Index),
            Err(err) => {
                tracing::error!(error = %err, "Error creating customer.");
                form(FormKind::Create, model, FormErrors::general(CREATE_FAILED))
            }
        }
    }

    pub async fn edit_form(&self, id: CustomerId) -> View {
        match self.api.get_by_id(id).await {
            Ok(customer) => form(FormKind::Edit, customer.into(), FormErrors::default()),
            Err(err) if err.is_not_found() => View::NotFound,
            Err(err) => error_view("Error loading customer for edit.", &err),
        }
    }

    /// Submit the edit form. `id` comes from the route, the model from the
    /// form body; a mismatch means the form was posted to the wrong record.
    pub async fn edit(&self, id: CustomerId, model: CustomerViewModel) -> View {
        if model.id != Some(id) {
            return View::NotFound;
        }
        if let Err(errors) = model.validate() {
            return form(FormKind::Edit, model, errors);
        }
        match self.api.update(id, &model.to_request()).await {
            Ok(()) => View::Redirect(Route::Index),
            Err(err) => {
                tracing::error!(error = %err, customer_id = %id, "Error updating customer.");
                form(FormKind::Edit, model, FormErrors::general(UPDATE_FAILED))
            }
        }
    }

    pub async fn delete_form(&self, id: CustomerId) -> View {
        match self.api.get_by_id(id).await {
            Ok(customer) => View::Details(customer.into()),
            Err(err) if err.is_not_found() => View::NotFound,
            Err(err) => error_view("Error loading customer for deletion.", &err),
        }
    }

    pub async fn delete_confirmed(&self, id: CustomerId) -> View {
        match self.api.delete(id).await {
            Ok(()) => View::Redirect(Route::Index),
            Err(err) => error_view("Error deleting customer.", &err),
        }
    }
}

fn form(kind: FormKind, model: CustomerViewModel, errors: FormErrors) -> View {
    View::Form { kind, model, errors }
}

fn error_view(context: &str, err: &ApiClientError) -> View {
    let request_id = uuid::Uuid::now_v7().to_string();
    tracing::error!(request_id = %request_id, error = %err, "{}", context);
    View::Error { request_id }
}
