//! HTTP client for the customer REST API.

use crate::config::UiConfig;
use customer_api::error::ApiError as ApiServerError;
use customer_api::types::{CustomerRequest, CustomerResponse, ListCustomersQuery};
use customer_core::CustomerId;
use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("API error (HTTP {status}): {error}")]
    Api { status: u16, error: Box<ApiServerError> },
    #[error("Unexpected response: HTTP {status}: {body}")]
    InvalidResponse { status: u16, body: String },
}

impl ApiClientError {
    /// HTTP status of the failed call, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::InvalidResponse { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            Self::Serde(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }
}

/// Thin wrapper over the five customer endpoints.
///
/// Every failure is logged here and handed back unchanged. No retries.
#[derive(Debug, Clone)]
pub struct CustomerApiClient {
    client: reqwest::Client,
    endpoint: String,
}

impl CustomerApiClient {
    pub fn new(config: &UiConfig) -> Result<Self, ApiClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: config.customer_url(),
        })
    }

    pub async fn list(
        &self,
        query: &ListCustomersQuery,
    ) -> Result<Vec<CustomerResponse>, ApiClientError> {
        let result = async {
            let response = self.client.get(&self.endpoint).query(query).send().await?;
            parse_response(response).await
        }
        .await;
        result.inspect_err(|err| tracing::error!(error = %err, "Error loading customers."))
    }

    pub async fn add(&self, request: &CustomerRequest) -> Result<CustomerResponse, ApiClientError> {
        let result = async {
            let response = self.client.post(&self.endpoint).json(request).send().await?;
            parse_response(response).await
        }
        .await;
        result.inspect_err(|err| tracing::error!(error = %err, "Error creating new customer."))
    }

    pub async fn get_by_id(&self, id: CustomerId) -> Result<CustomerResponse, ApiClientError> {
        let result = async {
            let response = self.client.get(self.item_url(id)).send().await?;
            parse_response(response).await
        }
        .await;
        result.inspect_err(|err| {
            tracing::error!(error = %err, customer_id = %id, "Error fetching customer.")
        })
    }

    pub async fn update(
        &self,
        id: CustomerId,
        request: &CustomerRequest,
    ) -> Result<(), ApiClientError> {
        let result = async {
            let response = self.client.put(self.item_url(id)).json(request).send().await?;
            expect_success(response).await
        }
        .await;
        result.inspect_err(|err| {
            tracing::error!(error = %err, customer_id = %id, "Error updating customer.")
        })
    }

    pub async fn delete(&self, id: CustomerId) -> Result<(), ApiClientError> {
        let result = async {
            let response = self.client.delete(self.item_url(id)).send().await?;
            expect_success(response).await
        }
        .await;
        result.inspect_err(|err| {
            tracing::error!(error = %err, customer_id = %id, "Error deleting customer.")
        })
    }

    fn item_url(&self, id: CustomerId) -> String {
        format!("{}/{}", self.endpoint, id)
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiClientError> {
    if response.status().is_success() {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    } else {
        Err(error_from_response(response).await)
    }
}

async fn expect_success(response: reqwest::Response) -> Result<(), ApiClientError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_from_response(response).await)
    }
}

async fn error_from_response(response: reqwest::Response) -> ApiClientError {
    let status = response.status().as_u16();
    let body = match response.text().await {
        Ok(text) => text,
        Err(err) => return ApiClientError::Http(err),
    };
    match serde_json::from_str::<ApiServerError>(&body) {
        Ok(error) => ApiClientError::Api {
            status,
            error: Box::new(error),
        },
        Err(_) => ApiClientError::InvalidResponse { status, body },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use customer_api::ErrorCode;

    #[test]
    fn item_url_appends_id() -> Result<(), ApiClientError> {
        let client = CustomerApiClient::new(&UiConfig::new("http://localhost:3000/"))?;
        let id = uuid::Uuid::nil();
        assert_eq!(
            client.item_url(id),
            format!("http://localhost:3000/api/customer/{}", id)
        );
        Ok(())
    }

    #[test]
    fn not_found_is_detected_from_status() {
        let err = ApiClientError::Api {
            status: 404,
            error: Box::new(ApiServerError::from_code(ErrorCode::CustomerNotFound)),
        };
        assert!(err.is_not_found());

        let err = ApiClientError::InvalidResponse {
            status: 500,
            body: "boom".to_string(),
        };
        assert!(!err.is_not_found());
        assert_eq!(err.status(), Some(500));
    }
}
