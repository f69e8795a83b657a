//! Customer UI library exports.
//!
//! A thin client tier: [`api_client`] forwards the five customer operations
//! over HTTP and [`controller`] turns their outcomes into [`views::View`]s.

pub mod api_client;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod views;

pub use api_client::{ApiClientError, CustomerApiClient};
pub use config::{ConfigError, UiConfig};
pub use controller::CustomerController;
pub use error::UiError;
pub use models::{CustomerViewModel, FormErrors};
pub use views::{FormKind, Route, View};
