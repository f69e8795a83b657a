//! Shared application state for Axum routers.

use std::sync::Arc;
use std::time::Instant;

use customer_core::CustomerResult;
use customer_storage::{
    seed_if_empty, CustomerRepository, InMemoryCacheBackend, InMemoryCustomerRepository,
    PgCustomerRepository, ReadThroughCache,
};

use crate::config::{ApiConfig, StorageKind};
use crate::services::{ApiCache, CustomerService};

/// Application-wide state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub service: CustomerService,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(service: CustomerService) -> Self {
        Self {
            service,
            start_time: Instant::now(),
        }
    }

    /// Build the repository, seed it and wrap it in the service.
    pub async fn from_config(config: &ApiConfig) -> CustomerResult<Self> {
        let repo: Arc<dyn CustomerRepository> = match config.storage {
            StorageKind::Memory => {
                tracing::info!("Using in-memory customer storage");
                Arc::new(InMemoryCustomerRepository::new())
            }
            StorageKind::Postgres => {
                tracing::info!(
                    host = %config.db.host,
                    dbname = %config.db.dbname,
                    "Using PostgreSQL customer storage"
                );
                Arc::new(PgCustomerRepository::connect(&config.db).await?)
            }
        };

        if config.seed_data {
            seed_if_empty(repo.as_ref()).await?;
        }

        let cache: Option<ApiCache> = config.cache_config().map(|cache_config| {
            tracing::info!(ttl_secs = cache_config.entry_ttl.as_secs(), "Read-through cache enabled");
            ReadThroughCache::new(Arc::new(InMemoryCacheBackend::new()), cache_config)
        });

        Ok(Self::new(CustomerService::new(repo, cache)))
    }
}

// Use macro to reduce boilerplate for FromRef implementations
crate::impl_from_ref!(CustomerService, service);
crate::impl_from_ref!(Instant, start_time);
