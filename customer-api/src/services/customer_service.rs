//! Customer Service
//!
//! Sits between the handlers and the repository: maps wire types to domain
//! types, turns absence into `NotFound`, and keeps the read-through cache
//! coherent with writes.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use customer_core::{CustomerError, CustomerId, CustomerResult, ListFilter};
use customer_storage::{CacheKey, CacheRead, CustomerRepository, InMemoryCacheBackend, ReadThroughCache};

use crate::mapping::{to_changes, to_new_customer};
use crate::telemetry::METRICS;
use crate::types::{CustomerRequest, CustomerResponse};

/// Cache implementation used by the service.
pub type ApiCache = ReadThroughCache<InMemoryCacheBackend>;

/// Business operations over customers.
///
/// Cheap to clone; clones share the repository and the cache.
#[derive(Clone)]
pub struct CustomerService {
    repo: Arc<dyn CustomerRepository>,
    cache: Option<ApiCache>,
}

impl CustomerService {
    pub fn new(repo: Arc<dyn CustomerRepository>, cache: Option<ApiCache>) -> Self {
        Self { repo, cache }
    }

    /// A service that always reads from the repository.
    pub fn uncached(repo: Arc<dyn CustomerRepository>) -> Self {
        Self::new(repo, None)
    }

    pub fn cache(&self) -> Option<&ApiCache> {
        self.cache.as_ref()
    }

    /// List live customers, optionally paginated.
    pub async fn list(&self, filter: ListFilter) -> CustomerResult<Vec<CustomerResponse>> {
        let repo = &self.repo;
        let fetch = || async move {
            let customers = observe("list", repo.list(filter)).await?;
            Ok::<_, CustomerError>(Some(
                customers.into_iter().map(CustomerResponse::from).collect::<Vec<_>>(),
            ))
        };

        let customers = match &self.cache {
            Some(cache) => {
                let read = cache.get_or_fetch(&CacheKey::for_list(&filter), fetch).await?;
                record_cache_read("list", read.as_ref());
                read.map(CacheRead::into_value)
            }
            None => fetch().await?,
        };

        Ok(customers.unwrap_or_default())
    }

    /// Create a customer. The server assigns the id.
    pub async fn add(&self, request: CustomerRequest) -> CustomerResult<CustomerResponse> {
        let created = observe("add", self.repo.add(to_new_customer(&request))).await?;
        tracing::info!(customer_id = %created.id, "Customer created");

        self.invalidate_after_write(None).await;
        Ok(CustomerResponse::from(created))
    }

    /// Get a live customer.
    ///
    /// # Errors
    /// `CustomerError::NotFound` when the id is unknown or deleted.
    pub async fn get_by_id(&self, id: CustomerId) -> CustomerResult<CustomerResponse> {
        let repo = &self.repo;
        let fetch = || async move {
            let customer = observe("get_by_id", repo.get_by_id(id)).await?;
            Ok::<_, CustomerError>(customer.map(CustomerResponse::from))
        };

        let customer = match &self.cache {
            Some(cache) => {
                let read = cache.get_or_fetch(&CacheKey::for_customer(id), fetch).await?;
                record_cache_read("customer", read.as_ref());
                read.map(CacheRead::into_value)
            }
            None => fetch().await?,
        };

        customer.ok_or_else(|| not_found("get_by_id", id))
    }

    /// Overwrite a live customer's fields.
    ///
    /// # Errors
    /// `CustomerError::NotFound` when the id is unknown, deleted, or deleted
    /// concurrently before the write lands.
    pub async fn update(&self, id: CustomerId, request: CustomerRequest) -> CustomerResult<()> {
        self.require_live("update", id).await?;

        if !observe("update", self.repo.update(id, to_changes(&request))).await? {
            return Err(not_found("update", id));
        }
        tracing::info!(customer_id = %id, "Customer updated");

        self.invalidate_after_write(Some(id)).await;
        Ok(())
    }

    /// Soft-delete a live customer.
    ///
    /// # Errors
    /// `CustomerError::NotFound` when the id is unknown or already deleted.
    pub async fn delete(&self, id: CustomerId) -> CustomerResult<()> {
        self.require_live("delete", id).await?;

        if !observe("delete", self.repo.delete(id)).await? {
            return Err(not_found("delete", id));
        }
        tracing::info!(customer_id = %id, "Customer deleted");

        self.invalidate_after_write(Some(id)).await;
        Ok(())
    }

    /// Check the repository is reachable.
    pub async fn ping(&self) -> CustomerResult<()> {
        observe("ping", self.repo.ping()).await
    }

    async fn require_live(&self, operation: &str, id: CustomerId) -> CustomerResult<()> {
        match observe("get_by_id", self.repo.get_by_id(id)).await? {
            Some(_) => Ok(()),
            None => Err(not_found(operation, id)),
        }
    }

    /// Drop every cached list page and, for record writes, the record itself.
    ///
    /// The write has already been committed, so cache failures are logged
    /// rather than returned.
    async fn invalidate_after_write(&self, id: Option<CustomerId>) {
        let Some(cache) = &self.cache else {
            return;
        };

        if let Err(e) = cache.invalidate_lists().await {
            tracing::warn!(error = %e, "Failed to invalidate cached customer lists");
        }
        if let Some(id) = id {
            if let Err(e) = cache.invalidate(&CacheKey::for_customer(id)).await {
                tracing::warn!(error = %e, customer_id = %id, "Failed to invalidate cached customer");
            }
        }
    }
}

fn not_found(operation: &str, id: CustomerId) -> CustomerError {
    let err = CustomerError::not_found(operation, id);
    tracing::error!(error = %err, "Customer not found");
    err
}

async fn observe<T>(
    operation: &'static str,
    fut: impl Future<Output = CustomerResult<T>>,
) -> CustomerResult<T> {
    let start = Instant::now();
    let result = fut.await;
    if let Ok(metrics) = METRICS.as_ref() {
        metrics.record_repository_operation(operation, result.is_ok(), start.elapsed().as_secs_f64());
    }
    if let Err(e) = &result {
        tracing::error!(operation, error = %e, "Repository operation failed");
    }
    result
}

fn record_cache_read<T>(kind: &str, read: Option<&CacheRead<T>>) {
    let hit = read.is_some_and(CacheRead::was_cache_hit);
    if let Ok(metrics) = METRICS.as_ref() {
        metrics.record_cache_read(kind, hit);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use customer_core::{Customer, CustomerChanges, NewCustomer};
    use customer_storage::{CacheConfig, InMemoryCustomerRepository};
    use customer_test_utils::assertions::{assert_duplicate_email, assert_not_found};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Repository wrapper that counts reads so tests can prove cache hits.
    #[derive(Default)]
    struct CountingRepository {
        inner: InMemoryCustomerRepository,
        lists: AtomicUsize,
        gets: AtomicUsize,
    }

    #[async_trait]
    impl CustomerRepository for CountingRepository {
        async fn list(&self, filter: ListFilter) -> CustomerResult<Vec<Customer>> {
            self.lists.fetch_add(1, Ordering::SeqCst);
            self.inner.list(filter).await
        }

        async fn add(&self, new: NewCustomer) -> CustomerResult<Customer> {
            self.inner.add(new).await
        }

        async fn get_by_id(&self, id: CustomerId) -> CustomerResult<Option<Customer>> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            self.inner.get_by_id(id).await
        }

        async fn update(&self, id: CustomerId, changes: CustomerChanges) -> CustomerResult<bool> {
            self.inner.update(id, changes).await
        }

        async fn delete(&self, id: CustomerId) -> CustomerResult<bool> {
            self.inner.delete(id).await
        }

        async fn ping(&self) -> CustomerResult<()> {
            self.inner.ping().await
        }
    }

    fn cached_service() -> (CustomerService, Arc<CountingRepository>) {
        let repo = Arc::new(CountingRepository::default());
        let cache = ReadThroughCache::new(Arc::new(InMemoryCacheBackend::new()), CacheConfig::default());
        (CustomerService::new(repo.clone(), Some(cache)), repo)
    }

    fn request(n: usize) -> CustomerRequest {
        CustomerRequest {
            id: None,
            name: format!("User {}", n),
            email: format!("user{}@example.com", n),
            address: format!("{} Main St", n),
            mobile_no: None,
        }
    }

    #[tokio::test]
    async fn test_list_is_served_from_cache_until_write() -> CustomerResult<()> {
        let (service, repo) = cached_service();
        service.add(request(1)).await?;

        let first = service.list(ListFilter::all()).await?;
        let second = service.list(ListFilter::all()).await?;
        assert_eq!(first, second);
        assert_eq!(repo.lists.load(Ordering::SeqCst), 1);

        service.add(request(2)).await?;
        let third = service.list(ListFilter::all()).await?;
        assert_eq!(third.len(), 2);
        assert_eq!(repo.lists.load(Ordering::SeqCst), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_pages_are_cached_separately() -> CustomerResult<()> {
        let (service, _repo) = cached_service();
        for n in 0..3 {
            service.add(request(n)).await?;
        }

        let all = service.list(ListFilter::all()).await?;
        let page = service.list(ListFilter::new(Some(1), Some(1))).await?;
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, all[1].id);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_invalidates_record_and_lists() -> CustomerResult<()> {
        let (service, repo) = cached_service();
        let created = service.add(request(1)).await?;

        service.get_by_id(created.id).await?;
        service.list(ListFilter::all()).await?;

        service.update(created.id, request(9)).await?;

        let fetched = service.get_by_id(created.id).await?;
        assert_eq!(fetched.email, "user9@example.com");
        assert!(fetched.updated_at.is_some());

        let listed = service.list(ListFilter::all()).await?;
        assert_eq!(listed[0].email, "user9@example.com");
        assert_eq!(repo.lists.load(Ordering::SeqCst), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_hides_customer_and_second_delete_is_not_found() -> CustomerResult<()> {
        let (service, _repo) = cached_service();
        let created = service.add(request(1)).await?;
        service.get_by_id(created.id).await?;

        service.delete(created.id).await?;

        assert_not_found(&service.get_by_id(created.id).await, "get_by_id");
        assert_not_found(&service.delete(created.id).await, "delete");
        assert!(service.list(ListFilter::all()).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_customer_is_not_found_per_operation() {
        let service = CustomerService::uncached(Arc::new(InMemoryCustomerRepository::new()));
        let id = uuid::Uuid::now_v7();

        assert_not_found(&service.get_by_id(id).await, "get_by_id");
        assert_not_found(&service.update(id, request(1)).await, "update");
        assert_not_found(&service.delete(id).await, "delete");
    }

    #[tokio::test]
    async fn test_not_found_is_never_cached() -> CustomerResult<()> {
        let (service, repo) = cached_service();
        let id = uuid::Uuid::now_v7();

        assert!(service.get_by_id(id).await.is_err());
        assert!(service.get_by_id(id).await.is_err());
        assert_eq!(repo.gets.load(Ordering::SeqCst), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_client_supplied_id_is_ignored() -> CustomerResult<()> {
        let service = CustomerService::uncached(Arc::new(InMemoryCustomerRepository::new()));
        let supplied = uuid::Uuid::now_v7();
        let created = service
            .add(CustomerRequest {
                id: Some(supplied),
                ..request(1)
            })
            .await?;
        assert_ne!(created.id, supplied);
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_email_surfaces_storage_conflict() -> CustomerResult<()> {
        let service = CustomerService::uncached(Arc::new(InMemoryCustomerRepository::new()));
        service.add(request(1)).await?;

        let mut dup = request(2);
        dup.email = "USER1@example.com".to_string();
        assert_duplicate_email(&service.add(dup).await);
        Ok(())
    }
}
