//! Async repository trait for customer persistence.
//!
//! Implementations hide soft-deleted records from every read and report
//! "nothing to change" on update/delete with `Ok(false)` rather than an
//! error. Mapping absence to a failure is the caller's decision.

use std::sync::Arc;

use async_trait::async_trait;
use customer_core::{Customer, CustomerChanges, CustomerId, CustomerResult, ListFilter, NewCustomer};

/// Storage abstraction for customer records.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// List live customers ordered by id ascending, then apply skip/take.
    async fn list(&self, filter: ListFilter) -> CustomerResult<Vec<Customer>>;

    /// Insert a customer. The repository assigns the id and `created_at`.
    async fn add(&self, new: NewCustomer) -> CustomerResult<Customer>;

    /// Get a live customer by id.
    async fn get_by_id(&self, id: CustomerId) -> CustomerResult<Option<Customer>>;

    /// Overwrite the mutable fields of a live customer.
    ///
    /// Returns `false` when no live record has this id.
    async fn update(&self, id: CustomerId, changes: CustomerChanges) -> CustomerResult<bool>;

    /// Soft-delete a live customer.
    ///
    /// Returns `false` when no live record has this id; the record (if any)
    /// is left untouched, so deleting twice is harmless.
    async fn delete(&self, id: CustomerId) -> CustomerResult<bool>;

    /// Verify the backing store is reachable.
    async fn ping(&self) -> CustomerResult<()>;
}

#[async_trait]
impl<R: CustomerRepository + ?Sized> CustomerRepository for Arc<R> {
    async fn list(&self, filter: ListFilter) -> CustomerResult<Vec<Customer>> {
        (**self).list(filter).await
    }

    async fn add(&self, new: NewCustomer) -> CustomerResult<Customer> {
        (**self).add(new).await
    }

    async fn get_by_id(&self, id: CustomerId) -> CustomerResult<Option<Customer>> {
        (**self).get_by_id(id).await
    }

    async fn update(&self, id: CustomerId, changes: CustomerChanges) -> CustomerResult<bool> {
        (**self).update(id, changes).await
    }

    async fn delete(&self, id: CustomerId) -> CustomerResult<bool> {
        (**self).delete(id).await
    }

    async fn ping(&self) -> CustomerResult<()> {
        (**self).ping().await
    }
}
