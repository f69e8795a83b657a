//! In-memory customer repository.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use customer_core::{
    Customer, CustomerChanges, CustomerId, CustomerResult, ListFilter, NewCustomer, StorageError,
};

use crate::repository::CustomerRepository;

/// Process-local store keyed by id.
///
/// Every operation takes the lock exactly once, so a check (existence,
/// liveness, email uniqueness) and the mutation that depends on it can
/// never interleave with another request.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCustomerRepository {
    customers: Arc<RwLock<BTreeMap<CustomerId, Customer>>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, soft-deleted ones included.
    pub fn stored_count(&self) -> CustomerResult<usize> {
        Ok(self.read()?.len())
    }

    /// Raw lookup that ignores the soft-delete flag.
    pub fn get_stored(&self, id: CustomerId) -> CustomerResult<Option<Customer>> {
        Ok(self.read()?.get(&id).cloned())
    }

    fn read(&self) -> CustomerResult<RwLockReadGuard<'_, BTreeMap<CustomerId, Customer>>> {
        Ok(self.customers.read().map_err(|_| StorageError::LockPoisoned)?)
    }

    fn write(&self) -> CustomerResult<RwLockWriteGuard<'_, BTreeMap<CustomerId, Customer>>> {
        Ok(self.customers.write().map_err(|_| StorageError::LockPoisoned)?)
    }
}

fn email_taken(
    customers: &BTreeMap<CustomerId, Customer>,
    email: &str,
    except: Option<CustomerId>,
) -> bool {
    customers
        .values()
        .filter(|c| c.is_live() && Some(c.id) != except)
        .any(|c| c.has_email(email))
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn list(&self, filter: ListFilter) -> CustomerResult<Vec<Customer>> {
        let customers = self.read()?;
        // BTreeMap iterates in ascending id order
        Ok(filter.paginate(customers.values().filter(|c| c.is_live()).cloned()))
    }

    async fn add(&self, new: NewCustomer) -> CustomerResult<Customer> {
        let mut customers = self.write()?;
        if email_taken(&customers, &new.email, None) {
            return Err(StorageError::DuplicateEmail { email: new.email }.into());
        }
        let customer = Customer::create(new);
        customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn get_by_id(&self, id: CustomerId) -> CustomerResult<Option<Customer>> {
        let customers = self.read()?;
        Ok(customers.get(&id).filter(|c| c.is_live()).cloned())
    }

    async fn update(&self, id: CustomerId, changes: CustomerChanges) -> CustomerResult<bool> {
        let mut customers = self.write()?;
        if !customers.get(&id).is_some_and(Customer::is_live) {
            return Ok(false);
        }
        if email_taken(&customers, &changes.email, Some(id)) {
            return Err(StorageError::DuplicateEmail {
                email: changes.email,
            }
            .into());
        }
        match customers.get_mut(&id) {
            Some(customer) => {
                customer.apply(changes, Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: CustomerId) -> CustomerResult<bool> {
        let mut customers = self.write()?;
        match customers.get_mut(&id) {
            Some(customer) if customer.is_live() => {
                customer.mark_deleted(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn ping(&self) -> CustomerResult<()> {
        self.read().map(|_| ())
    }
}
