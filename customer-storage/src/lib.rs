//! Customer Storage - Repository Trait and Implementations
//!
//! Defines the storage abstraction for customer records along with an
//! in-memory store, a PostgreSQL store and the read-through cache used by
//! the service layer.

pub mod cache;
pub mod memory;
pub mod postgres;
pub mod repository;
pub mod seed;

pub use cache::{
    CacheBackend, CacheConfig, CacheEntry, CacheKey, CacheRead, CacheStats, InMemoryCacheBackend,
    ReadThroughCache,
};
pub use memory::InMemoryCustomerRepository;
pub use postgres::{DbConfig, PgCustomerRepository};
pub use repository::CustomerRepository;
pub use seed::{sample_customers, seed_if_empty};
