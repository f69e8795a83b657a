//! Cache key naming.
//!
//! Keys render to stable strings so every backend (and every log line)
//! agrees on them: `AllCustomers`, `AllCustomers_<skip>_<take>` and
//! `Customer_<id>`. All list keys share the `AllCustomers` prefix, which is
//! what write invalidation clears.

use std::fmt;

use customer_core::{CustomerId, ListFilter};

/// Prefix shared by every list key.
pub const LIST_KEY_PREFIX: &str = "AllCustomers";

/// Prefix for single-record keys.
pub const CUSTOMER_KEY_PREFIX: &str = "Customer_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Unpaginated list of live customers.
    AllCustomers,
    /// One page of the live list.
    CustomerPage { skip: usize, take: Option<usize> },
    /// A single customer by id.
    Customer(CustomerId),
}

impl CacheKey {
    /// Key for a list request; unpaginated requests share one entry.
    pub fn for_list(filter: &ListFilter) -> Self {
        if filter.is_paginated() {
            Self::CustomerPage {
                skip: filter.skip.unwrap_or(0),
                take: filter.take,
            }
        } else {
            Self::AllCustomers
        }
    }

    pub fn for_customer(id: CustomerId) -> Self {
        Self::Customer(id)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::AllCustomers | Self::CustomerPage { .. })
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllCustomers => f.write_str(LIST_KEY_PREFIX),
            Self::CustomerPage { skip, take: Some(take) } => {
                write!(f, "{}_{}_{}", LIST_KEY_PREFIX, skip, take)
            }
            Self::CustomerPage { skip, take: None } => {
                write!(f, "{}_{}_all", LIST_KEY_PREFIX, skip)
            }
            Self::Customer(id) => write!(f, "{}{}", CUSTOMER_KEY_PREFIX, id),
        }
    }
}
