//! Core entity structures

use crate::{new_customer_id, CustomerId, Timestamp};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Customer - the sole managed record.
///
/// A customer is never physically removed; deletion flips `is_deleted` and
/// the record disappears from every read path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub address: String,
    pub mobile_no: Option<String>,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

impl Customer {
    /// Materialize a new record from insert data.
    ///
    /// The identifier and creation timestamp are always assigned here.
    pub fn create(new: NewCustomer) -> Self {
        Self {
            id: new_customer_id(),
            name: new.name,
            email: new.email,
            address: new.address,
            mobile_no: new.mobile_no,
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Whether the record is visible to reads.
    pub fn is_live(&self) -> bool {
        !self.is_deleted
    }

    /// Overwrite the mutable fields and stamp `updated_at`.
    pub fn apply(&mut self, changes: CustomerChanges, now: Timestamp) {
        self.name = changes.name;
        self.email = changes.email;
        self.address = changes.address;
        self.mobile_no = changes.mobile_no;
        self.updated_at = Some(now);
    }

    /// Flip the soft-delete flag and stamp `updated_at`.
    pub fn mark_deleted(&mut self, now: Timestamp) {
        self.is_deleted = true;
        self.updated_at = Some(now);
    }

    /// Case-insensitive email comparison used for uniqueness checks.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email)
    }
}

/// Insert payload. Carries no identifier: ids are server-assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub address: String,
    pub mobile_no: Option<String>,
}

/// Full-overwrite update payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerChanges {
    pub name: String,
    pub email: String,
    pub address: String,
    pub mobile_no: Option<String>,
}

/// Pagination window applied after filtering and id ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListFilter {
    pub skip: Option<usize>,
    pub take: Option<usize>,
}

impl ListFilter {
    /// No pagination: every live record.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(skip: Option<usize>, take: Option<usize>) -> Self {
        Self { skip, take }
    }

    /// Whether either bound is set.
    pub fn is_paginated(&self) -> bool {
        self.skip.is_some() || self.take.is_some()
    }

    /// Apply skip then take to an already ordered sequence.
    pub fn paginate<T>(&self, records: impl IntoIterator<Item = T>) -> Vec<T> {
        let skipped = records.into_iter().skip(self.skip.unwrap_or(0));
        match self.take {
            Some(take) => skipped.take(take).collect(),
            None => skipped.collect(),
        }
    }
}
