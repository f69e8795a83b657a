//! Identity types for customer records

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Customer identifier using UUIDv7 for timestamp-sortable IDs.
/// UUIDv7 embeds a Unix timestamp, so ascending id order follows insertion order.
pub type CustomerId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 CustomerId (timestamp-sortable).
pub fn new_customer_id() -> CustomerId {
    Uuid::now_v7()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_customer_id_is_v7() {
        let id = new_customer_id();
        assert_eq!(id.get_version_num(), 7);
    }

    #[test]
    fn test_customer_ids_are_sortable() {
        let id1 = new_customer_id();
        let id2 = new_customer_id();
        assert!(id1 < id2);
    }

    #[test]
    fn test_customer_ids_are_unique() {
        let ids: std::collections::HashSet<_> = (0..1000).map(|_| new_customer_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
