//! Startup sample data.

use customer_core::{CustomerResult, ListFilter, NewCustomer};

use crate::repository::CustomerRepository;

/// The two sample customers inserted into an empty store.
pub fn sample_customers() -> Vec<NewCustomer> {
    vec![
        NewCustomer {
            name: "User1 Last1".to_string(),
            email: "user1@example.com".to_string(),
            address: "1 street1 city1".to_string(),
            mobile_no: Some("+440012345678".to_string()),
        },
        NewCustomer {
            name: "User2 Last2".to_string(),
            email: "user2@example.com".to_string(),
            address: "2 street2 city2".to_string(),
            mobile_no: Some("+441112345678".to_string()),
        },
    ]
}

/// Insert the sample customers if no live customer exists.
///
/// Returns how many records were inserted.
pub async fn seed_if_empty<R: CustomerRepository + ?Sized>(repo: &R) -> CustomerResult<usize> {
    let existing = repo.list(ListFilter::new(None, Some(1))).await?;
    if !existing.is_empty() {
        tracing::debug!("Customer store already populated, skipping seed");
        return Ok(0);
    }

    let samples = sample_customers();
    let count = samples.len();
    for sample in samples {
        repo.add(sample).await?;
    }
    tracing::info!(count, "Seeded sample customers");
    Ok(count)
}
