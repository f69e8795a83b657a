//! Property-Based Tests for List Pagination over HTTP
//!
//! For any set of customers and any skip/take window, `GET /api/customer`
//! with that window returns exactly the same window of the unpaginated,
//! id-ordered listing, whether or not the full listing was cached first.

use std::sync::Arc;

use customer_api::CustomerResponse;
use customer_storage::{CustomerRepository, InMemoryCustomerRepository};
use customer_test_utils::generators::{arb_list_filter, arb_new_customers};
use proptest::prelude::*;
use tokio::runtime::Runtime;

#[path = "support/http.rs"]
mod test_http_support;
use test_http_support::{cached_router, send};

fn test_runtime() -> Result<Runtime, TestCaseError> {
    Runtime::new().map_err(|e| TestCaseError::fail(format!("Failed to create runtime: {}", e)))
}

fn page_uri(skip: Option<usize>, take: Option<usize>) -> String {
    let mut params = Vec::new();
    if let Some(skip) = skip {
        params.push(format!("skip={}", skip));
    }
    if let Some(take) = take {
        params.push(format!("take={}", take));
    }
    if params.is_empty() {
        "/api/customer".to_string()
    } else {
        format!("/api/customer?{}", params.join("&"))
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_http_page_matches_window_of_full_list(
        batch in arb_new_customers(8),
        filter in arb_list_filter(),
    ) {
        let rt = test_runtime()?;
        rt.block_on(async {
            let repo = Arc::new(InMemoryCustomerRepository::new());
            for new in batch {
                repo.add(new)
                    .await
                    .map_err(|e| TestCaseError::fail(e.to_string()))?;
            }
            let app = cached_router(repo);

            let full: Vec<CustomerResponse> = send(&app, "GET", "/api/customer", None)
                .await
                .and_then(|r| r.json())
                .map_err(TestCaseError::fail)?;
            let page: Vec<CustomerResponse> = send(&app, "GET", &page_uri(filter.skip, filter.take), None)
                .await
                .and_then(|r| r.json())
                .map_err(TestCaseError::fail)?;

            let expected: Vec<_> = filter.paginate(full.iter().map(|c| c.id));
            let actual: Vec<_> = page.iter().map(|c| c.id).collect();
            prop_assert_eq!(actual, expected);
            Ok(())
        })?;
    }
}
