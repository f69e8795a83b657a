use customer_storage::{DbConfig, PgCustomerRepository};

pub async fn test_repository() -> PgCustomerRepository {
    let config = DbConfig::from_env();
    PgCustomerRepository::connect(&config)
        .await
        .expect("Failed to connect to the test database")
}

/// Email unique to this test run, so reruns against the same database never collide.
pub fn unique_email(tag: &str) -> String {
    format!("{}.{}@example.com", tag, uuid::Uuid::now_v7().simple())
}
