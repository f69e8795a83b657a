//! PostgreSQL customer repository.
//!
//! Each mutation is a single statement, so atomicity and the live-email
//! uniqueness rule are enforced by the database itself.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use customer_core::{
    Customer, CustomerChanges, CustomerError, CustomerId, CustomerResult, ListFilter, NewCustomer,
    StorageError,
};
use deadpool_postgres::{Config, ManagerConfig, Object, Pool, PoolError, RecyclingMethod, Runtime};
use tokio_postgres::{error::SqlState, NoTls, Row};

use crate::repository::CustomerRepository;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Database connection pool configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// PostgreSQL host
    pub host: String,
    /// PostgreSQL port
    pub port: u16,
    /// Database name
    pub dbname: String,
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
    /// Maximum pool size
    pub max_size: usize,
    /// Connection wait timeout
    pub timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            dbname: "customers".to_string(),
            user: "postgres".to_string(),
            password: "".to_string(),
            max_size: 16,
            timeout: Duration::from_secs(30),
        }
    }
}

impl DbConfig {
    /// Create a new database configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("CUSTOMER_DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: std::env::var("CUSTOMER_DB_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5432),
            dbname: std::env::var("CUSTOMER_DB_NAME").unwrap_or_else(|_| "customers".to_string()),
            user: std::env::var("CUSTOMER_DB_USER").unwrap_or_else(|_| "postgres".to_string()),
            password: std::env::var("CUSTOMER_DB_PASSWORD").unwrap_or_default(),
            max_size: std::env::var("CUSTOMER_DB_POOL_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(16),
            timeout: Duration::from_secs(
                std::env::var("CUSTOMER_DB_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }

    /// Create a connection pool from this configuration.
    pub fn create_pool(&self) -> CustomerResult<Pool> {
        let mut cfg = Config::new();
        cfg.host = Some(self.host.clone());
        cfg.port = Some(self.port);
        cfg.dbname = Some(self.dbname.clone());
        cfg.user = Some(self.user.clone());
        cfg.password = Some(self.password.clone());

        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        let mut pool_cfg = deadpool_postgres::PoolConfig::new(self.max_size);
        pool_cfg.timeouts.wait = Some(self.timeout);
        cfg.pool = Some(pool_cfg);

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| StorageError::Unavailable {
                reason: format!("Failed to create pool: {}", e),
            })?;

        Ok(pool)
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS customers (
    id          UUID PRIMARY KEY,
    name        TEXT NOT NULL,
    email       VARCHAR(100) NOT NULL,
    address     TEXT NOT NULL,
    mobile_no   VARCHAR(15),
    is_deleted  BOOLEAN NOT NULL DEFAULT FALSE,
    created_at  TIMESTAMPTZ NOT NULL,
    updated_at  TIMESTAMPTZ
);
CREATE UNIQUE INDEX IF NOT EXISTS customers_live_email_idx
    ON customers (lower(email)) WHERE NOT is_deleted;
"#;

const COLUMNS: &str = "id, name, email, address, mobile_no, is_deleted, created_at, updated_at";

// ============================================================================
// REPOSITORY
// ============================================================================

/// Customer repository backed by a deadpool-managed PostgreSQL pool.
#[derive(Clone)]
pub struct PgCustomerRepository {
    pool: Pool,
}

impl PgCustomerRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Build the pool from config and make sure the schema exists.
    pub async fn connect(config: &DbConfig) -> CustomerResult<Self> {
        let repo = Self::new(config.create_pool()?);
        repo.ensure_schema().await?;
        Ok(repo)
    }

    /// Create the table and index if they are missing. Idempotent.
    pub async fn ensure_schema(&self) -> CustomerResult<()> {
        let conn = self.get_conn().await?;
        conn.batch_execute(SCHEMA)
            .await
            .map_err(|e| query_failed("ensure_schema", e))?;
        Ok(())
    }

    async fn get_conn(&self) -> CustomerResult<Object> {
        self.pool.get().await.map_err(pool_error)
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn list(&self, filter: ListFilter) -> CustomerResult<Vec<Customer>> {
        let conn = self.get_conn().await?;
        let offset = to_sql_count(filter.skip.unwrap_or(0));
        let limit = filter.take.map(to_sql_count);

        let sql = format!(
            "SELECT {} FROM customers WHERE NOT is_deleted ORDER BY id OFFSET $1 LIMIT $2",
            COLUMNS
        );
        let rows = conn
            .query(&sql, &[&offset, &limit])
            .await
            .map_err(|e| query_failed("list", e))?;

        rows.iter().map(customer_from_row).collect()
    }

    async fn add(&self, new: NewCustomer) -> CustomerResult<Customer> {
        let conn = self.get_conn().await?;
        let customer = Customer::create(new);

        let sql = format!(
            "INSERT INTO customers ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            COLUMNS
        );
        conn.execute(
            &sql,
            &[
                &customer.id,
                &customer.name,
                &customer.email,
                &customer.address,
                &customer.mobile_no,
                &customer.is_deleted,
                &customer.created_at,
                &customer.updated_at,
            ],
        )
        .await
        .map_err(|e| write_failed(e, customer.id, &customer.email))?;

        Ok(customer)
    }

    async fn get_by_id(&self, id: CustomerId) -> CustomerResult<Option<Customer>> {
        let conn = self.get_conn().await?;
        let sql = format!(
            "SELECT {} FROM customers WHERE id = $1 AND NOT is_deleted",
            COLUMNS
        );
        let row = conn
            .query_opt(&sql, &[&id])
            .await
            .map_err(|e| query_failed("get_by_id", e))?;

        row.as_ref().map(customer_from_row).transpose()
    }

    async fn update(&self, id: CustomerId, changes: CustomerChanges) -> CustomerResult<bool> {
        let conn = self.get_conn().await?;
        let affected = conn
            .execute(
                "UPDATE customers \
                 SET name = $2, email = $3, address = $4, mobile_no = $5, updated_at = $6 \
                 WHERE id = $1 AND NOT is_deleted",
                &[
                    &id,
                    &changes.name,
                    &changes.email,
                    &changes.address,
                    &changes.mobile_no,
                    &Utc::now(),
                ],
            )
            .await
            .map_err(|e| write_failed(e, id, &changes.email))?;

        Ok(affected > 0)
    }

    async fn delete(&self, id: CustomerId) -> CustomerResult<bool> {
        let conn = self.get_conn().await?;
        let affected = conn
            .execute(
                "UPDATE customers SET is_deleted = TRUE, updated_at = $2 \
                 WHERE id = $1 AND NOT is_deleted",
                &[&id, &Utc::now()],
            )
            .await
            .map_err(|e| write_failed(e, id, ""))?;

        Ok(affected > 0)
    }

    async fn ping(&self) -> CustomerResult<()> {
        let conn = self.get_conn().await?;
        conn.query_one("SELECT 1", &[])
            .await
            .map_err(|e| query_failed("ping", e))?;
        Ok(())
    }
}

// ============================================================================
// ROW MAPPING AND ERROR CONVERSION
// ============================================================================

/// OFFSET/LIMIT bind as BIGINT; counts past `i64::MAX` saturate.
fn to_sql_count(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn customer_from_row(row: &Row) -> CustomerResult<Customer> {
    let column = |e: tokio_postgres::Error| StorageError::QueryFailed {
        reason: format!("Failed to decode customer row: {}", e),
    };
    Ok(Customer {
        id: row.try_get("id").map_err(column)?,
        name: row.try_get("name").map_err(column)?,
        email: row.try_get("email").map_err(column)?,
        address: row.try_get("address").map_err(column)?,
        mobile_no: row.try_get("mobile_no").map_err(column)?,
        is_deleted: row.try_get("is_deleted").map_err(column)?,
        created_at: row.try_get("created_at").map_err(column)?,
        updated_at: row.try_get("updated_at").map_err(column)?,
    })
}

fn pool_error(err: PoolError) -> CustomerError {
    tracing::error!("Connection pool error: {:?}", err);
    match err {
        PoolError::Timeout(_) => StorageError::PoolExhausted.into(),
        PoolError::Closed => StorageError::Unavailable {
            reason: "Database connection pool is closed".to_string(),
        }
        .into(),
        other => StorageError::Unavailable {
            reason: format!("Failed to acquire database connection: {}", other),
        }
        .into(),
    }
}

fn query_failed(operation: &str, err: tokio_postgres::Error) -> CustomerError {
    tracing::error!(operation, "Database error: {:?}", err);
    StorageError::QueryFailed {
        reason: format!("{} failed: {}", operation, err),
    }
    .into()
}

/// Classify a failed insert/update into conflict, concurrency or update failure.
fn write_failed(err: tokio_postgres::Error, id: CustomerId, email: &str) -> CustomerError {
    tracing::error!(%id, "Database write error: {:?}", err);
    match err.code() {
        Some(code) if *code == SqlState::UNIQUE_VIOLATION => StorageError::DuplicateEmail {
            email: email.to_string(),
        }
        .into(),
        Some(code)
            if *code == SqlState::T_R_SERIALIZATION_FAILURE
                || *code == SqlState::T_R_DEADLOCK_DETECTED =>
        {
            StorageError::ConcurrentModification { id }.into()
        }
        Some(_) => StorageError::UpdateFailed {
            id,
            reason: err.to_string(),
        }
        .into(),
        None => StorageError::Unavailable {
            reason: err.to_string(),
        }
        .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_config_defaults() {
        let config = DbConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.dbname, "customers");
        assert_eq!(config.max_size, 16);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_schema_keeps_email_unique_among_live_rows() {
        assert!(SCHEMA.contains("UNIQUE INDEX"));
        assert!(SCHEMA.contains("WHERE NOT is_deleted"));
        assert!(SCHEMA.contains("VARCHAR(100)"));
        assert!(SCHEMA.contains("VARCHAR(15)"));
    }
}
