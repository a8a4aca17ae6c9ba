//! Remote Carts Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use serde_json::Value;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, types::Json};
use uuid::Uuid;
use vitrina::{cart::Cart, snapshot};

use crate::{
    domain::carts::records::UserCartRecord,
    storage::{Offline, StorageError},
};

const FIND_USER_CART_SQL: &str = include_str!("../sql/find_user_cart.sql");
const CREATE_USER_CART_SQL: &str = include_str!("../sql/create_user_cart.sql");
const UPDATE_USER_CART_SQL: &str = include_str!("../sql/update_user_cart.sql");
const DELETE_USER_CART_SQL: &str = include_str!("../sql/delete_user_cart.sql");

/// Per-user cart records, keyed by e-mail.
#[automock]
#[async_trait]
pub trait RemoteCartsRepository: Send + Sync {
    /// Fetch the record of `email`, if one exists.
    async fn find_cart(&self, email: &str) -> Result<Option<UserCartRecord>, StorageError>;

    /// Create the record of `email`.
    async fn create_cart(
        &self,
        email: &str,
        cart: &Cart,
        revision: i64,
    ) -> Result<UserCartRecord, StorageError>;

    /// Overwrite a record, but only if its stored revision is older than
    /// `revision`. Returns the number of rows written.
    async fn update_cart(&self, uuid: Uuid, cart: &Cart, revision: i64)
    -> Result<u64, StorageError>;

    /// Delete the record of `email`. Returns the number of rows deleted.
    async fn delete_cart(&self, email: &str) -> Result<u64, StorageError>;
}

/// PostgreSQL-backed remote carts repository.
#[derive(Debug, Clone)]
pub struct PgRemoteCartsRepository {
    pool: PgPool,
}

impl PgRemoteCartsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RemoteCartsRepository for PgRemoteCartsRepository {
    async fn find_cart(&self, email: &str) -> Result<Option<UserCartRecord>, StorageError> {
        let record = query_as::<Postgres, UserCartRecord>(FIND_USER_CART_SQL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn create_cart(
        &self,
        email: &str,
        cart: &Cart,
        revision: i64,
    ) -> Result<UserCartRecord, StorageError> {
        let record = query_as::<Postgres, UserCartRecord>(CREATE_USER_CART_SQL)
            .bind(Uuid::now_v7())
            .bind(email)
            .bind(Json(snapshot::to_value(cart)?))
            .bind(revision)
            .fetch_one(&self.pool)
            .await?;

        Ok(record)
    }

    async fn update_cart(
        &self,
        uuid: Uuid,
        cart: &Cart,
        revision: i64,
    ) -> Result<u64, StorageError> {
        let rows_affected = query(UPDATE_USER_CART_SQL)
            .bind(uuid)
            .bind(Json(snapshot::to_value(cart)?))
            .bind(revision)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    async fn delete_cart(&self, email: &str) -> Result<u64, StorageError> {
        let rows_affected = query(DELETE_USER_CART_SQL)
            .bind(email)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

#[async_trait]
impl RemoteCartsRepository for Offline {
    async fn find_cart(&self, _email: &str) -> Result<Option<UserCartRecord>, StorageError> {
        Err(StorageError::Unavailable)
    }

    async fn create_cart(
        &self,
        _email: &str,
        _cart: &Cart,
        _revision: i64,
    ) -> Result<UserCartRecord, StorageError> {
        Err(StorageError::Unavailable)
    }

    async fn update_cart(
        &self,
        _uuid: Uuid,
        _cart: &Cart,
        _revision: i64,
    ) -> Result<u64, StorageError> {
        Err(StorageError::Unavailable)
    }

    async fn delete_cart(&self, _email: &str) -> Result<u64, StorageError> {
        Err(StorageError::Unavailable)
    }
}

impl<'r> FromRow<'r, PgRow> for UserCartRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let Json(cart_data) = row.try_get::<Json<Value>, _>("cart_data")?;

        let cart = snapshot::from_value(cart_data).map_err(|e| sqlx::Error::ColumnDecode {
            index: "cart_data".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_email: row.try_get("user_email")?,
            cart,
            revision: row.try_get("revision")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;
    use vitrina::fixtures::default_catalog;

    use crate::test::TestDb;

    use super::*;

    fn cart(quantity: u32) -> TestResult<Cart> {
        let shirt = default_catalog()?
            .into_iter()
            .next()
            .ok_or("empty catalog")?;

        let mut cart = Cart::new();
        cart.add_item(shirt, "m", "white", quantity);

        Ok(cart)
    }

    #[tokio::test]
    async fn offline_repository_is_unavailable() {
        let result = Offline.find_cart("a@example.com").await;

        assert!(
            matches!(result, Err(StorageError::Unavailable)),
            "expected Unavailable, got {result:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn create_then_find_round_trips_the_cart() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgRemoteCartsRepository::new(db.pool().clone());

        let created = repository
            .create_cart("a@example.com", &cart(2)?, 10)
            .await?;

        let found = repository
            .find_cart("a@example.com")
            .await?
            .ok_or("record missing")?;

        assert_eq!(found.uuid, created.uuid);
        assert_eq!(found.revision, 10);
        assert_eq!(found.cart.total_items(), 2);
        assert_eq!(found.cart.total_price(), Decimal::new(31_98, 2));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn second_create_for_one_email_already_exists() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgRemoteCartsRepository::new(db.pool().clone());

        repository.create_cart("a@example.com", &cart(1)?, 1).await?;

        let result = repository.create_cart("a@example.com", &cart(1)?, 2).await;

        assert!(
            matches!(result, Err(StorageError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn update_only_applies_newer_revisions() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgRemoteCartsRepository::new(db.pool().clone());

        let record = repository.create_cart("a@example.com", &cart(1)?, 5).await?;

        assert_eq!(repository.update_cart(record.uuid, &cart(9)?, 4).await?, 0);
        assert_eq!(repository.update_cart(record.uuid, &cart(9)?, 5).await?, 0);
        assert_eq!(repository.update_cart(record.uuid, &cart(3)?, 6).await?, 1);

        let found = repository
            .find_cart("a@example.com")
            .await?
            .ok_or("record missing")?;

        assert_eq!(found.revision, 6);
        assert_eq!(found.cart.total_items(), 3);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn delete_removes_the_record() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgRemoteCartsRepository::new(db.pool().clone());

        repository.create_cart("a@example.com", &cart(1)?, 1).await?;

        assert_eq!(repository.delete_cart("a@example.com").await?, 1);
        assert_eq!(repository.delete_cart("a@example.com").await?, 0);
        assert!(
            repository.find_cart("a@example.com").await?.is_none(),
            "record should be gone"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn legacy_array_payloads_are_readable() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgRemoteCartsRepository::new(db.pool().clone());

        let legacy = serde_json::to_value(cart(4)?.items())?;

        query(
            "INSERT INTO user_carts (uuid, user_email, cart_data, revision) \
             VALUES ($1, $2, $3, 0)",
        )
        .bind(Uuid::now_v7())
        .bind("legacy@example.com")
        .bind(Json(legacy))
        .execute(db.pool())
        .await?;

        let found = repository
            .find_cart("legacy@example.com")
            .await?
            .ok_or("record missing")?;

        assert_eq!(found.cart.total_items(), 4);

        Ok(())
    }
}
