//! In-memory remote cart tier.

use std::sync::{
    Mutex, MutexGuard, PoisonError,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use jiff::Timestamp;
use rustc_hash::FxHashMap;
use uuid::Uuid;
use vitrina::cart::Cart;

use crate::{
    domain::carts::{RemoteCartsRepository, records::UserCartRecord},
    storage::StorageError,
};

/// Remote carts kept in a map, with the same conditional-update rule as the
/// `PostgreSQL` repository.
#[derive(Debug, Default)]
pub(crate) struct InMemoryRemoteCarts {
    records: Mutex<FxHashMap<String, UserCartRecord>>,
    revisions: Mutex<Vec<i64>>,
    failing: AtomicBool,
}

impl InMemoryRemoteCarts {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Store a record as if another device had written it.
    pub(crate) fn seed(&self, email: &str, cart: Cart, revision: i64) {
        let now = Timestamp::now();

        self.records().insert(
            email.to_string(),
            UserCartRecord {
                uuid: Uuid::now_v7(),
                user_email: email.to_string(),
                cart,
                revision,
                created_at: now,
                updated_at: now,
            },
        );
    }

    pub(crate) fn record(&self, email: &str) -> Option<UserCartRecord> {
        self.records().get(email).cloned()
    }

    /// Make every call fail with [`StorageError::Unavailable`].
    pub(crate) fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Revisions of every attempted create and update, in order.
    pub(crate) fn revisions(&self) -> Vec<i64> {
        lock(&self.revisions).clone()
    }

    /// Number of attempted creates and updates.
    pub(crate) fn writes(&self) -> usize {
        lock(&self.revisions).len()
    }

    fn records(&self) -> MutexGuard<'_, FxHashMap<String, UserCartRecord>> {
        lock(&self.records)
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable);
        }

        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl RemoteCartsRepository for InMemoryRemoteCarts {
    async fn find_cart(&self, email: &str) -> Result<Option<UserCartRecord>, StorageError> {
        self.check()?;

        Ok(self.record(email))
    }

    async fn create_cart(
        &self,
        email: &str,
        cart: &Cart,
        revision: i64,
    ) -> Result<UserCartRecord, StorageError> {
        self.check()?;
        lock(&self.revisions).push(revision);

        let mut records = self.records();

        if records.contains_key(email) {
            return Err(StorageError::AlreadyExists);
        }

        let now = Timestamp::now();
        let record = UserCartRecord {
            uuid: Uuid::now_v7(),
            user_email: email.to_string(),
            cart: cart.clone(),
            revision,
            created_at: now,
            updated_at: now,
        };

        records.insert(email.to_string(), record.clone());

        Ok(record)
    }

    async fn update_cart(
        &self,
        uuid: Uuid,
        cart: &Cart,
        revision: i64,
    ) -> Result<u64, StorageError> {
        self.check()?;
        lock(&self.revisions).push(revision);

        let mut records = self.records();

        let Some(record) = records
            .values_mut()
            .find(|record| record.uuid == uuid && record.revision < revision)
        else {
            return Ok(0);
        };

        record.cart = cart.clone();
        record.revision = revision;
        record.updated_at = Timestamp::now();

        Ok(1)
    }

    async fn delete_cart(&self, email: &str) -> Result<u64, StorageError> {
        self.check()?;

        Ok(u64::from(self.records().remove(email).is_some()))
    }
}
