//! Cart Records

use jiff::Timestamp;
use uuid::Uuid;
use vitrina::cart::Cart;

/// Remote per-user cart record.
#[derive(Debug, Clone)]
pub struct UserCartRecord {
    pub uuid: Uuid,
    pub user_email: String,
    pub cart: Cart,
    pub revision: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
