//! Key-value storage capability and implementations.
//!
//! # Responsibility
//! - Define the get/set/remove contract containers persist through.
//! - Keep storage-backend details out of container logic.
//!
//! # Invariants
//! - Values are opaque strings; containers own the JSON encoding.
//! - An absent key reads as `Ok(None)`, never as an error.

use crate::model::user::UserId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Storage key holding the single session user record.
pub const USER_KEY: &str = "user";

/// Storage key holding the todo list for one user.
pub fn todos_key(user_id: UserId) -> String {
    format!("todos-{user_id}")
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-boundary error covering read, write and decode failures.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    /// A persisted value failed to decode as the expected JSON shape.
    Decode(serde_json::Error),
    UnsupportedSchemaVersion {
        store_version: u32,
        latest_supported: u32,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "invalid persisted record: {err}"),
            Self::UnsupportedSchemaVersion {
                store_version,
                latest_supported,
            } => write!(
                f,
                "store schema version {store_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

/// Key-value storage contract injected into containers.
///
/// Methods take `&self`; implementations use interior mutability where the
/// backend needs it. The model is single-threaded run-to-completion, so no
/// locking is involved.
pub trait KvStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}
