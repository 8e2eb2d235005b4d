use async_trait::async_trait;

use crate::models::{User, UserId};

mod sqlite;
pub use sqlite::SqliteStorage;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("storage lock poisoned")]
    LockPoisoned,
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn migrate(&self) -> StorageResult<()>;
    async fn find_by_id(&self, id: &UserId) -> StorageResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> StorageResult<Option<User>>;
    /// Fails with `DuplicateEmail` if the address is taken.
    async fn insert(&self, user: &User) -> StorageResult<()>;
    /// Returns the removed record, if there was one.
    async fn delete(&self, id: &UserId) -> StorageResult<Option<User>>;
}
