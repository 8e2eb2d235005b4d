use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

use crate::models::{User, UserId};
use crate::storage::{StorageError, StorageResult, UserStore};

const USER_COLUMNS: &str = "id, name, email, password, created_at";

pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    pub async fn new(db_path: &str) -> StorageResult<Self> {
        let conn = Connection::open(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    let id: String = row.get(0)?;
    let created_at: DateTime<Utc> = row.get(4)?;

    Ok(User {
        id: UserId::parse(&id).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                format!("malformed user id {:?}", id).into(),
            )
        })?,
        name: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
        created_at,
    })
}

/// Only the email column's UNIQUE constraint; key collisions and NOT NULL stay database errors.
fn is_duplicate_email(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, Some(message)) => {
            e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                && message.contains("users.email")
        }
        _ => false,
    }
}

#[async_trait]
impl UserStore for SqliteStorage {
    async fn migrate(&self) -> StorageResult<()> {
        let conn = self.lock()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        info!("Database migration completed");
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> StorageResult<Option<User>> {
        let conn = self.lock()?;

        let user = conn
            .query_row(
                &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
                params![id.as_str()],
                user_from_row,
            )
            .optional()?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let conn = self.lock()?;

        let user = conn
            .query_row(
                &format!("SELECT {} FROM users WHERE email = ?1", USER_COLUMNS),
                params![email],
                user_from_row,
            )
            .optional()?;

        Ok(user)
    }

    async fn insert(&self, user: &User) -> StorageResult<()> {
        let conn = self.lock()?;

        let inserted = conn.execute(
            "INSERT INTO users (id, name, email, password, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user.id.as_str(),
                &user.name,
                &user.email,
                &user.password,
                &user.created_at,
            ],
        );

        match inserted {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_email(&e) => Err(StorageError::DuplicateEmail),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: &UserId) -> StorageResult<Option<User>> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let user = tx
            .query_row(
                &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
                params![id.as_str()],
                user_from_row,
            )
            .optional()?;

        if user.is_some() {
            tx.execute("DELETE FROM users WHERE id = ?1", params![id.as_str()])?;
        }

        tx.commit()?;
        Ok(user)
    }
}
