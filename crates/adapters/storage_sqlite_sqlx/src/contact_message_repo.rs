//! `SQLite` implementation of [`Repository<ContactMessage>`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use pagekit_app::ports::Repository;
use pagekit_domain::contact_message::{ContactMessage, NewContactMessage};
use pagekit_domain::error::PageKitError;
use pagekit_domain::id::ContactMessageId;
use pagekit_domain::time;

use crate::error::{StorageError, updated};
use crate::row;

struct Wrapper(ContactMessage);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(ContactMessage {
            id: ContactMessageId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            subject: row.try_get("subject")?,
            message: row.try_get("message")?,
            is_read: row.try_get("is_read")?,
            created_at: row::timestamp(row, "created_at")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO contact_messages (name, email, phone, subject, message, is_read, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM contact_messages WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM contact_messages ORDER BY id DESC";
const UPDATE: &str = "UPDATE contact_messages SET name = ?, email = ?, phone = ?, subject = ?, message = ?, is_read = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM contact_messages WHERE id = ?";

/// `SQLite`-backed contact message repository.
#[derive(Clone)]
pub struct SqliteContactMessageRepository {
    pool: SqlitePool,
}

impl SqliteContactMessageRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<ContactMessage> for SqliteContactMessageRepository {
    async fn create(&self, draft: NewContactMessage) -> Result<ContactMessage, PageKitError> {
        let created_at = time::now();
        let id = sqlx::query(INSERT)
            .bind(&draft.name)
            .bind(&draft.email)
            .bind(&draft.phone)
            .bind(&draft.subject)
            .bind(&draft.message)
            .bind(draft.is_read)
            .bind(row::encode_timestamp(created_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?
            .last_insert_rowid();

        Ok(ContactMessage::from_draft(
            ContactMessageId::new(id),
            draft,
            created_at,
        ))
    }

    async fn get_by_id(&self, id: ContactMessageId) -> Result<Option<ContactMessage>, PageKitError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(row.map(|w| w.0))
    }

    async fn get_all(&self) -> Result<Vec<ContactMessage>, PageKitError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, message: ContactMessage) -> Result<ContactMessage, PageKitError> {
        let result = sqlx::query(UPDATE)
            .bind(&message.name)
            .bind(&message.email)
            .bind(&message.phone)
            .bind(&message.subject)
            .bind(&message.message)
            .bind(message.is_read)
            .bind(message.id.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        updated(&result, message)
    }

    async fn delete(&self, id: ContactMessageId) -> Result<bool, PageKitError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(result.rows_affected() > 0)
    }
}
