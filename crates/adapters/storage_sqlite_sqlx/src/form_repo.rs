//! `SQLite` implementation of [`Repository<Form>`].
//!
//! Field definitions live in a single JSON column; forms are small and are
//! always read whole.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use pagekit_app::ports::Repository;
use pagekit_domain::error::PageKitError;
use pagekit_domain::form::{Form, NewForm};
use pagekit_domain::id::FormId;
use pagekit_domain::time;

use crate::error::{StorageError, updated};
use crate::row;

struct Wrapper(Form);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Form {
            id: FormId::new(row.try_get("id")?),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            fields: row::json(row, "fields")?,
            is_active: row.try_get("is_active")?,
            created_at: row::timestamp(row, "created_at")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO forms (title, description, fields, is_active, created_at) VALUES (?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM forms WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM forms ORDER BY id";
const UPDATE: &str =
    "UPDATE forms SET title = ?, description = ?, fields = ?, is_active = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM forms WHERE id = ?";

/// `SQLite`-backed form definition repository.
#[derive(Clone)]
pub struct SqliteFormRepository {
    pool: SqlitePool,
}

impl SqliteFormRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<Form> for SqliteFormRepository {
    async fn create(&self, draft: NewForm) -> Result<Form, PageKitError> {
        let created_at = time::now();
        let fields = serde_json::to_string(&draft.fields).map_err(StorageError::from)?;
        let id = sqlx::query(INSERT)
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(&fields)
            .bind(draft.is_active)
            .bind(row::encode_timestamp(created_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?
            .last_insert_rowid();

        Ok(Form::from_draft(FormId::new(id), draft, created_at))
    }

    async fn get_by_id(&self, id: FormId) -> Result<Option<Form>, PageKitError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(row.map(|w| w.0))
    }

    async fn get_all(&self) -> Result<Vec<Form>, PageKitError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, form: Form) -> Result<Form, PageKitError> {
        let fields = serde_json::to_string(&form.fields).map_err(StorageError::from)?;
        let result = sqlx::query(UPDATE)
            .bind(&form.title)
            .bind(&form.description)
            .bind(&fields)
            .bind(form.is_active)
            .bind(form.id.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        updated(&result, form)
    }

    async fn delete(&self, id: FormId) -> Result<bool, PageKitError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(result.rows_affected() > 0)
    }
}
