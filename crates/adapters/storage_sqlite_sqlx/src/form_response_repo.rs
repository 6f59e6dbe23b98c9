//! `SQLite` implementation of [`Repository<FormResponse>`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use pagekit_app::ports::Repository;
use pagekit_domain::error::PageKitError;
use pagekit_domain::form::{FormResponse, NewFormResponse};
use pagekit_domain::id::{FormId, FormResponseId};
use pagekit_domain::time;

use crate::error::{StorageError, reference_error, updated};
use crate::row;

struct Wrapper(FormResponse);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(FormResponse {
            id: FormResponseId::new(row.try_get("id")?),
            form: FormId::new(row.try_get("form_id")?),
            data: row::json(row, "data")?,
            submitted_at: row::timestamp(row, "submitted_at")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO form_responses (form_id, data, submitted_at) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM form_responses WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM form_responses ORDER BY id DESC";
const UPDATE: &str = "UPDATE form_responses SET form_id = ?, data = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM form_responses WHERE id = ?";

/// `SQLite`-backed form response repository.
///
/// Responses reference their form through a foreign key; writes naming a
/// form that does not exist fail with
/// [`ValidationError::UnknownReference`](pagekit_domain::error::ValidationError::UnknownReference).
#[derive(Clone)]
pub struct SqliteFormResponseRepository {
    pool: SqlitePool,
}

impl SqliteFormResponseRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<FormResponse> for SqliteFormResponseRepository {
    async fn create(&self, draft: NewFormResponse) -> Result<FormResponse, PageKitError> {
        let submitted_at = time::now();
        let data = serde_json::to_string(&draft.data).map_err(StorageError::from)?;
        let id = sqlx::query(INSERT)
            .bind(draft.form.get())
            .bind(&data)
            .bind(row::encode_timestamp(submitted_at))
            .execute(&self.pool)
            .await
            .map_err(reference_error("form"))?
            .last_insert_rowid();

        Ok(FormResponse::from_draft(
            FormResponseId::new(id),
            draft,
            submitted_at,
        ))
    }

    async fn get_by_id(&self, id: FormResponseId) -> Result<Option<FormResponse>, PageKitError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(row.map(|w| w.0))
    }

    async fn get_all(&self) -> Result<Vec<FormResponse>, PageKitError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, response: FormResponse) -> Result<FormResponse, PageKitError> {
        let data = serde_json::to_string(&response.data).map_err(StorageError::from)?;
        let result = sqlx::query(UPDATE)
            .bind(response.form.get())
            .bind(&data)
            .bind(response.id.get())
            .execute(&self.pool)
            .await
            .map_err(reference_error("form"))?;
        updated(&result, response)
    }

    async fn delete(&self, id: FormResponseId) -> Result<bool, PageKitError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(result.rows_affected() > 0)
    }
}
