//! `SQLite` implementation of [`Repository<QuoteRequest>`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use pagekit_app::ports::Repository;
use pagekit_domain::error::PageKitError;
use pagekit_domain::id::QuoteRequestId;
use pagekit_domain::quote::{NewQuoteRequest, QuoteRequest};
use pagekit_domain::time;

use crate::error::{StorageError, updated};
use crate::row;

struct Wrapper(QuoteRequest);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(QuoteRequest {
            id: QuoteRequestId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            company: row.try_get("company")?,
            service: row.try_get("service")?,
            message: row.try_get("message")?,
            created_at: row::timestamp(row, "created_at")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO quote_requests (name, email, phone, company, service, message, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM quote_requests WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM quote_requests ORDER BY id DESC";
const UPDATE: &str = "UPDATE quote_requests SET name = ?, email = ?, phone = ?, company = ?, service = ?, message = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM quote_requests WHERE id = ?";

/// `SQLite`-backed quote request repository.
#[derive(Clone)]
pub struct SqliteQuoteRepository {
    pool: SqlitePool,
}

impl SqliteQuoteRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<QuoteRequest> for SqliteQuoteRepository {
    async fn create(&self, draft: NewQuoteRequest) -> Result<QuoteRequest, PageKitError> {
        let created_at = time::now();
        let id = sqlx::query(INSERT)
            .bind(&draft.name)
            .bind(&draft.email)
            .bind(&draft.phone)
            .bind(&draft.company)
            .bind(&draft.service)
            .bind(&draft.message)
            .bind(row::encode_timestamp(created_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?
            .last_insert_rowid();

        Ok(QuoteRequest::from_draft(
            QuoteRequestId::new(id),
            draft,
            created_at,
        ))
    }

    async fn get_by_id(&self, id: QuoteRequestId) -> Result<Option<QuoteRequest>, PageKitError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(row.map(|w| w.0))
    }

    async fn get_all(&self) -> Result<Vec<QuoteRequest>, PageKitError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, quote: QuoteRequest) -> Result<QuoteRequest, PageKitError> {
        let result = sqlx::query(UPDATE)
            .bind(&quote.name)
            .bind(&quote.email)
            .bind(&quote.phone)
            .bind(&quote.company)
            .bind(&quote.service)
            .bind(&quote.message)
            .bind(quote.id.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        updated(&result, quote)
    }

    async fn delete(&self, id: QuoteRequestId) -> Result<bool, PageKitError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(result.rows_affected() > 0)
    }
}
