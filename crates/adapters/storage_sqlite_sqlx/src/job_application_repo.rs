//! `SQLite` implementation of [`Repository<JobApplication>`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use pagekit_app::ports::Repository;
use pagekit_domain::error::PageKitError;
use pagekit_domain::id::JobApplicationId;
use pagekit_domain::job_application::{JobApplication, NewJobApplication};
use pagekit_domain::time;

use crate::error::{StorageError, updated};
use crate::row;

struct Wrapper(JobApplication);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(JobApplication {
            id: JobApplicationId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            position: row.try_get("position")?,
            cover_letter: row.try_get("cover_letter")?,
            resume: row.try_get("resume")?,
            applied_at: row::timestamp(row, "applied_at")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO job_applications (name, email, phone, position, cover_letter, resume, applied_at) VALUES (?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM job_applications WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM job_applications ORDER BY id DESC";
const UPDATE: &str = "UPDATE job_applications SET name = ?, email = ?, phone = ?, position = ?, cover_letter = ?, resume = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM job_applications WHERE id = ?";

/// `SQLite`-backed job application repository.
#[derive(Clone)]
pub struct SqliteJobApplicationRepository {
    pool: SqlitePool,
}

impl SqliteJobApplicationRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<JobApplication> for SqliteJobApplicationRepository {
    async fn create(&self, draft: NewJobApplication) -> Result<JobApplication, PageKitError> {
        let applied_at = time::now();
        let id = sqlx::query(INSERT)
            .bind(&draft.name)
            .bind(&draft.email)
            .bind(&draft.phone)
            .bind(&draft.position)
            .bind(&draft.cover_letter)
            .bind(&draft.resume)
            .bind(row::encode_timestamp(applied_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?
            .last_insert_rowid();

        Ok(JobApplication::from_draft(
            JobApplicationId::new(id),
            draft,
            applied_at,
        ))
    }

    async fn get_by_id(&self, id: JobApplicationId) -> Result<Option<JobApplication>, PageKitError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(row.map(|w| w.0))
    }

    async fn get_all(&self) -> Result<Vec<JobApplication>, PageKitError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, application: JobApplication) -> Result<JobApplication, PageKitError> {
        let result = sqlx::query(UPDATE)
            .bind(&application.name)
            .bind(&application.email)
            .bind(&application.phone)
            .bind(&application.position)
            .bind(&application.cover_letter)
            .bind(&application.resume)
            .bind(application.id.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        updated(&result, application)
    }

    async fn delete(&self, id: JobApplicationId) -> Result<bool, PageKitError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(result.rows_affected() > 0)
    }
}
