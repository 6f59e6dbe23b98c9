//! `SQLite` implementation of [`SectionRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use pagekit_app::ports::SectionRepository;
use pagekit_domain::error::PageKitError;
use pagekit_domain::section::Section;

use crate::error::StorageError;
use crate::row;

struct Wrapper(Section);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Section {
            key: row.try_get("key")?,
            content: row::json(row, "content")?,
            updated_at: row::timestamp(row, "updated_at")?,
        }))
    }
}

const SELECT_BY_KEY: &str = "SELECT * FROM sections WHERE key = ?";
const UPSERT: &str = "INSERT INTO sections (key, content, updated_at) VALUES (?, ?, ?) \
     ON CONFLICT (key) DO UPDATE SET content = excluded.content, updated_at = excluded.updated_at";
const DELETE_BY_KEY: &str = "DELETE FROM sections WHERE key = ?";

/// `SQLite`-backed page section storage.
#[derive(Clone)]
pub struct SqliteSectionRepository {
    pool: SqlitePool,
}

impl SqliteSectionRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SectionRepository for SqliteSectionRepository {
    async fn get(&self, key: &str) -> Result<Option<Section>, PageKitError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_KEY)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(row.map(|w| w.0))
    }

    async fn save(&self, section: Section) -> Result<Section, PageKitError> {
        let content = serde_json::to_string(&section.content).map_err(StorageError::from)?;
        sqlx::query(UPSERT)
            .bind(&section.key)
            .bind(&content)
            .bind(row::encode_timestamp(section.updated_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(section)
    }

    async fn delete(&self, key: &str) -> Result<bool, PageKitError> {
        let result = sqlx::query(DELETE_BY_KEY)
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(result.rows_affected() > 0)
    }
}
