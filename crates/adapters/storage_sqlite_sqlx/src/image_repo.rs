//! `SQLite` implementation of [`Repository<UploadedImage>`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use pagekit_app::ports::Repository;
use pagekit_domain::error::PageKitError;
use pagekit_domain::id::ImageId;
use pagekit_domain::image::{NewImage, UploadedImage};
use pagekit_domain::time;

use crate::error::{StorageError, updated};
use crate::row;

struct Wrapper(UploadedImage);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(UploadedImage {
            id: ImageId::new(row.try_get("id")?),
            image: row.try_get("image")?,
            category: row.try_get("category")?,
            caption: row.try_get("caption")?,
            uploaded_at: row::timestamp(row, "uploaded_at")?,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO uploaded_images (image, category, caption, uploaded_at) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM uploaded_images WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM uploaded_images ORDER BY id";
const UPDATE: &str = "UPDATE uploaded_images SET image = ?, category = ?, caption = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM uploaded_images WHERE id = ?";

/// `SQLite`-backed uploaded image repository.
#[derive(Clone)]
pub struct SqliteImageRepository {
    pool: SqlitePool,
}

impl SqliteImageRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<UploadedImage> for SqliteImageRepository {
    async fn create(&self, draft: NewImage) -> Result<UploadedImage, PageKitError> {
        let uploaded_at = time::now();
        let id = sqlx::query(INSERT)
            .bind(&draft.image)
            .bind(&draft.category)
            .bind(&draft.caption)
            .bind(row::encode_timestamp(uploaded_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?
            .last_insert_rowid();

        Ok(UploadedImage::from_draft(ImageId::new(id), draft, uploaded_at))
    }

    async fn get_by_id(&self, id: ImageId) -> Result<Option<UploadedImage>, PageKitError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(row.map(|w| w.0))
    }

    async fn get_all(&self) -> Result<Vec<UploadedImage>, PageKitError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, image: UploadedImage) -> Result<UploadedImage, PageKitError> {
        let result = sqlx::query(UPDATE)
            .bind(&image.image)
            .bind(&image.category)
            .bind(&image.caption)
            .bind(image.id.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        updated(&result, image)
    }

    async fn delete(&self, id: ImageId) -> Result<bool, PageKitError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(result.rows_affected() > 0)
    }
}
