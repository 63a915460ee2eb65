//! Repository for the `shows` table.

use matinee_core::store::NewShow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::show::ShowRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, screen, starts_at, is_active";

/// Query methods for shows. Shows are insert-only.
pub struct ShowRepo;

impl ShowRepo {
    /// Insert a new show, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewShow) -> Result<ShowRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO shows (name, screen, starts_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ShowRow>(&query)
            .bind(&input.name)
            .bind(&input.screen)
            .bind(input.starts_at)
            .fetch_one(pool)
            .await
    }

    /// All active shows, earliest start time first.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<ShowRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shows
             WHERE is_active
             ORDER BY starts_at ASC"
        );
        sqlx::query_as::<_, ShowRow>(&query).fetch_all(pool).await
    }

    /// Point read by id.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ShowRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shows WHERE id = $1");
        sqlx::query_as::<_, ShowRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
