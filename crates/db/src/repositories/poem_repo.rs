//! Repository for the `poems` table.

use lyric_core::types::DbId;
use sqlx::PgPool;

use crate::models::poem::{CreatePoem, Poem};

const COLUMNS: &str = "id, content, source, character_id, created_at";

pub struct PoemRepo;

impl PoemRepo {
    /// Insert a generated poem, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePoem) -> Result<Poem, sqlx::Error> {
        let query = format!(
            "INSERT INTO poems (content, source, character_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Poem>(&query)
            .bind(&input.content)
            .bind(input.source.name())
            .bind(input.stored_character_id())
            .fetch_one(pool)
            .await
    }

    /// Replace a poem's content. `created_at` is left untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_content(
        pool: &PgPool,
        id: DbId,
        content: &str,
    ) -> Result<Option<Poem>, sqlx::Error> {
        let query = format!(
            "UPDATE poems SET content = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Poem>(&query)
            .bind(id)
            .bind(content)
            .fetch_optional(pool)
            .await
    }
}
