//! Repository for the `ratings` table.

use sqlx::PgPool;

use crate::models::rating::{CreateRating, Rating};

const COLUMNS: &str = "id, poem_id, rating, created_at";

pub struct RatingRepo;

impl RatingRepo {
    /// Insert a rating inside its own transaction.
    ///
    /// Any failure (including a `poem_id` that does not exist) rolls the
    /// transaction back before the error is returned.
    pub async fn create(pool: &PgPool, input: &CreateRating) -> Result<Rating, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO ratings (poem_id, rating)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Rating>(&query)
            .bind(input.poem_id)
            .bind(input.rating.name())
            .fetch_one(&mut *tx)
            .await;

        match inserted {
            Ok(rating) => {
                tx.commit().await?;
                Ok(rating)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(error = %rollback_err, "Rating insert rollback failed");
                }
                Err(err)
            }
        }
    }
}
