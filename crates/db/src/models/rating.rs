//! Rating entity model and DTOs.

use lyric_core::poem::RatingValue;
use lyric_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `ratings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rating {
    pub id: DbId,
    pub poem_id: DbId,
    /// `good` or `bad`.
    pub rating: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a rating.
#[derive(Debug, Clone, Copy)]
pub struct CreateRating {
    pub poem_id: DbId,
    pub rating: RatingValue,
}
