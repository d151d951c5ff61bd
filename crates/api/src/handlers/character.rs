//! Character registration.

use axum::extract::State;
use axum::Json;
use lyric_core::character::{describe_validation_errors, CharacterProfile};
use lyric_core::error::CoreError;
use lyric_core::types::{DbId, Timestamp};
use lyric_db::repositories::CharacterRepo;
use serde::Serialize;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::state::AppState;

/// A submitted character, plus its row identity when persisted.
#[derive(Debug, Serialize)]
pub struct CharacterView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    #[serde(flatten)]
    pub profile: CharacterProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Serialize)]
pub struct SubmitCharacterResponse {
    pub message: &'static str,
    pub character: CharacterView,
}

/// POST /submit-character
///
/// Every call registers a new character; identical submissions are not
/// merged.
pub async fn submit_character(
    State(state): State<AppState>,
    AppJson(input): AppJson<CharacterProfile>,
) -> AppResult<Json<SubmitCharacterResponse>> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(describe_validation_errors(&e)))?;

    let character = match &state.pool {
        Some(pool) => {
            let row = CharacterRepo::create(pool, &input).await?;
            tracing::info!(character_id = row.id, name = %row.name, "Character registered");
            CharacterView {
                id: Some(row.id),
                created_at: Some(row.created_at),
                profile: row.into(),
            }
        }
        None => {
            // Same shape as a stored row: blank quotes become null.
            let quotes = input.quotes().map(str::to_owned);
            CharacterView {
                id: None,
                profile: CharacterProfile { quotes, ..input },
                created_at: None,
            }
        }
    };

    Ok(Json(SubmitCharacterResponse {
        message: "Character registered",
        character,
    }))
}
