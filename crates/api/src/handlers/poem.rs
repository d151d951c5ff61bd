//! Poem generation, editing and rating.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use lyric_core::character::CharacterProfile;
use lyric_core::error::CoreError;
use lyric_core::poem::{PoemSource, RatingValue};
use lyric_core::prompt::{build_instruction, PromptRequest};
use lyric_core::types::DbId;
use lyric_db::models::poem::CreatePoem;
use lyric_db::models::rating::CreateRating;
use lyric_db::repositories::{CharacterRepo, PoemRepo, RatingRepo};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Generate
// ---------------------------------------------------------------------------

/// Body of `POST /generate-poem`.
///
/// Character attributes may arrive under `characterData` or flattened at the
/// top level next to `source`; the browser client sends the latter.
#[derive(Debug, Deserialize)]
pub struct GeneratePoemRequest {
    pub source: String,
    #[serde(default)]
    pub character_id: Option<DbId>,
    /// Upload result echoed back by the client; only its presence matters.
    #[serde(default, rename = "imageData")]
    pub image_data: Option<Value>,
    #[serde(default, rename = "characterData")]
    pub character_data: Option<Value>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct GeneratedPoem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    pub content: String,
    pub source: &'static str,
}

#[derive(Debug, Serialize)]
pub struct GeneratePoemResponse {
    pub message: &'static str,
    pub poem: GeneratedPoem,
}

/// POST /generate-poem
///
/// The backend call runs on its own task so it completes even if the caller
/// disconnects mid-request.
pub async fn generate_poem(
    State(state): State<AppState>,
    AppJson(input): AppJson<GeneratePoemRequest>,
) -> AppResult<Json<GeneratePoemResponse>> {
    let source = PoemSource::from_name(&input.source).unwrap_or(PoemSource::Character);

    let mut character = inline_character(&input);
    let mut character_id = None;
    if let (Some(pool), Some(id)) = (&state.pool, input.character_id) {
        match CharacterRepo::find_by_id(pool, id).await? {
            Some(row) => {
                character_id = Some(row.id);
                if character.is_none() {
                    character = Some(row.into());
                }
            }
            None => tracing::warn!(character_id = id, "Unknown character, ignoring reference"),
        }
    }

    let instruction = build_instruction(&PromptRequest {
        source: &input.source,
        character: character.as_ref(),
        language: input.language.as_deref(),
    });
    tracing::debug!(
        source = %input.source,
        has_character = character.is_some(),
        has_image = input.image_data.is_some(),
        "Generating poem",
    );

    let inference = Arc::clone(&state.inference);
    let content = tokio::spawn(async move { inference.generate(&instruction).await })
        .await
        .map_err(|e| AppError::InternalError(format!("Generation task failed: {e}")))?
        .map_err(CoreError::from)?;

    let id = match &state.pool {
        Some(pool) => {
            let poem = PoemRepo::create(
                pool,
                &CreatePoem {
                    content: content.clone(),
                    source,
                    character_id,
                },
            )
            .await?;
            tracing::info!(poem_id = poem.id, source = %poem.source, "Poem generated");
            Some(poem.id)
        }
        None => None,
    };

    Ok(Json(GeneratePoemResponse {
        message: "Poem generated",
        poem: GeneratedPoem {
            id,
            content,
            source: source.name(),
        },
    }))
}

/// Character attributes sent with the request, if complete and valid.
fn inline_character(input: &GeneratePoemRequest) -> Option<CharacterProfile> {
    let candidate = match &input.character_data {
        Some(data) => data.clone(),
        None if input.rest.is_empty() => return None,
        None => Value::Object(input.rest.clone()),
    };

    let profile: CharacterProfile = serde_json::from_value(candidate).ok()?;
    match profile.validate() {
        Ok(()) => Some(profile),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring incomplete character data");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Customize
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CustomizePoemRequest {
    pub poem_id: DbId,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CustomizedPoem {
    pub id: DbId,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CustomizePoemResponse {
    pub message: &'static str,
    pub poem: CustomizedPoem,
}

/// PUT /customize-poem
pub async fn customize_poem(
    State(state): State<AppState>,
    AppJson(input): AppJson<CustomizePoemRequest>,
) -> AppResult<Json<CustomizePoemResponse>> {
    if input.content.trim().is_empty() {
        return Err(CoreError::Validation("Poem content must not be empty".into()).into());
    }

    let poem = match &state.pool {
        Some(pool) => {
            let row = PoemRepo::update_content(pool, input.poem_id, &input.content)
                .await?
                .ok_or_else(|| {
                    CoreError::Validation(format!("Poem {} does not exist", input.poem_id))
                })?;
            tracing::info!(poem_id = row.id, "Poem customized");
            CustomizedPoem {
                id: row.id,
                content: row.content,
            }
        }
        None => CustomizedPoem {
            id: input.poem_id,
            content: input.content,
        },
    };

    Ok(Json(CustomizePoemResponse {
        message: "Poem updated",
        poem,
    }))
}

// ---------------------------------------------------------------------------
// Rate
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RatePoemRequest {
    /// Required when persistence is enabled. Without a database poems have
    /// no id, so the client may leave it out.
    #[serde(default)]
    pub poem_id: Option<DbId>,
    pub rating: RatingValue,
}

#[derive(Debug, Serialize)]
pub struct RatingView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poem_id: Option<DbId>,
    pub rating: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RatePoemResponse {
    pub message: &'static str,
    pub rating: RatingView,
}

/// POST /rate-poem
///
/// With persistence enabled, `poem_id` must name an existing poem or the
/// request is rejected with 400.
pub async fn rate_poem(
    State(state): State<AppState>,
    AppJson(input): AppJson<RatePoemRequest>,
) -> AppResult<Json<RatePoemResponse>> {
    let id = match &state.pool {
        Some(pool) => {
            let poem_id = input
                .poem_id
                .ok_or_else(|| CoreError::Validation("poem_id is required".into()))?;
            let row = RatingRepo::create(
                pool,
                &CreateRating {
                    poem_id,
                    rating: input.rating,
                },
            )
            .await?;
            tracing::info!(rating_id = row.id, poem_id = row.poem_id, rating = %row.rating, "Poem rated");
            Some(row.id)
        }
        None => None,
    };

    Ok(Json(RatePoemResponse {
        message: "Rating saved",
        rating: RatingView {
            id,
            poem_id: input.poem_id,
            rating: input.rating.name(),
        },
    }))
}
