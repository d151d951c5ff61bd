use lyric_core::error::CoreError;
use lyric_core::prompt::wrap_instruction;
use serde::{Deserialize, Serialize};

use crate::InferenceSettings;

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationParameters {
    pub max_length: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub repetition_penalty: f64,
    pub do_sample: bool,
}

impl GenerationParameters {
    /// The fixed parameters used for poems.
    pub const POEM: Self = Self {
        max_length: 120,
        temperature: 0.8,
        top_p: 0.95,
        repetition_penalty: 1.2,
        do_sample: true,
    };
}

#[derive(Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Deserialize)]
struct GeneratedCandidate {
    generated_text: String,
}

/// Errors from the generation backend.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    /// No credential is configured; nothing was sent.
    #[error("Generation backend is not configured")]
    NotConfigured,

    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("Generation backend returned HTTP {status}")]
    Api { status: u16 },

    /// The backend answered 2xx with no candidates.
    #[error("Generation backend returned no candidates")]
    EmptyResponse,
}

impl From<InferenceError> for CoreError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::NotConfigured => CoreError::Configuration(err.to_string()),
            _ => CoreError::Upstream {
                summary: "Failed to generate poem",
                detail: err.to_string(),
            },
        }
    }
}

/// HTTP client for the text-generation endpoint.
///
/// Each call is a single attempt: no retry, no streaming, and no timeout
/// beyond reqwest's defaults.
pub struct InferenceClient {
    client: reqwest::Client,
    settings: InferenceSettings,
}

impl InferenceClient {
    pub fn new(settings: InferenceSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, settings: InferenceSettings) -> Self {
        Self { client, settings }
    }

    pub fn is_configured(&self) -> bool {
        self.settings.is_configured()
    }

    /// Generate a poem for `instruction` and return the first candidate
    /// verbatim.
    pub async fn generate(&self, instruction: &str) -> Result<String, InferenceError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(InferenceError::NotConfigured)?;

        let inputs = wrap_instruction(instruction);
        let body = GenerationRequest {
            inputs: &inputs,
            parameters: GenerationParameters::POEM,
        };

        let response = self
            .client
            .post(&self.settings.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::debug!(status = status.as_u16(), body = %detail, "Generation backend error body");
            return Err(InferenceError::Api {
                status: status.as_u16(),
            });
        }

        let candidates: Vec<GeneratedCandidate> = response.json().await?;
        candidates
            .into_iter()
            .next()
            .map(|c| c.generated_text)
            .ok_or(InferenceError::EmptyResponse)
    }
}
