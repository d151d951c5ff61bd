use lyric_core::config::non_empty;

/// Hosted inference endpoint used when `GENERATION_API_URL` is unset.
pub const DEFAULT_GENERATION_API_URL: &str =
    "https://api-inference.huggingface.co/models/cyberagent/open-calm-7b";

/// Generation backend configuration.
///
/// | Env Var               | Default                        |
/// |-----------------------|--------------------------------|
/// | `GENERATION_API_URL`  | hosted `open-calm-7b` endpoint |
/// | `HUGGINGFACE_API_KEY` | unset                          |
#[derive(Clone)]
pub struct InferenceSettings {
    pub api_url: String,
    /// Bearer token. Without it every generation fails before any request.
    pub api_key: Option<String>,
}

impl InferenceSettings {
    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_url: non_empty(lookup, "GENERATION_API_URL")
                .unwrap_or_else(|| DEFAULT_GENERATION_API_URL.into()),
            api_key: non_empty(lookup, "HUGGINGFACE_API_KEY"),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

// Manual impl so the token never ends up in logs.
impl std::fmt::Debug for InferenceSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceSettings")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
