/// Domain-level errors shared by every crate in the workspace.
///
/// The HTTP layer maps each variant onto a status code; the variants carry
/// enough text for logs, but only `Validation` and `Unauthorized` messages
/// are ever shown to callers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A required setting (credential, bucket name) is missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An external service (generation backend, object storage) failed.
    /// `summary` is safe to show callers; `detail` is for logs only.
    #[error("{summary}: {detail}")]
    Upstream {
        summary: &'static str,
        detail: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}
