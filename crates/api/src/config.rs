use axum::http::HeaderValue;
use lyric_core::config::{env_lookup, non_empty, parse_or, ConfigError};
use lyric_inference::InferenceSettings;
use lyric_storage::StorageSettings;

/// Front-end origin used when `FRONTEND_URL` is unset.
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// Read `LOG_FORMAT` (`pretty` or `json`); anything else is `pretty`.
    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match non_empty(lookup, "LOG_FORMAT").as_deref() {
            Some(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Server configuration, loaded once at startup and shared read-only.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Browser front-end; always an allowed origin and the base of share links.
    pub frontend_url: String,
    /// Allowed CORS origins: `FRONTEND_URL` plus `CORS_ORIGINS`.
    /// A `*` entry opens CORS to every origin.
    pub cors_origins: Vec<String>,
    /// Shared secret expected in `X-API-Key` on uploads, if set.
    pub api_key: Option<String>,
    pub storage: StorageSettings,
    pub inference: InferenceSettings,
    /// Enables persistence when set.
    pub database_url: Option<String>,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var        | Default                 |
    /// |----------------|-------------------------|
    /// | `HOST`         | `0.0.0.0`               |
    /// | `PORT`         | `8000`                  |
    /// | `FRONTEND_URL` | `http://localhost:3000` |
    /// | `CORS_ORIGINS` | empty                   |
    /// | `API_KEY`      | unset                   |
    /// | `DATABASE_URL` | unset                   |
    /// | `LOG_FORMAT`   | `pretty`                |
    ///
    /// Storage and generation settings are documented on
    /// [`StorageSettings`] and [`InferenceSettings`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = non_empty(lookup, "HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(lookup, "PORT", 8000u16)?;

        let frontend_url = non_empty(lookup, "FRONTEND_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_FRONTEND_URL.into());

        let mut cors_origins = vec![frontend_url.clone()];
        if let Some(extra) = non_empty(lookup, "CORS_ORIGINS") {
            for origin in extra.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                if !cors_origins.iter().any(|o| o == origin) {
                    cors_origins.push(origin.to_string());
                }
            }
        }
        for origin in &cors_origins {
            if origin != "*" {
                HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                    key: "CORS_ORIGINS",
                    value: origin.clone(),
                    reason: e.to_string(),
                })?;
            }
        }

        Ok(Self {
            host,
            port,
            frontend_url,
            cors_origins,
            api_key: non_empty(lookup, "API_KEY"),
            storage: StorageSettings::from_lookup(lookup)?,
            inference: InferenceSettings::from_lookup(lookup),
            database_url: non_empty(lookup, "DATABASE_URL"),
            log_format: LogFormat::from_lookup(lookup),
        })
    }

    /// Whether any configured origin is the `*` wildcard.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;
    use lyric_storage::StorageBackendKind;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        ServerConfig::from_lookup(&|key: &str| map.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn defaults_for_local_development() {
        let config = load(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.cors_origins, vec!["http://localhost:3000"]);
        assert!(config.api_key.is_none());
        assert!(config.database_url.is_none());
        assert_eq!(config.storage.backend, StorageBackendKind::Local);
        assert!(!config.inference.is_configured());
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn extra_origins_are_merged_without_duplicates() {
        let config = load(&[
            ("FRONTEND_URL", "https://poems.example.com/"),
            (
                "CORS_ORIGINS",
                "https://poems.example.com, https://preview.example.com",
            ),
        ])
        .unwrap();
        assert_eq!(config.frontend_url, "https://poems.example.com");
        assert_eq!(
            config.cors_origins,
            vec!["https://poems.example.com", "https://preview.example.com"]
        );
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn wildcard_origin_opens_cors() {
        let config = load(&[("CORS_ORIGINS", "*")]).unwrap();
        assert!(config.allows_any_origin());
    }

    #[test]
    fn invalid_port_is_reported() {
        assert_matches!(
            load(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { key: "PORT", .. })
        );
    }

    #[test]
    fn origin_with_control_character_is_rejected() {
        assert_matches!(
            load(&[("CORS_ORIGINS", "https://a.test\u{7f}x")]),
            Err(ConfigError::Invalid { key: "CORS_ORIGINS", .. })
        );
    }

    #[test]
    fn json_log_format() {
        let config = load(&[("LOG_FORMAT", "JSON")]).unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
