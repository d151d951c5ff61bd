//! Social-network share links.
//!
//! Nothing is posted anywhere: the API only builds the intent URL the client
//! opens in a new window.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::CoreError;
use crate::types::DbId;

/// Text pre-filled into the share dialog.
pub const SHARE_TEXT: &str = "I had a poem written for me!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharePlatform {
    #[serde(alias = "x")]
    Twitter,
    Facebook,
    Line,
}

impl SharePlatform {
    pub fn name(self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::Facebook => "facebook",
            Self::Line => "line",
        }
    }

    /// Build the platform's share-intent URL for `link`.
    pub fn share_url(self, text: &str, link: &str) -> Result<String, CoreError> {
        let url = match self {
            Self::Twitter => Url::parse_with_params(
                "https://twitter.com/intent/tweet",
                &[("text", text), ("url", link)],
            ),
            Self::Facebook => {
                Url::parse_with_params("https://www.facebook.com/sharer/sharer.php", &[("u", link)])
            }
            Self::Line => Url::parse_with_params(
                "https://social-plugins.line.me/lineit/share",
                &[("url", link)],
            ),
        }
        .map_err(|e| CoreError::Internal(format!("Failed to build share URL: {e}")))?;
        Ok(url.to_string())
    }
}

/// Public page of a poem on the front-end.
pub fn poem_page_url(frontend_url: &str, poem_id: DbId) -> String {
    format!("{}/poems/{poem_id}", frontend_url.trim_end_matches('/'))
}
