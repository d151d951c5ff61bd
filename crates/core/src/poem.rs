//! Poem source and rating enums.
//!
//! Both map to CHECK-constrained TEXT columns; `name()` is the stored value.

use serde::{Deserialize, Serialize};

/// What a poem was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoemSource {
    Image,
    Character,
}

impl PoemSource {
    /// Parse a client-supplied source discriminator. Returns `None` for
    /// anything other than `image` or `character`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "image" => Some(Self::Image),
            "character" => Some(Self::Character),
            _ => None,
        }
    }

    /// Database `source` value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Character => "character",
        }
    }
}

/// A reader's verdict on a poem.
///
/// The browser client sends the Japanese labels, so both spellings are
/// accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingValue {
    #[serde(alias = "良い")]
    Good,
    #[serde(alias = "悪い")]
    Bad,
}

impl RatingValue {
    /// Database `rating` value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Bad => "bad",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "good" => Some(Self::Good),
            "bad" => Some(Self::Bad),
            _ => None,
        }
    }
}
