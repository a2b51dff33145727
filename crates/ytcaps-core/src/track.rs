//! The one entity this crate produces.

use serde::{Deserialize, Serialize};

/// An automatically generated caption track in the accepted container format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionTrack {
    /// Language tag, e.g. `en` or `es-419`.
    #[serde(rename = "lang")]
    pub language: String,
    /// URL the caption payload can be fetched from later.
    #[serde(rename = "url")]
    pub fetch_url: String,
}

impl CaptionTrack {
    pub fn new(language: impl Into<String>, fetch_url: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            fetch_url: fetch_url.into(),
        }
    }
}
