//! Errors raised at the extraction boundary.
//!
//! Callers mostly see these wrapped in `anyhow::Error`; downcast when the
//! distinction matters (e.g. tests asserting an unsupported URL).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported URL: {0}")]
    UnsupportedUrl(String),

    #[error("GET {url} returned HTTP {status}")]
    Http { url: String, status: u32 },

    #[error("unable to extract player response from watch page")]
    PlayerResponseMissing,

    #[error("video unavailable: {0}")]
    Unavailable(String),

    #[error("yt-dlp not found in PATH")]
    YtDlpNotFound,

    #[error("yt-dlp exited with {status}: {stderr}")]
    YtDlpFailed { status: String, stderr: String },
}
