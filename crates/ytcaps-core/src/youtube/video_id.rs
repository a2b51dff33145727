//! Video ID extraction from watch, short, embed and shorts URLs.

use url::Url;

use crate::error::ExtractError;

const ID_LEN: usize = 11;

const HOSTS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "music.youtube.com",
    "youtube-nocookie.com",
    "www.youtube-nocookie.com",
    "youtu.be",
];

/// Path prefixes whose next segment is the video ID.
const ID_PATHS: &[&str] = &["embed", "v", "shorts", "live", "e"];

/// Returns the 11-character video ID referenced by `input`.
///
/// Accepts a bare ID or a URL on a known host; anything else is
/// [`ExtractError::UnsupportedUrl`].
pub fn extract_video_id(input: &str) -> Result<String, ExtractError> {
    let input = input.trim();
    if is_valid_id(input) {
        return Ok(input.to_string());
    }

    let unsupported = || ExtractError::UnsupportedUrl(input.to_string());
    let url = Url::parse(input).map_err(|_| unsupported())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(unsupported());
    }
    let host = url.host_str().ok_or_else(unsupported)?.to_ascii_lowercase();
    if !HOSTS.contains(&host.as_str()) {
        return Err(unsupported());
    }

    let candidate = if host == "youtu.be" {
        url.path_segments().and_then(|mut s| s.next()).map(str::to_string)
    } else {
        from_query(&url).or_else(|| from_path(&url))
    };

    candidate
        .filter(|id| is_valid_id(id))
        .ok_or_else(unsupported)
}

fn from_query(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == "v")
        .map(|(_, v)| v.into_owned())
}

fn from_path(url: &Url) -> Option<String> {
    let mut segments = url.path_segments()?;
    let first = segments.next()?;
    if ID_PATHS.contains(&first) {
        segments.next().map(str::to_string)
    } else {
        None
    }
}

fn is_valid_id(s: &str) -> bool {
    s.len() == ID_LEN
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
