//! Regular (human-authored) subtitle listing from the timedtext track list.
//!
//! This is the auxiliary per-video lookup that the lister normally skips.

use html_escape::decode_html_entities;
use url::Url;

use crate::manifest::{FormatVariant, SubtitleMap};

use super::SUBTITLE_FORMATS;

// Compiles each pattern once, on first use.
macro_rules! regex {
    ($re:literal $(,)?) => {{
        static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
        RE.get_or_init(|| regex::Regex::new($re).unwrap())
    }};
}

/// One `<track>` element of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedTrack {
    pub lang_code: String,
    pub name: String,
}

/// `{site}/api/timedtext?hl=en&type=list&v={id}`
pub fn list_url(site: &Url, video_id: &str) -> Url {
    let mut url = api_url(site);
    url.query_pairs_mut()
        .append_pair("hl", "en")
        .append_pair("type", "list")
        .append_pair("v", video_id);
    url
}

fn api_url(site: &Url) -> Url {
    super::site_url(site, "/api/timedtext")
}

/// Tracks in document order. Elements without `lang_code` are skipped.
pub fn parse_track_list(xml: &str) -> Vec<ListedTrack> {
    let track_re = regex!(r"<track\b([^>]*)>");
    let attr_re = regex!(r#"([A-Za-z_:][-\w:.]*)\s*=\s*"([^"]*)""#);

    let mut out = Vec::new();
    for caps in track_re.captures_iter(xml) {
        let mut lang_code = None;
        let mut name = String::new();
        for attr in attr_re.captures_iter(&caps[1]) {
            match &attr[1] {
                "lang_code" => lang_code = Some(decode_html_entities(&attr[2]).into_owned()),
                "name" => name = decode_html_entities(&attr[2]).into_owned(),
                _ => {}
            }
        }
        if let Some(lang_code) = lang_code.filter(|l| !l.is_empty()) {
            out.push(ListedTrack { lang_code, name });
        }
    }
    out
}

/// The regular subtitle listing; the first track per language wins.
pub fn subtitles(site: &Url, video_id: &str, tracks: &[ListedTrack]) -> SubtitleMap {
    let mut map = SubtitleMap::new();
    for track in tracks {
        if map.contains_language(&track.lang_code) {
            continue;
        }
        let variants = SUBTITLE_FORMATS
            .iter()
            .map(|ext| {
                let mut url = api_url(site);
                url.query_pairs_mut()
                    .append_pair("lang", &track.lang_code)
                    .append_pair("v", video_id)
                    .append_pair("fmt", ext)
                    .append_pair("name", &track.name);
                FormatVariant {
                    ext: ext.to_string(),
                    url: url.to_string(),
                    name: Some(track.name.clone()).filter(|n| !n.is_empty()),
                }
            })
            .collect();
        map.push(track.lang_code.clone(), variants);
    }
    map
}
