//! Player response embedded in the watch page, and the automatic caption
//! manifest derived from it.

use serde::Deserialize;
use url::Url;

use crate::error::ExtractError;
use crate::manifest::{FormatVariant, SubtitleMap};

use super::SUBTITLE_FORMATS;

const MARKER: &str = "ytInitialPlayerResponse";

/// Fields of the player response this crate reads.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    #[serde(default)]
    pub playability_status: Option<PlayabilityStatus>,
    #[serde(default)]
    pub captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
pub struct PlayabilityStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Captions {
    #[serde(default)]
    pub player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracklistRenderer {
    #[serde(default)]
    pub caption_tracks: Vec<CaptionTrackInfo>,
    #[serde(default)]
    pub translation_languages: Vec<TranslationLanguage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrackInfo {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
    /// Present (`"asr"`) only on speech-recognition tracks.
    #[serde(default)]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationLanguage {
    #[serde(default)]
    pub language_code: Option<String>,
}

impl PlayerResponse {
    /// Fails when the page reports the video as unavailable.
    pub fn check_playable(&self) -> Result<(), ExtractError> {
        match &self.playability_status {
            Some(PlayabilityStatus {
                status: Some(status),
                reason,
            }) if status == "ERROR" => Err(ExtractError::Unavailable(
                reason.clone().unwrap_or_else(|| "unknown reason".to_string()),
            )),
            _ => Ok(()),
        }
    }

    fn renderer(&self) -> Option<&TracklistRenderer> {
        self.captions
            .as_ref()
            .and_then(|c| c.player_captions_tracklist_renderer.as_ref())
    }
}

/// Finds `ytInitialPlayerResponse = {...}` in the page and parses it.
pub fn extract_player_response(html: &str) -> Result<PlayerResponse, ExtractError> {
    let mut rest = html;
    while let Some(pos) = rest.find(MARKER) {
        rest = &rest[pos + MARKER.len()..];
        let Some(object) = assigned_object(rest) else {
            continue;
        };
        match serde_json::from_str::<PlayerResponse>(object) {
            Ok(player) => return Ok(player),
            Err(e) => tracing::debug!("skipping unparsable player response candidate: {}", e),
        }
    }
    Err(ExtractError::PlayerResponseMissing)
}

/// `rest` follows the marker; accepts `= {`, `"] = {` and surrounding whitespace.
fn assigned_object(rest: &str) -> Option<&str> {
    let rest = rest.strip_prefix("\"]").unwrap_or(rest).trim_start();
    let rest = rest.strip_prefix('=')?.trim_start();
    balanced_object(rest)
}

/// The leading JSON object of `s`, matched by braces outside string literals.
fn balanced_object(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&b'{') {
        return None;
    }
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Builds the automatic caption listing: the ASR track offered in every
/// translation language and every known format.
///
/// `site` resolves relative `baseUrl` values.
pub fn automatic_captions(player: &PlayerResponse, site: &Url) -> SubtitleMap {
    let mut map = SubtitleMap::new();

    let Some(renderer) = player.renderer() else {
        tracing::info!("video has no captions renderer");
        return map;
    };

    let asr = renderer
        .caption_tracks
        .iter()
        .filter(|t| t.kind.is_some())
        .find_map(|t| t.base_url.as_deref());
    let Some(raw_base) = asr else {
        tracing::info!("video doesn't have automatic captions");
        return map;
    };
    let base = match site.join(raw_base) {
        Ok(u) => u,
        Err(e) => {
            tracing::warn!("unusable ASR baseUrl {:?}: {}", raw_base, e);
            return map;
        }
    };

    let languages = renderer
        .translation_languages
        .iter()
        .filter_map(|l| l.language_code.as_deref())
        .filter(|code| !code.is_empty());
    for lang in languages {
        let variants = SUBTITLE_FORMATS
            .iter()
            .map(|ext| FormatVariant::new(*ext, caption_url(&base, lang, ext).to_string()))
            .collect();
        map.push(lang, variants);
    }
    map
}

/// `base` with `tlang` and `fmt` set; existing values are replaced in place.
fn caption_url(base: &Url, tlang: &str, fmt: &str) -> Url {
    let mut pairs: Vec<(String, String)> = base.query_pairs().into_owned().collect();
    set_param(&mut pairs, "tlang", tlang);
    set_param(&mut pairs, "fmt", fmt);
    let mut url = base.clone();
    url.query_pairs_mut().clear().extend_pairs(pairs.iter());
    url
}

fn set_param(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    match pairs.iter_mut().find(|(k, _)| k == key) {
        Some((_, v)) => *v = value.to_string(),
        None => pairs.push((key.to_string(), value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> Url {
        Url::parse("https://www.youtube.com").unwrap()
    }

    const PLAYER: &str = r#"{
        "playabilityStatus": {"status": "OK"},
        "videoDetails": {"title": "a {tricky} \"title\" }"},
        "captions": {"playerCaptionsTracklistRenderer": {
            "captionTracks": [
                {"baseUrl": "https://www.youtube.com/api/timedtext?v=abc&lang=de&name=Human", "languageCode": "de"},
                {"baseUrl": "/api/timedtext?v=abc&caps=asr&lang=en&fmt=json3", "languageCode": "en", "kind": "asr"}
            ],
            "translationLanguages": [
                {"languageCode": "en"},
                {"languageCode": "es-419"},
                {"languageName": {"simpleText": "no code"}}
            ]
        }}
    }"#;

    #[test]
    fn extracts_var_assignment_with_braces_in_strings() {
        let html = format!(
            "<script>var ytInitialPlayerResponse = {};var meta = {{}};</script>",
            PLAYER
        );
        let player = extract_player_response(&html).unwrap();
        assert!(player.check_playable().is_ok());
        assert_eq!(player.renderer().unwrap().caption_tracks.len(), 2);
    }

    #[test]
    fn extracts_window_index_assignment() {
        let html = format!(
            r#"<script>if (x) {{window["ytInitialPlayerResponse"] = null;}} window["ytInitialPlayerResponse"] = {};</script>"#,
            PLAYER
        );
        let player = extract_player_response(&html).unwrap();
        assert!(player.renderer().is_some());
    }

    #[test]
    fn missing_player_response() {
        let err = extract_player_response("<html>nothing here</html>").unwrap_err();
        assert!(matches!(err, ExtractError::PlayerResponseMissing));
        let err = extract_player_response("ytInitialPlayerResponse = {\"unterminated\": ").unwrap_err();
        assert!(matches!(err, ExtractError::PlayerResponseMissing));
    }

    #[test]
    fn unavailable_video() {
        let player: PlayerResponse = serde_json::from_str(
            r#"{"playabilityStatus": {"status": "ERROR", "reason": "Video unavailable"}}"#,
        )
        .unwrap();
        match player.check_playable() {
            Err(ExtractError::Unavailable(reason)) => assert_eq!(reason, "Video unavailable"),
            other => panic!("expected Unavailable, got {:?}", other),
        }
    }

    #[test]
    fn automatic_captions_cover_translations_and_formats() {
        let player: PlayerResponse = serde_json::from_str(PLAYER).unwrap();
        let map = automatic_captions(&player, &site());

        let langs: Vec<&str> = map.iter().map(|(l, _)| l).collect();
        assert_eq!(langs, ["en", "es-419"]);

        let (_, variants) = map.iter().nth(1).unwrap();
        let exts: Vec<&str> = variants.iter().map(|v| v.ext.as_str()).collect();
        assert_eq!(exts, SUBTITLE_FORMATS);

        let srv3 = variants.iter().find(|v| v.ext == "srv3").unwrap();
        let url = Url::parse(&srv3.url).unwrap();
        assert_eq!(url.host_str(), Some("www.youtube.com"));
        assert_eq!(url.path(), "/api/timedtext");
        let q: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let get = |k: &str| q.iter().find(|(key, _)| key == k).map(|(_, v)| v.as_str());
        assert_eq!(get("caps"), Some("asr"));
        assert_eq!(get("tlang"), Some("es-419"));
        assert_eq!(get("fmt"), Some("srv3"));
        // fmt replaced in place, not duplicated
        assert_eq!(q.iter().filter(|(k, _)| k == "fmt").count(), 1);
        let fmt_pos = q.iter().position(|(k, _)| k == "fmt").unwrap();
        let lang_pos = q.iter().position(|(k, _)| k == "lang").unwrap();
        assert!(fmt_pos > lang_pos);
        assert_eq!(q.last().map(|(k, _)| k.as_str()), Some("tlang"));
    }

    #[test]
    fn no_asr_track_yields_empty_map() {
        let player: PlayerResponse = serde_json::from_str(
            r#"{"captions": {"playerCaptionsTracklistRenderer": {
                "captionTracks": [{"baseUrl": "https://x/api/timedtext?lang=de", "languageCode": "de"}],
                "translationLanguages": [{"languageCode": "en"}]
            }}}"#,
        )
        .unwrap();
        assert!(automatic_captions(&player, &site()).is_empty());

        let bare = PlayerResponse::default();
        assert!(automatic_captions(&bare, &site()).is_empty());
    }
}
