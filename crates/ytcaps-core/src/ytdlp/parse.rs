//! Minimal view of the yt-dlp info JSON: the two subtitle maps.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::manifest::{FormatVariant, SubtitleMap};

#[derive(Debug, Deserialize)]
struct InfoJson {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    automatic_captions: Option<Map<String, Value>>,
    #[serde(default)]
    subtitles: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct RawVariant {
    #[serde(default)]
    ext: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Both listings of one video, in the order yt-dlp printed them.
#[derive(Debug, Default)]
pub struct InfoListings {
    pub id: Option<String>,
    pub automatic_captions: SubtitleMap,
    pub subtitles: SubtitleMap,
}

pub fn parse_info(stdout: &[u8]) -> Result<InfoListings> {
    let info: InfoJson = serde_json::from_slice(stdout).context("parse yt-dlp JSON")?;
    Ok(InfoListings {
        id: info.id,
        automatic_captions: to_subtitle_map(info.automatic_captions),
        subtitles: to_subtitle_map(info.subtitles),
    })
}

fn to_subtitle_map(raw: Option<Map<String, Value>>) -> SubtitleMap {
    let mut map = SubtitleMap::new();
    for (lang, value) in raw.unwrap_or_default() {
        let variants: Vec<RawVariant> = match serde_json::from_value(value) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!("skipping subtitle language {}: {}", lang, e);
                continue;
            }
        };
        let variants = variants
            .into_iter()
            .filter_map(|v| match (v.ext, v.url) {
                (Some(ext), Some(url)) => Some(FormatVariant {
                    ext,
                    url,
                    name: v.name,
                }),
                _ => None,
            })
            .collect();
        map.push(lang, variants);
    }
    map
}
