//! Select automatic caption tracks in one container format from a manifest.

use anyhow::Result;

use crate::manifest::{ManifestRequest, ManifestSource, SubtitleMap, TrackKind};
use crate::track::CaptionTrack;

/// Lists automatically generated caption tracks through a [`ManifestSource`].
#[derive(Debug)]
pub struct CaptionLister<S> {
    source: S,
    request: ManifestRequest,
}

impl<S: ManifestSource> CaptionLister<S> {
    /// Lister keeping only `subtitle_format` variants. The auxiliary
    /// subtitle-detail fetch is skipped unless [`Self::with_subtitle_details`]
    /// turns it back on.
    pub fn new(source: S, subtitle_format: impl Into<String>) -> Self {
        Self {
            source,
            request: ManifestRequest::new(subtitle_format),
        }
    }

    pub fn with_subtitle_details(mut self, fetch: bool) -> Self {
        self.request.skip_subtitle_details = !fetch;
        self
    }

    pub fn request(&self) -> &ManifestRequest {
        &self.request
    }

    /// Returns every automatic caption track whose format matches, in
    /// manifest order. An empty vector means the video has none; a lookup
    /// failure is returned as the source's error.
    pub fn list_caption_tracks(&self, video_url: &str) -> Result<Vec<CaptionTrack>> {
        let mut tracks = Vec::new();
        let format = self.request.subtitle_format.as_str();

        self.source
            .list_manifest(video_url, &self.request, &mut |kind, map| {
                if kind == TrackKind::Subtitles {
                    return;
                }
                collect_matching(map, format, &mut tracks);
            })?;

        tracing::debug!(
            url = video_url,
            format,
            count = tracks.len(),
            "listed automatic caption tracks"
        );
        Ok(tracks)
    }
}

fn collect_matching(map: &SubtitleMap, format: &str, out: &mut Vec<CaptionTrack>) {
    for (language, variants) in map.iter() {
        for variant in variants.iter().filter(|v| v.ext == format) {
            out.push(CaptionTrack::new(language, variant.url.clone()));
        }
    }
}
