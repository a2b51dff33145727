//! Manifest interface between the caption lister and an extraction backend.
//!
//! The lister only depends on [`ManifestSource`]; it does not know whether
//! the manifest came from the watch page or from yt-dlp.

use anyhow::Result;

/// Which listing a manifest callback concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    /// Tracks produced by automatic speech recognition.
    AutomaticCaptions,
    /// Human-authored ("regular") subtitles.
    Subtitles,
}

/// One downloadable encoding of a language's track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatVariant {
    /// Container format, e.g. `srv3` or `vtt`.
    pub ext: String,
    pub url: String,
    /// Display name when the source reports one.
    pub name: Option<String>,
}

impl FormatVariant {
    pub fn new(ext: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            ext: ext.into(),
            url: url.into(),
            name: None,
        }
    }
}

/// Language tag to format variants, in the order the source reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtitleMap {
    entries: Vec<(String, Vec<FormatVariant>)>,
}

impl SubtitleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, language: impl Into<String>, variants: Vec<FormatVariant>) {
        self.entries.push((language.into(), variants));
    }

    pub fn contains_language(&self, language: &str) -> bool {
        self.entries.iter().any(|(lang, _)| lang == language)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FormatVariant])> {
        self.entries
            .iter()
            .map(|(lang, variants)| (lang.as_str(), variants.as_slice()))
    }
}

/// Metadata-only request handed to a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRequest {
    /// Container format the caller will keep.
    pub subtitle_format: String,
    /// Skip the auxiliary per-video subtitle-detail lookup; sources report
    /// an empty regular-subtitle listing instead.
    pub skip_subtitle_details: bool,
}

impl ManifestRequest {
    pub fn new(subtitle_format: impl Into<String>) -> Self {
        Self {
            subtitle_format: subtitle_format.into(),
            skip_subtitle_details: true,
        }
    }
}

/// Callback invoked once per listing.
pub type ListingCallback<'a> = dyn FnMut(TrackKind, &SubtitleMap) + 'a;

/// Implemented by extraction backends.
///
/// `list_manifest` reports each listing through `on_listing` and returns
/// once the whole manifest has been reported. Errors are the backend's own
/// and are passed through untouched by the lister.
pub trait ManifestSource: Send + Sync {
    fn list_manifest(
        &self,
        video_url: &str,
        request: &ManifestRequest,
        on_listing: &mut ListingCallback<'_>,
    ) -> Result<()>;
}

impl<S: ManifestSource + ?Sized> ManifestSource for Box<S> {
    fn list_manifest(
        &self,
        video_url: &str,
        request: &ManifestRequest,
        on_listing: &mut ListingCallback<'_>,
    ) -> Result<()> {
        (**self).list_manifest(video_url, request, on_listing)
    }
}
