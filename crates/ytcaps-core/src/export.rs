//! JSON output of caption tracks.
//!
//! The output path is touched only after extraction has succeeded and the
//! document is fully serialized, so a failed lookup leaves an existing file
//! untouched and creates no new one.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::lister::CaptionLister;
use crate::manifest::ManifestSource;
use crate::track::CaptionTrack;

/// Compact JSON array of `{"lang": .., "url": ..}` objects.
pub fn to_json(tracks: &[CaptionTrack]) -> Result<Vec<u8>> {
    serde_json::to_vec(tracks).context("serialize caption tracks")
}

/// Writes `tracks` to `path`, creating or truncating it.
pub fn write_tracks(path: &Path, tracks: &[CaptionTrack]) -> Result<()> {
    let json = to_json(tracks)?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Lists the tracks of `video_url` and writes them to `path`.
/// Returns the number of tracks written.
pub fn list_to_file<S: ManifestSource>(
    lister: &CaptionLister<S>,
    video_url: &str,
    path: &Path,
) -> Result<usize> {
    let tracks = lister.list_caption_tracks(video_url)?;
    write_tracks(path, &tracks)?;
    tracing::info!(
        count = tracks.len(),
        path = %path.display(),
        "wrote caption tracks"
    );
    Ok(tracks.len())
}
