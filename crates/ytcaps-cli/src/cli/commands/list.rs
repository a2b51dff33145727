//! `ytcaps <video-url> <output-path>` – list automatic captions and write JSON.

use anyhow::Result;
use std::path::Path;
use ytcaps_core::config::{ExtractorBackend, YtcapsConfig};
use ytcaps_core::export;
use ytcaps_core::youtube::WatchPageSource;
use ytcaps_core::ytdlp::YtDlpSource;
use ytcaps_core::{CaptionLister, ManifestSource};

/// The manifest backend named by the config.
pub fn source_from_config(cfg: &YtcapsConfig) -> Result<Box<dyn ManifestSource>> {
    let source: Box<dyn ManifestSource> = match cfg.backend {
        ExtractorBackend::Native => Box::new(WatchPageSource::from_config(cfg)?),
        ExtractorBackend::YtDlp => Box::new(YtDlpSource::from_config(cfg)),
    };
    Ok(source)
}

pub fn run_list(cfg: &YtcapsConfig, video_url: &str, output_path: &Path) -> Result<()> {
    let source = source_from_config(cfg)?;
    let lister = CaptionLister::new(source, cfg.subtitle_format.clone())
        .with_subtitle_details(!cfg.skip_subtitle_details);
    tracing::info!(
        backend = ?cfg.backend,
        format = %cfg.subtitle_format,
        "listing captions for {}",
        video_url
    );
    export::list_to_file(&lister, video_url, output_path)?;
    Ok(())
}
