//! yt-dlp manifest source.
//!
//! Runs the program in metadata-only mode and reads the subtitle maps from
//! its single-JSON dump. Each call spawns its own child process.

mod parse;

pub use parse::{parse_info, InfoListings};

use anyhow::{Context, Result};
use std::process::{Command, Stdio};

use crate::config::{YtDlpConfig, YtcapsConfig};
use crate::error::ExtractError;
use crate::manifest::{ListingCallback, ManifestRequest, ManifestSource, TrackKind};

#[derive(Debug, Clone)]
pub struct YtDlpSource {
    program: String,
}

impl YtDlpSource {
    pub fn new(cfg: &YtDlpConfig) -> Self {
        Self {
            program: cfg.program.clone(),
        }
    }

    pub fn from_config(cfg: &YtcapsConfig) -> Self {
        Self::new(&cfg.ytdlp_or_default())
    }

    /// Arguments for a metadata-only run; the URL comes last.
    ///
    /// The dumped `automatic_captions` and `subtitles` maps list every
    /// language regardless of `--sub-langs`, so no language selection is passed.
    fn args(&self, video_url: &str, request: &ManifestRequest) -> Vec<String> {
        let mut args: Vec<String> = [
            "--skip-download",
            "--write-auto-subs",
            "--sub-format",
            request.subtitle_format.as_str(),
            "--no-playlist",
            "--no-warnings",
            "--dump-single-json",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        args.push("--".to_string());
        args.push(video_url.to_string());
        args
    }
}

impl ManifestSource for YtDlpSource {
    fn list_manifest(
        &self,
        video_url: &str,
        request: &ManifestRequest,
        on_listing: &mut ListingCallback<'_>,
    ) -> Result<()> {
        let program = which::which(&self.program).map_err(|_| ExtractError::YtDlpNotFound)?;
        // Both maps come from the same player response, so there is no
        // separate subtitle-detail lookup to skip.
        if !request.skip_subtitle_details {
            tracing::debug!("yt-dlp backend lists subtitle details unconditionally");
        }

        let args = self.args(video_url, request);
        tracing::info!(program = %program.display(), ?args, "running yt-dlp");
        let output = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("spawn {}", program.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ExtractError::YtDlpFailed {
                status: output.status.to_string(),
                stderr,
            }
            .into());
        }

        let info = parse_info(&output.stdout)?;
        tracing::debug!(
            id = info.id.as_deref().unwrap_or("?"),
            automatic = info.automatic_captions.len(),
            subtitles = info.subtitles.len(),
            "yt-dlp manifest parsed"
        );
        on_listing(TrackKind::AutomaticCaptions, &info.automatic_captions);
        on_listing(TrackKind::Subtitles, &info.subtitles);
        Ok(())
    }
}
