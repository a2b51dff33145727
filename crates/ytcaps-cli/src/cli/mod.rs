//! CLI for ytcaps: `ytcaps <video-url> <output-path>`.

mod commands;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use ytcaps_core::config;

use commands::run_list;

/// Write a video's automatically generated caption tracks as JSON.
#[derive(Debug, Parser)]
#[command(name = "ytcaps")]
#[command(about = "List automatic caption tracks of a video as JSON", long_about = None)]
pub struct Cli {
    /// Video page URL (or bare video ID).
    pub video_url: String,

    /// File to write the JSON array to (created or truncated).
    pub output_path: PathBuf,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        run_list(&cfg, &self.video_url, &self.output_path)
    }
}

#[cfg(test)]
mod tests;
