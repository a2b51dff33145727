use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Settings for the yt-dlp backend (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct YtDlpConfig {
    /// Program name or path, looked up in `PATH` when not absolute.
    pub program: String,
}

impl Default for YtDlpConfig {
    fn default() -> Self {
        Self {
            program: "yt-dlp".to_string(),
        }
    }
}

/// Manifest backend: watch page scraped in-process, or the yt-dlp program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractorBackend {
    #[default]
    Native,
    YtDlp,
}

/// Global configuration loaded from `~/.config/ytcaps/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YtcapsConfig {
    /// Which backend produces the caption manifest.
    #[serde(default)]
    pub backend: ExtractorBackend,
    /// Container format of the tracks to keep.
    #[serde(default = "default_subtitle_format")]
    pub subtitle_format: String,
    /// Skip the auxiliary subtitle-detail lookup (regular subtitles are never emitted anyway).
    #[serde(default = "default_true")]
    pub skip_subtitle_details: bool,
    /// Site root for the native backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// User-Agent sent by the native backend.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Connect timeout in seconds for native backend requests.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Overall timeout in seconds for native backend requests.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Optional yt-dlp settings; if missing, built-in defaults are used.
    #[serde(default)]
    pub ytdlp: Option<YtDlpConfig>,
}

fn default_subtitle_format() -> String {
    "srv3".to_string()
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "https://www.youtube.com".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_connect_timeout() -> u64 {
    15
}

fn default_timeout() -> u64 {
    30
}

impl Default for YtcapsConfig {
    fn default() -> Self {
        Self {
            backend: ExtractorBackend::default(),
            subtitle_format: default_subtitle_format(),
            skip_subtitle_details: true,
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            connect_timeout_secs: default_connect_timeout(),
            timeout_secs: default_timeout(),
            ytdlp: None,
        }
    }
}

impl YtcapsConfig {
    pub fn ytdlp_or_default(&self) -> YtDlpConfig {
        self.ytdlp.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ytcaps")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<YtcapsConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = YtcapsConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: YtcapsConfig = toml::from_str(&data)?;
    Ok(cfg)
}
