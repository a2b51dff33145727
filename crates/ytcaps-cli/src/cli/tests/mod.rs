//! CLI parse and dispatch tests.

use super::commands::{run_list, source_from_config};
use super::Cli;
use clap::Parser;
use std::path::Path;
use ytcaps_core::config::{ExtractorBackend, YtDlpConfig, YtcapsConfig};

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(args)
}

#[test]
fn cli_parse_url_and_output() {
    let cli = parse(&["ytcaps", "https://www.youtube.com/watch?v=dQw4w9WgXcQ", "/dev/stdout"])
        .unwrap();
    assert_eq!(cli.video_url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    assert_eq!(cli.output_path, Path::new("/dev/stdout"));
}

#[test]
fn cli_requires_both_arguments() {
    assert!(parse(&["ytcaps"]).is_err());
    assert!(parse(&["ytcaps", "https://youtu.be/dQw4w9WgXcQ"]).is_err());
}

#[test]
fn cli_rejects_extra_arguments() {
    assert!(parse(&["ytcaps", "u", "out.json", "extra"]).is_err());
}

#[test]
fn source_selection_follows_backend() {
    let mut cfg = YtcapsConfig::default();
    assert!(source_from_config(&cfg).is_ok());

    cfg.base_url = "::not a url::".to_string();
    assert!(source_from_config(&cfg).is_err());

    // yt-dlp is only looked up when listing, so selection always succeeds.
    cfg.backend = ExtractorBackend::YtDlp;
    assert!(source_from_config(&cfg).is_ok());
}

#[test]
fn run_list_failure_does_not_create_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("tracks.json");
    let cfg = YtcapsConfig {
        backend: ExtractorBackend::YtDlp,
        ytdlp: Some(YtDlpConfig {
            program: "ytcaps-missing-yt-dlp-7c1e".to_string(),
        }),
        ..YtcapsConfig::default()
    };

    assert!(run_list(&cfg, "https://youtu.be/dQw4w9WgXcQ", &out).is_err());
    assert!(!out.exists());
}

#[test]
fn run_list_rejects_unsupported_url_with_native_backend() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("tracks.json");
    let cfg = YtcapsConfig::default();

    let err = run_list(&cfg, "https://vimeo.com/76979871", &out).unwrap_err();
    assert!(format!("{:#}", err).contains("unsupported URL"));
    assert!(!out.exists());
}
