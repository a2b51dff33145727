pub mod config;
pub mod logging;

pub mod error;
pub mod export;
pub mod http;
pub mod lister;
pub mod manifest;
pub mod track;
pub mod youtube;
pub mod ytdlp;

pub use lister::CaptionLister;
pub use manifest::{ManifestRequest, ManifestSource, SubtitleMap, TrackKind};
pub use track::CaptionTrack;
