//! Native manifest source: scrapes the watch page with libcurl.
//!
//! The automatic caption listing comes from the player response embedded in
//! the page. Regular subtitles need a second request to the timedtext track
//! list, which is only made when the request asks for subtitle details.

pub mod player;
pub mod timedtext;
pub mod video_id;

use anyhow::{Context, Result};
use url::Url;

use crate::config::YtcapsConfig;
use crate::http::{self, HttpOptions};
use crate::manifest::{ListingCallback, ManifestRequest, ManifestSource, SubtitleMap, TrackKind};

pub use video_id::extract_video_id;

/// Formats offered for every caption language, in listing order.
pub const SUBTITLE_FORMATS: &[&str] = &["srv1", "srv2", "srv3", "ttml", "vtt"];

/// `path` below the site's own path, so a `base_url` with a prefix keeps it.
pub(crate) fn site_url(site: &Url, path: &str) -> Url {
    let mut url = site.clone();
    let prefix = site.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{}{}", prefix, path));
    url.set_query(None);
    url.set_fragment(None);
    url
}

/// Manifest source backed by the site's watch page.
#[derive(Debug, Clone)]
pub struct WatchPageSource {
    site: Url,
    http: HttpOptions,
}

impl WatchPageSource {
    pub fn new(site: &str, http: HttpOptions) -> Result<Self> {
        let site = Url::parse(site).with_context(|| format!("invalid base_url: {}", site))?;
        Ok(Self { site, http })
    }

    pub fn from_config(cfg: &YtcapsConfig) -> Result<Self> {
        Self::new(&cfg.base_url, HttpOptions::from_config(cfg))
    }

    fn watch_url(&self, video_id: &str) -> Url {
        let mut url = site_url(&self.site, "/watch");
        url.query_pairs_mut()
            .append_pair("v", video_id)
            .append_pair("hl", "en")
            .append_pair("has_verified", "1")
            .append_pair("bpctr", "9999999999");
        url
    }

    /// The auxiliary lookup. Failures only cost the (unused) regular listing.
    fn regular_subtitles(&self, video_id: &str) -> SubtitleMap {
        let url = timedtext::list_url(&self.site, video_id);
        match http::get_text(url.as_str(), &self.http) {
            Ok(xml) => {
                let tracks = timedtext::parse_track_list(&xml);
                timedtext::subtitles(&self.site, video_id, &tracks)
            }
            Err(e) => {
                tracing::warn!("unable to download video subtitles: {:#}", e);
                SubtitleMap::new()
            }
        }
    }
}

impl ManifestSource for WatchPageSource {
    fn list_manifest(
        &self,
        video_url: &str,
        request: &ManifestRequest,
        on_listing: &mut ListingCallback<'_>,
    ) -> Result<()> {
        let video_id = extract_video_id(video_url)?;
        let page_url = self.watch_url(&video_id);
        tracing::info!(video_id = %video_id, "fetching watch page");
        let page = http::get_text(page_url.as_str(), &self.http)?;

        let player = player::extract_player_response(&page)?;
        player.check_playable()?;

        let automatic = player::automatic_captions(&player, &self.site);
        on_listing(TrackKind::AutomaticCaptions, &automatic);

        let regular = if request.skip_subtitle_details {
            tracing::debug!("skipping subtitle details lookup");
            SubtitleMap::new()
        } else {
            self.regular_subtitles(&video_id)
        };
        on_listing(TrackKind::Subtitles, &regular);

        Ok(())
    }
}
