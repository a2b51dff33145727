//! Blocking HTTP GET over libcurl.
//!
//! One `Easy` handle per request; nothing is shared between calls. Runs in
//! the current thread.

use anyhow::{Context, Result};
use std::time::Duration;

use crate::config::YtcapsConfig;
use crate::error::ExtractError;

/// Per-request client settings.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    /// Extra request headers as (name, value).
    pub headers: Vec<(String, String)>,
}

impl HttpOptions {
    pub fn from_config(cfg: &YtcapsConfig) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
            headers: vec![("Accept-Language".to_string(), "en-US,en".to_string())],
        }
    }
}

/// Status code and raw body of a completed GET.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u32,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a GET and returns whatever the server answered. Follows redirects.
pub fn get(url: &str, opts: &HttpOptions) -> Result<Response> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.useragent(&opts.user_agent)?;
    easy.accept_encoding("")?; // any encoding libcurl can decode
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;

    let mut list = curl::easy::List::new();
    for (k, v) in &opts.headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    if !opts.headers.is_empty() {
        easy.http_headers(list)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer
            .perform()
            .with_context(|| format!("GET {} failed", url))?;
    }

    let status = easy.response_code().context("no response code")?;
    tracing::debug!(url, status, bytes = body.len(), "GET complete");
    Ok(Response { status, body })
}

/// GET that requires a 2xx status and returns the body as text.
pub fn get_text(url: &str, opts: &HttpOptions) -> Result<String> {
    let resp = get(url, opts)?;
    if !resp.is_success() {
        return Err(ExtractError::Http {
            url: url.to_string(),
            status: resp.status,
        }
        .into());
    }
    Ok(String::from_utf8_lossy(&resp.body).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_from_config() {
        let mut cfg = YtcapsConfig::default();
        cfg.connect_timeout_secs = 3;
        cfg.timeout_secs = 9;
        let opts = HttpOptions::from_config(&cfg);
        assert_eq!(opts.connect_timeout, Duration::from_secs(3));
        assert_eq!(opts.timeout, Duration::from_secs(9));
        assert_eq!(opts.user_agent, cfg.user_agent);
        assert!(opts
            .headers
            .iter()
            .any(|(k, _)| k.eq_ignore_ascii_case("accept-language")));
    }

    #[test]
    fn success_range() {
        let ok = Response { status: 204, body: Vec::new() };
        let redirect = Response { status: 304, body: Vec::new() };
        let missing = Response { status: 404, body: Vec::new() };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
        assert!(!missing.is_success());
    }

    #[test]
    fn invalid_url_is_an_error() {
        let opts = HttpOptions::from_config(&YtcapsConfig::default());
        assert!(get("", &opts).is_err());
    }
}
