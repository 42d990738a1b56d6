//! Content fetcher: GETs routed through the CORS relay.
//!
//! The relay takes the real target as a percent-encoded `url` query
//! parameter: `/fetch` returns metadata (XML/HTML) and `/download` returns
//! the binary payload. With the relay disabled, targets are fetched directly.

mod error;
mod status;
mod transport;

pub use error::FetchError;
pub use transport::{CurlTransport, HttpResponse, Transport};

use std::time::Duration;

use url::Url;

use crate::config::RelayConfig;

/// Relay path for metadata lookups.
pub const FETCH_PATH: &str = "fetch";
/// Relay path for binary payloads.
pub const DOWNLOAD_PATH: &str = "download";

/// Builds `<base>/<path>?<params>`, keeping any path prefix already in `base`.
pub fn endpoint_url(base: &str, path: &str, params: &[(&str, &str)]) -> Result<Url, FetchError> {
    let invalid = |source| FetchError::InvalidUrl {
        url: base.to_string(),
        source,
    };
    let mut base = Url::parse(base).map_err(invalid)?;
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    let mut url = base.join(path).map_err(invalid)?;
    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in params {
            pairs.append_pair(k, v);
        }
    }
    Ok(url)
}

/// Issues metadata and payload GETs, through the relay unless it is disabled.
#[derive(Debug, Clone)]
pub struct RelayClient<T> {
    transport: T,
    relay: RelayConfig,
}

impl<T: Transport> RelayClient<T> {
    pub fn new(transport: T, relay: RelayConfig) -> Self {
        Self { transport, relay }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Where a GET for `target` actually goes.
    pub fn route(&self, relay_path: &str, target: &str) -> Result<String, FetchError> {
        if self.relay.enabled {
            Ok(endpoint_url(&self.relay.base_url, relay_path, &[("url", target)])?.into())
        } else {
            Url::parse(target)
                .map(Into::into)
                .map_err(|source| FetchError::InvalidUrl {
                    url: target.to_string(),
                    source,
                })
        }
    }

    /// Fetches markup for `target` as text (lossy UTF-8).
    pub fn fetch_text(&self, target: &str) -> Result<String, FetchError> {
        let url = self.route(FETCH_PATH, target)?;
        tracing::debug!(upstream = target, via = %url, "fetching metadata");
        let resp = self.transport.get(&url)?.error_for_status(&url)?;
        Ok(String::from_utf8_lossy(&resp.body).into_owned())
    }

    /// Fetches the binary payload behind `target`.
    pub fn download(&self, target: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.route(DOWNLOAD_PATH, target)?;
        tracing::debug!(upstream = target, via = %url, "downloading payload");
        let resp = self.transport.get(&url)?.error_for_status(&url)?;
        Ok(resp.body)
    }

    /// GET on one of the relay's own endpoints (stats), regardless of `enabled`.
    /// `limit` caps the whole request when given.
    pub fn relay_get(
        &self,
        path: &str,
        params: &[(&str, &str)],
        limit: Option<Duration>,
    ) -> Result<HttpResponse, FetchError> {
        let url: String = endpoint_url(&self.relay.base_url, path, params)?.into();
        let resp = match limit {
            Some(limit) => self.transport.get_within(&url, limit)?,
            None => self.transport.get(&url)?,
        };
        resp.error_for_status(&url)
    }
}
