//! Usage counter on the relay: read the total, report a finished download.
//!
//! Both calls are best effort. The counter service has been dead before and
//! nothing in a download may depend on it.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::category::AssetCategory;
use crate::relay::{FetchError, RelayClient, Transport};

pub const DOWNLOADS_PATH: &str = "downloads";
pub const SUBMIT_PATH: &str = "submit";

/// Talks to the relay's counter endpoints. A disabled reporter makes no calls.
pub struct StatsReporter<'a, T> {
    client: &'a RelayClient<T>,
    enabled: bool,
    limit: Option<Duration>,
}

impl<'a, T: Transport> StatsReporter<'a, T> {
    pub fn new(client: &'a RelayClient<T>, enabled: bool) -> Self {
        Self {
            client,
            enabled,
            limit: None,
        }
    }

    /// Caps every counter call at `limit`, independent of the download timeout.
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Total download count as the service reports it (plain text, trimmed).
    /// `Ok(None)` when stats are disabled.
    pub fn download_count(&self) -> Result<Option<String>, FetchError> {
        if !self.enabled {
            return Ok(None);
        }
        let resp = self.client.relay_get(DOWNLOADS_PATH, &[], self.limit)?;
        Ok(Some(String::from_utf8_lossy(&resp.body).trim().to_string()))
    }

    /// Reports one completed download. Failures are logged and dropped.
    pub fn submit(&self, reference: &str, category: AssetCategory) {
        if !self.enabled {
            return;
        }
        let url = STANDARD.encode(reference);
        let kind = STANDARD.encode(category.as_str());
        match self
            .client
            .relay_get(
                SUBMIT_PATH,
                &[("url", url.as_str()), ("type", kind.as_str())],
                self.limit,
            )
        {
            Ok(resp) => {
                let ack = String::from_utf8_lossy(&resp.body);
                tracing::debug!(ack = %ack.trim(), "download reported");
            }
            Err(e) => tracing::debug!("stats submit failed (ignored): {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RelayConfig;
    use crate::relay::HttpResponse;
    use std::cell::RefCell;

    struct Scripted {
        seen: RefCell<Vec<String>>,
        limits: RefCell<Vec<Duration>>,
        code: u32,
        body: &'static [u8],
    }

    impl Transport for Scripted {
        fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
            self.seen.borrow_mut().push(url.to_string());
            Ok(HttpResponse::new(self.code, self.body.to_vec()))
        }

        fn get_within(&self, url: &str, limit: Duration) -> Result<HttpResponse, FetchError> {
            self.limits.borrow_mut().push(limit);
            self.get(url)
        }
    }

    fn client(code: u32, body: &'static [u8]) -> RelayClient<Scripted> {
        RelayClient::new(
            Scripted {
                seen: RefCell::new(Vec::new()),
                limits: RefCell::new(Vec::new()),
                code,
                body,
            },
            RelayConfig {
                base_url: "https://relay.example".to_string(),
                enabled: false,
            },
        )
    }

    #[test]
    fn count_is_trimmed_text() {
        let c = client(200, b" 12345\n");
        let stats = StatsReporter::new(&c, true);
        assert_eq!(stats.download_count().unwrap().as_deref(), Some("12345"));
        assert_eq!(c.transport().seen.borrow()[0], "https://relay.example/downloads");
    }

    #[test]
    fn submit_encodes_base64() {
        let c = client(200, b"ok");
        StatsReporter::new(&c, true).submit("https://www.roblox.com/library/1/x", AssetCategory::Decal);
        let seen = c.transport().seen.borrow();
        let expected_url = STANDARD.encode("https://www.roblox.com/library/1/x");
        let mut expected = url::Url::parse("https://relay.example/submit").unwrap();
        expected
            .query_pairs_mut()
            .append_pair("url", &expected_url)
            .append_pair("type", "ZGVjYWw=");
        assert_eq!(seen[0], expected.as_str());
    }

    #[test]
    fn submit_swallows_errors() {
        let c = client(500, b"");
        StatsReporter::new(&c, true).submit("1", AssetCategory::Model);
        assert_eq!(c.transport().seen.borrow().len(), 1);
    }

    #[test]
    fn disabled_makes_no_calls() {
        let c = client(200, b"1");
        let stats = StatsReporter::new(&c, false);
        assert_eq!(stats.download_count().unwrap(), None);
        stats.submit("1", AssetCategory::Model);
        assert!(c.transport().seen.borrow().is_empty());
    }

    #[test]
    fn count_surfaces_http_errors() {
        let c = client(404, b"");
        let err = StatsReporter::new(&c, true).download_count().unwrap_err();
        assert_eq!(err.to_string(), "404 Not Found");
    }

    #[test]
    fn timeout_applies_to_every_call() {
        let c = client(200, b"7");
        let stats = StatsReporter::new(&c, true).with_timeout(Duration::from_secs(3));
        stats.download_count().unwrap();
        stats.submit("1", AssetCategory::Mesh);
        assert_eq!(
            c.transport().limits.borrow().as_slice(),
            [Duration::from_secs(3), Duration::from_secs(3)]
        );
    }

    #[test]
    fn no_timeout_uses_plain_get() {
        let c = client(200, b"7");
        StatsReporter::new(&c, true).download_count().unwrap();
        assert!(c.transport().limits.borrow().is_empty());
        assert_eq!(c.transport().seen.borrow().len(), 1);
    }
}
