//! Blocking HTTP GET over libcurl.

use std::str;
use std::time::Duration;

use super::error::FetchError;
use super::status::{canonical_reason, is_status_line, reason_from_status_line};
use crate::config::HttpConfig;

/// Body and status of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub code: u32,
    /// Reason phrase of the final response (`Not Found`).
    pub reason: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(code: u32, body: impl Into<Vec<u8>>) -> Self {
        Self {
            code,
            reason: canonical_reason(code).to_string(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// Turns a non-2xx response into [`FetchError::Status`].
    pub fn error_for_status(self, url: &str) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Status {
                code: self.code,
                text: self.reason,
                url: url.to_string(),
            })
        }
    }
}

/// Something that can perform a GET. Non-2xx statuses are returned, not errors.
pub trait Transport {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;

    /// Like [`get`](Transport::get), with the whole request cut off after `limit`.
    fn get_within(&self, url: &str, limit: Duration) -> Result<HttpResponse, FetchError> {
        let _ = limit;
        self.get(url)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        (**self).get(url)
    }

    fn get_within(&self, url: &str, limit: Duration) -> Result<HttpResponse, FetchError> {
        (**self).get_within(url, limit)
    }
}

/// [`Transport`] backed by a fresh curl Easy handle per request.
/// Runs in the current thread.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    connect_timeout: Duration,
    timeout: Duration,
    user_agent: String,
}

impl CurlTransport {
    pub fn new(http: &HttpConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(http.connect_timeout_secs),
            timeout: Duration::from_secs(http.timeout_secs),
            user_agent: http.user_agent.clone(),
        }
    }
}

impl Transport for CurlTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        self.perform(url, self.connect_timeout, self.timeout)
    }

    fn get_within(&self, url: &str, limit: Duration) -> Result<HttpResponse, FetchError> {
        self.perform(url, self.connect_timeout.min(limit), self.timeout.min(limit))
    }
}

impl CurlTransport {
    fn perform(
        &self,
        url: &str,
        connect_timeout: Duration,
        timeout: Duration,
    ) -> Result<HttpResponse, FetchError> {
        let mut body: Vec<u8> = Vec::new();
        let mut status_line = String::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(&self.user_agent)?;
        easy.connect_timeout(connect_timeout)?;
        easy.timeout(timeout)?;

        {
            let mut transfer = easy.transfer();
            // Redirects produce several header blocks; keep the last status line.
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    if is_status_line(s) {
                        status_line = s.trim_end().to_string();
                    }
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        let reason = reason_from_status_line(&status_line, code);
        tracing::debug!(url, code, bytes = body.len(), "GET finished");
        Ok(HttpResponse { code, reason, body })
    }
}
