//! Fetch error type shared by the transport and the relay client.

/// A GET that did not produce a usable body.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// A target or endpoint URL could not be built.
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// Curl reported an error (timeout, connection, etc.).
    #[error("{0}")]
    Transport(#[from] curl::Error),
    /// HTTP response had a non-2xx status. Displays as e.g. `404 Not Found`.
    #[error("{code} {text}")]
    Status { code: u32, text: String, url: String },
}

impl FetchError {
    pub fn status_code(&self) -> Option<u32> {
        match self {
            FetchError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}
