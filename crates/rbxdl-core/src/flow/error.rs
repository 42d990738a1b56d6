//! Flow error: one variant per step that can fail, displayed as the user message.

use std::io;

use crate::markup::ParseError;
use crate::relay::FetchError;
use crate::validate::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// Bad or missing input. Raised before any network access.
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// Metadata lookup (asset XML or page) failed.
    #[error("Failed to fetch asset data: {0}")]
    Metadata(#[source] FetchError),
    /// Asset XML had no usable `<Content>` element.
    #[error("Failed to parse sound data. The asset might be off-sale. ({0})")]
    Parse(#[from] ParseError),
    /// Payload GET failed.
    #[error("Download failed: {0}")]
    Download(#[source] FetchError),
    /// Payload arrived but could not be written.
    #[error("Could not save file: {0}")]
    Save(#[source] io::Error),
}

impl FlowError {
    /// Text for the status/error region.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, FlowError::Validation(_))
    }

    /// HTTP status of a failed fetch, if that is what went wrong.
    pub fn http_status(&self) -> Option<u32> {
        match self {
            FlowError::Metadata(e) | FlowError::Download(e) => e.status_code(),
            _ => None,
        }
    }
}
