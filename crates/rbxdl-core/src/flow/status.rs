//! The user-facing surface the flow drives: submit control, progress line, error line.

pub const FETCHING_INFO: &str = "Fetching asset info...";
pub const DOWNLOADING_SOUND: &str = "Downloading sound...";
pub const DOWNLOADING_ASSET: &str = "Downloading asset...";
pub const DOWNLOAD_COMPLETE: &str = "Download complete!";

/// Receives status updates from [`AssetDownloader::submit`](super::AssetDownloader::submit).
pub trait StatusSink {
    fn set_submit_enabled(&mut self, enabled: bool);
    fn show_progress(&mut self, message: &str);
    fn hide_progress(&mut self);
    fn show_error(&mut self, message: &str);
    fn hide_error(&mut self);
}

/// Sink that drops everything; for callers that only want the `Result`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStatus;

impl StatusSink for NullStatus {
    fn set_submit_enabled(&mut self, _enabled: bool) {}
    fn show_progress(&mut self, _message: &str) {}
    fn hide_progress(&mut self) {}
    fn show_error(&mut self, _message: &str) {}
    fn hide_error(&mut self) {}
}
