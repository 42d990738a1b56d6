//! Tests for the terminal status sink.

use crate::cli::terminal::TerminalStatus;
use rbxdl_core::flow::{StatusSink, DOWNLOAD_COMPLETE, FETCHING_INFO};

#[test]
fn progress_lines_are_written_once() {
    let mut ui = TerminalStatus::new(Vec::new());
    ui.show_progress(FETCHING_INFO);
    ui.show_progress(FETCHING_INFO);
    ui.show_progress(DOWNLOAD_COMPLETE);
    ui.hide_progress();
    let out = String::from_utf8(ui.into_inner()).unwrap();
    assert_eq!(out, "Fetching asset info...\nDownload complete!\n");
}

#[test]
fn error_kept_until_hidden() {
    let mut ui = TerminalStatus::new(Vec::new());
    ui.show_error("Download failed: 404 Not Found");
    assert_eq!(ui.last_error(), Some("Download failed: 404 Not Found"));
    ui.hide_error();
    assert_eq!(ui.last_error(), None);
}
