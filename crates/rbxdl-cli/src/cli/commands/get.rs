//! `rbxdl get` – download one asset.

use anyhow::{bail, Context, Result};
use rbxdl_core::config::RbxdlConfig;
use rbxdl_core::flow::{AssetDownloader, FlowSettings};
use rbxdl_core::relay::{CurlTransport, RelayClient};
use rbxdl_core::save::DirectorySaveTarget;
use rbxdl_core::validate::DownloadRequest;
use std::fs;
use std::path::PathBuf;

use crate::cli::terminal::TerminalStatus;

/// Arguments of `rbxdl get` after parsing.
#[derive(Debug)]
pub struct GetOptions {
    pub reference: String,
    pub category: Option<String>,
    pub output: Option<PathBuf>,
    pub direct: bool,
    pub scrape_names: bool,
}

pub fn run_get(cfg: &RbxdlConfig, opts: GetOptions) -> Result<()> {
    let mut cfg = cfg.clone();
    if opts.direct {
        cfg.relay.enabled = false;
    }
    if opts.scrape_names {
        cfg.naming.scrape_page_names = true;
    }

    // Category text is checked by the flow, after the reference.
    let request = match opts.category.as_deref() {
        Some(raw) => DownloadRequest::from_raw(&opts.reference, Some(raw)),
        None => DownloadRequest::new(opts.reference.as_str(), cfg.default_category),
    };

    let dir = match opts.output.or_else(|| cfg.download_dir.clone()) {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;

    let client = RelayClient::new(CurlTransport::new(&cfg.http), cfg.relay.clone());
    let downloader =
        AssetDownloader::new(client, DirectorySaveTarget::new(&dir), FlowSettings::from(&cfg));

    let mut ui = TerminalStatus::stderr();
    let outcome = match downloader.submit(&request, &mut ui) {
        Ok(outcome) => outcome,
        // The flow error chain repeats its source; print only the status text.
        Err(err) => {
            let message = ui
                .last_error()
                .map(str::to_string)
                .unwrap_or_else(|| err.user_message());
            bail!(message)
        }
    };

    println!("{}", outcome.path.display());
    println!(
        "  {} {}  {} bytes  sha256 {}",
        outcome.category, outcome.id, outcome.bytes, outcome.sha256
    );
    Ok(())
}
