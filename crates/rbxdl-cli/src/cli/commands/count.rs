//! `rbxdl count` – show the relay's download counter.

use anyhow::{Context, Result};
use rbxdl_core::config::RbxdlConfig;
use rbxdl_core::relay::{CurlTransport, RelayClient};
use rbxdl_core::stats::StatsReporter;
use std::time::Duration;

/// Prints the counter once, or every `stats.refresh_interval_secs` with `watch`.
pub fn run_count(cfg: &RbxdlConfig, watch: bool) -> Result<()> {
    let client = RelayClient::new(CurlTransport::new(&cfg.http), cfg.relay.clone());
    let stats = StatsReporter::new(&client, cfg.stats.enabled)
        .with_timeout(Duration::from_secs(cfg.stats.timeout_secs));

    if !watch {
        match stats.download_count().context("read download count")? {
            Some(count) => println!("{}", count),
            None => println!("Download counter is disabled (stats.enabled = false)."),
        }
        return Ok(());
    }

    if !cfg.stats.enabled {
        println!("Download counter is disabled (stats.enabled = false).");
        return Ok(());
    }
    let interval = Duration::from_secs(cfg.stats.refresh_interval_secs.max(1));
    loop {
        match stats.download_count() {
            Ok(Some(count)) => println!("{}", count),
            Ok(None) => {}
            // A dead counter only leaves the last value stale.
            Err(e) => tracing::warn!("download count refresh failed: {}", e),
        }
        std::thread::sleep(interval);
    }
}
