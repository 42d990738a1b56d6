use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::category::AssetCategory;

/// CORS relay that fetches targets on our behalf.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Base URL; `/fetch`, `/download`, `/downloads` and `/submit` hang off it.
    pub base_url: String,
    /// When false, targets are fetched directly instead of through the relay.
    pub enabled: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.robloxasset.com".to_string(),
            enabled: true,
        }
    }
}

/// Upstream asset endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Delivery API host; assets are served from `<this>/v1/asset/?id=<id>`.
    pub asset_delivery_url: String,
    /// Legacy asset page; sounds are resolved through `<this>?id=<id>` (XML).
    pub asset_page_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            asset_delivery_url: "https://assetdelivery.roblox.com".to_string(),
            asset_page_url: "https://www.roblox.com/asset/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    /// Whole-request timeout, including the body.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 120,
            user_agent: concat!("rbxdl/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Usage counter endpoints on the relay. Best effort; the service may be gone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub enabled: bool,
    /// Poll interval for `rbxdl count --watch`.
    pub refresh_interval_secs: u64,
    /// Cap on each counter call, so a dead service cannot hold up a download.
    /// 0 leaves only the `[http]` timeouts.
    pub timeout_secs: u64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            refresh_interval_secs: 5,
            timeout_secs: 3,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Fetch the asset page and scrape a display name from it.
    pub scrape_page_names: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How long "Download complete!" stays up before the submit control comes back.
    pub completion_delay_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            completion_delay_ms: 1500,
        }
    }
}

/// Global configuration loaded from `~/.config/rbxdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RbxdlConfig {
    /// Host every URL reference must belong to (subdomains included).
    pub required_host: String,
    /// Category used when none is given on the command line.
    pub default_category: Option<AssetCategory>,
    /// Where downloads land; current directory when unset.
    pub download_dir: Option<PathBuf>,
    pub relay: RelayConfig,
    pub provider: ProviderConfig,
    pub http: HttpConfig,
    pub stats: StatsConfig,
    pub naming: NamingConfig,
    pub ui: UiConfig,
}

impl Default for RbxdlConfig {
    fn default() -> Self {
        Self {
            required_host: "roblox.com".to_string(),
            default_category: None,
            download_dir: None,
            relay: RelayConfig::default(),
            provider: ProviderConfig::default(),
            http: HttpConfig::default(),
            stats: StatsConfig::default(),
            naming: NamingConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("rbxdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RbxdlConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<RbxdlConfig> {
    if !path.exists() {
        let default_cfg = RbxdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: RbxdlConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
