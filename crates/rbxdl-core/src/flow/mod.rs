//! One user action, start to finish:
//! validate → resolve id → fetch → (name) → save → report.
//!
//! The submitted reference is passed down the chain; nothing is kept between
//! submissions. The submit control is disabled for the duration and comes
//! back on every exit path, including errors.

mod error;
mod guard;
mod status;

pub use error::FlowError;
pub use status::{
    NullStatus, StatusSink, DOWNLOADING_ASSET, DOWNLOADING_SOUND, DOWNLOAD_COMPLETE,
    FETCHING_INFO,
};

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::category::{AssetCategory, FetchRoute};
use crate::checksum;
use crate::config::{ProviderConfig, RbxdlConfig};
use crate::identifier::{slug_after_id, AssetId};
use crate::markup::{parse_content_url, MarkupNameGuesser, NameGuesser};
use crate::naming::{resolve_file_name, NameSource};
use crate::relay::{endpoint_url, FetchError, RelayClient, Transport};
use crate::save::SaveTarget;
use crate::stats::StatsReporter;
use crate::validate::{reference_url, validate, DownloadRequest, ValidatedRequest};
use guard::SubmitGuard;

/// What a successful submission produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub id: AssetId,
    pub category: AssetCategory,
    pub file_name: String,
    pub name_source: NameSource,
    pub path: PathBuf,
    pub bytes: u64,
    pub sha256: String,
}

/// Knobs the flow reads from [`RbxdlConfig`].
#[derive(Debug, Clone)]
pub struct FlowSettings {
    pub required_host: String,
    pub provider: ProviderConfig,
    pub stats_enabled: bool,
    pub stats_timeout: Duration,
    pub scrape_page_names: bool,
    pub completion_delay: Duration,
}

impl From<&RbxdlConfig> for FlowSettings {
    fn from(cfg: &RbxdlConfig) -> Self {
        Self {
            required_host: cfg.required_host.clone(),
            provider: cfg.provider.clone(),
            stats_enabled: cfg.stats.enabled,
            stats_timeout: Duration::from_secs(cfg.stats.timeout_secs),
            scrape_page_names: cfg.naming.scrape_page_names,
            completion_delay: Duration::from_millis(cfg.ui.completion_delay_ms),
        }
    }
}

/// `<provider>/v1/asset/?id=<id>`.
pub fn delivery_url(provider: &ProviderConfig, id: &AssetId) -> Result<String, FetchError> {
    Ok(endpoint_url(&provider.asset_delivery_url, "v1/asset/", &[("id", id.as_str())])?.into())
}

/// `<asset page>?id=<id>`, the XML document naming a sound's content URL.
pub fn asset_page_url(provider: &ProviderConfig, id: &AssetId) -> Result<String, FetchError> {
    let mut url = Url::parse(&provider.asset_page_url).map_err(|source| FetchError::InvalidUrl {
        url: provider.asset_page_url.clone(),
        source,
    })?;
    url.query_pairs_mut().append_pair("id", id.as_str());
    Ok(url.into())
}

pub struct AssetDownloader<T, S> {
    client: RelayClient<T>,
    target: S,
    settings: FlowSettings,
    guesser: Box<dyn NameGuesser>,
}

impl<T: Transport, S: SaveTarget> AssetDownloader<T, S> {
    pub fn new(client: RelayClient<T>, target: S, settings: FlowSettings) -> Self {
        Self {
            client,
            target,
            settings,
            guesser: Box::new(MarkupNameGuesser),
        }
    }

    /// Replaces the page scraper used when `scrape_page_names` is on.
    pub fn with_name_guesser(mut self, guesser: Box<dyn NameGuesser>) -> Self {
        self.guesser = guesser;
        self
    }

    /// Runs one submission, reporting progress and errors to `ui`.
    pub fn submit<U: StatusSink + ?Sized>(
        &self,
        request: &DownloadRequest,
        ui: &mut U,
    ) -> Result<DownloadOutcome, FlowError> {
        ui.hide_error();
        let mut ui = SubmitGuard::engage(ui);

        match self.run(request, &mut *ui) {
            Ok(outcome) => {
                ui.show_progress(DOWNLOAD_COMPLETE);
                tracing::info!(
                    id = %outcome.id,
                    category = %outcome.category,
                    path = %outcome.path.display(),
                    bytes = outcome.bytes,
                    "asset saved"
                );
                if !self.settings.completion_delay.is_zero() {
                    std::thread::sleep(self.settings.completion_delay);
                }
                ui.hide_progress();
                Ok(outcome)
            }
            Err(err) => {
                tracing::warn!(reference = %request.reference, "submission failed: {}", err);
                ui.show_error(&err.user_message());
                ui.hide_progress();
                Err(err)
            }
        }
    }

    fn run<U: StatusSink + ?Sized>(
        &self,
        request: &DownloadRequest,
        ui: &mut U,
    ) -> Result<DownloadOutcome, FlowError> {
        let req = validate(request, &self.settings.required_host)?;
        tracing::debug!(id = %req.id, category = %req.category, "resolved asset id");

        ui.show_progress(FETCHING_INFO);
        let scraped = self.scrape_name(&req);
        let payload = self.fetch_payload(&req, ui)?;

        let slug = if req.is_url {
            slug_after_id(&req.reference, &req.id)
        } else {
            None
        };
        let name = resolve_file_name(req.category, &req.id, scraped.as_deref(), slug.as_deref());
        let path = self
            .target
            .save(&name.file_name, &payload)
            .map_err(FlowError::Save)?;

        StatsReporter::new(&self.client, self.settings.stats_enabled)
            .with_timeout(self.settings.stats_timeout)
            .submit(&req.reference, req.category);

        Ok(DownloadOutcome {
            id: req.id,
            category: req.category,
            file_name: name.file_name,
            name_source: name.source,
            path,
            bytes: payload.len() as u64,
            sha256: checksum::sha256_bytes(&payload),
        })
    }

    fn fetch_payload<U: StatusSink + ?Sized>(
        &self,
        req: &ValidatedRequest,
        ui: &mut U,
    ) -> Result<Vec<u8>, FlowError> {
        let provider = &self.settings.provider;
        match req.category.route() {
            FetchRoute::ContentXml => {
                let page = asset_page_url(provider, &req.id).map_err(FlowError::Metadata)?;
                let xml = self.client.fetch_text(&page).map_err(FlowError::Metadata)?;
                let content_url = parse_content_url(&xml)?;
                tracing::debug!(%content_url, "sound content url");
                ui.show_progress(DOWNLOADING_SOUND);
                self.client
                    .download(&content_url)
                    .map_err(FlowError::Download)
            }
            FetchRoute::ById => {
                let url = delivery_url(provider, &req.id).map_err(FlowError::Download)?;
                ui.show_progress(DOWNLOADING_ASSET);
                self.client.download(&url).map_err(FlowError::Download)
            }
        }
    }

    /// Display name from the asset's web page. Any failure just means `None`.
    fn scrape_name(&self, req: &ValidatedRequest) -> Option<String> {
        if !self.settings.scrape_page_names || !req.is_url {
            return None;
        }
        let page = reference_url(&req.reference)?.to_string();
        match self.client.fetch_text(&page) {
            Ok(markup) => {
                let name = self.guesser.guess(&markup);
                if name.is_none() {
                    tracing::warn!(page = %page, "no display name found in page markup");
                }
                name
            }
            Err(e) => {
                tracing::warn!(page = %page, "page fetch for display name failed: {}", e);
                None
            }
        }
    }
}
