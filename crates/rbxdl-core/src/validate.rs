//! Input validation: reference presence, category selection, host, identifier.

use url::Url;

use crate::category::{AssetCategory, UnknownCategory};
use crate::identifier::{extract_asset_id, AssetId};

/// One user submission: a URL or bare id plus the selected category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub reference: String,
    pub category: Option<AssetCategory>,
    /// Category text that named no known category; reported by [`validate`]
    /// after the reference checks.
    unrecognized: Option<UnknownCategory>,
}

impl DownloadRequest {
    pub fn new(reference: impl Into<String>, category: Option<AssetCategory>) -> Self {
        Self {
            reference: reference.into(),
            category,
            unrecognized: None,
        }
    }

    /// Builds a request from raw form values; a blank category counts as unselected.
    pub fn from_raw(reference: &str, category: Option<&str>) -> Self {
        let mut request = Self::new(reference, None);
        if let Some(raw) = category.map(str::trim).filter(|c| !c.is_empty()) {
            match raw.parse::<AssetCategory>() {
                Ok(c) => request.category = Some(c),
                Err(unknown) => request.unrecognized = Some(unknown),
            }
        }
        request
    }
}

/// A request that passed validation; the id is already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub reference: String,
    pub category: AssetCategory,
    pub id: AssetId,
    /// True when the reference was a URL rather than a bare id.
    pub is_url: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter an asset URL and select an asset type.")]
    MissingReferenceAndCategory,
    #[error("Please enter an asset URL.")]
    MissingReference,
    #[error("Please select an asset type.")]
    MissingCategory,
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),
    #[error("Please enter a valid {0} URL.")]
    UnrecognizedHost(String),
    #[error("Could not find an asset ID in the URL.")]
    IdentifierNotFound,
}

/// Validates `request` and resolves its asset id. No network access.
///
/// URL references must point at `required_host` or one of its subdomains;
/// a bare numeric id skips the host check.
pub fn validate(
    request: &DownloadRequest,
    required_host: &str,
) -> Result<ValidatedRequest, ValidationError> {
    let reference = request.reference.trim();

    let selected = request.category.is_some() || request.unrecognized.is_some();
    if reference.is_empty() {
        return Err(if selected {
            ValidationError::MissingReference
        } else {
            ValidationError::MissingReferenceAndCategory
        });
    }
    let category = match (request.category, &request.unrecognized) {
        (Some(c), _) => c,
        (None, Some(unknown)) => return Err(unknown.clone().into()),
        (None, None) => return Err(ValidationError::MissingCategory),
    };

    let (id, is_url) = resolve_reference(reference, required_host)?;
    Ok(ValidatedRequest {
        reference: reference.to_string(),
        category,
        id,
        is_url,
    })
}

/// Resolves the asset id behind a trimmed, non-empty reference.
/// Returns the id and whether the reference was a URL.
pub fn resolve_reference(
    reference: &str,
    required_host: &str,
) -> Result<(AssetId, bool), ValidationError> {
    if let Some(id) = AssetId::parse(reference) {
        return Ok((id, false));
    }
    if !host_matches(reference, required_host) {
        return Err(ValidationError::UnrecognizedHost(required_host.to_string()));
    }
    let id = extract_asset_id(reference).ok_or(ValidationError::IdentifierNotFound)?;
    Ok((id, true))
}

/// The reference as an absolute URL. Scheme-less input (`www.roblox.com/...`)
/// is read as https. `None` when it is not a URL with a host.
pub fn reference_url(reference: &str) -> Option<Url> {
    match Url::parse(reference) {
        Ok(url) if url.has_host() => Some(url),
        // `www.roblox.com:443/...` parses with the host as its scheme.
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("https://{}", reference))
                .ok()
                .filter(Url::has_host)
        }
        Err(_) => None,
    }
}

/// True if `reference` is a URL whose host is `required` or a subdomain of it.
fn host_matches(reference: &str, required: &str) -> bool {
    let Some(url) = reference_url(reference) else {
        return false;
    };
    let Some(host) = url.host_str() else {
        return false;
    };
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    let required = required.trim_end_matches('.').to_ascii_lowercase();
    host == required || host.ends_with(&format!(".{}", required))
}
