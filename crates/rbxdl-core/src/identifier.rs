//! Asset identifier extraction.
//!
//! A reference is either a bare number or a URL. URLs are tried against
//! known path prefixes first (`/library/<id>/...`); when none match, the
//! first standalone run of at least [`MIN_LOOSE_DIGITS`] digits in any URL
//! segment is taken. The order matters: a prefix match wins even when a
//! longer digit run appears later in the URL.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Shortest digit run accepted by the loose segment scan.
pub const MIN_LOOSE_DIGITS: usize = 8;

/// Path prefixes whose next segment is the asset id.
pub const KNOWN_PATH_PREFIXES: [&str; 5] =
    ["library", "catalog", "bundles", "asset", "marketplace/asset"];

/// Characters that delimit URL segments for the loose scan.
const SEGMENT_DELIMITERS: [char; 5] = ['/', '?', '&', '=', '#'];

/// Numeric asset identifier. Never empty, ASCII digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetId(String);

impl AssetId {
    /// Accepts `s` if it is a non-empty run of ASCII digits.
    pub fn parse(s: &str) -> Option<AssetId> {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            Some(AssetId(s.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn prefix_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let prefixes = KNOWN_PATH_PREFIXES
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"(?i)/(?:{})/(\d+)(?:[/?#]|$)", prefixes))
            .expect("static prefix pattern")
    })
}

/// Extracts the asset id from a reference. `None` when nothing qualifies.
pub fn extract_asset_id(reference: &str) -> Option<AssetId> {
    let reference = reference.trim();
    if let Some(id) = AssetId::parse(reference) {
        return Some(id);
    }
    from_known_prefix(path_part(reference)).or_else(|| from_loose_segment(reference))
}

/// Everything before the query string or fragment.
fn path_part(reference: &str) -> &str {
    reference.split(['?', '#']).next().unwrap_or_default()
}

fn from_known_prefix(reference: &str) -> Option<AssetId> {
    let caps = prefix_pattern().captures(reference)?;
    AssetId::parse(caps.get(1)?.as_str())
}

fn from_loose_segment(reference: &str) -> Option<AssetId> {
    reference
        .split(SEGMENT_DELIMITERS)
        .find(|token| token.len() >= MIN_LOOSE_DIGITS && token.bytes().all(|b| b.is_ascii_digit()))
        .and_then(AssetId::parse)
}

/// The path segment right after the id, e.g. `Astronomia` in
/// `/library/4951534350/Astronomia`. Used as a display-name hint.
pub fn slug_after_id(reference: &str, id: &AssetId) -> Option<String> {
    let mut segments = path_part(reference).split('/').filter(|s| !s.is_empty());
    segments.find(|s| *s == id.as_str())?;
    segments.next().map(str::to_string)
}
