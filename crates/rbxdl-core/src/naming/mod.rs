//! Name resolution for saved assets.
//!
//! Sources, in order: a name scraped from the asset page, the URL slug that
//! follows the id, and finally `<category>_<id>`. The last one always
//! succeeds, so a broken scraper only costs a prettier name.

mod sanitize;

pub use sanitize::sanitize_stem;

use crate::category::AssetCategory;
use crate::identifier::AssetId;

/// Where the final file name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    Scraped,
    Slug,
    Identifier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub file_name: String,
    pub source: NameSource,
}

/// `<category>_<id>`, the stem used when nothing better is known.
pub fn identifier_stem(category: AssetCategory, id: &AssetId) -> String {
    format!("{}_{}", category.as_str(), id)
}

/// Picks the first usable stem and appends the category suffix.
pub fn resolve_file_name(
    category: AssetCategory,
    id: &AssetId,
    scraped: Option<&str>,
    slug: Option<&str>,
) -> ResolvedName {
    let candidates = [(scraped, NameSource::Scraped), (slug, NameSource::Slug)];
    let (stem, source) = candidates
        .into_iter()
        .filter_map(|(raw, source)| raw.map(|r| (sanitize_stem(r), source)))
        .find(|(stem, _)| !stem.is_empty())
        .unwrap_or_else(|| (identifier_stem(category, id), NameSource::Identifier));

    ResolvedName {
        file_name: format!("{}{}", stem, category.suffix()),
        source,
    }
}
