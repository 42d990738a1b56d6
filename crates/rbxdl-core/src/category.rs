//! Asset categories: file suffix and fetch route per kind of asset.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the payload for a category is located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchRoute {
    /// Fetch the asset page XML, follow the URL in its `<Content>` element.
    ContentXml,
    /// Fetch `<provider>/v1/asset/?id=<id>` directly.
    ById,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Sound,
    Decal,
    Plugin,
    Accessory,
    Clothing,
    Mesh,
    Model,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 7] = [
        AssetCategory::Sound,
        AssetCategory::Decal,
        AssetCategory::Plugin,
        AssetCategory::Accessory,
        AssetCategory::Clothing,
        AssetCategory::Mesh,
        AssetCategory::Model,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AssetCategory::Sound => "sound",
            AssetCategory::Decal => "decal",
            AssetCategory::Plugin => "plugin",
            AssetCategory::Accessory => "accessory",
            AssetCategory::Clothing => "clothing",
            AssetCategory::Mesh => "mesh",
            AssetCategory::Model => "model",
        }
    }

    /// Fixed suffix every saved file of this category ends with.
    pub fn suffix(self) -> &'static str {
        match self {
            AssetCategory::Sound => ".ogg",
            AssetCategory::Decal | AssetCategory::Clothing => ".png",
            AssetCategory::Plugin
            | AssetCategory::Accessory
            | AssetCategory::Mesh
            | AssetCategory::Model => ".rbxm",
        }
    }

    pub fn route(self) -> FetchRoute {
        match self {
            AssetCategory::Sound => FetchRoute::ContentXml,
            _ => FetchRoute::ById,
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a category name is not one of [`AssetCategory::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown asset type \"{0}\".")]
pub struct UnknownCategory(pub String);

impl FromStr for AssetCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        AssetCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Decal".parse::<AssetCategory>(), Ok(AssetCategory::Decal));
        assert_eq!(" sound ".parse::<AssetCategory>(), Ok(AssetCategory::Sound));
    }

    #[test]
    fn parse_unknown() {
        let err = "placeholder".parse::<AssetCategory>().unwrap_err();
        assert_eq!(err, UnknownCategory("placeholder".to_string()));
    }

    #[test]
    fn suffixes() {
        assert_eq!(AssetCategory::Decal.suffix(), ".png");
        assert_eq!(AssetCategory::Sound.suffix(), ".ogg");
        assert_eq!(AssetCategory::Model.suffix(), ".rbxm");
        assert_eq!(AssetCategory::Clothing.suffix(), ".png");
    }

    #[test]
    fn only_sound_goes_through_content_xml() {
        for c in AssetCategory::ALL {
            let expected = if c == AssetCategory::Sound {
                FetchRoute::ContentXml
            } else {
                FetchRoute::ById
            };
            assert_eq!(c.route(), expected, "{c}");
        }
    }

    #[test]
    fn display_matches_as_str() {
        for c in AssetCategory::ALL {
            assert_eq!(c.to_string(), c.as_str());
            assert_eq!(c.as_str().parse::<AssetCategory>(), Ok(c));
        }
    }
}
