//! Regional service deployments of the game.
//!
//! Each region ships its own master database snapshot with potentially
//! divergent content and release timing. `Jp` is the primary region; all
//! other regions are merged on top of it as overlays.

use serde::{Deserialize, Serialize};

/// A localized service deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "JP")]
    Jp,
    #[serde(rename = "CN")]
    Cn,
    #[serde(rename = "EN")]
    En,
    #[serde(rename = "KR")]
    Kr,
    #[serde(rename = "TW")]
    Tw,
}

impl Region {
    /// The region all builders process first
    pub const PRIMARY: Region = Region::Jp;

    /// Secondary regions in merge order
    pub const SECONDARY: &'static [Region] =
        &[Region::Cn, Region::En, Region::Kr, Region::Tw];

    /// All regions, primary first
    pub const ALL: &'static [Region] = &[
        Region::Jp,
        Region::Cn,
        Region::En,
        Region::Kr,
        Region::Tw,
    ];

    /// Lowercase tag used in snapshot file names (`master_jp.db`)
    pub fn file_tag(&self) -> &'static str {
        match self {
            Self::Jp => "jp",
            Self::Cn => "cn",
            Self::En => "en",
            Self::Kr => "kr",
            Self::Tw => "tw",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Jp => write!(f, "JP"),
            Self::Cn => write!(f, "CN"),
            Self::En => write!(f, "EN"),
            Self::Kr => write!(f, "KR"),
            Self::Tw => write!(f, "TW"),
        }
    }
}

impl std::str::FromStr for Region {
    type Err = ParseRegionError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "JP" => Ok(Self::Jp),
            "CN" => Ok(Self::Cn),
            "EN" => Ok(Self::En),
            "KR" => Ok(Self::Kr),
            "TW" => Ok(Self::Tw),
            _ => Err(ParseRegionError(s.to_string())),
        }
    }
}

/// Error for unrecognized region tags
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown region: {0}")]
pub struct ParseRegionError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_parse() {
        assert_eq!("JP".parse::<Region>().unwrap(), Region::Jp);
        assert_eq!("jp".parse::<Region>().unwrap(), Region::Jp);
        assert_eq!("Tw".parse::<Region>().unwrap(), Region::Tw);
        assert!("XX".parse::<Region>().is_err());
    }

    #[test]
    fn test_region_display_round_trip() {
        for region in Region::ALL {
            assert_eq!(region.to_string().parse::<Region>().unwrap(), *region);
        }
    }

    #[test]
    fn test_primary_not_in_secondary() {
        assert!(!Region::SECONDARY.contains(&Region::PRIMARY));
    }
}
