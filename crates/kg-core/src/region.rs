use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Number of regions, and the required length of every release vector.
pub const REGION_COUNT: usize = 3;

/// A server/distribution variant of the game content.
///
/// Each character carries an independent release flag per region, stored in
/// the order `[Jp, Gl, Cn]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// Japanese server.
    #[default]
    Jp,
    /// Global server.
    Gl,
    /// Chinese server.
    Cn,
}

impl Region {
    /// All regions in release-vector order.
    pub const ALL: [Region; REGION_COUNT] = [Region::Jp, Region::Gl, Region::Cn];

    /// Position of this region's flag in a release vector.
    pub fn index(self) -> usize {
        match self {
            Self::Jp => 0,
            Self::Gl => 1,
            Self::Cn => 2,
        }
    }

    /// Short lowercase code used in file names and persisted settings.
    pub fn code(self) -> &'static str {
        match self {
            Self::Jp => "jp",
            Self::Gl => "gl",
            Self::Cn => "cn",
        }
    }

    /// Human-readable server name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Jp => "Japan",
            Self::Gl => "Global",
            Self::Cn => "China",
        }
    }

    /// Parse a region code, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jp" => Ok(Self::Jp),
            "gl" => Ok(Self::Gl),
            "cn" => Ok(Self::Cn),
            _ => Err(CoreError::UnknownRegion(s.to_string())),
        }
    }
}

impl FromStr for Region {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_codes() {
        assert_eq!(Region::parse("jp").unwrap(), Region::Jp);
        assert_eq!(Region::parse(" GL ").unwrap(), Region::Gl);
        assert_eq!("cn".parse::<Region>().unwrap(), Region::Cn);
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            Region::parse("kr"),
            Err(CoreError::UnknownRegion("kr".to_string()))
        );
    }

    #[test]
    fn indices_follow_release_order() {
        let indices: Vec<usize> = Region::ALL.iter().map(|r| r.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn default_is_jp() {
        assert_eq!(Region::default(), Region::Jp);
    }

    #[test]
    fn serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Region::Gl).unwrap(), "\"gl\"");
        let r: Region = serde_json::from_str("\"cn\"").unwrap();
        assert_eq!(r, Region::Cn);
    }
}
