//! Version tokens ordered by PEP 440 precedence
//!
//! A [`Version`] is either a real release (`1.0`, `2.5.1`, `3.0rc1`) or one of
//! two sentinels:
//! - [`ALL`]: lower than every release, the implicit scope of flat alias lists
//! - [`LATEST`]: higher than every release, selects the newest alias set
//!
//! Releases compare numerically per component, so `1.10` > `1.9` and
//! `1.0` == `1.0.0`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use pep508_rs::pep440_rs::Version as Pep440Version;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::version::error::ConstructionError;

/// Lowest possible version
pub const ALL: Version = Version { bound: Bound::All };

/// Highest possible version
pub const LATEST: Version = Version {
    bound: Bound::Latest,
};

/// Binding used when a serialized value or enum omits its version
pub(crate) fn default_bound() -> Option<Version> {
    Some(ALL)
}

const ALL_TOKEN: &str = "all";
const LATEST_TOKEN: &str = "latest";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
    All,
    Release,
    Latest,
}

#[derive(Debug, Clone)]
enum Bound {
    All,
    /// Keeps the text the caller passed so it can be reported back unchanged
    Release { raw: String, parsed: Pep440Version },
    Latest,
}

/// A parsed, totally ordered version token
#[derive(Debug, Clone)]
pub struct Version {
    bound: Bound,
}

impl Version {
    /// Parse a version string.
    ///
    /// Accepts PEP 440 releases plus the sentinel tokens `all` (or `*`) and
    /// `latest`, case-insensitively.
    pub fn parse(version: &str) -> Result<Self, ConstructionError> {
        let trimmed = version.trim();

        if trimmed == "*" || trimmed.eq_ignore_ascii_case(ALL_TOKEN) {
            return Ok(ALL);
        }
        if trimmed.eq_ignore_ascii_case(LATEST_TOKEN) {
            return Ok(LATEST);
        }

        let parsed =
            Pep440Version::from_str(trimmed).map_err(|e| ConstructionError::InvalidVersion {
                version: version.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            bound: Bound::Release {
                raw: trimmed.to_string(),
                parsed,
            },
        })
    }

    pub fn is_all(&self) -> bool {
        matches!(self.bound, Bound::All)
    }

    pub fn is_latest(&self) -> bool {
        matches!(self.bound, Bound::Latest)
    }

    fn rank(&self) -> Rank {
        match self.bound {
            Bound::All => Rank::All,
            Bound::Release { .. } => Rank::Release,
            Bound::Latest => Rank::Latest,
        }
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.bound, &other.bound) {
            (Bound::Release { parsed: a, .. }, Bound::Release { parsed: b, .. }) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.bound {
            Bound::All => f.write_str(ALL_TOKEN),
            Bound::Release { raw, .. } => f.write_str(raw),
            Bound::Latest => f.write_str(LATEST_TOKEN),
        }
    }
}

impl FromStr for Version {
    type Err = ConstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Version::parse(&raw).map_err(serde::de::Error::custom)
    }
}
