//! Input types for the estimation engine.
//!
//! [`ProjectSpec`] is the wire shape produced by the quote wizard: camelCase
//! JSON with string-encoded enums. Enum parsing is strict (unknown values
//! are rejected at the boundary, never silently coerced), while the open
//! identifier sets (`subtype`, `features`, `techStack`) stay plain strings
//! and are handled leniently by the engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of the requested project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProjectType {
    Mobile,
    Web,
    Telegram,
    Ai,
    Desktop,
    Other,
}

impl ProjectType {
    /// All known project types, in display order.
    pub const ALL: [Self; 6] = [
        Self::Mobile,
        Self::Web,
        Self::Telegram,
        Self::Ai,
        Self::Desktop,
        Self::Other,
    ];
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Mobile => "mobile",
            Self::Web => "web",
            Self::Telegram => "telegram",
            Self::Ai => "ai",
            Self::Desktop => "desktop",
            Self::Other => "other",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ProjectType {
    type Err = UnknownProjectType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mobile" => Ok(Self::Mobile),
            "web" => Ok(Self::Web),
            "telegram" => Ok(Self::Telegram),
            "ai" => Ok(Self::Ai),
            "desktop" => Ok(Self::Desktop),
            "other" => Ok(Self::Other),
            _ => Err(UnknownProjectType(s.to_string())),
        }
    }
}

impl Serialize for ProjectType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ProjectType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown project type strings.
#[derive(Debug, Clone)]
pub struct UnknownProjectType(String);

impl fmt::Display for UnknownProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown project type: {}", self.0)
    }
}

impl std::error::Error for UnknownProjectType {}

/// Complexity tier of the requested project.
///
/// Tiers are ordered: `Mvp < Standard < Enterprise`. The rate card's
/// multipliers must be non-decreasing in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Complexity {
    Mvp,
    Standard,
    Enterprise,
}

impl Complexity {
    /// All tiers, lowest first.
    pub const ALL: [Self; 3] = [Self::Mvp, Self::Standard, Self::Enterprise];
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Mvp => "mvp",
            Self::Standard => "standard",
            Self::Enterprise => "enterprise",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Complexity {
    type Err = UnknownComplexity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mvp" => Ok(Self::Mvp),
            "standard" => Ok(Self::Standard),
            "enterprise" => Ok(Self::Enterprise),
            _ => Err(UnknownComplexity(s.to_string())),
        }
    }
}

impl Serialize for Complexity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Complexity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown complexity strings.
#[derive(Debug, Clone)]
pub struct UnknownComplexity(String);

impl fmt::Display for UnknownComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown complexity tier: {}", self.0)
    }
}

impl std::error::Error for UnknownComplexity {}

/// Native mobile platform target.
///
/// Only meaningful when the project type is `mobile`; selecting both `ios`
/// and `android` switches delivery to the parallel dual-team throughput.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Platform {
    Ios,
    Android,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ios => "ios",
            Self::Android => "android",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            _ => Err(UnknownPlatform(s.to_string())),
        }
    }
}

impl Serialize for Platform {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Platform {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown platform strings.
#[derive(Debug, Clone)]
pub struct UnknownPlatform(String);

impl fmt::Display for UnknownPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown platform: {}", self.0)
    }
}

impl std::error::Error for UnknownPlatform {}

/// A structured description of a requested project, as built by the quote
/// wizard. Immutable per estimation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSpec {
    /// Category of the project.
    pub project_type: ProjectType,

    /// Finer-grained classification within the project type (e.g. `"rag"`
    /// under `ai`). May imply bundled features and/or a technology choice;
    /// unknown subtypes imply nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,

    /// Complexity tier.
    pub complexity: Complexity,

    /// Explicitly selected feature identifiers. Duplicates, within the
    /// list or against subtype-implied features, never count twice.
    #[serde(default)]
    pub features: Vec<String>,

    /// Number of distinct screens/pages. Must be positive.
    pub pages: u32,

    /// Selected technology identifiers, each mapping to a multiplicative
    /// adjustment factor.
    #[serde(default)]
    pub tech_stack: Vec<String>,

    /// Platform targets; only consulted for mobile projects.
    #[serde(default)]
    pub platforms: Vec<Platform>,
}
