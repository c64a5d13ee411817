//! City registry: operator metadata per deployment site.

use serde::{Deserialize, Serialize};

/// Identifier for a configured deployment site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CityId {
    Boston,
    Philadelphia,
}

impl CityId {
    /// All configured cities, in display order.
    pub const ALL: [CityId; 2] = [CityId::Boston, CityId::Philadelphia];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boston => "boston",
            Self::Philadelphia => "philadelphia",
        }
    }

    /// Operator metadata for this city.
    pub fn info(&self) -> &'static CityInfo {
        match self {
            Self::Boston => &BOSTON_INFO,
            Self::Philadelphia => &PHILADELPHIA_INFO,
        }
    }
}

impl Default for CityId {
    fn default() -> Self {
        Self::Boston
    }
}

impl std::fmt::Display for CityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CityId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boston" => Ok(Self::Boston),
            "philadelphia" => Ok(Self::Philadelphia),
            _ => Err(format!("Unknown city: {}", s)),
        }
    }
}

/// Operator metadata for a deployment site.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CityInfo {
    pub name: &'static str,
    pub operator: &'static str,
    pub system: &'static str,
    pub vendor: &'static str,
    pub timezone: &'static str,
    pub currency: &'static str,
}

static BOSTON_INFO: CityInfo = CityInfo {
    name: "MBTA (Boston)",
    operator: "Massachusetts Bay Transportation Authority",
    system: "AFC 2.0",
    vendor: "Cubic Transportation Systems",
    timezone: "EST",
    currency: "USD",
};

static PHILADELPHIA_INFO: CityInfo = CityInfo {
    name: "SEPTA (Philadelphia)",
    operator: "Southeastern Pennsylvania Transportation Authority",
    system: "SEPTA Key 2.0",
    vendor: "Cubic Transportation Systems",
    timezone: "EST",
    currency: "USD",
};
