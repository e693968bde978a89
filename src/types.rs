//! Site record types as they appear in `sites.json` and `abolished_sites.json`

use serde::{Deserialize, Deserializer, Serialize};

use crate::parse::{parse_coordinates, parse_year};

/// A year field that may be written as a JSON string ("1916") or a number (1916)
///
/// Any other JSON value lands in `Other` and never parses as a year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearField {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl YearField {
    /// True when the raw value is present and non-empty (not necessarily a valid year)
    pub fn is_present(&self) -> bool {
        match self {
            YearField::Number(_) => true,
            YearField::Text(s) => !s.is_empty(),
            YearField::Other(serde_json::Value::Bool(b)) => *b,
            YearField::Other(v) => !v.is_null(),
        }
    }
}

impl From<&str> for YearField {
    fn from(s: &str) -> Self {
        YearField::Text(s.to_string())
    }
}

impl From<i32> for YearField {
    fn from(n: i32) -> Self {
        YearField::Number(n.into())
    }
}

impl From<i64> for YearField {
    fn from(n: i64) -> Self {
        YearField::Number(n.into())
    }
}

/// Loosely-typed boolean flag (`has_stamps`)
///
/// Coerced with the same truthiness rules the dataset's original consumers used:
/// `true`, any non-zero number, any non-empty string, and every array or object
/// are truthy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl Flag {
    pub fn is_truthy(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Number(n) => n.as_f64().map_or(false, |v| v != 0.0 && !v.is_nan()),
            Flag::Text(s) => !s.is_empty(),
            Flag::Other(v) => v.is_array() || v.is_object(),
        }
    }
}

/// `previous_names` as a list of strings; null or a non-list reads as empty and
/// non-string entries are dropped
fn lenient_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let names = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(names)
}

impl From<bool> for Flag {
    fn from(b: bool) -> Self {
        Flag::Bool(b)
    }
}

/// Latitude/longitude pair parsed from a site's `location` string
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Whether the pair lies within the valid WGS84 ranges
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// One park/site entry from the static dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nps_established: Option<YearField>,
    /// Only present in the abolished-sites dataset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nps_abolished: Option<YearField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_stamps: Option<Flag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_names",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub previous_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nps_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SiteRecord {
    /// Convenience constructor used by fixtures and callers building records by hand
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn with_established(mut self, year: impl Into<YearField>) -> Self {
        self.nps_established = Some(year.into());
        self
    }

    pub fn with_abolished(mut self, year: impl Into<YearField>) -> Self {
        self.nps_abolished = Some(year.into());
        self
    }

    pub fn with_region(mut self, region: &str) -> Self {
        self.region = Some(region.to_string());
        self
    }

    pub fn with_designation(mut self, designation: &str) -> Self {
        self.designation = Some(designation.to_string());
        self
    }

    pub fn with_stamps(mut self, has_stamps: bool) -> Self {
        self.has_stamps = Some(Flag::Bool(has_stamps));
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    /// Name, or "" when missing
    pub fn name_str(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// A record is listable when it has a non-empty name
    pub fn is_listable(&self) -> bool {
        self.name.as_deref().map_or(false, |n| !n.is_empty())
    }

    pub fn has_stamps(&self) -> bool {
        self.has_stamps.as_ref().map_or(false, Flag::is_truthy)
    }

    /// Parsed establishment year, `None` when absent or unparsable
    pub fn established_year(&self) -> Option<i32> {
        self.nps_established.as_ref().and_then(parse_year)
    }

    /// Parsed abolishment year, `None` when absent or unparsable
    pub fn abolished_year(&self) -> Option<i32> {
        self.nps_abolished.as_ref().and_then(parse_year)
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.location.as_deref().and_then(parse_coordinates)
    }
}
