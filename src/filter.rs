//! Predicate filters over site records

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::SiteRecord;

/// Region selection; `All` is the "no restriction" sentinel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionFilter {
    #[default]
    All,
    Only(String),
}

impl RegionFilter {
    pub fn matches(&self, site: &SiteRecord) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Only(region) => site.region.as_deref() == Some(region.as_str()),
        }
    }
}

impl FromStr for RegionFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "all" {
            RegionFilter::All
        } else {
            RegionFilter::Only(s.to_string())
        })
    }
}

/// Stamp availability selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StampsFilter {
    #[default]
    All,
    Yes,
    No,
}

impl StampsFilter {
    pub fn matches(&self, site: &SiteRecord) -> bool {
        match self {
            StampsFilter::All => true,
            StampsFilter::Yes => site.has_stamps(),
            StampsFilter::No => !site.has_stamps(),
        }
    }
}

impl FromStr for StampsFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(StampsFilter::All),
            "yes" => Ok(StampsFilter::Yes),
            "no" => Ok(StampsFilter::No),
            other => Err(format!("invalid stamps filter '{}': expected all, yes or no", other)),
        }
    }
}

/// User-selected filter values, passed explicitly into every transform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub region: RegionFilter,
    pub stamps: StampsFilter,
    /// Empty set means every designation passes
    pub designations: BTreeSet<String>,
    /// Case-insensitive name substring; blank means no restriction
    pub search: String,
    /// Only keep records with a non-empty `nps_established` field
    pub require_established: bool,
}

impl FilterCriteria {
    pub fn designation_matches(&self, site: &SiteRecord) -> bool {
        if self.designations.is_empty() {
            return true;
        }
        site.designation
            .as_deref()
            .map_or(false, |d| self.designations.contains(d))
    }

    pub fn search_matches(&self, site: &SiteRecord) -> bool {
        let term = self.search.trim();
        if term.is_empty() {
            return true;
        }
        site.name_str().to_lowercase().contains(&term.to_lowercase())
    }

    fn established_matches(&self, site: &SiteRecord) -> bool {
        !self.require_established
            || site
                .nps_established
                .as_ref()
                .map_or(false, |y| y.is_present())
    }

    /// All active predicates combined with AND
    pub fn matches(&self, site: &SiteRecord) -> bool {
        site.is_listable()
            && self.established_matches(site)
            && self.region.matches(site)
            && self.stamps.matches(site)
            && self.designation_matches(site)
            && self.search_matches(site)
    }
}

/// Keep the records passing `criteria`, preserving their relative order
pub fn filter_sites<'a, I>(sites: I, criteria: &FilterCriteria) -> Vec<&'a SiteRecord>
where
    I: IntoIterator<Item = &'a SiteRecord>,
{
    let mut dropped = 0usize;
    let kept: Vec<&SiteRecord> = sites
        .into_iter()
        .filter(|s| {
            let keep = criteria.matches(s);
            if !keep {
                dropped += 1;
            }
            keep
        })
        .collect();
    log::debug!("filter kept {} records, dropped {}", kept.len(), dropped);
    kept
}

/// Established in `[reference_year - window_size + 1, ..)`
///
/// Records without a valid year are never recent.
pub fn is_recent(site: &SiteRecord, reference_year: i32, window_size: u32) -> bool {
    match site.established_year() {
        Some(year) => i64::from(year) >= window_floor(reference_year, window_size),
        None => false,
    }
}

/// First year of a window of `window_size` years ending at `reference_year`
pub(crate) fn window_floor(reference_year: i32, window_size: u32) -> i64 {
    i64::from(reference_year) - i64::from(window_size) + 1
}

/// Listable records passing the recency predicate, in input order
pub fn recent_sites<'a, I>(sites: I, reference_year: i32, window_size: u32) -> Vec<&'a SiteRecord>
where
    I: IntoIterator<Item = &'a SiteRecord>,
{
    sites
        .into_iter()
        .filter(|s| s.is_listable() && is_recent(s, reference_year, window_size))
        .collect()
}

/// Sorted, de-duplicated non-empty regions
pub fn unique_regions(sites: &[SiteRecord]) -> Vec<String> {
    unique_values(sites, |s| s.region.as_deref())
}

/// Sorted, de-duplicated non-empty designations
pub fn unique_designations(sites: &[SiteRecord]) -> Vec<String> {
    unique_values(sites, |s| s.designation.as_deref())
}

fn unique_values<F>(sites: &[SiteRecord], field: F) -> Vec<String>
where
    F: Fn(&SiteRecord) -> Option<&str>,
{
    sites
        .iter()
        .filter_map(|s| field(s))
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<SiteRecord> {
        vec![
            SiteRecord::named("Acadia National Park")
                .with_region("Northeast")
                .with_designation("National Park")
                .with_established("1916")
                .with_stamps(true),
            SiteRecord::named("Zion National Park")
                .with_region("Intermountain")
                .with_designation("National Park")
                .with_established("1909")
                .with_stamps(false),
            SiteRecord::named("Antietam National Battlefield")
                .with_region("National Capital")
                .with_designation("National Battlefield")
                .with_established("abcd"),
            SiteRecord::named("Boston Harbor Islands")
                .with_region("Northeast")
                .with_designation("National Recreation Area"),
            SiteRecord::default().with_region("Northeast"),
        ]
    }

    fn names(sites: &[&SiteRecord]) -> Vec<String> {
        sites.iter().map(|s| s.name_str().to_string()).collect()
    }

    #[test]
    fn test_region_filter() {
        let sites = sample();
        let criteria = FilterCriteria {
            region: "Northeast".parse().unwrap(),
            ..Default::default()
        };
        let out = filter_sites(&sites, &criteria);
        assert_eq!(names(&out), vec!["Acadia National Park", "Boston Harbor Islands"]);
        assert!(out.iter().all(|s| s.region.as_deref() == Some("Northeast")));

        // "all" keeps every listable record
        let criteria = FilterCriteria {
            region: "all".parse().unwrap(),
            ..Default::default()
        };
        assert_eq!(filter_sites(&sites, &criteria).len(), 4);
    }

    #[test]
    fn test_stamps_filter() {
        let sites = vec![
            SiteRecord::named("X").with_stamps(true),
            SiteRecord::named("Y").with_stamps(false),
        ];
        let criteria = FilterCriteria {
            stamps: StampsFilter::Yes,
            ..Default::default()
        };
        assert_eq!(names(&filter_sites(&sites, &criteria)), vec!["X"]);

        let criteria = FilterCriteria {
            stamps: StampsFilter::No,
            ..Default::default()
        };
        assert_eq!(names(&filter_sites(&sites, &criteria)), vec!["Y"]);
    }

    #[test]
    fn test_missing_stamps_counts_as_no() {
        let sites = sample();
        let criteria = FilterCriteria {
            stamps: StampsFilter::No,
            ..Default::default()
        };
        assert_eq!(
            names(&filter_sites(&sites, &criteria)),
            vec!["Zion National Park", "Antietam National Battlefield", "Boston Harbor Islands"]
        );
    }

    #[test]
    fn test_designation_set_membership() {
        let sites = sample();
        let mut criteria = FilterCriteria::default();
        criteria.designations.insert("National Battlefield".to_string());
        criteria.designations.insert("National Recreation Area".to_string());
        assert_eq!(
            names(&filter_sites(&sites, &criteria)),
            vec!["Antietam National Battlefield", "Boston Harbor Islands"]
        );
    }

    #[test]
    fn test_name_search_is_trimmed_and_case_insensitive() {
        let sites = sample();
        let criteria = FilterCriteria {
            search: "  NATIONAL park ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            names(&filter_sites(&sites, &criteria)),
            vec!["Acadia National Park", "Zion National Park"]
        );

        let criteria = FilterCriteria {
            search: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(filter_sites(&sites, &criteria).len(), 4);
    }

    #[test]
    fn test_combined_filters_and_order_preserved() {
        let sites = sample();
        let criteria = FilterCriteria {
            region: RegionFilter::Only("Northeast".to_string()),
            stamps: StampsFilter::No,
            ..Default::default()
        };
        assert_eq!(names(&filter_sites(&sites, &criteria)), vec!["Boston Harbor Islands"]);
    }

    #[test]
    fn test_require_established_keeps_present_but_invalid_years() {
        let sites = sample();
        let criteria = FilterCriteria {
            require_established: true,
            ..Default::default()
        };
        assert_eq!(
            names(&filter_sites(&sites, &criteria)),
            vec!["Acadia National Park", "Zion National Park", "Antietam National Battlefield"]
        );
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let sites = sample();
        let criteria = FilterCriteria {
            region: RegionFilter::Only("Pacific West".to_string()),
            ..Default::default()
        };
        assert!(filter_sites(&sites, &criteria).is_empty());
    }

    #[test]
    fn test_recency_predicate() {
        let recent = SiteRecord::named("New").with_established("2021");
        let edge = SiteRecord::named("Edge").with_established("2020");
        let old = SiteRecord::named("Old").with_established("2019");
        let bad = SiteRecord::named("Bad").with_established("n/a");
        assert!(is_recent(&recent, 2024, 5));
        assert!(is_recent(&edge, 2024, 5));
        assert!(!is_recent(&old, 2024, 5));
        assert!(!is_recent(&bad, 2024, 5));

        let all = vec![old, recent, bad, edge];
        assert_eq!(names(&recent_sites(&all, 2024, 5)), vec!["New", "Edge"]);
    }

    #[test]
    fn test_unique_regions_and_designations() {
        let sites = sample();
        assert_eq!(
            unique_regions(&sites),
            vec!["Intermountain", "National Capital", "Northeast"]
        );
        assert_eq!(
            unique_designations(&sites),
            vec!["National Battlefield", "National Park", "National Recreation Area"]
        );
    }

    #[test]
    fn test_stamps_filter_from_str() {
        assert_eq!("YES".parse::<StampsFilter>(), Ok(StampsFilter::Yes));
        assert!("maybe".parse::<StampsFilter>().is_err());
    }
}
