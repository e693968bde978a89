//! Year grouping: bucket records by establishment year

use std::collections::BTreeMap;

use serde::Serialize;

use crate::filter::window_floor;
use crate::types::SiteRecord;

/// How year buckets are keyed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearGrouping {
    /// Every year in `[start_year - window_size + 1, start_year]`, empty years included.
    /// Records outside the window are dropped.
    FixedWindow { start_year: i32, window_size: u32 },
    /// Only years that occur in the data
    FullRange,
}

/// Records established in one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearBucket<'a> {
    pub year: i32,
    pub sites: Vec<&'a SiteRecord>,
}

impl YearBucket<'_> {
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

/// Group records by established year; buckets come back in descending year order
///
/// Records keep their input order within a bucket. Records without a valid
/// year are skipped in both modes.
pub fn group_by_year<'a, I>(sites: I, mode: YearGrouping) -> Vec<YearBucket<'a>>
where
    I: IntoIterator<Item = &'a SiteRecord>,
{
    let mut by_year: BTreeMap<i32, Vec<&SiteRecord>> = BTreeMap::new();

    match mode {
        YearGrouping::FixedWindow {
            start_year,
            window_size,
        } => {
            let floor = window_floor(start_year, window_size);
            for year in (floor..=i64::from(start_year)).filter_map(|y| i32::try_from(y).ok()) {
                by_year.insert(year, Vec::new());
            }
            for site in sites {
                // Only pre-seeded years accept records
                if let Some(bucket) = site.established_year().and_then(|y| by_year.get_mut(&y)) {
                    bucket.push(site);
                }
            }
        }
        YearGrouping::FullRange => {
            for site in sites {
                match site.established_year() {
                    Some(year) => by_year.entry(year).or_default().push(site),
                    None => log::debug!("no established year for '{}', skipping", site.name_str()),
                }
            }
        }
    }

    by_year
        .into_iter()
        .rev()
        .map(|(year, sites)| YearBucket { year, sites })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket_names(bucket: &YearBucket) -> Vec<String> {
        bucket.sites.iter().map(|s| s.name_str().to_string()).collect()
    }

    #[test]
    fn test_full_range_skips_invalid_years() {
        let sites = vec![
            SiteRecord::named("A").with_established("1916"),
            SiteRecord::named("B").with_established("2020"),
            SiteRecord::named("C").with_established("abcd"),
        ];
        let buckets = group_by_year(&sites, YearGrouping::FullRange);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].year, 2020);
        assert_eq!(bucket_names(&buckets[0]), vec!["B"]);
        assert_eq!(buckets[1].year, 1916);
        assert_eq!(bucket_names(&buckets[1]), vec!["A"]);
    }

    #[test]
    fn test_full_range_never_has_empty_buckets() {
        let sites = vec![
            SiteRecord::named("A").with_established("1900"),
            SiteRecord::named("B").with_established("1950"),
            SiteRecord::named("C").with_established("1900"),
        ];
        let buckets = group_by_year(&sites, YearGrouping::FullRange);
        assert!(buckets.iter().all(|b| !b.is_empty()));
        assert_eq!(
            buckets.iter().map(|b| b.year).collect::<Vec<_>>(),
            vec![1950, 1900]
        );
        assert_eq!(bucket_names(&buckets[1]), vec!["A", "C"]);
    }

    #[test]
    fn test_fixed_window_has_exactly_window_size_keys() {
        let sites = vec![
            SiteRecord::named("Old").with_established("1999"),
            SiteRecord::named("New").with_established("2023"),
            SiteRecord::named("Future").with_established("2030"),
            SiteRecord::named("Newer").with_established("2023"),
        ];
        let buckets = group_by_year(
            &sites,
            YearGrouping::FixedWindow {
                start_year: 2025,
                window_size: 5,
            },
        );
        assert_eq!(
            buckets.iter().map(|b| b.year).collect::<Vec<_>>(),
            vec![2025, 2024, 2023, 2022, 2021]
        );
        assert_eq!(bucket_names(&buckets[2]), vec!["New", "Newer"]);
        assert!(buckets[0].is_empty());
        assert!(buckets[4].is_empty());
    }

    #[test]
    fn test_fixed_window_on_empty_data() {
        let sites: Vec<SiteRecord> = Vec::new();
        let buckets = group_by_year(
            &sites,
            YearGrouping::FixedWindow {
                start_year: 2025,
                window_size: 3,
            },
        );
        assert_eq!(buckets.len(), 3);
        assert!(buckets.iter().all(|b| b.is_empty()));
    }

    #[test]
    fn test_fixed_window_of_zero_years() {
        let sites = vec![SiteRecord::named("A").with_established("2025")];
        let buckets = group_by_year(
            &sites,
            YearGrouping::FixedWindow {
                start_year: 2025,
                window_size: 0,
            },
        );
        assert!(buckets.is_empty());
    }
}
