//! Comparators and stable sorting of site lists

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::SiteRecord;

/// Sort order selectable from the list views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Year,
    Region,
}

impl SortKey {
    pub fn compare(&self, a: &SiteRecord, b: &SiteRecord) -> Ordering {
        match self {
            SortKey::Name => compare_by_name(a, b),
            SortKey::Year => compare_by_year(a, b),
            SortKey::Region => compare_by_region(a, b),
        }
    }
}

/// Missing names compare as ""
pub fn compare_by_name(a: &SiteRecord, b: &SiteRecord) -> Ordering {
    locale_compare(a.name_str(), b.name_str())
}

/// Missing or invalid years compare as 0
pub fn compare_by_year(a: &SiteRecord, b: &SiteRecord) -> Ordering {
    a.established_year()
        .unwrap_or(0)
        .cmp(&b.established_year().unwrap_or(0))
}

/// Missing regions compare as ""
pub fn compare_by_region(a: &SiteRecord, b: &SiteRecord) -> Ordering {
    locale_compare(
        a.region.as_deref().unwrap_or(""),
        b.region.as_deref().unwrap_or(""),
    )
}

/// Dictionary-style comparison
///
/// Letters compare case-insensitively first; only when two strings are equal
/// ignoring case does case break the tie, with lowercase ahead of uppercase.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    primary.then_with(|| a.chars().map(swap_case).cmp(b.chars().map(swap_case)))
}

fn swap_case(c: char) -> char {
    if c.is_ascii_lowercase() {
        c.to_ascii_uppercase()
    } else if c.is_ascii_uppercase() {
        c.to_ascii_lowercase()
    } else {
        c
    }
}

/// Stable sort into a new list; the input is left untouched
pub fn sort_sites<'a>(sites: &[&'a SiteRecord], key: SortKey) -> Vec<&'a SiteRecord> {
    let mut sorted = sites.to_vec();
    sorted.sort_by(|a, b| key.compare(a, b));
    sorted
}

/// Abolished-sites display order: most recently abolished first, missing years last
pub fn sort_by_abolished_desc<'a>(sites: &[&'a SiteRecord]) -> Vec<&'a SiteRecord> {
    let mut sorted = sites.to_vec();
    sorted.sort_by(|a, b| {
        b.abolished_year()
            .unwrap_or(i32::MIN)
            .cmp(&a.abolished_year().unwrap_or(i32::MIN))
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(sites: &[&SiteRecord]) -> Vec<String> {
        sites.iter().map(|s| s.name_str().to_string()).collect()
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive_first() {
        let sites = vec![
            SiteRecord::named("zion"),
            SiteRecord::named("Acadia"),
            SiteRecord::named("arches"),
            SiteRecord::named("Badlands"),
        ];
        let refs: Vec<&SiteRecord> = sites.iter().collect();
        assert_eq!(
            names(&sort_sites(&refs, SortKey::Name)),
            vec!["Acadia", "arches", "Badlands", "zion"]
        );
    }

    #[test]
    fn test_lowercase_before_uppercase_on_tie() {
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("Glacier", "glacier"), Ordering::Greater);
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_missing_name_sorts_first() {
        let sites = vec![SiteRecord::named("Denali"), SiteRecord::default()];
        let refs: Vec<&SiteRecord> = sites.iter().collect();
        let sorted = sort_sites(&refs, SortKey::Name);
        assert_eq!(sorted[0].name, None);
    }

    #[test]
    fn test_sort_by_name_is_idempotent() {
        let sites = vec![
            SiteRecord::named("Yosemite"),
            SiteRecord::named("Everglades"),
            SiteRecord::named("Olympic"),
        ];
        let refs: Vec<&SiteRecord> = sites.iter().collect();
        let once = sort_sites(&refs, SortKey::Name);
        let twice = sort_sites(&once, SortKey::Name);
        assert_eq!(names(&once), names(&twice));
    }

    #[test]
    fn test_sort_by_year_invalid_as_zero_and_stable() {
        let sites = vec![
            SiteRecord::named("B").with_established("1916"),
            SiteRecord::named("C").with_established("unknown"),
            SiteRecord::named("A").with_established("1916"),
            SiteRecord::named("D").with_established("1872"),
            SiteRecord::named("E"),
        ];
        let refs: Vec<&SiteRecord> = sites.iter().collect();
        assert_eq!(
            names(&sort_sites(&refs, SortKey::Year)),
            vec!["C", "E", "D", "B", "A"]
        );
    }

    #[test]
    fn test_sort_by_region_stable_for_equal_keys() {
        let sites = vec![
            SiteRecord::named("Z").with_region("Southeast"),
            SiteRecord::named("Y").with_region("Alaska"),
            SiteRecord::named("X").with_region("Southeast"),
            SiteRecord::named("W"),
        ];
        let refs: Vec<&SiteRecord> = sites.iter().collect();
        assert_eq!(
            names(&sort_sites(&refs, SortKey::Region)),
            vec!["W", "Y", "Z", "X"]
        );
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let sites = vec![SiteRecord::named("b"), SiteRecord::named("a")];
        let refs: Vec<&SiteRecord> = sites.iter().collect();
        let _ = sort_sites(&refs, SortKey::Name);
        assert_eq!(names(&refs), vec!["b", "a"]);
    }

    #[test]
    fn test_sort_by_abolished_desc() {
        let sites = vec![
            SiteRecord::named("Old").with_established(1875).with_abolished(1895),
            SiteRecord::named("New").with_established(1930).with_abolished(1970),
            SiteRecord::named("Mid").with_established(1910).with_abolished(1930),
        ];
        let refs: Vec<&SiteRecord> = sites.iter().collect();
        assert_eq!(
            names(&sort_by_abolished_desc(&refs)),
            vec!["New", "Mid", "Old"]
        );
    }
}
