//! Per-year counts for the establishment bar chart

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::SiteRecord;

pub const UNNAMED_SITE: &str = "Unnamed Site";

/// One bar of the chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
    /// Tooltip names, in input order
    pub names: Vec<String>,
    /// Whether the axis shows this year's label
    pub labeled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BarChart {
    /// Contiguous from the first to the last year present, zero-count years included
    pub bars: Vec<YearCount>,
    pub tick_interval: i32,
}

impl BarChart {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn min_year(&self) -> Option<i32> {
        self.bars.first().map(|b| b.year)
    }

    pub fn max_year(&self) -> Option<i32> {
        self.bars.last().map(|b| b.year)
    }

    pub fn total(&self) -> usize {
        self.bars.iter().map(|b| b.count).sum()
    }
}

/// Label every Nth year; N grows with the span of the chart
pub fn tick_interval(year_range: i64) -> i32 {
    if year_range > 100 {
        10
    } else if year_range > 40 {
        5
    } else if year_range > 20 {
        2
    } else {
        1
    }
}

/// Count records per established year over `[min, max]` of the valid years present
///
/// Records without a valid year are ignored; if none have one the chart is empty.
pub fn year_counts<'a, I>(sites: I) -> BarChart
where
    I: IntoIterator<Item = &'a SiteRecord>,
{
    let mut names_by_year: BTreeMap<i32, Vec<String>> = BTreeMap::new();
    for site in sites {
        if let Some(year) = site.established_year() {
            let name = site
                .name
                .as_deref()
                .filter(|n| !n.is_empty())
                .unwrap_or(UNNAMED_SITE);
            names_by_year.entry(year).or_default().push(name.to_string());
        }
    }

    let (min_year, max_year) = match (
        names_by_year.keys().next().copied(),
        names_by_year.keys().next_back().copied(),
    ) {
        (Some(min), Some(max)) => (min, max),
        _ => return BarChart::default(),
    };

    let interval = tick_interval(i64::from(max_year) - i64::from(min_year));
    let bars = (min_year..=max_year)
        .map(|year| {
            let names = names_by_year.remove(&year).unwrap_or_default();
            YearCount {
                year,
                count: names.len(),
                names,
                labeled: (i64::from(year) - i64::from(min_year)) % i64::from(interval) == 0,
            }
        })
        .collect();

    BarChart {
        bars,
        tick_interval: interval,
    }
}
