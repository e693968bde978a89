//! Plain-text rendering of the view models for terminal output

use crate::chart::BarChart;
use crate::group::YearBucket;
use crate::layout::{LabelPlacement, TimelineLayout};
use crate::map::MapMarker;
use crate::types::{Coordinates, SiteRecord, YearField};
use crate::utils::site_link;

pub const NO_RESULTS: &str = "No sites match the current filters.";
pub const NO_NEW_SITES: &str = "No new sites";
pub const NO_YEAR_DATA: &str = "No establishment year data available.";
pub const NO_LOCATIONS: &str = "No valid site locations found in data.";

/// Widest chart bar, in characters
const CHART_COLUMNS: usize = 40;

fn or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "N/A",
    }
}

fn site_card(site: &SiteRecord, show_established: bool) -> String {
    let mut card = format!("{}\n", site_link(site));
    if let Some(desc) = site.description.as_deref().filter(|d| !d.is_empty()) {
        card.push_str(&format!("    {}\n", desc));
    }
    card.push_str(&format!("    Region: {}\n", or_na(site.region.as_deref())));
    if show_established {
        let established = match site.nps_established.as_ref() {
            Some(YearField::Text(s)) => or_na(Some(s.as_str())).to_string(),
            Some(YearField::Number(n)) => n.to_string(),
            Some(YearField::Other(_)) | None => "N/A".to_string(),
        };
        card.push_str(&format!("    Established: {}\n", established));
    }
    card.push_str(&format!(
        "    Stamps: {}\n",
        if site.has_stamps() { "Yes" } else { "No" }
    ));
    if !site.previous_names.is_empty() {
        card.push_str(&format!(
            "    Previous names: {}\n",
            site.previous_names.join(", ")
        ));
    }
    card
}

/// Card or condensed list of sites
pub fn render_list(sites: &[&SiteRecord], condensed: bool) -> String {
    if sites.is_empty() {
        return format!("{}\n", NO_RESULTS);
    }
    let mut out = String::new();
    for site in sites {
        if condensed {
            out.push_str(&format!("{}\n", site_link(site)));
        } else {
            out.push_str(&site_card(site, true));
            out.push('\n');
        }
    }
    out
}

/// Year headings followed by that year's sites
pub fn render_year_buckets(buckets: &[YearBucket], condensed: bool) -> String {
    if buckets.is_empty() {
        return format!("{}\n", NO_RESULTS);
    }
    let mut out = String::new();
    for bucket in buckets {
        out.push_str(&format!("{}\n", bucket.year));
        out.push_str(&format!("{}\n", "-".repeat(bucket.year.to_string().len())));
        if bucket.is_empty() {
            out.push_str(&format!("  {}\n", NO_NEW_SITES));
        } else {
            for site in &bucket.sites {
                if condensed {
                    out.push_str(&format!("  {}\n", site_link(site)));
                } else {
                    for line in site_card(site, false).lines() {
                        out.push_str(&format!("  {}\n", line));
                    }
                }
            }
        }
        out.push('\n');
    }
    out
}

/// Horizontal bar chart, one row per year; unlabeled years show a blank label
pub fn render_chart(chart: &BarChart) -> String {
    if chart.is_empty() {
        return format!("{}\n", NO_YEAR_DATA);
    }
    let max_count = chart.bars.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    let mut out = String::new();
    for bar in &chart.bars {
        let label = if bar.labeled {
            bar.year.to_string()
        } else {
            String::new()
        };
        let len = (bar.count * CHART_COLUMNS).div_ceil(max_count);
        out.push_str(&format!("{:>6} | {} {}\n", label, "#".repeat(len), bar.count));
    }
    out.push_str(&format!(
        "{} sites established {}-{}\n",
        chart.total(),
        chart.min_year().unwrap_or_default(),
        chart.max_year().unwrap_or_default()
    ));
    out
}

pub fn render_map(markers: &[MapMarker], center: Coordinates) -> String {
    if markers.is_empty() {
        return format!("{}\n", NO_LOCATIONS);
    }
    let mut out = format!("Center: {}, {}\n\n", center.lat, center.lng);
    for marker in markers {
        let flag = if marker.coords.in_range() {
            ""
        } else {
            " (out of range)"
        };
        out.push_str(&format!(
            "{:>11.5} {:>12.5}  {}{}\n",
            marker.coords.lat,
            marker.coords.lng,
            site_link(marker.site),
            flag
        ));
    }
    out
}

/// Text timeline; `columns` is the character width standing in for the track
pub fn render_timeline(layout: &TimelineLayout, columns: usize) -> String {
    let columns = columns.max(1);
    let mut out = String::new();

    // Axis
    let mut axis = vec![b' '; columns + 6];
    for tick in &layout.ticks {
        let label = tick.year.to_string();
        if label.len() > axis.len() {
            continue;
        }
        let at = (tick.position * columns as f64).round() as usize;
        let at = at.min(axis.len().saturating_sub(label.len()));
        axis[at..at + label.len()].copy_from_slice(label.as_bytes());
    }
    out.push_str(&format!(
        "{:>32}  {}\n",
        "Year",
        String::from_utf8_lossy(&axis).trim_end()
    ));

    for bar in &layout.bars {
        let left = (bar.left * columns as f64).round() as usize;
        let width = ((bar.width * columns as f64).round() as usize).max(1);
        let mut row = " ".repeat(left.min(columns));
        match bar.placement {
            LabelPlacement::Inside => {
                let fill = width.saturating_sub(bar.label.chars().count());
                row.push_str(&bar.label);
                row.push_str(&"=".repeat(fill));
            }
            LabelPlacement::Outside => {
                row.push_str(&"=".repeat(width));
                row.push(' ');
                row.push_str(&bar.label);
            }
        }
        let name: String = bar.site.name_str().chars().take(32).collect();
        out.push_str(&format!("{:>32}  {}\n", name, row));
    }

    for site in &layout.rejected {
        out.push_str(&format!(
            "skipped {}: abolished before established\n",
            site_link(site)
        ));
    }
    out
}

/// Region and designation selector values
pub fn render_catalog(regions: &[String], designations: &[String]) -> String {
    let mut out = String::from("Regions:\n");
    for region in regions {
        out.push_str(&format!("  {}\n", region));
    }
    out.push_str("\nDesignations:\n");
    for designation in designations {
        out.push_str(&format!("  {}\n", designation));
    }
    out
}
