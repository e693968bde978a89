use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::chart::{year_counts, BarChart};
use crate::filter::{filter_sites, recent_sites, unique_designations, unique_regions, FilterCriteria};
use crate::group::{group_by_year, YearGrouping};
use crate::layout::{layout_timeline, TrackMetrics};
use crate::map::{map_center, map_markers, MapMarker};
use crate::sort::{sort_sites, SortKey};
use crate::types::{Coordinates, SiteRecord};
use crate::utils::osc8_file_link;

/// Inputs for one generation run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub criteria: FilterCriteria,
    pub sort: SortKey,
    pub reference_year: i32,
    pub window_size: u32,
    pub metrics: TrackMetrics,
    pub output_dir: PathBuf,
    pub quiet: bool,
}

#[derive(Serialize)]
struct MapView<'a> {
    center: Coordinates,
    markers: Vec<MapMarker<'a>>,
}

#[derive(Serialize)]
struct Catalog {
    regions: Vec<String>,
    designations: Vec<String>,
}

fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut json_str = serde_json::to_string_pretty(value)?;
    json_str.push('\n');
    fs::write(path, json_str).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Write the chart as `year,count,names` rows, names joined by "; "
pub fn write_chart_csv(path: &Path, chart: &BarChart) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    writer.write_record(["year", "count", "names"])?;
    for bar in &chart.bars {
        writer.write_record([
            bar.year.to_string(),
            bar.count.to_string(),
            bar.names.join("; "),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write every view model of the dataset into `options.output_dir`
///
/// The directory is removed and recreated first. `abolished` feeds the
/// timeline; it is skipped when absent.
pub fn run_generate(
    sites: &[SiteRecord],
    abolished: Option<&[SiteRecord]>,
    options: &GenerateOptions,
) -> Result<()> {
    let output_dir = options.output_dir.as_path();
    let progress = |msg: &str| {
        if !options.quiet {
            println!("{}", msg);
        }
    };

    if output_dir.exists() {
        fs::remove_dir_all(output_dir)
            .with_context(|| format!("Failed to clean {}", output_dir.display()))?;
    }
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let filtered = filter_sites(sites, &options.criteria);
    let sorted = sort_sites(&filtered, options.sort);
    progress(&format!("{} of {} sites match the filters", sorted.len(), sites.len()));

    progress("Writing site list...");
    write_json_file(&output_dir.join("sites.json"), &sorted)?;

    progress("Writing recent timeline...");
    let recent = recent_sites(sites, options.reference_year, options.window_size);
    let recent_buckets = group_by_year(
        recent,
        YearGrouping::FixedWindow {
            start_year: options.reference_year,
            window_size: options.window_size,
        },
    );
    write_json_file(&output_dir.join("recent.json"), &recent_buckets)?;

    progress("Writing year groups...");
    let years = group_by_year(filtered.iter().copied(), YearGrouping::FullRange);
    write_json_file(&output_dir.join("years.json"), &years)?;

    progress("Writing bar chart...");
    let chart = year_counts(filtered.iter().copied());
    write_json_file(&output_dir.join("chart.json"), &chart)?;
    write_chart_csv(&output_dir.join("chart.csv"), &chart)?;

    progress("Writing map markers...");
    let markers = map_markers(filtered.iter().copied());
    let map = MapView {
        center: map_center(&markers),
        markers,
    };
    write_json_file(&output_dir.join("map.json"), &map)?;

    progress("Writing catalog...");
    let catalog = Catalog {
        regions: unique_regions(sites),
        designations: unique_designations(sites),
    };
    write_json_file(&output_dir.join("catalog.json"), &catalog)?;

    if let Some(abolished) = abolished {
        progress("Writing abolished timeline...");
        let shown: Vec<&SiteRecord> = abolished.iter().filter(|s| s.is_listable()).collect();
        match layout_timeline(abolished, &shown, &options.metrics) {
            Some(layout) => write_json_file(&output_dir.join("abolished.json"), &layout)?,
            None => log::warn!("no abolished sites with both years, skipping timeline"),
        }
    }

    if !options.quiet {
        println!(
            "Done! Generated view models in {}",
            osc8_file_link(output_dir, &output_dir.display().to_string())
        );
    }
    Ok(())
}
