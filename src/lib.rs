//! Filtering, grouping and layout engine for the National Park Service sites dataset
//!
//! Every transform is a pure function of the records and an explicit
//! [`FilterCriteria`] / mode value; nothing here reads ambient UI state.

pub mod chart;
pub mod config;
pub mod filter;
pub mod generate;
pub mod group;
pub mod layout;
pub mod load;
pub mod map;
pub mod parse;
pub mod render;
pub mod sort;
pub mod types;
pub mod utils;

pub use chart::{year_counts, BarChart, YearCount};
pub use config::ViewConfig;
pub use filter::{filter_sites, recent_sites, FilterCriteria, RegionFilter, StampsFilter};
pub use group::{group_by_year, YearBucket, YearGrouping};
pub use layout::{layout_timeline, Domain, LabelPlacement, TimelineLayout, TrackMetrics};
pub use map::{map_center, map_markers, MapMarker};
pub use sort::{sort_sites, SortKey};
pub use types::*;

pub const SITES_URL: &str =
    "https://raw.githubusercontent.com/carlknutson/nps-changes-feed/main/data/sites.json";
pub const ABOLISHED_SITES_URL: &str =
    "https://raw.githubusercontent.com/carlknutson/nps-changes-feed/main/data/abolished_sites.json";
pub const DEFAULT_SITES_PATH: &str = "data/sites.json";
pub const DEFAULT_ABOLISHED_PATH: &str = "data/abolished_sites.json";

/// Length of the "recently added" window, in years
pub const RECENT_WINDOW_YEARS: u32 = 5;
/// Longest "recent" window accepted from the CLI or a config file
pub const MAX_WINDOW_YEARS: u32 = 500;

/// Timeline track width assumed when estimating bar pixel widths
pub const TRACK_WIDTH_PX: f64 = 720.0;
pub const INLINE_LABEL_MIN_PX: f64 = 60.0;
pub const MIN_BAR_WIDTH_PX: f64 = 36.0;

/// Geographic center of the contiguous US (lat, lng)
pub const DEFAULT_MAP_CENTER: (f64, f64) = (39.8283, -98.5795);
