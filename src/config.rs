//! View configuration loaded from a CONL file
//!
//! Every key is optional. Example:
//!
//! ```text
//! ; view.conl
//! region = Northeast
//! stamps = yes
//! sort = year
//! reference_year = 2025
//! designations
//!   = National Park
//!   = National Monument
//! ```

use anyhow::{bail, Context, Result};
use chrono::Datelike;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::filter::{FilterCriteria, RegionFilter, StampsFilter};
use crate::layout::TrackMetrics;
use crate::sort::SortKey;
use crate::{MAX_WINDOW_YEARS, RECENT_WINDOW_YEARS};

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewConfig {
    pub region: Option<String>,
    pub stamps: Option<StampsFilter>,
    #[serde(default)]
    pub designations: Vec<String>,
    pub search: Option<String>,
    pub sort: Option<SortKey>,
    pub require_established: Option<bool>,
    /// Last year of the "recent" window; defaults to the current year
    pub reference_year: Option<i32>,
    pub window_size: Option<u32>,
    pub track_width_px: Option<f64>,
    pub inline_label_min_px: Option<f64>,
}

impl ViewConfig {
    pub fn from_conl(content: &str) -> Result<Self> {
        let config: ViewConfig =
            serde_conl::from_str(content).context("Failed to parse view config")?;
        if let Some(window_size) = config.window_size {
            check_window_size(window_size)?;
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_conl(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Filter criteria described by this config
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            region: match self.region.as_deref() {
                None | Some("all") => RegionFilter::All,
                Some(r) => RegionFilter::Only(r.to_string()),
            },
            stamps: self.stamps.unwrap_or_default(),
            designations: self.designations.iter().cloned().collect::<BTreeSet<_>>(),
            search: self.search.clone().unwrap_or_default(),
            require_established: self.require_established.unwrap_or(false),
        }
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort.unwrap_or_default()
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year.unwrap_or_else(current_year)
    }

    pub fn window_size(&self) -> u32 {
        self.window_size.unwrap_or(RECENT_WINDOW_YEARS)
    }

    pub fn track_metrics(&self) -> TrackMetrics {
        let defaults = TrackMetrics::default();
        TrackMetrics {
            track_width_px: self.track_width_px.unwrap_or(defaults.track_width_px),
            inline_label_min_px: self
                .inline_label_min_px
                .unwrap_or(defaults.inline_label_min_px),
            ..defaults
        }
    }
}

/// Reject "recent" windows outside `1..=MAX_WINDOW_YEARS`
pub fn check_window_size(window_size: u32) -> Result<u32> {
    if window_size == 0 || window_size > MAX_WINDOW_YEARS {
        bail!(
            "window_size must be between 1 and {}, got {}",
            MAX_WINDOW_YEARS,
            window_size
        );
    }
    Ok(window_size)
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}
