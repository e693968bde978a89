//! Interval timeline layout: bar positions, axis ticks and label placement

use serde::Serialize;

use crate::sort::sort_by_abolished_desc;
use crate::types::SiteRecord;
use crate::{INLINE_LABEL_MIN_PX, MIN_BAR_WIDTH_PX, TRACK_WIDTH_PX};

/// Pixel assumptions of the track the bars are drawn on
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackMetrics {
    pub track_width_px: f64,
    /// A bar must be wider than this to carry its label inside
    pub inline_label_min_px: f64,
    pub min_bar_width_px: f64,
}

impl Default for TrackMetrics {
    fn default() -> Self {
        Self {
            track_width_px: TRACK_WIDTH_PX,
            inline_label_min_px: INLINE_LABEL_MIN_PX,
            min_bar_width_px: MIN_BAR_WIDTH_PX,
        }
    }
}

/// `[min_year, max_year]` used to normalize positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Domain {
    pub min_year: i32,
    pub max_year: i32,
}

impl Domain {
    pub fn new(min_year: i32, max_year: i32) -> Self {
        Self { min_year, max_year }
    }

    /// Earliest valid start and latest valid end across `sites`
    pub fn from_intervals<'a, I>(sites: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a SiteRecord>,
    {
        let mut min_year: Option<i32> = None;
        let mut max_year: Option<i32> = None;
        for site in sites {
            if let Some(start) = site.established_year() {
                min_year = Some(min_year.map_or(start, |m| m.min(start)));
            }
            if let Some(end) = site.abolished_year() {
                max_year = Some(max_year.map_or(end, |m| m.max(end)));
            }
        }
        Some(Self::new(min_year?, max_year?))
    }

    pub fn span(&self) -> i64 {
        i64::from(self.max_year) - i64::from(self.min_year)
    }

    /// A domain with no positive span cannot be normalized against
    pub fn is_degenerate(&self) -> bool {
        self.span() <= 0
    }

    /// Position of `year` as a fraction of the span; 0 for a degenerate domain
    pub fn fraction(&self, year: i32) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        (i64::from(year) - i64::from(self.min_year)) as f64 / self.span() as f64
    }

    /// Length of `years` as a fraction of the span; 0 for a degenerate domain
    pub fn length_fraction(&self, years: i64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        years as f64 / self.span() as f64
    }

    pub fn axis_step(&self) -> i32 {
        if self.span() > 100 {
            20
        } else {
            10
        }
    }

    /// Ticks at every multiple of the axis step from `min_year` up to `max_year`
    ///
    /// A degenerate domain gets a single tick at `min_year`.
    pub fn axis_ticks(&self) -> Vec<AxisTick> {
        if self.is_degenerate() {
            return vec![AxisTick {
                year: self.min_year,
                position: 0.0,
            }];
        }

        let step = i64::from(self.axis_step());
        let min = i64::from(self.min_year);
        let rem = min.rem_euclid(step);
        let first = if rem == 0 { min } else { min + step - rem };

        let mut ticks = Vec::new();
        let mut year = first;
        while year <= i64::from(self.max_year) {
            // first..=max_year stays within i32
            let y = year as i32;
            ticks.push(AxisTick {
                year: y,
                position: self.fraction(y),
            });
            year += step;
        }
        ticks
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisTick {
    pub year: i32,
    /// Fraction of the track, 0..=1
    pub position: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPlacement {
    /// Label drawn inside the bar
    Inside,
    /// Bar too narrow; label drawn as adjacent text
    Outside,
}

/// One positioned interval
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineBar<'a> {
    pub site: &'a SiteRecord,
    pub start: i32,
    pub end: i32,
    pub left: f64,
    pub width: f64,
    /// Zero-width bar; draw it at the minimum bar width
    pub is_point: bool,
    pub label: String,
    pub placement: LabelPlacement,
}

impl TimelineBar<'_> {
    /// Estimated drawn width, before the minimum bar width is applied
    pub fn estimated_px(&self, metrics: &TrackMetrics) -> f64 {
        self.width * metrics.track_width_px
    }

    pub fn display_px(&self, metrics: &TrackMetrics) -> f64 {
        self.estimated_px(metrics).max(metrics.min_bar_width_px)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineLayout<'a> {
    pub domain: Domain,
    pub axis_step: i32,
    pub ticks: Vec<AxisTick>,
    pub metrics: TrackMetrics,
    pub bars: Vec<TimelineBar<'a>>,
    /// Intervals that end before they start
    pub rejected: Vec<&'a SiteRecord>,
}

/// Position one interval within `domain`
pub fn layout_bar<'a>(
    site: &'a SiteRecord,
    start: i32,
    end: i32,
    domain: &Domain,
    metrics: &TrackMetrics,
) -> TimelineBar<'a> {
    let left = domain.fraction(start);
    let width = domain.length_fraction(i64::from(end) - i64::from(start));
    let placement = if width * metrics.track_width_px > metrics.inline_label_min_px {
        LabelPlacement::Inside
    } else {
        LabelPlacement::Outside
    };
    TimelineBar {
        site,
        start,
        end,
        left,
        width,
        is_point: width == 0.0,
        label: format!("{}–{}", start, end),
        placement,
    }
}

/// Lay out `shown` against the domain of the full `reference` dataset
///
/// Bars are ordered by abolished year, newest first. Records missing either
/// year are skipped; records ending before they start go to `rejected`.
/// Returns `None` when `reference` has no usable start and end years.
pub fn layout_timeline<'a>(
    reference: &[SiteRecord],
    shown: &[&'a SiteRecord],
    metrics: &TrackMetrics,
) -> Option<TimelineLayout<'a>> {
    let domain = Domain::from_intervals(reference)?;
    if domain.is_degenerate() {
        log::warn!(
            "timeline domain {}..{} has no span, drawing point bars",
            domain.min_year,
            domain.max_year
        );
    }

    let mut bars = Vec::new();
    let mut rejected = Vec::new();
    for site in sort_by_abolished_desc(shown) {
        let (start, end) = match (site.established_year(), site.abolished_year()) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                log::debug!("'{}' lacks an established or abolished year", site.name_str());
                continue;
            }
        };
        if end < start {
            log::warn!(
                "'{}' is abolished ({}) before it was established ({})",
                site.name_str(),
                end,
                start
            );
            rejected.push(site);
            continue;
        }
        bars.push(layout_bar(site, start, end, &domain, metrics));
    }

    Some(TimelineLayout {
        domain,
        axis_step: domain.axis_step(),
        ticks: domain.axis_ticks(),
        metrics: *metrics,
        bars,
        rejected,
    })
}
