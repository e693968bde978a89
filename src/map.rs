//! Map markers for sites with a parsable location

use serde::Serialize;

use crate::types::{Coordinates, SiteRecord};
use crate::DEFAULT_MAP_CENTER;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker<'a> {
    pub site: &'a SiteRecord,
    pub coords: Coordinates,
}

/// Records with parsable coordinates, in input order
///
/// Out-of-range coordinates are kept as-is and only logged.
pub fn map_markers<'a, I>(sites: I) -> Vec<MapMarker<'a>>
where
    I: IntoIterator<Item = &'a SiteRecord>,
{
    sites
        .into_iter()
        .filter_map(|site| {
            let coords = site.coordinates()?;
            if !coords.in_range() {
                log::warn!(
                    "'{}' has out-of-range coordinates {}, {}",
                    site.name_str(),
                    coords.lat,
                    coords.lng
                );
            }
            Some(MapMarker { site, coords })
        })
        .collect()
}

/// First marker's position, or the continental US center
pub fn map_center(markers: &[MapMarker]) -> Coordinates {
    markers.first().map(|m| m.coords).unwrap_or(Coordinates {
        lat: DEFAULT_MAP_CENTER.0,
        lng: DEFAULT_MAP_CENTER.1,
    })
}
