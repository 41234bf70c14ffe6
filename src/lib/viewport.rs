use super::coordinate::Coordinate;
use geo::BoundingRect;
use geo_types::{MultiPoint, Point};
use log::debug;
use serde::Serialize;

/// Zoom used for a single point or nearly coincident points.
pub const DETAIL_ZOOM: u8 = 15;

/// Upper bound applied when framing all points of a feature.
pub const FIT_ALL_MAX_ZOOM: u8 = 16;

/// Overview zoom shown before any location is known.
pub const DEFAULT_ZOOM: u8 = 6;

const DEFAULT_CENTER: (f64, f64) = (-1.286389, 36.817223);

// (span in degrees, zoom), widest first. Spans not above any threshold get
// DETAIL_ZOOM.
const ZOOM_THRESHOLDS: [(f64, u8); 4] = [(5.0, 6), (1.0, 10), (0.1, 11), (0.05, 13)];

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Coordinate,
    pub zoom: u8,
}

impl Default for Viewport {
    fn default() -> Self {
        let (lat, lng) = DEFAULT_CENTER;
        Viewport {
            center: Coordinate::from_valid(lat, lng),
            zoom: DEFAULT_ZOOM,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FitOptions {
    pub cap_zoom: Option<u8>,
}

impl FitOptions {
    /// Options for a "fit all points" view, capped at [`FIT_ALL_MAX_ZOOM`].
    pub fn fit_all() -> Self {
        FitOptions {
            cap_zoom: Some(FIT_ALL_MAX_ZOOM),
        }
    }

    fn apply(&self, zoom: u8) -> u8 {
        match self.cap_zoom {
            Some(cap) => zoom.min(cap),
            None => zoom,
        }
    }
}

/// Levels of the administrative hierarchy a user can jump to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaLevel {
    Ward,
    Subcounty,
    County,
}

impl AreaLevel {
    pub fn zoom(&self) -> u8 {
        match self {
            AreaLevel::Ward => 15,
            AreaLevel::Subcounty => 13,
            AreaLevel::County => 11,
        }
    }
}

pub fn for_area(level: AreaLevel, center: Coordinate) -> Viewport {
    Viewport {
        center,
        zoom: level.zoom(),
    }
}

/// Frames the narrowest selected area: a ward wins over its subcounty, which
/// wins over its county.
pub fn for_most_specific_area(
    ward: Option<Coordinate>,
    subcounty: Option<Coordinate>,
    county: Option<Coordinate>,
) -> Option<Viewport> {
    ward.map(|center| for_area(AreaLevel::Ward, center))
        .or_else(|| subcounty.map(|center| for_area(AreaLevel::Subcounty, center)))
        .or_else(|| county.map(|center| for_area(AreaLevel::County, center)))
}

/// Zoom level for a bounding box whose larger side spans `span` degrees.
/// Non-increasing in `span`.
pub fn zoom_for_span(span: f64) -> u8 {
    if span == 0.0 {
        return DETAIL_ZOOM;
    }
    ZOOM_THRESHOLDS
        .iter()
        .find(|(threshold, _)| span > *threshold)
        .map(|(_, zoom)| *zoom)
        .unwrap_or(DETAIL_ZOOM)
}

/// Frames `points` with default options. `None` for an empty slice.
///
/// # Example
///
/// ```
/// use geofeature_editor::coordinate::Coordinate;
/// use geofeature_editor::viewport::fit;
///
/// let point = Coordinate::new(1., 1.).unwrap();
/// let viewport = fit(&[point]).unwrap();
/// assert_eq!(viewport.zoom, 15);
/// assert_eq!(viewport.center, point);
/// ```
pub fn fit(points: &[Coordinate]) -> Option<Viewport> {
    fit_with(points, &FitOptions::default())
}

pub fn fit_with(points: &[Coordinate], options: &FitOptions) -> Option<Viewport> {
    let multi_point: MultiPoint<f64> = points.iter().map(|&c| Point::from(c)).collect();
    let rect = multi_point.bounding_rect()?;
    let center = rect.center();
    let span = rect.width().max(rect.height());
    let zoom = options.apply(zoom_for_span(span));
    debug!(
        "fitted {} point(s): span {:.6}, zoom {}",
        points.len(),
        span,
        zoom
    );
    Some(Viewport {
        center: Coordinate::from_valid(center.y, center.x),
        zoom,
    })
}
