use super::coordinate::Coordinate;
use geo_types::{Coord, LineString, MultiPoint, Point, Polygon};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    Polygon,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 4] = [
        GeometryKind::Point,
        GeometryKind::MultiPoint,
        GeometryKind::LineString,
        GeometryKind::Polygon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
        }
    }

    /// Label stored with a feature whose name was left empty.
    pub fn default_name(&self) -> &'static str {
        match self {
            GeometryKind::Point => "Project Location",
            GeometryKind::MultiPoint => "Project Points",
            GeometryKind::LineString => "Project Route",
            GeometryKind::Polygon => "Project Area",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GeometryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeometryKind::ALL
            .iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown geometry kind `{}`", s))
    }
}

/// The editing model of a single geometry. Polygon rings are kept open:
/// the closing vertex only exists in the encoded GeoJSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point { position: Coordinate },
    MultiPoint { points: Vec<Coordinate> },
    LineString { points: Vec<Coordinate> },
    Polygon { ring: Vec<Coordinate> },
}

impl Geometry {
    /// Wraps a vertex list into the variant for `kind`. No validation happens
    /// here; `None` is only returned for a `Point` without a vertex.
    pub fn from_vertices(kind: GeometryKind, vertices: Vec<Coordinate>) -> Option<Self> {
        let geometry = match kind {
            GeometryKind::Point => Geometry::Point {
                position: *vertices.first()?,
            },
            GeometryKind::MultiPoint => Geometry::MultiPoint { points: vertices },
            GeometryKind::LineString => Geometry::LineString { points: vertices },
            GeometryKind::Polygon => Geometry::Polygon { ring: vertices },
        };
        Some(geometry)
    }

    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point { .. } => GeometryKind::Point,
            Geometry::MultiPoint { .. } => GeometryKind::MultiPoint,
            Geometry::LineString { .. } => GeometryKind::LineString,
            Geometry::Polygon { .. } => GeometryKind::Polygon,
        }
    }

    pub fn vertices(&self) -> &[Coordinate] {
        match self {
            Geometry::Point { position } => std::slice::from_ref(position),
            Geometry::MultiPoint { points } => points,
            Geometry::LineString { points } => points,
            Geometry::Polygon { ring } => ring,
        }
    }
}

impl From<&Geometry> for geo_types::Geometry<f64> {
    fn from(geometry: &Geometry) -> Self {
        match geometry {
            Geometry::Point { position } => geo_types::Geometry::Point((*position).into()),
            Geometry::MultiPoint { points } => {
                let points: Vec<Point<f64>> = points.iter().map(|&c| c.into()).collect();
                geo_types::Geometry::MultiPoint(MultiPoint::from(points))
            }
            Geometry::LineString { points } => {
                let line_string: LineString<f64> = points.iter().map(|&c| Coord::from(c)).collect();
                geo_types::Geometry::LineString(line_string)
            }
            Geometry::Polygon { ring } => {
                // Polygon::new closes the exterior on its own
                let exterior: LineString<f64> = ring.iter().map(|&c| Coord::from(c)).collect();
                geo_types::Geometry::Polygon(Polygon::new(exterior, vec![]))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeoFeature {
    pub name: String,
    pub geometry: Geometry,
}

impl GeoFeature {
    pub fn new(name: impl Into<String>, geometry: Geometry) -> Self {
        GeoFeature {
            name: name.into(),
            geometry,
        }
    }

    /// Like [`GeoFeature::new`], but a blank name is replaced by the kind's
    /// default label. Used where a feature is first built from user input.
    pub fn with_default_name(name: &str, geometry: Geometry) -> Self {
        let name = if name.trim().is_empty() {
            geometry.kind().default_name().to_string()
        } else {
            name.to_string()
        };
        GeoFeature { name, geometry }
    }

    /// The stored name, or the kind's default label when it is blank.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.geometry.kind().default_name()
        } else {
            &self.name
        }
    }
}
