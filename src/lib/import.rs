//! Manual entry for the bulk import tool. Entries go through the same parser
//! and invariants as the editor, so both produce identical GeoJSON.

use super::coordinate::{self, Coordinate};
use super::error::{Error, ParseError, ParseErrorReason, Result};
use super::geometry::{GeoFeature, Geometry, GeometryKind};
use super::invariant;
use log::debug;

/// Kind used for multi-line entries when the caller does not choose one.
pub const DEFAULT_MULTILINE_KIND: GeometryKind = GeometryKind::LineString;

fn parse_value(text: &str) -> Result<f64> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| ParseError::new(text, ParseErrorReason::NotANumber))?;
    Ok(value)
}

/// A point typed into separate latitude and longitude fields.
pub fn from_point_text(name: &str, lat_text: &str, lng_text: &str) -> Result<GeoFeature> {
    let lat = parse_value(lat_text)?;
    let lng = parse_value(lng_text)?;
    let input = format!("{}, {}", lng_text.trim(), lat_text.trim());
    let position =
        Coordinate::new(lat, lng).map_err(|reason| Error::from(ParseError::new(&input, reason)))?;
    Ok(GeoFeature::with_default_name(name, Geometry::Point { position }))
}

/// One `"<lng>, <lat>"` pair per line, validated for `kind`.
pub fn from_multiline(name: &str, kind: GeometryKind, text: &str) -> Result<GeoFeature> {
    let mut vertices = coordinate::parse_multiline(text)?;
    if kind == GeometryKind::Polygon {
        vertices = invariant::strip_closing(&vertices).to_vec();
    }
    invariant::validate(kind, &vertices)?;
    debug!("imported {} with {} vertices", kind, vertices.len());
    Geometry::from_vertices(kind, vertices)
        .map(|geometry| GeoFeature::with_default_name(name, geometry))
        .ok_or_else(|| Error::InvalidGeometry("no coordinates given".to_string()))
}

/// Coordinates that were already extracted from an uploaded sheet.
pub fn from_coordinates(name: &str, kind: GeometryKind, vertices: &[Coordinate]) -> Result<GeoFeature> {
    let vertices = match kind {
        GeometryKind::Polygon => invariant::strip_closing(vertices).to_vec(),
        _ => vertices.to_vec(),
    };
    invariant::validate(kind, &vertices)?;
    Geometry::from_vertices(kind, vertices)
        .map(|geometry| GeoFeature::with_default_name(name, geometry))
        .ok_or_else(|| Error::InvalidGeometry("no coordinates given".to_string()))
}
