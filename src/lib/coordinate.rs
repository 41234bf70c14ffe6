use super::error::{ParseError, ParseErrorReason};
use geo_types::{Coord, Point};
use serde::Serialize;
use std::str::FromStr;

/// Tolerance used when two vertices are compared for equality, e.g. when
/// checking whether a ring is closed.
pub const COORD_EPSILON: f64 = 1e-9;

/// Decimal places used when vertices are written back to editable text.
pub const TEXT_PRECISION: usize = 6;

/// A WGS84 position. Values outside the valid latitude/longitude ranges
/// are rejected at construction, so every `Coordinate` in circulation is
/// valid.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Result<Self, ParseErrorReason> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(ParseErrorReason::NotANumber);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ParseErrorReason::LatitudeOutOfRange);
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(ParseErrorReason::LongitudeOutOfRange);
        }
        Ok(Coordinate { lat, lng })
    }

    /// Builds a coordinate from a GeoJSON position (`[lng, lat, ...]`).
    pub fn from_position(position: &[f64]) -> Result<Self, ParseErrorReason> {
        match position {
            [lng, lat, ..] => Coordinate::new(*lat, *lng),
            _ => Err(ParseErrorReason::TokenCount),
        }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn to_position(&self) -> Vec<f64> {
        vec![self.lng, self.lat]
    }

    pub fn approx_eq(&self, other: &Coordinate) -> bool {
        (self.lat - other.lat).abs() <= COORD_EPSILON && (self.lng - other.lng).abs() <= COORD_EPSILON
    }

    // Only for values derived from already valid coordinates (midpoints).
    pub(crate) fn from_valid(lat: f64, lng: f64) -> Self {
        Coordinate { lat, lng }
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(coordinate: Coordinate) -> Self {
        Coord {
            x: coordinate.lng,
            y: coordinate.lat,
        }
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(coordinate: Coordinate) -> Self {
        Point::new(coordinate.lng, coordinate.lat)
    }
}

impl FromStr for Coordinate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

fn parse_token(token: &str, input: &str) -> Result<f64, ParseError> {
    let value: f64 = token
        .trim()
        .parse()
        .map_err(|_| ParseError::new(input, ParseErrorReason::NotANumber))?;
    if !value.is_finite() {
        return Err(ParseError::new(input, ParseErrorReason::NotANumber));
    }
    Ok(value)
}

/// Parse a `"<lng>, <lat>"` pair, longitude first as in GeoJSON.
///
/// # Example
///
/// ```
/// use geofeature_editor::coordinate::parse;
///
/// let coordinate = parse(" 36.8172, -1.2864 ").unwrap();
/// assert_eq!(coordinate.lat(), -1.2864);
/// assert_eq!(coordinate.lng(), 36.8172);
/// ```
pub fn parse(text: &str) -> Result<Coordinate, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::new(text, ParseErrorReason::EmptyInput));
    }
    let tokens: Vec<&str> = trimmed.split(',').collect();
    if tokens.len() != 2 {
        return Err(ParseError::new(text, ParseErrorReason::TokenCount));
    }
    let lng = parse_token(tokens[0], text)?;
    let lat = parse_token(tokens[1], text)?;
    Coordinate::new(lat, lng).map_err(|reason| ParseError::new(text, reason))
}

/// Parse one `"<lng>, <lat>"` pair per line, skipping blank lines. The first
/// bad line fails the whole block.
pub fn parse_multiline(text: &str) -> Result<Vec<Coordinate>, ParseError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse(line).map_err(|err| err.at_line(idx + 1)))
        .collect()
}

pub fn format_coordinate(coordinate: &Coordinate) -> String {
    format!(
        "{:.prec$}, {:.prec$}",
        coordinate.lng,
        coordinate.lat,
        prec = TEXT_PRECISION
    )
}

pub fn format_multiline(coordinates: &[Coordinate]) -> String {
    coordinates
        .iter()
        .map(format_coordinate)
        .collect::<Vec<_>>()
        .join("\n")
}
