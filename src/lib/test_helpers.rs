use super::coordinate::Coordinate;

/// Builds coordinates from `(lat, lng)` pairs.
pub fn coords(pairs: &[(f64, f64)]) -> Vec<Coordinate> {
    pairs
        .iter()
        .map(|&(lat, lng)| Coordinate::new(lat, lng).unwrap())
        .collect()
}

pub fn coord(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng).unwrap()
}
