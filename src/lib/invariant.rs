use super::coordinate::Coordinate;
use super::error::InvariantError;
use super::geometry::GeometryKind;
use itertools::Itertools;

pub fn minimum_vertices(kind: GeometryKind) -> usize {
    match kind {
        GeometryKind::Point => 1,
        GeometryKind::MultiPoint => 1,
        GeometryKind::LineString => 2,
        GeometryKind::Polygon => 3,
    }
}

pub fn is_closed(vertices: &[Coordinate]) -> bool {
    match (vertices.first(), vertices.last()) {
        (Some(first), Some(last)) => vertices.len() > 1 && first.approx_eq(last),
        _ => false,
    }
}

/// The ring without its closing vertex, including any repeated copies of it.
pub fn strip_closing(vertices: &[Coordinate]) -> &[Coordinate] {
    let mut open = vertices;
    while is_closed(open) {
        open = &open[..open.len() - 1];
    }
    open
}

/// Collapses consecutive duplicates and drops a closing vertex.
pub fn distinct_vertices(vertices: &[Coordinate]) -> Vec<Coordinate> {
    let collapsed: Vec<Coordinate> = vertices
        .iter()
        .copied()
        .dedup_by(|a, b| a.approx_eq(b))
        .collect();
    strip_closing(&collapsed).to_vec()
}

pub fn validate(kind: GeometryKind, vertices: &[Coordinate]) -> Result<(), InvariantError> {
    let actual = match kind {
        GeometryKind::Polygon => distinct_vertices(vertices).len(),
        _ => vertices.len(),
    };
    let required = minimum_vertices(kind);
    if actual < required {
        return Err(InvariantError::MinimumVertexCount {
            kind,
            required,
            actual,
        });
    }
    if kind == GeometryKind::Point && actual > 1 {
        return Err(InvariantError::TooManyVertices { kind, actual });
    }
    Ok(())
}

/// Checks that `vertices` would still be valid for `kind` without the vertex
/// at `index`. The caller is responsible for the bounds check.
pub fn validate_removal(
    kind: GeometryKind,
    vertices: &[Coordinate],
    index: usize,
) -> Result<(), InvariantError> {
    let remaining: Vec<Coordinate> = vertices
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != index)
        .map(|(_, coordinate)| *coordinate)
        .collect();
    validate(kind, &remaining)
}
