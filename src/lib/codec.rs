use super::coordinate::Coordinate;
use super::error::{Error, Result};
use super::geojson::{self, geometry_type_name, Entity, Feature, Position, Properties};
use super::geometry::{GeoFeature, Geometry, GeometryKind};
use super::invariant;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::{to_string, Value};

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidGeometry(message.into())
}

fn read_position(position: &[f64]) -> Result<Coordinate> {
    Coordinate::from_position(position)
        .map_err(|reason| invalid(format!("position {:?}: {}", position, reason)))
}

fn read_positions(positions: &[Position]) -> Result<Vec<Coordinate>> {
    positions.iter().map(|p| read_position(p)).collect()
}

fn write_positions(coordinates: &[Coordinate]) -> Vec<Position> {
    coordinates.iter().map(Coordinate::to_position).collect()
}

fn read_ring(rings: &[Vec<Position>]) -> Result<Vec<Coordinate>> {
    let outer = rings
        .first()
        .ok_or_else(|| invalid("Polygon has no rings"))?;
    if rings.len() > 1 {
        warn!("ignoring {} interior ring(s) of polygon", rings.len() - 1);
    }
    let ring = read_positions(outer)?;
    let open = invariant::strip_closing(&ring);
    match ring.len() - open.len() {
        0 => warn!("polygon ring with {} positions was not closed", ring.len()),
        1 => debug!("dropped closing position of polygon ring"),
        dropped => warn!("dropped {} repeated closing positions of polygon ring", dropped),
    }
    let ring = open.to_vec();
    invariant::validate(GeometryKind::Polygon, &ring).map_err(|err| invalid(err.to_string()))?;
    Ok(ring)
}

fn decode_geometry(geometry: &geojson::Geometry) -> Result<Geometry> {
    let geometry = match geometry {
        geojson::Geometry::Point { coordinates } => Geometry::Point {
            position: read_position(coordinates)?,
        },
        geojson::Geometry::MultiPoint { coordinates } => {
            let points = read_positions(coordinates)?;
            if points.is_empty() {
                return Err(invalid("MultiPoint needs at least 1 position"));
            }
            Geometry::MultiPoint { points }
        }
        geojson::Geometry::LineString { coordinates } => {
            let points = read_positions(coordinates)?;
            if points.len() < 2 {
                return Err(invalid(format!(
                    "LineString needs at least 2 positions, got {}",
                    points.len()
                )));
            }
            Geometry::LineString { points }
        }
        geojson::Geometry::Polygon { coordinates } => Geometry::Polygon {
            ring: read_ring(coordinates)?,
        },
        geojson::Geometry::Unsupported => {
            return Err(Error::UnsupportedGeometry("unknown".to_string()))
        }
    };
    Ok(geometry)
}

/// Turns a GeoJSON feature into the editing model. Polygon rings lose their
/// closing position; only the outer ring is kept.
pub fn decode(feature: &Feature) -> Result<GeoFeature> {
    let geometry = feature
        .geometry
        .as_ref()
        .ok_or_else(|| invalid("feature has no geometry"))?;
    let geometry = decode_geometry(geometry)?;
    let name = feature.name().unwrap_or_default().to_string();
    debug!(
        "decoded {} with {} vertices",
        geometry.kind(),
        geometry.vertices().len()
    );
    Ok(GeoFeature { name, geometry })
}

/// Inverse of [`decode`]. The geometry is validated first and polygon rings
/// are always written closed, whether or not the input ring was.
pub fn encode(feature: &GeoFeature) -> Result<Feature> {
    let geometry = &feature.geometry;
    invariant::validate(geometry.kind(), geometry.vertices())?;

    let geometry = match geometry {
        Geometry::Point { position } => geojson::Geometry::Point {
            coordinates: position.to_position(),
        },
        Geometry::MultiPoint { points } => geojson::Geometry::MultiPoint {
            coordinates: write_positions(points),
        },
        Geometry::LineString { points } => geojson::Geometry::LineString {
            coordinates: write_positions(points),
        },
        Geometry::Polygon { ring } => {
            let open = invariant::strip_closing(ring);
            let mut closed = write_positions(open);
            if let Some(first) = open.first() {
                closed.push(first.to_position());
            }
            geojson::Geometry::Polygon {
                coordinates: vec![closed],
            }
        }
    };

    let mut properties = Properties::new();
    properties.insert("name".to_string(), Value::String(feature.name.clone()));
    Ok(Feature {
        properties: Some(properties),
        geometry: Some(geometry),
    })
}

/// Decodes a bare feature or the first feature of a collection.
pub fn decode_entity(entity: &Entity) -> Result<GeoFeature> {
    match entity {
        Entity::Feature(feature) => decode(feature),
        Entity::FeatureCollection { features } => {
            if features.len() > 1 {
                warn!("ignoring {} extra feature(s)", features.len() - 1);
            }
            match features.first() {
                Some(Entity::Feature(feature)) => decode(feature),
                Some(Entity::FeatureCollection { .. }) => Err(invalid("nested feature collection")),
                None => Err(invalid("empty feature collection")),
            }
        }
    }
}

/// Serializes `feature` as a `FeatureCollection` holding exactly one feature,
/// the shape stored by the persistence layer.
pub fn to_geojson_string(feature: &GeoFeature) -> Result<String> {
    let collection = Entity::FeatureCollection {
        features: vec![Entity::Feature(encode(feature)?)],
    };
    Ok(to_string(&collection)?)
}

pub fn from_geojson_string(text: &str) -> Result<GeoFeature> {
    let document: Value = serde_json::from_str(text)?;
    // valid JSON that is not shaped like a feature
    let entity = Entity::deserialize(&document).map_err(|err| invalid(err.to_string()))?;
    decode_entity(&entity).map_err(|err| match err {
        Error::UnsupportedGeometry(_) => {
            let name = geometry_type_name(&document).unwrap_or("unknown");
            Error::UnsupportedGeometry(name.to_string())
        }
        err => err,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvariantError;
    use crate::geojson;
    use crate::test_helpers::{coord, coords};
    use serde_json::json;

    fn feature_from(value: Value) -> Feature {
        match serde_json::from_value::<Entity>(value).unwrap() {
            Entity::Feature(feature) => feature,
            _ => panic!("expected a feature"),
        }
    }

    #[test]
    fn decode_point() {
        let feature = feature_from(json!({
            "type": "Feature",
            "properties": { "name": "Borehole" },
            "geometry": { "type": "Point", "coordinates": [36.8172, -1.2864] }
        }));
        let decoded = decode(&feature).unwrap();
        assert_eq!(decoded.name, "Borehole");
        assert_eq!(
            decoded.geometry,
            Geometry::Point {
                position: coord(-1.2864, 36.8172)
            }
        );
    }

    #[test]
    fn decode_without_name() {
        let feature = feature_from(json!({
            "type": "Feature",
            "geometry": { "type": "MultiPoint", "coordinates": [[1.0, 2.0]] }
        }));
        assert_eq!(decode(&feature).unwrap().name, "");
    }

    #[test]
    fn decode_short_line_string() {
        let feature = feature_from(json!({
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": [[1.0, 2.0]] }
        }));
        assert!(matches!(decode(&feature), Err(Error::InvalidGeometry(_))));
    }

    #[test]
    fn decode_empty_multi_point() {
        let feature = feature_from(json!({
            "type": "Feature",
            "geometry": { "type": "MultiPoint", "coordinates": [] }
        }));
        assert!(matches!(decode(&feature), Err(Error::InvalidGeometry(_))));
    }

    #[test]
    fn decode_out_of_range_position() {
        let feature = feature_from(json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [200.0, 0.0] }
        }));
        assert!(matches!(decode(&feature), Err(Error::InvalidGeometry(_))));
    }

    #[test]
    fn decode_polygon_drops_closing_position() {
        let feature = feature_from(json!({
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
            }
        }));
        let decoded = decode(&feature).unwrap();
        assert_eq!(
            decoded.geometry,
            Geometry::Polygon {
                ring: coords(&[(0., 0.), (0., 1.), (1., 1.), (1., 0.)])
            }
        );
    }

    #[test]
    fn decode_polygon_closing_within_epsilon() {
        let feature = feature_from(json!({
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [1e-12, 0.0]]]
            }
        }));
        assert_eq!(decode(&feature).unwrap().geometry.vertices().len(), 3);
    }

    #[test]
    fn decode_unclosed_polygon_is_accepted() {
        let feature = feature_from(json!({
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]]
            }
        }));
        assert_eq!(decode(&feature).unwrap().geometry.vertices().len(), 3);
    }

    #[test]
    fn decode_degenerate_polygon() {
        let feature = feature_from(json!({
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 0.0], [0.0, 0.0]]]
            }
        }));
        assert!(matches!(decode(&feature), Err(Error::InvalidGeometry(_))));
    }

    #[test]
    fn decode_polygon_without_rings() {
        let feature = feature_from(json!({
            "type": "Feature",
            "geometry": { "type": "Polygon", "coordinates": [] }
        }));
        assert!(matches!(decode(&feature), Err(Error::InvalidGeometry(_))));
    }

    #[test]
    fn decode_polygon_keeps_outer_ring_only() {
        let feature = feature_from(json!({
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [
                    [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]],
                    [[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 1.0]]
                ]
            }
        }));
        assert_eq!(decode(&feature).unwrap().geometry.vertices().len(), 4);
    }

    #[test]
    fn decode_unsupported_type() {
        let feature = feature_from(json!({
            "type": "Feature",
            "geometry": { "type": "MultiLineString", "coordinates": [] }
        }));
        assert!(matches!(decode(&feature), Err(Error::UnsupportedGeometry(_))));
    }

    #[test]
    fn decode_missing_geometry() {
        let feature = feature_from(json!({ "type": "Feature", "geometry": null }));
        assert!(matches!(decode(&feature), Err(Error::InvalidGeometry(_))));
    }

    #[test]
    fn encode_closes_polygon() {
        let ring = coords(&[(0., 0.), (0., 1.), (1., 1.), (1., 0.)]);
        let feature = GeoFeature::new("Plot", Geometry::Polygon { ring });
        let encoded = encode(&feature).unwrap();
        assert_eq!(
            encoded.geometry,
            Some(geojson::Geometry::Polygon {
                coordinates: vec![vec![
                    vec![0., 0.],
                    vec![1., 0.],
                    vec![1., 1.],
                    vec![0., 1.],
                    vec![0., 0.]
                ]]
            })
        );
    }

    #[test]
    fn encode_does_not_double_close() {
        let ring = coords(&[(0., 0.), (0., 1.), (1., 1.), (0., 0.)]);
        let feature = GeoFeature::new("Plot", Geometry::Polygon { ring });
        match encode(&feature).unwrap().geometry {
            Some(geojson::Geometry::Polygon { coordinates }) => {
                assert_eq!(coordinates[0].len(), 4);
                assert_eq!(coordinates[0][0], coordinates[0][3]);
            }
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn encode_rejects_short_line() {
        let feature = GeoFeature::new(
            "Route",
            Geometry::LineString {
                points: coords(&[(0., 0.)]),
            },
        );
        assert!(matches!(
            encode(&feature),
            Err(Error::Invariant(InvariantError::MinimumVertexCount { .. }))
        ));
    }

    #[test]
    fn round_trip_keeps_empty_name() {
        let features = vec![
            GeoFeature::new("", Geometry::Point { position: coord(1., 1.) }),
            GeoFeature::new("", Geometry::MultiPoint { points: coords(&[(0., 0.)]) }),
            GeoFeature::new("", Geometry::LineString { points: coords(&[(0., 0.), (1., 1.)]) }),
            GeoFeature::new("", Geometry::Polygon { ring: coords(&[(0., 0.), (0., 1.), (1., 1.)]) }),
        ];
        for feature in features {
            let encoded = encode(&feature).unwrap();
            assert_eq!(encoded.name(), Some(""));
            assert_eq!(decode(&encoded).unwrap(), feature);
        }
    }

    #[test]
    fn decode_polygon_with_repeated_closing_positions() {
        let feature = feature_from(json!({
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0], [0.0, 0.0]]]
            }
        }));
        assert_eq!(
            decode(&feature).unwrap().geometry,
            Geometry::Polygon {
                ring: coords(&[(0., 0.), (0., 1.), (1., 1.)])
            }
        );
    }

    #[test]
    fn round_trip_line_string() {
        let feature = GeoFeature::new(
            "Road",
            Geometry::LineString {
                points: coords(&[(-1.28, 36.81), (-1.29, 36.82), (-1.3, 36.85)]),
            },
        );
        assert_eq!(decode(&encode(&feature).unwrap()).unwrap(), feature);
    }

    #[test]
    fn string_round_trip_polygon() {
        let ring = coords(&[(0., 0.), (0., 1.), (1., 1.)]);
        let feature = GeoFeature::new("Plot", Geometry::Polygon { ring });
        let text = to_geojson_string(&feature).unwrap();
        assert!(text.starts_with(r#"{"type":"FeatureCollection""#));
        assert_eq!(from_geojson_string(&text).unwrap(), feature);
    }

    #[test]
    fn string_reports_unsupported_type_name() {
        let text = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{},"geometry":{"type":"MultiPolygon","coordinates":[]}}
        ]}"#;
        match from_geojson_string(text) {
            Err(Error::UnsupportedGeometry(name)) => assert_eq!(name, "MultiPolygon"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn string_empty_collection() {
        let text = r#"{"type":"FeatureCollection","features":[]}"#;
        assert!(matches!(
            from_geojson_string(text),
            Err(Error::InvalidGeometry(_))
        ));
    }

    #[test]
    fn string_malformed_json() {
        assert!(matches!(from_geojson_string("{"), Err(Error::Json(_))));
    }

    #[test]
    fn string_wrong_geometry_shape() {
        let text = r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[[36.8,-1.3]]}}"#;
        assert!(matches!(
            from_geojson_string(text),
            Err(Error::InvalidGeometry(_))
        ));
        let text = r#"{"type":"Topology","objects":{}}"#;
        assert!(matches!(
            from_geojson_string(text),
            Err(Error::InvalidGeometry(_))
        ));
    }

    #[test]
    fn string_bare_feature() {
        let text = r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[1.0,2.0]}}"#;
        assert_eq!(
            from_geojson_string(text).unwrap().geometry,
            Geometry::Point {
                position: coord(2., 1.)
            }
        );
    }
}
