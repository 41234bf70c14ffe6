use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A GeoJSON position, `[lng, lat]` with an optional trailing altitude.
pub type Position = Vec<f64>;

pub type Properties = Map<String, Value>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: Position,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    // MultiPolygon, GeometryCollection and friends
    #[serde(other)]
    Unsupported,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Feature {
    #[serde(default)]
    pub properties: Option<Properties>,
    pub geometry: Option<Geometry>,
}

impl Feature {
    pub fn name(&self) -> Option<&str> {
        self.properties.as_ref()?.get("name")?.as_str()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum Entity {
    Feature(Feature),
    FeatureCollection { features: Vec<Entity> },
}

/// The `type` member of the first geometry in a raw document, if any.
pub fn geometry_type_name(document: &Value) -> Option<&str> {
    let geometry = match document.get("features") {
        Some(features) => features.get(0)?.get("geometry")?,
        None => document.get("geometry")?,
    };
    geometry.get("type")?.as_str()
}
