//! Editing model for the single GeoJSON feature attached to a project
//! location: coordinate parsing, a codec between GeoJSON and an open vertex
//! list, structural invariants, viewport fitting and an edit session the map
//! UI drives.

pub mod codec;
pub mod coordinate;
pub mod error;
pub mod geojson;
pub mod geometry;
pub mod import;
pub mod invariant;
pub mod session;
pub mod viewport;

#[cfg(test)]
mod test_helpers;

pub use self::coordinate::Coordinate;
pub use self::error::{Error, InvariantError, ParseError, ParseErrorReason, Result};
pub use self::geometry::{GeoFeature, Geometry, GeometryKind};
pub use self::session::VertexEditSession;
pub use self::viewport::{FitOptions, Viewport};
