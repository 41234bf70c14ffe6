use super::codec;
use super::coordinate::{format_multiline, parse_multiline, Coordinate};
use super::error::{Error, InvariantError, Result};
use super::geojson::Feature;
use super::geometry::{GeoFeature, Geometry, GeometryKind};
use super::invariant;
use super::viewport::{self, FitOptions, Viewport};
use log::debug;

/// Editing state of one open location editor. All operations either apply
/// completely or leave the session untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexEditSession {
    kind: GeometryKind,
    vertices: Vec<Coordinate>,
    selected: Option<usize>,
    dirty: bool,
}

impl Default for VertexEditSession {
    fn default() -> Self {
        VertexEditSession::new(GeometryKind::Point)
    }
}

impl VertexEditSession {
    pub fn new(kind: GeometryKind) -> Self {
        VertexEditSession {
            kind,
            vertices: vec![],
            selected: None,
            dirty: false,
        }
    }

    pub fn from_geo_feature(feature: &GeoFeature) -> Self {
        let mut session = VertexEditSession::default();
        session.load_from_geo_feature(feature);
        session
    }

    pub fn geometry_kind(&self) -> GeometryKind {
        self.kind
    }

    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.vertices.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.vertices.len(),
            });
        }
        Ok(())
    }

    /// Switching kinds discards the current vertices.
    pub fn set_geometry_kind(&mut self, kind: GeometryKind) {
        self.kind = kind;
        self.vertices.clear();
        self.selected = None;
        self.dirty = true;
    }

    /// Appends a vertex. A `Point` holds at most one vertex, so for points
    /// the existing vertex is replaced. Clicking the first vertex of a
    /// polygon closes the ring and adds nothing.
    pub fn add_vertex(&mut self, coordinate: Coordinate) {
        match self.kind {
            GeometryKind::Point => {
                self.vertices.clear();
                self.selected = None;
            }
            GeometryKind::Polygon => {
                if let Some(first) = self.vertices.first() {
                    if first.approx_eq(&coordinate) {
                        debug!("polygon ring closed at the first vertex");
                        return;
                    }
                }
            }
            _ => {}
        }
        self.vertices.push(coordinate);
        self.dirty = true;
    }

    pub fn move_vertex(&mut self, index: usize, coordinate: Coordinate) -> Result<()> {
        self.check_index(index)?;
        self.vertices[index] = coordinate;
        self.dirty = true;
        Ok(())
    }

    pub fn select_vertex(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.selected = Some(index);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Removes the vertex at `index` unless that would leave fewer vertices
    /// than the geometry kind needs.
    pub fn remove_vertex(&mut self, index: usize) -> Result<Coordinate> {
        self.check_index(index)?;
        invariant::validate_removal(self.kind, &self.vertices, index)?;
        let removed = self.vertices.remove(index);
        self.selected = match self.selected {
            Some(selected) if selected == index => None,
            Some(selected) if selected > index => Some(selected - 1),
            other => other,
        };
        self.dirty = true;
        Ok(removed)
    }

    /// Drops every vertex, keeping the geometry kind.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.selected = None;
        self.dirty = true;
    }

    pub fn validate(&self) -> std::result::Result<(), InvariantError> {
        invariant::validate(self.kind, &self.vertices)
    }

    /// Wraps the current vertices into a feature. Polygon rings stay open
    /// here; [`codec::encode`] closes them.
    pub fn to_geo_feature(&self, name: &str) -> std::result::Result<GeoFeature, InvariantError> {
        self.validate()?;
        let vertices = match self.kind {
            GeometryKind::Polygon => invariant::strip_closing(&self.vertices).to_vec(),
            _ => self.vertices.clone(),
        };
        let geometry = Geometry::from_vertices(self.kind, vertices).ok_or(
            InvariantError::MinimumVertexCount {
                kind: self.kind,
                required: 1,
                actual: 0,
            },
        )?;
        Ok(GeoFeature::with_default_name(name, geometry))
    }

    /// Replaces the whole session state with `feature`.
    pub fn load_from_geo_feature(&mut self, feature: &GeoFeature) {
        self.kind = feature.geometry.kind();
        self.vertices = feature.geometry.vertices().to_vec();
        self.selected = None;
        self.dirty = false;
        debug!("loaded {} with {} vertices", self.kind, self.vertices.len());
    }

    /// Decodes a GeoJSON feature into the session. On failure the session is
    /// left as it was.
    pub fn load_from_feature(&mut self, feature: &Feature) -> Result<()> {
        let feature = codec::decode(feature)?;
        self.load_from_geo_feature(&feature);
        Ok(())
    }

    pub fn load_from_geojson(&mut self, text: &str) -> Result<()> {
        let feature = codec::from_geojson_string(text)?;
        self.load_from_geo_feature(&feature);
        Ok(())
    }

    /// Validates and serializes the session for the persistence layer.
    pub fn to_geojson(&self, name: &str) -> Result<String> {
        let feature = self.to_geo_feature(name)?;
        codec::to_geojson_string(&feature)
    }

    pub fn vertex_markers(&self) -> &[Coordinate] {
        &self.vertices
    }

    /// Path drawn by the map: closed for polygons, open for lines, empty for
    /// point kinds.
    pub fn render_path(&self) -> Vec<Coordinate> {
        match self.kind {
            GeometryKind::Point | GeometryKind::MultiPoint => vec![],
            GeometryKind::LineString => self.vertices.clone(),
            GeometryKind::Polygon => {
                let mut path = invariant::strip_closing(&self.vertices).to_vec();
                if let Some(&first) = path.first() {
                    path.push(first);
                }
                path
            }
        }
    }

    pub fn viewport(&self, options: &FitOptions) -> Option<Viewport> {
        viewport::fit_with(&self.vertices, options)
    }

    pub fn vertices_text(&self) -> String {
        format_multiline(&self.vertices)
    }

    /// Replaces every vertex at once, keeping the geometry kind. A polygon
    /// ring given closed is stored open.
    pub fn set_vertices(&mut self, mut vertices: Vec<Coordinate>) -> Result<()> {
        if self.kind == GeometryKind::Point && vertices.len() > 1 {
            return Err(InvariantError::TooManyVertices {
                kind: self.kind,
                actual: vertices.len(),
            }
            .into());
        }
        if self.kind == GeometryKind::Polygon {
            vertices = invariant::strip_closing(&vertices).to_vec();
        }
        self.vertices = vertices;
        self.selected = None;
        self.dirty = true;
        Ok(())
    }

    /// Replaces the vertices from `"<lng>, <lat>"` lines.
    pub fn set_vertices_text(&mut self, text: &str) -> Result<()> {
        let vertices = parse_multiline(text)?;
        self.set_vertices(vertices)
    }
}
