use thiserror::Error;

use crate::geom::geometry::Header;
use crate::geom::{
    CoordinateSequence, Geometry, GeometryCollection, LineString, LinearRing, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon, PrecisionModel,
};
use crate::types::Ordinates;

/// Structural rule broken while materializing a geometry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("invalid number of points in LineString (found {0} - must be 0 or >= 2)")]
    LineStringTooShort(usize),
    #[error("invalid number of points in LinearRing (found {0} - must be 0 or >= 4)")]
    RingTooShort(usize),
    #[error("points of LinearRing do not form a closed linestring")]
    RingNotClosed,
    #[error("point must hold at most one coordinate (found {0})")]
    PointTooLong(usize),
    #[error("shell is empty but holes are not")]
    EmptyShellWithHoles,
}

/// Builds geometries sharing one precision model and SRID.
///
/// Readers never construct geometries directly; every parsed shape goes
/// through one of the `create_*` methods, which enforce structural validity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryFactory {
    precision_model: PrecisionModel,
    srid: i32,
}

impl Default for GeometryFactory {
    fn default() -> Self {
        Self::new(PrecisionModel::Floating, 0)
    }
}

impl GeometryFactory {
    pub fn new(precision_model: PrecisionModel, srid: i32) -> Self {
        Self { precision_model, srid }
    }

    #[inline] pub fn srid(&self) -> i32 { self.srid }

    #[inline] pub fn precision_model(&self) -> PrecisionModel { self.precision_model }

    /// Same factory, different SRID.
    #[inline]
    pub fn with_srid(&self, srid: i32) -> Self {
        Self { srid, ..*self }
    }

    #[inline]
    fn header(&self) -> Header {
        Header { srid: self.srid, precision_model: self.precision_model }
    }

    /// Allocate storage for `count` coordinates.
    #[inline]
    pub fn create_sequence(&self, count: usize, ordinates: Ordinates) -> CoordinateSequence {
        CoordinateSequence::with_capacity(count, ordinates)
    }

    pub fn create_point(&self, coords: CoordinateSequence) -> Result<Point, GeometryError> {
        if coords.len() > 1 {
            return Err(GeometryError::PointTooLong(coords.len()));
        }
        Ok(Point { header: self.header(), coords })
    }

    pub fn create_empty_point(&self, ordinates: Ordinates) -> Point {
        Point { header: self.header(), coords: CoordinateSequence::new(ordinates) }
    }

    pub fn create_line_string(&self, coords: CoordinateSequence) -> Result<LineString, GeometryError> {
        if coords.len() == 1 {
            return Err(GeometryError::LineStringTooShort(1));
        }
        Ok(LineString { header: self.header(), coords })
    }

    pub fn create_linear_ring(&self, coords: CoordinateSequence) -> Result<LinearRing, GeometryError> {
        if !coords.is_closed() {
            return Err(GeometryError::RingNotClosed);
        }
        if (1..4).contains(&coords.len()) {
            return Err(GeometryError::RingTooShort(coords.len()));
        }
        Ok(LinearRing { header: self.header(), coords })
    }

    /// Polygon from a shell and holes. `None` builds the empty polygon.
    /// An empty shell cannot carry holes.
    pub fn create_polygon(&self, exterior: Option<LinearRing>, interiors: Vec<LinearRing>) -> Result<Polygon, GeometryError> {
        let exterior = exterior.unwrap_or_else(|| LinearRing {
            header: self.header(),
            coords: CoordinateSequence::new(Ordinates::XY),
        });
        if exterior.is_empty() && interiors.iter().any(|ring| !ring.is_empty()) {
            return Err(GeometryError::EmptyShellWithHoles);
        }
        Ok(Polygon { header: self.header(), exterior, interiors })
    }

    pub fn create_multi_point(&self, points: Vec<Point>) -> MultiPoint {
        MultiPoint { header: self.header(), geometries: points }
    }

    pub fn create_multi_line_string(&self, lines: Vec<LineString>) -> MultiLineString {
        MultiLineString { header: self.header(), geometries: lines }
    }

    pub fn create_multi_polygon(&self, polygons: Vec<Polygon>) -> MultiPolygon {
        MultiPolygon { header: self.header(), geometries: polygons }
    }

    pub fn create_geometry_collection(&self, geometries: Vec<Geometry>) -> GeometryCollection {
        GeometryCollection { header: self.header(), geometries }
    }
}
