//! Geometry model consumed and produced by the codecs.

mod convert;
mod factory;
mod geometry;
mod precision;
mod sequence;

pub use factory::{GeometryError, GeometryFactory};
pub use geometry::{
    Geometry, GeometryCollection, GeometryType, LineString, LinearRing, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon,
};
pub use precision::PrecisionModel;
pub use sequence::{Coordinate, CoordinateSequence};
