#![doc = "Geocodec public API: WKB/EWKB and WKT geometry reading and writing"]
mod error;
mod geom;
pub mod io;
mod types;

#[doc(inline)]
pub use error::{ConfigError, ParseError, ParseResult};

#[doc(inline)]
pub use geom::{
    Coordinate, CoordinateSequence, Geometry, GeometryCollection, GeometryError, GeometryFactory,
    GeometryType, LineString, LinearRing, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
    PrecisionModel,
};

#[doc(inline)]
pub use types::{ByteOrder, Ordinates};

#[doc(inline)]
pub use io::OrdinateFormat;

#[doc(inline)]
pub use io::wkb::{
    WkbHexFileReader, WkbReader, WkbReaderConfig, WkbReaderConfigBuilder, WkbWriter,
    WkbWriterConfig, WkbWriterConfigBuilder,
};

#[doc(inline)]
pub use io::wkt::{
    to_line_string_text, to_point_text, WktFileReader, WktGeometries, WktReader, WktReaderConfig,
    WktReaderConfigBuilder, WktWriter, WktWriterConfig, WktWriterConfigBuilder,
};
