use std::fmt;

use crate::geom::{Coordinate, CoordinateSequence, PrecisionModel};
use crate::types::Ordinates;

/// Kind of a geometry, used for WKB type codes and WKT keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    /// Upper-case WKT keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            GeometryType::Point => "POINT",
            GeometryType::LineString => "LINESTRING",
            GeometryType::LinearRing => "LINEARRING",
            GeometryType::Polygon => "POLYGON",
            GeometryType::MultiPoint => "MULTIPOINT",
            GeometryType::MultiLineString => "MULTILINESTRING",
            GeometryType::MultiPolygon => "MULTIPOLYGON",
            GeometryType::GeometryCollection => "GEOMETRYCOLLECTION",
        }
    }

    /// Base WKB type code. Rings travel as line strings.
    pub fn wkb_code(&self) -> u32 {
        match self {
            GeometryType::Point => 1,
            GeometryType::LineString | GeometryType::LinearRing => 2,
            GeometryType::Polygon => 3,
            GeometryType::MultiPoint => 4,
            GeometryType::MultiLineString => 5,
            GeometryType::MultiPolygon => 6,
            GeometryType::GeometryCollection => 7,
        }
    }

    pub fn from_wkb_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(GeometryType::Point),
            2 => Some(GeometryType::LineString),
            3 => Some(GeometryType::Polygon),
            4 => Some(GeometryType::MultiPoint),
            5 => Some(GeometryType::MultiLineString),
            6 => Some(GeometryType::MultiPolygon),
            7 => Some(GeometryType::GeometryCollection),
            _ => None,
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Fields every geometry carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Header {
    pub(crate) srid: i32,
    pub(crate) precision_model: PrecisionModel,
}

macro_rules! leaf_geometry {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            pub(crate) header: Header,
            pub(crate) coords: CoordinateSequence,
        }

        impl $name {
            #[inline] pub fn coords(&self) -> &CoordinateSequence { &self.coords }
            #[inline] pub fn srid(&self) -> i32 { self.header.srid }
            #[inline] pub fn precision_model(&self) -> PrecisionModel { self.header.precision_model }
            #[inline] pub fn is_empty(&self) -> bool { self.coords.is_empty() }
        }
    };
}

leaf_geometry!(
    /// A single position, or the empty point.
    Point
);
leaf_geometry!(
    /// Connected run of positions; never exactly one point.
    LineString
);
leaf_geometry!(
    /// Closed line string with zero or at least four points.
    LinearRing
);

impl Point {
    /// The position, or `None` for the empty point.
    #[inline] pub fn coord(&self) -> Option<&Coordinate> { self.coords.first() }
}

/// Exterior ring plus zero or more holes. An empty polygon has an empty shell and no holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub(crate) header: Header,
    pub(crate) exterior: LinearRing,
    pub(crate) interiors: Vec<LinearRing>,
}

impl Polygon {
    #[inline] pub fn exterior(&self) -> &LinearRing { &self.exterior }
    #[inline] pub fn interiors(&self) -> &[LinearRing] { &self.interiors }
    #[inline] pub fn srid(&self) -> i32 { self.header.srid }
    #[inline] pub fn precision_model(&self) -> PrecisionModel { self.header.precision_model }
    #[inline] pub fn is_empty(&self) -> bool { self.exterior.is_empty() }

    /// Exterior followed by holes.
    pub fn rings(&self) -> impl Iterator<Item = &LinearRing> + '_ {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }
}

macro_rules! multi_geometry {
    ($(#[$doc:meta])* $name:ident, $elem:ty) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            pub(crate) header: Header,
            pub(crate) geometries: Vec<$elem>,
        }

        impl $name {
            #[inline] pub fn geometries(&self) -> &[$elem] { &self.geometries }
            #[inline] pub fn len(&self) -> usize { self.geometries.len() }
            #[inline] pub fn srid(&self) -> i32 { self.header.srid }
            #[inline] pub fn precision_model(&self) -> PrecisionModel { self.header.precision_model }
            #[inline] pub fn is_empty(&self) -> bool { self.geometries.iter().all(|g| g.is_empty()) }
        }
    };
}

multi_geometry!(MultiPoint, Point);
multi_geometry!(MultiLineString, LineString);
multi_geometry!(MultiPolygon, Polygon);
multi_geometry!(
    /// Heterogeneous collection; children keep their own SRID.
    GeometryCollection,
    Geometry
);

/// Closed set of geometry kinds the codec reads and writes.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    LinearRing(LinearRing),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::LinearRing(_) => GeometryType::LinearRing,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    fn header(&self) -> &Header {
        match self {
            Geometry::Point(g) => &g.header,
            Geometry::LineString(g) => &g.header,
            Geometry::LinearRing(g) => &g.header,
            Geometry::Polygon(g) => &g.header,
            Geometry::MultiPoint(g) => &g.header,
            Geometry::MultiLineString(g) => &g.header,
            Geometry::MultiPolygon(g) => &g.header,
            Geometry::GeometryCollection(g) => &g.header,
        }
    }

    #[inline] pub fn srid(&self) -> i32 { self.header().srid }

    #[inline] pub fn precision_model(&self) -> PrecisionModel { self.header().precision_model }

    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(g) => g.is_empty(),
            Geometry::LineString(g) => g.is_empty(),
            Geometry::LinearRing(g) => g.is_empty(),
            Geometry::Polygon(g) => g.is_empty(),
            Geometry::MultiPoint(g) => g.is_empty(),
            Geometry::MultiLineString(g) => g.is_empty(),
            Geometry::MultiPolygon(g) => g.is_empty(),
            Geometry::GeometryCollection(g) => g.is_empty(),
        }
    }

    /// Visit every coordinate sequence in the tree, depth first.
    pub fn for_each_sequence<'a>(&'a self, f: &mut impl FnMut(&'a CoordinateSequence)) {
        match self {
            Geometry::Point(g) => f(&g.coords),
            Geometry::LineString(g) => f(&g.coords),
            Geometry::LinearRing(g) => f(&g.coords),
            Geometry::Polygon(g) => g.rings().for_each(|r| f(&r.coords)),
            Geometry::MultiPoint(g) => g.geometries.iter().for_each(|p| f(&p.coords)),
            Geometry::MultiLineString(g) => g.geometries.iter().for_each(|l| f(&l.coords)),
            Geometry::MultiPolygon(g) => g.geometries.iter()
                .flat_map(|p| p.rings())
                .for_each(|r| f(&r.coords)),
            Geometry::GeometryCollection(g) => g.geometries.iter().for_each(|c| c.for_each_sequence(f)),
        }
    }

    /// Union of the ordinate sets declared by all sequences in the tree.
    pub fn ordinates(&self) -> Ordinates {
        let mut ordinates = Ordinates::XY;
        self.for_each_sequence(&mut |s| ordinates = ordinates.union(s.ordinates()));
        ordinates
    }

    /// Ordinates that hold at least one non-NaN value somewhere in the tree.
    pub fn present_ordinates(&self) -> Ordinates {
        let (mut has_z, mut has_m) = (false, false);
        self.for_each_sequence(&mut |s| {
            let declared = s.ordinates();
            if (declared.has_z() && !has_z) || (declared.has_m() && !has_m) {
                for c in s {
                    has_z |= declared.has_z() && !c.z.is_nan();
                    has_m |= declared.has_m() && !c.m.is_nan();
                }
            }
        });
        Ordinates::new(has_z, has_m)
    }

    /// Total number of coordinates in the tree.
    pub fn num_coords(&self) -> usize {
        let mut n = 0;
        self.for_each_sequence(&mut |s| n += s.len());
        n
    }
}

macro_rules! into_geometry {
    ($($name:ident),*) => {
        $(impl From<$name> for Geometry {
            fn from(g: $name) -> Self { Geometry::$name(g) }
        })*
    };
}

into_geometry!(
    Point, LineString, LinearRing, Polygon,
    MultiPoint, MultiLineString, MultiPolygon, GeometryCollection
);
