//! Conversions to and from the `geo` crate's XY geometry types.

use crate::geom::{
    Coordinate, CoordinateSequence, Geometry, GeometryError, GeometryFactory, LinearRing, Point,
    Polygon,
};
use crate::types::Ordinates;

fn to_geo_line(coords: &CoordinateSequence) -> geo::LineString<f64> {
    geo::LineString(coords.iter().map(|c| geo::Coord { x: c.x, y: c.y }).collect())
}

fn to_geo_polygon(polygon: &Polygon) -> geo::Polygon<f64> {
    geo::Polygon::new(
        to_geo_line(polygon.exterior().coords()),
        polygon.interiors().iter().map(|r| to_geo_line(r.coords())).collect(),
    )
}

fn to_geo_point(point: &Point) -> Option<geo::Point<f64>> {
    point.coord().map(|c| geo::Point::new(c.x, c.y))
}

impl Geometry {
    /// Project onto the `geo` XY model, dropping Z and M.
    ///
    /// `geo` has no empty point, so an empty point yields `None` and empty
    /// points inside multi-points and collections are skipped.
    pub fn to_geo(&self) -> Option<geo::Geometry<f64>> {
        Some(match self {
            Geometry::Point(g) => geo::Geometry::Point(to_geo_point(g)?),
            Geometry::LineString(g) => geo::Geometry::LineString(to_geo_line(g.coords())),
            Geometry::LinearRing(g) => geo::Geometry::LineString(to_geo_line(g.coords())),
            Geometry::Polygon(g) => geo::Geometry::Polygon(to_geo_polygon(g)),
            Geometry::MultiPoint(g) => geo::Geometry::MultiPoint(geo::MultiPoint(
                g.geometries().iter().filter_map(to_geo_point).collect(),
            )),
            Geometry::MultiLineString(g) => geo::Geometry::MultiLineString(geo::MultiLineString(
                g.geometries().iter().map(|l| to_geo_line(l.coords())).collect(),
            )),
            Geometry::MultiPolygon(g) => geo::Geometry::MultiPolygon(geo::MultiPolygon(
                g.geometries().iter().map(to_geo_polygon).collect(),
            )),
            Geometry::GeometryCollection(g) => geo::Geometry::GeometryCollection(geo::GeometryCollection(
                g.geometries().iter().filter_map(Geometry::to_geo).collect(),
            )),
        })
    }
}

impl GeometryFactory {
    fn xy_sequence<'a>(&self, coords: impl Iterator<Item = &'a geo::Coord<f64>>) -> CoordinateSequence {
        CoordinateSequence::from_coords(
            Ordinates::XY,
            coords.map(|c| Coordinate::xy(
                self.precision_model().make_precise(c.x),
                self.precision_model().make_precise(c.y),
            )),
        )
    }

    fn ring_from_geo(&self, ring: &geo::LineString<f64>) -> Result<LinearRing, GeometryError> {
        self.create_linear_ring(self.xy_sequence(ring.0.iter()))
    }

    fn polygon_from_geo(&self, polygon: &geo::Polygon<f64>) -> Result<Polygon, GeometryError> {
        let exterior = self.ring_from_geo(polygon.exterior())?;
        let interiors = polygon.interiors().iter()
            .map(|r| self.ring_from_geo(r))
            .collect::<Result<Vec<_>, _>>()?;
        self.create_polygon(Some(exterior), interiors)
    }

    /// Build a geometry from a `geo` value, snapping ordinates to this factory's precision model.
    pub fn from_geo(&self, geometry: &geo::Geometry<f64>) -> Result<Geometry, GeometryError> {
        Ok(match geometry {
            geo::Geometry::Point(p) => self.create_point(self.xy_sequence(std::iter::once(&p.0)))?.into(),
            geo::Geometry::Line(l) => self.create_line_string(self.xy_sequence([l.start, l.end].iter()))?.into(),
            geo::Geometry::LineString(l) => self.create_line_string(self.xy_sequence(l.0.iter()))?.into(),
            geo::Geometry::Polygon(p) => self.polygon_from_geo(p)?.into(),
            geo::Geometry::MultiPoint(mp) => self.create_multi_point(
                mp.0.iter()
                    .map(|p| self.create_point(self.xy_sequence(std::iter::once(&p.0))))
                    .collect::<Result<Vec<_>, _>>()?,
            ).into(),
            geo::Geometry::MultiLineString(ml) => self.create_multi_line_string(
                ml.0.iter()
                    .map(|l| self.create_line_string(self.xy_sequence(l.0.iter())))
                    .collect::<Result<Vec<_>, _>>()?,
            ).into(),
            geo::Geometry::MultiPolygon(mp) => self.create_multi_polygon(
                mp.0.iter()
                    .map(|p| self.polygon_from_geo(p))
                    .collect::<Result<Vec<_>, _>>()?,
            ).into(),
            geo::Geometry::GeometryCollection(gc) => self.create_geometry_collection(
                gc.0.iter()
                    .map(|g| self.from_geo(g))
                    .collect::<Result<Vec<_>, _>>()?,
            ).into(),
            geo::Geometry::Rect(r) => self.polygon_from_geo(&r.to_polygon())?.into(),
            geo::Geometry::Triangle(t) => self.polygon_from_geo(&t.to_polygon())?.into(),
        })
    }
}
