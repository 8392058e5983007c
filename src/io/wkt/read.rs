//! WKT reading operations.

use log::debug;

use crate::error::{ParseError, ParseResult};
use crate::geom::{
    Coordinate, CoordinateSequence, Geometry, GeometryCollection, GeometryError, GeometryFactory,
    GeometryType, LineString, LinearRing, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};
use crate::io::wkt::tokenizer::{Token, Tokenizer};
use crate::types::Ordinates;

/// Deepest collection nesting accepted before the input is declared malformed.
const MAX_NESTING: usize = 128;

const KEYWORDS: [GeometryType; 8] = [
    GeometryType::Point,
    GeometryType::LineString,
    GeometryType::LinearRing,
    GeometryType::Polygon,
    GeometryType::MultiPoint,
    GeometryType::MultiLineString,
    GeometryType::MultiPolygon,
    GeometryType::GeometryCollection,
];

/// Reader settings. Build with [`WktReaderConfig::builder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WktReaderConfig {
    repair: bool,
    old_coordinate_syntax: bool,
    old_multipoint_syntax: bool,
    allowed_ordinates: Ordinates,
}

impl Default for WktReaderConfig {
    fn default() -> Self {
        Self {
            repair: false,
            old_coordinate_syntax: true,
            old_multipoint_syntax: true,
            allowed_ordinates: Ordinates::XYZM,
        }
    }
}

impl WktReaderConfig {
    pub fn builder() -> WktReaderConfigBuilder {
        WktReaderConfigBuilder { config: Self::default() }
    }

    /// Close and pad short rings and one-point lines instead of failing.
    #[inline] pub fn repair(&self) -> bool { self.repair }

    /// Without a dimension modifier, read a third and fourth number as Z and M.
    #[inline] pub fn old_coordinate_syntax(&self) -> bool { self.old_coordinate_syntax }

    /// Accept `MULTIPOINT (1 2, 3 4)` as well as `MULTIPOINT ((1 2), (3 4))`.
    #[inline] pub fn old_multipoint_syntax(&self) -> bool { self.old_multipoint_syntax }

    #[inline] pub fn allowed_ordinates(&self) -> Ordinates { self.allowed_ordinates }
}

#[derive(Debug, Clone)]
pub struct WktReaderConfigBuilder {
    config: WktReaderConfig,
}

impl WktReaderConfigBuilder {
    pub fn repair(mut self, repair: bool) -> Self { self.config.repair = repair; self }

    pub fn old_coordinate_syntax(mut self, enabled: bool) -> Self {
        self.config.old_coordinate_syntax = enabled;
        self
    }

    pub fn old_multipoint_syntax(mut self, enabled: bool) -> Self {
        self.config.old_multipoint_syntax = enabled;
        self
    }

    pub fn allowed_ordinates(mut self, ordinates: Ordinates) -> Self {
        self.config.allowed_ordinates = ordinates;
        self
    }

    pub fn build(self) -> WktReaderConfig { self.config }
}

/// Parses WKT into geometries built by a [`GeometryFactory`].
#[derive(Debug, Clone, Default)]
pub struct WktReader {
    factory: GeometryFactory,
    config: WktReaderConfig,
}

impl WktReader {
    pub fn new(factory: GeometryFactory) -> Self {
        Self { factory, config: WktReaderConfig::default() }
    }

    pub fn with_config(factory: GeometryFactory, config: WktReaderConfig) -> Self {
        Self { factory, config }
    }

    #[inline] pub fn config(&self) -> &WktReaderConfig { &self.config }

    #[inline] pub fn factory(&self) -> &GeometryFactory { &self.factory }

    /// Read exactly one geometry. Anything but whitespace and comments after it is an error.
    pub fn read(&self, text: &str) -> ParseResult<Geometry> {
        let mut parser = self.parser(text);
        let geometry = parser.read_tagged_text(self.factory.srid())?;
        match parser.tokens.next_token() {
            Token::Eof => Ok(geometry),
            other => Err(parser.tokens.unexpected("end of input", other)),
        }
    }

    /// Read every geometry in `text`.
    pub fn read_all(&self, text: &str) -> ParseResult<Vec<Geometry>> {
        self.geometries(text).collect()
    }

    /// Iterate over the geometries in `text`. Iteration stops after the first failure.
    pub fn geometries<'a>(&'a self, text: &'a str) -> WktGeometries<'a> {
        WktGeometries { parser: self.parser(text), srid: self.factory.srid(), failed: false }
    }

    fn parser<'a>(&'a self, text: &'a str) -> Parser<'a> {
        Parser { tokens: Tokenizer::new(text), factory: &self.factory, config: &self.config, depth: 0 }
    }
}

/// Geometries read one after another from a single text.
pub struct WktGeometries<'a> {
    parser: Parser<'a>,
    srid: i32,
    failed: bool,
}

impl Iterator for WktGeometries<'_> {
    type Item = ParseResult<Geometry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.parser.tokens.at_end() {
            return None;
        }
        let result = self.parser.read_tagged_text(self.srid);
        self.failed = result.is_err();
        Some(result)
    }
}

/// Ordinates resolved for one tagged text.
#[derive(Debug, Clone, Copy)]
struct Dimension {
    ordinates: Ordinates,
    /// No modifier was given and extra numbers may be read as Z and M.
    implicit: bool,
}

struct Parser<'a> {
    tokens: Tokenizer<'a>,
    factory: &'a GeometryFactory,
    config: &'a WktReaderConfig,
    depth: usize,
}

impl Parser<'_> {
    fn read_tagged_text(&mut self, inherited_srid: i32) -> ParseResult<Geometry> {
        let srid = self.read_srid()?.unwrap_or(inherited_srid);
        let (ty, dim) = self.read_keyword()?;
        let factory = self.factory.with_srid(srid);

        Ok(match ty {
            GeometryType::Point => self.read_point_text(&factory, dim)?.into(),
            GeometryType::LineString => self.read_line_string_text(&factory, dim)?.into(),
            GeometryType::LinearRing => self.read_ring_text(&factory, dim)?.into(),
            GeometryType::Polygon => self.read_polygon_text(&factory, dim)?.into(),
            GeometryType::MultiPoint => self.read_multi_point_text(&factory, dim)?.into(),
            GeometryType::MultiLineString => self.read_multi_line_string_text(&factory, dim)?.into(),
            GeometryType::MultiPolygon => self.read_multi_polygon_text(&factory, dim)?.into(),
            GeometryType::GeometryCollection => self.read_collection_text(&factory, srid)?.into(),
        })
    }

    /// Optional `SRID=<int>;` prefix.
    fn read_srid(&mut self) -> ParseResult<Option<i32>> {
        if !self.tokens.peek().is_word("SRID") {
            return Ok(None);
        }
        self.tokens.next_token();
        self.tokens.expect_char('=')?;
        let word = self.tokens.expect_word("an SRID")?;
        let srid = word.parse::<i32>().map_err(|_| self.tokens.unexpected("an integer SRID", Token::Word(word)))?;
        self.tokens.expect_char(';')?;
        Ok(Some(srid))
    }

    /// Geometry keyword with its dimension modifier, attached (`POINTZ`) or separate (`POINT Z`).
    fn read_keyword(&mut self) -> ParseResult<(GeometryType, Dimension)> {
        let word = self.tokens.expect_word("a geometry keyword")?;
        let upper = word.to_ascii_uppercase();
        let ty = KEYWORDS
            .into_iter()
            .find(|ty| upper.starts_with(ty.keyword()))
            .ok_or_else(|| self.tokens.unexpected("a geometry keyword", Token::Word(word)))?;

        let suffix = &upper[ty.keyword().len()..];
        let explicit = if suffix.is_empty() {
            match self.tokens.peek() {
                Token::Word(next) => {
                    let ordinates = Ordinates::from_suffix(next);
                    if ordinates.is_some() {
                        self.tokens.next_token();
                    }
                    ordinates
                }
                _ => None,
            }
        } else {
            let ordinates = Ordinates::from_suffix(suffix)
                .ok_or_else(|| self.tokens.unexpected("a Z, M or ZM dimension suffix", Token::Word(word)))?;
            Some(ordinates)
        };

        let dim = Dimension {
            ordinates: explicit.unwrap_or(Ordinates::XY),
            implicit: explicit.is_none() && self.config.old_coordinate_syntax,
        };
        Ok((ty, dim))
    }

    /// Consume `EMPTY` (false) or `(` (true).
    fn open_or_empty(&mut self) -> ParseResult<bool> {
        match self.tokens.next_token() {
            Token::Char('(') => Ok(true),
            token if token.is_word("EMPTY") => Ok(false),
            other => Err(self.tokens.unexpected("'EMPTY' or '('", other)),
        }
    }

    /// Consume `,` (true) or `)` (false).
    fn more_items(&mut self) -> ParseResult<bool> {
        match self.tokens.next_token() {
            Token::Char(',') => Ok(true),
            Token::Char(')') => Ok(false),
            other => Err(self.tokens.unexpected("',' or ')'", other)),
        }
    }

    /// `EMPTY` or a parenthesized, comma-separated list of items.
    fn read_items<T>(&mut self, mut item: impl FnMut(&mut Self) -> ParseResult<T>) -> ParseResult<Vec<T>> {
        let mut items = Vec::new();
        if self.open_or_empty()? {
            loop {
                items.push(item(self)?);
                if !self.more_items()? {
                    break;
                }
            }
        }
        Ok(items)
    }

    #[inline]
    fn kept(&self, ordinates: Ordinates) -> Ordinates {
        ordinates.intersect(self.config.allowed_ordinates)
    }

    fn invalid(&self, e: GeometryError) -> ParseError {
        ParseError::from(e).located(format_args!("line {}", self.tokens.line()))
    }

    /// Read one coordinate tuple, returning the ordinates it actually carried.
    fn read_coordinate(&mut self, dim: Dimension) -> ParseResult<(Coordinate, Ordinates)> {
        let precision = self.factory.precision_model();
        let x = precision.make_precise(self.tokens.expect_number()?);
        let y = precision.make_precise(self.tokens.expect_number()?);
        let mut coord = Coordinate::xy(x, y);

        if !dim.implicit {
            if dim.ordinates.has_z() {
                coord.z = self.tokens.expect_number()?;
            }
            if dim.ordinates.has_m() {
                coord.m = self.tokens.expect_number()?;
            }
            return Ok((coord, dim.ordinates));
        }

        let mut seen = Ordinates::XY;
        if matches!(self.tokens.peek(), Token::Word(_)) {
            coord.z = self.tokens.expect_number()?;
            seen = Ordinates::XYZ;
            if matches!(self.tokens.peek(), Token::Word(_)) {
                coord.m = self.tokens.expect_number()?;
                seen = Ordinates::XYZM;
            }
        }
        Ok((coord, seen))
    }

    fn read_coordinates(&mut self, dim: Dimension) -> ParseResult<CoordinateSequence> {
        let tuples = self.read_items(|p| p.read_coordinate(dim))?;
        let seen = tuples.iter().fold(dim.ordinates, |acc, (_, ordinates)| acc.union(*ordinates));
        let mut seq = self.factory.create_sequence(tuples.len(), self.kept(seen));
        for (coord, _) in tuples {
            seq.push(coord);
        }
        Ok(seq)
    }

    fn read_point_text(&mut self, factory: &GeometryFactory, dim: Dimension) -> ParseResult<Point> {
        let seq = self.read_coordinates(dim)?;
        if seq.is_empty() {
            return Ok(factory.create_empty_point(seq.ordinates()));
        }
        factory.create_point(seq).map_err(|e| self.invalid(e))
    }

    /// Legacy MultiPoint element: a bare coordinate tuple.
    fn read_bare_point(&mut self, factory: &GeometryFactory, dim: Dimension) -> ParseResult<Point> {
        let (coord, seen) = self.read_coordinate(dim)?;
        let seq = CoordinateSequence::from_coords(self.kept(dim.ordinates.union(seen)), [coord]);
        factory.create_point(seq).map_err(|e| self.invalid(e))
    }

    fn read_line_string_text(&mut self, factory: &GeometryFactory, dim: Dimension) -> ParseResult<LineString> {
        let mut seq = self.read_coordinates(dim)?;
        if self.config.repair && seq.pad(2) {
            debug!("[io::wkt::read] extended one-point LineString to two points (line {})", self.tokens.line());
        }
        factory.create_line_string(seq).map_err(|e| self.invalid(e))
    }

    fn read_ring_text(&mut self, factory: &GeometryFactory, dim: Dimension) -> ParseResult<LinearRing> {
        let mut seq = self.read_coordinates(dim)?;
        let before = seq.len();
        if self.config.repair && seq.close_and_pad(4) {
            debug!("[io::wkt::read] repaired ring of {before} points to {} points (line {})", seq.len(), self.tokens.line());
        }
        factory.create_linear_ring(seq).map_err(|e| self.invalid(e))
    }

    fn read_polygon_text(&mut self, factory: &GeometryFactory, dim: Dimension) -> ParseResult<Polygon> {
        let mut rings = self.read_items(|p| p.read_ring_text(factory, dim))?.into_iter();
        let exterior = rings.next();
        factory.create_polygon(exterior, rings.collect()).map_err(|e| self.invalid(e))
    }

    fn read_multi_point_text(&mut self, factory: &GeometryFactory, dim: Dimension) -> ParseResult<MultiPoint> {
        let points = self.read_items(|p| match p.tokens.peek() {
            Token::Char('(') => p.read_point_text(factory, dim),
            token if token.is_word("EMPTY") => p.read_point_text(factory, dim),
            Token::Word(_) if p.config.old_multipoint_syntax => p.read_bare_point(factory, dim),
            _ => {
                let found = p.tokens.next_token();
                Err(p.tokens.unexpected("'(' or 'EMPTY'", found))
            }
        })?;
        Ok(factory.create_multi_point(points))
    }

    fn read_multi_line_string_text(&mut self, factory: &GeometryFactory, dim: Dimension) -> ParseResult<MultiLineString> {
        let lines = self.read_items(|p| p.read_line_string_text(factory, dim))?;
        Ok(factory.create_multi_line_string(lines))
    }

    fn read_multi_polygon_text(&mut self, factory: &GeometryFactory, dim: Dimension) -> ParseResult<MultiPolygon> {
        let polygons = self.read_items(|p| p.read_polygon_text(factory, dim))?;
        Ok(factory.create_multi_polygon(polygons))
    }

    /// Children are full tagged texts; one without its own SRID prefix inherits `srid`.
    fn read_collection_text(&mut self, factory: &GeometryFactory, srid: i32) -> ParseResult<GeometryCollection> {
        if self.depth >= MAX_NESTING {
            let found = self.tokens.peek();
            return Err(self.tokens.unexpected(&format!("at most {MAX_NESTING} nested collections"), found));
        }
        self.depth += 1;
        let geometries = self.read_items(|p| p.read_tagged_text(srid))?;
        self.depth -= 1;
        Ok(factory.create_geometry_collection(geometries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::PrecisionModel;

    fn read(text: &str) -> Geometry {
        WktReader::default().read(text).unwrap()
    }

    fn read_err(reader: &WktReader, text: &str) -> String {
        reader.read(text).unwrap_err().message().to_string()
    }

    fn point_xy(geometry: &Geometry) -> (f64, f64) {
        let Geometry::Point(point) = geometry else { panic!("expected point, got {geometry:?}") };
        let coord = point.coord().unwrap();
        (coord.x, coord.y)
    }

    #[test]
    fn reads_simple_point() {
        let geometry = read("POINT (1 2)");
        assert_eq!(point_xy(&geometry), (1.0, 2.0));
        assert_eq!(geometry.srid(), 0);
        assert_eq!(geometry.ordinates(), Ordinates::XY);
    }

    #[test]
    fn srid_prefix_overrides_factory_srid() {
        let reader = WktReader::new(GeometryFactory::new(PrecisionModel::Floating, 4269));
        let geometry = reader.read("SRID=4326;POINT(10 20)").unwrap();
        assert_eq!(geometry.srid(), 4326);
        assert_eq!(point_xy(&geometry), (10.0, 20.0));
        assert_eq!(reader.read("POINT(10 20)").unwrap().srid(), 4269);
    }

    #[test]
    fn dimension_modifiers_attached_or_separate() {
        for (text, ordinates) in [
            ("POINT Z (1 2 3)", Ordinates::XYZ),
            ("POINTZ(1 2 3)", Ordinates::XYZ),
            ("point m (1 2 3)", Ordinates::XYM),
            ("POINTZM (1 2 3 4)", Ordinates::XYZM),
            ("POINT ZM (1 2 3 4)", Ordinates::XYZM),
        ] {
            let geometry = read(text);
            assert_eq!(geometry.ordinates(), ordinates, "{text}");
        }
        let Geometry::Point(point) = read("POINT M (1 2 3)") else { panic!() };
        let coord = point.coord().unwrap();
        assert!(coord.z.is_nan());
        assert_eq!(coord.m, 3.0);
    }

    #[test]
    fn rejects_unknown_suffix_and_keyword() {
        let reader = WktReader::default();
        assert_eq!(
            read_err(&reader, "POINTQ (1 2)"),
            "expected a Z, M or ZM dimension suffix but found word 'POINTQ' (line 1)"
        );
        assert_eq!(
            read_err(&reader, "CIRCLE (1 2)"),
            "expected a geometry keyword but found word 'CIRCLE' (line 1)"
        );
    }

    #[test]
    fn reports_missing_delimiters() {
        let reader = WktReader::default();
        assert_eq!(read_err(&reader, "POINT (1 2"), "expected ',' or ')' but found end of input (line 1)");
        assert_eq!(read_err(&reader, "LINESTRING\n(1 2,\n 3 x)"), "expected a number but found word 'x' (line 3)");
        assert_eq!(read_err(&reader, "POINT 1 2"), "expected 'EMPTY' or '(' but found word '1' (line 1)");
        assert_eq!(read_err(&reader, "POINT (1 2) POINT (3 4)"), "expected end of input but found word 'POINT' (line 1)");
    }

    #[test]
    fn empty_geometries() {
        let geometry = read("LINESTRING EMPTY");
        assert!(geometry.is_empty());
        assert_eq!(geometry.geometry_type(), GeometryType::LineString);

        let Geometry::Point(point) = read("POINT Z EMPTY") else { panic!() };
        assert!(point.is_empty());
        assert_eq!(point.coords().ordinates(), Ordinates::XYZ);

        assert!(read("POLYGON EMPTY").is_empty());
        assert!(read("GEOMETRYCOLLECTION EMPTY").is_empty());
    }

    #[test]
    fn empty_shell_with_holes_rejected() {
        let reader = WktReader::default();
        assert_eq!(
            read_err(&reader, "POLYGON (EMPTY, (0 0, 1 0, 1 1, 0 0))"),
            "shell is empty but holes are not (line 1)"
        );
        assert!(read("POLYGON (EMPTY, EMPTY)").is_empty());
    }

    #[test]
    fn old_coordinate_syntax_reads_implicit_z() {
        let Geometry::LineString(line) = read("LINESTRING (0 0 5, 1 1 6)") else { panic!() };
        assert_eq!(line.coords().ordinates(), Ordinates::XYZ);
        assert_eq!(line.coords().get(1).unwrap().z, 6.0);

        let strict = WktReader::with_config(
            GeometryFactory::default(),
            WktReaderConfig::builder().old_coordinate_syntax(false).build(),
        );
        assert!(strict.read("LINESTRING (0 0 5, 1 1 6)").is_err());
    }

    #[test]
    fn multipoint_modern_and_legacy_syntax() {
        for text in ["MULTIPOINT ((1 2), (3 4))", "MULTIPOINT (1 2, 3 4)", "MULTIPOINT ((1 2), 3 4)"] {
            let Geometry::MultiPoint(points) = read(text) else { panic!("{text}") };
            assert_eq!(points.len(), 2, "{text}");
            assert_eq!(points.geometries()[1].coord().map(|c| c.y), Some(4.0));
        }

        let modern_only = WktReader::with_config(
            GeometryFactory::default(),
            WktReaderConfig::builder().old_multipoint_syntax(false).build(),
        );
        assert!(modern_only.read("MULTIPOINT ((1 2), (3 4))").is_ok());
        assert_eq!(
            read_err(&modern_only, "MULTIPOINT (1 2, 3 4)"),
            "expected '(' or 'EMPTY' but found word '1' (line 1)"
        );
    }

    #[test]
    fn polygon_z_ring() {
        let Geometry::Polygon(polygon) = read("POLYGON Z ((0 0 0, 1 0 1, 1 1 1, 0 0 0))") else { panic!() };
        assert_eq!(polygon.exterior().coords().len(), 4);
        assert_eq!(polygon.exterior().coords().ordinates(), Ordinates::XYZ);
        assert!(polygon.interiors().is_empty());
    }

    #[test]
    fn repair_closes_and_pads() {
        let repairing = WktReader::with_config(
            GeometryFactory::default(),
            WktReaderConfig::builder().repair(true).build(),
        );
        let Geometry::Polygon(polygon) = repairing.read("POLYGON ((0 0, 1 0, 1 1))").unwrap() else { panic!() };
        let ring = polygon.exterior().coords();
        assert_eq!(ring.len(), 4);
        assert!(ring.is_closed());

        let Geometry::Polygon(polygon) = repairing.read("POLYGON ((0 0, 1 0))").unwrap() else { panic!() };
        assert_eq!(polygon.exterior().coords().len(), 4);

        let Geometry::LineString(line) = repairing.read("LINESTRING (3 4)").unwrap() else { panic!() };
        assert_eq!(line.coords().len(), 2);

        let reader = WktReader::default();
        assert!(reader.read("POLYGON ((0 0, 1 0, 1 1))").is_err());
        assert!(reader.read("LINESTRING (3 4)").is_err());
    }

    #[test]
    fn collection_children_may_override_srid() {
        let geometry = read("SRID=4326;GEOMETRYCOLLECTION (POINT (1 2), SRID=3857;POINT (3 4), LINESTRING (0 0, 1 1))");
        let Geometry::GeometryCollection(collection) = &geometry else { panic!() };
        assert_eq!(collection.srid(), 4326);
        let srids: Vec<i32> = collection.geometries().iter().map(Geometry::srid).collect();
        assert_eq!(srids, vec![4326, 3857, 4326]);
    }

    #[test]
    fn nested_collections_and_linear_ring() {
        let geometry = read("GEOMETRYCOLLECTION (LINEARRING (0 0, 1 0, 1 1, 0 0), GEOMETRYCOLLECTION (POINT (5 5)))");
        let Geometry::GeometryCollection(collection) = &geometry else { panic!() };
        assert_eq!(collection.geometries()[0].geometry_type(), GeometryType::LinearRing);
        assert_eq!(collection.geometries()[1].num_coords(), 1);
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let depth = MAX_NESTING + 5;
        let text = format!("{}POINT (1 2){}", "GEOMETRYCOLLECTION (".repeat(depth), ")".repeat(depth));
        assert!(WktReader::default().read(&text).is_err());
    }

    #[test]
    fn allowed_ordinates_drop_values() {
        let reader = WktReader::with_config(
            GeometryFactory::default(),
            WktReaderConfig::builder().allowed_ordinates(Ordinates::XY).build(),
        );
        let Geometry::Point(point) = reader.read("POINT ZM (1 2 3 4)").unwrap() else { panic!() };
        assert_eq!(point.coords().ordinates(), Ordinates::XY);
        assert!(point.coord().unwrap().z.is_nan());
    }

    #[test]
    fn special_values_and_precision() {
        let Geometry::Point(point) = read("POINT (NaN -Inf)") else { panic!() };
        let coord = point.coord().unwrap();
        assert!(coord.x.is_nan());
        assert_eq!(coord.y, f64::NEG_INFINITY);

        let fixed = WktReader::new(GeometryFactory::new(PrecisionModel::Fixed { scale: 10.0 }, 0));
        assert_eq!(point_xy(&fixed.read("POINT (1.26 -3.04)").unwrap()), (1.3, -3.0));
    }

    #[test]
    fn read_all_and_iteration() {
        let text = "POINT (1 2)\n# comment\nLINESTRING (0 0, 1 1)\n\nPOLYGON EMPTY";
        let geometries = WktReader::default().read_all(text).unwrap();
        assert_eq!(geometries.len(), 3);

        let reader = WktReader::default();
        let mut iter = reader.geometries("POINT (1 2) POINT (oops) POINT (3 4)");
        assert!(iter.next().unwrap().is_ok());
        assert!(iter.next().unwrap().is_err());
        assert!(iter.next().is_none());
    }
}
