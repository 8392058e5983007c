//! WKB reading operations.

use std::io::{Cursor, Read};

use log::{debug, warn};

use crate::error::{ParseError, ParseResult};
use crate::geom::{
    Coordinate, CoordinateSequence, Geometry, GeometryFactory, GeometryType, LineString,
    LinearRing, Point, Polygon,
};
use crate::io::endian::EndianReader;
use crate::io::wkb::{EWKB_M_FLAG, EWKB_SRID_FLAG, EWKB_Z_FLAG};
use crate::types::{ByteOrder, Ordinates};

/// Smallest possible record: byte order, type word and a zero count.
const MIN_RECORD_LEN: usize = 1 + 4 + 4;

/// Deepest collection nesting accepted before the input is declared malformed.
const MAX_NESTING: usize = 128;

/// Reader settings. Build with [`WkbReaderConfig::builder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WkbReaderConfig {
    strict: bool,
    handle_srid: bool,
    allowed_ordinates: Ordinates,
}

impl Default for WkbReaderConfig {
    fn default() -> Self {
        Self {
            strict: false,
            handle_srid: true,
            allowed_ordinates: Ordinates::XYZM,
        }
    }
}

impl WkbReaderConfig {
    pub fn builder() -> WkbReaderConfigBuilder {
        WkbReaderConfigBuilder { config: Self::default() }
    }

    /// Reject byte-order tags other than 0 and 1, and reject short or unclosed rings
    /// and one-point lines.
    #[inline] pub fn strict(&self) -> bool { self.strict }

    /// Close and pad short rings and one-point lines instead of failing. Holds whenever
    /// reading is not strict.
    #[inline] pub fn repair(&self) -> bool { !self.strict }

    /// Keep SRIDs found in the input; otherwise the factory SRID wins.
    #[inline] pub fn handle_srid(&self) -> bool { self.handle_srid }

    /// Ordinates kept in the produced sequences; others are read and dropped.
    #[inline] pub fn allowed_ordinates(&self) -> Ordinates { self.allowed_ordinates }
}

#[derive(Debug, Clone)]
pub struct WkbReaderConfigBuilder {
    config: WkbReaderConfig,
}

impl WkbReaderConfigBuilder {
    pub fn strict(mut self, strict: bool) -> Self { self.config.strict = strict; self }

    pub fn handle_srid(mut self, handle_srid: bool) -> Self { self.config.handle_srid = handle_srid; self }

    pub fn allowed_ordinates(mut self, ordinates: Ordinates) -> Self {
        self.config.allowed_ordinates = ordinates;
        self
    }

    pub fn build(self) -> WkbReaderConfig {
        self.config
    }
}

/// Decodes WKB and EWKB into geometries built by a [`GeometryFactory`].
#[derive(Debug, Clone, Default)]
pub struct WkbReader {
    factory: GeometryFactory,
    config: WkbReaderConfig,
}

/// Decoded type word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TypeWord {
    code: u32,
    ordinates: Ordinates,
    has_srid: bool,
}

impl TypeWord {
    /// Both dimension encodings are probed; an ISO thousands offset wins over the EWKB bits.
    fn decode(word: u32) -> Self {
        let low = word & 0xFFFF;
        let iso = low / 1000;
        let ordinates = match iso {
            1 => Ordinates::XYZ,
            2 => Ordinates::XYM,
            3 => Ordinates::XYZM,
            _ => Ordinates::new(word & EWKB_Z_FLAG != 0, word & EWKB_M_FLAG != 0),
        };
        Self { code: low % 1000, ordinates, has_srid: word & EWKB_SRID_FLAG != 0 }
    }
}

impl WkbReader {
    pub fn new(factory: GeometryFactory) -> Self {
        Self { factory, config: WkbReaderConfig::default() }
    }

    pub fn with_config(factory: GeometryFactory, config: WkbReaderConfig) -> Self {
        Self { factory, config }
    }

    #[inline] pub fn config(&self) -> &WkbReaderConfig { &self.config }

    #[inline] pub fn factory(&self) -> &GeometryFactory { &self.factory }

    /// Read one geometry from the start of `bytes`. Trailing bytes are ignored.
    pub fn read(&self, bytes: &[u8]) -> ParseResult<Geometry> {
        let mut decoder = Decoder {
            input: EndianReader::new(Cursor::new(bytes), ByteOrder::BigEndian),
            factory: &self.factory,
            config: &self.config,
            depth: 0,
        };
        decoder
            .read_geometry(self.factory.srid(), ByteOrder::BigEndian)
            .map_err(|e| e.located(format_args!("at byte offset {}", decoder.input.position())))
    }

    /// Read one geometry from a hex string (either case).
    pub fn read_hex(&self, hex: &str) -> ParseResult<Geometry> {
        let bytes = hex::decode(hex.trim())?;
        self.read(&bytes)
    }

    /// Drain `source` and read one geometry from its contents.
    pub fn read_from(&self, mut source: impl Read) -> ParseResult<Geometry> {
        let mut bytes = Vec::new();
        source.read_to_end(&mut bytes)?;
        self.read(&bytes)
    }
}

struct Decoder<'a> {
    input: EndianReader<Cursor<&'a [u8]>>,
    factory: &'a GeometryFactory,
    config: &'a WkbReaderConfig,
    depth: usize,
}

impl Decoder<'_> {
    fn read_byte_order(&mut self, parent: ByteOrder) -> ParseResult<ByteOrder> {
        let tag = self.input.read_u8()?;
        match ByteOrder::from_tag(tag) {
            Some(order) => Ok(order),
            None if self.config.strict => Err(ParseError::new(format!("unknown byte order tag {tag}"))),
            None => {
                warn!("[io::wkb::read] unknown byte order tag {tag}, keeping {parent:?}");
                Ok(parent)
            }
        }
    }

    fn read_geometry(&mut self, inherited_srid: i32, parent_order: ByteOrder) -> ParseResult<Geometry> {
        let order = self.read_byte_order(parent_order)?;
        self.input.set_byte_order(order);

        let word = TypeWord::decode(self.input.read_u32()?);
        let mut srid = inherited_srid;
        if word.has_srid {
            let found = self.input.read_i32()?;
            if self.config.handle_srid {
                srid = found;
            }
        }

        let ty = GeometryType::from_wkb_code(word.code)
            .ok_or_else(|| ParseError::new(format!("unknown WKB type {}", word.code)))?;
        let factory = self.factory.with_srid(srid);
        let ordinates = word.ordinates;

        Ok(match ty {
            GeometryType::Point => self.read_point(&factory, ordinates)?.into(),
            GeometryType::LineString | GeometryType::LinearRing => {
                self.read_line_string(&factory, ordinates)?.into()
            }
            GeometryType::Polygon => self.read_polygon(&factory, ordinates)?.into(),
            GeometryType::MultiPoint => {
                let points = self.read_elements(srid, order, "MultiPoint", |g| match g {
                    Geometry::Point(p) => Some(p),
                    _ => None,
                })?;
                factory.create_multi_point(points).into()
            }
            GeometryType::MultiLineString => {
                let lines = self.read_elements(srid, order, "MultiLineString", |g| match g {
                    Geometry::LineString(l) => Some(l),
                    _ => None,
                })?;
                factory.create_multi_line_string(lines).into()
            }
            GeometryType::MultiPolygon => {
                let polygons = self.read_elements(srid, order, "MultiPolygon", |g| match g {
                    Geometry::Polygon(p) => Some(p),
                    _ => None,
                })?;
                factory.create_multi_polygon(polygons).into()
            }
            GeometryType::GeometryCollection => {
                let geometries = self.read_elements(srid, order, "GeometryCollection", Some)?;
                factory.create_geometry_collection(geometries).into()
            }
        })
    }

    /// Read a count field and check it against what the rest of the buffer could hold.
    fn read_count(&mut self, field: &str, min_item_len: usize) -> ParseResult<usize> {
        let count = self.input.read_i32()?;
        if count < 0 {
            return Err(ParseError::new(format!("{field} is negative ({count})")));
        }
        let remaining = self.input.remaining();
        let reasonable = remaining / min_item_len.max(1);
        if count as usize > reasonable {
            return Err(ParseError::new(format!(
                "{field} value {count} is too large: at most {reasonable} fit in the remaining {remaining} bytes"
            )));
        }
        Ok(count as usize)
    }

    fn read_coordinate(&mut self, ordinates: Ordinates) -> ParseResult<Coordinate> {
        let precision = self.factory.precision_model();
        let x = precision.make_precise(self.input.read_f64()?);
        let y = precision.make_precise(self.input.read_f64()?);
        let z = if ordinates.has_z() { self.input.read_f64()? } else { f64::NAN };
        let m = if ordinates.has_m() { self.input.read_f64()? } else { f64::NAN };
        Ok(Coordinate::xyzm(x, y, z, m))
    }

    fn read_sequence(&mut self, count: usize, ordinates: Ordinates) -> ParseResult<CoordinateSequence> {
        let kept = ordinates.intersect(self.config.allowed_ordinates);
        let mut seq = self.factory.create_sequence(count, kept);
        for _ in 0..count {
            seq.push(self.read_coordinate(ordinates)?);
        }
        Ok(seq)
    }

    fn read_point(&mut self, factory: &GeometryFactory, ordinates: Ordinates) -> ParseResult<Point> {
        let coord = self.read_coordinate(ordinates)?;
        let kept = ordinates.intersect(self.config.allowed_ordinates);
        if coord.x.is_nan() && coord.y.is_nan() {
            return Ok(factory.create_empty_point(kept));
        }
        let seq = CoordinateSequence::from_coords(kept, [coord]);
        Ok(factory.create_point(seq)?)
    }

    fn read_line_string(&mut self, factory: &GeometryFactory, ordinates: Ordinates) -> ParseResult<LineString> {
        let count = self.read_count("numPoints", ordinates.dimension() * 8)?;
        let mut seq = self.read_sequence(count, ordinates)?;
        if self.config.repair() && seq.len() == 1 {
            seq.pad(2);
            debug!("[io::wkb::read] extended one-point LineString to two points");
        }
        Ok(factory.create_line_string(seq)?)
    }

    fn read_ring(&mut self, factory: &GeometryFactory, ordinates: Ordinates) -> ParseResult<LinearRing> {
        let count = self.read_count("numPoints", ordinates.dimension() * 8)?;
        let mut seq = self.read_sequence(count, ordinates)?;
        if self.config.repair() && seq.close_and_pad(4) {
            debug!("[io::wkb::read] repaired ring of {count} points to {} points", seq.len());
        }
        Ok(factory.create_linear_ring(seq)?)
    }

    fn read_polygon(&mut self, factory: &GeometryFactory, ordinates: Ordinates) -> ParseResult<Polygon> {
        let count = self.read_count("numRings", 4)?;
        if count == 0 {
            return Ok(factory.create_polygon(None, Vec::new())?);
        }
        let exterior = self.read_ring(factory, ordinates)?;
        let interiors = (1..count)
            .map(|_| self.read_ring(factory, ordinates))
            .collect::<ParseResult<Vec<_>>>()?;
        Ok(factory.create_polygon(Some(exterior), interiors)?)
    }

    /// Read the elements of a container. Every element carries its own header;
    /// `accept` narrows them to the container's element type.
    fn read_elements<T>(
        &mut self,
        srid: i32,
        order: ByteOrder,
        container: &str,
        accept: impl Fn(Geometry) -> Option<T>,
    ) -> ParseResult<Vec<T>> {
        let count = self.read_count("numElems", MIN_RECORD_LEN)?;
        if self.depth >= MAX_NESTING {
            return Err(ParseError::new(format!("{container} nested deeper than {MAX_NESTING} levels")));
        }
        self.depth += 1;
        let mut elements = Vec::with_capacity(count);
        for _ in 0..count {
            let element = self.read_geometry(srid, order)?;
            let ty = element.geometry_type();
            let element = accept(element)
                .ok_or_else(|| ParseError::new(format!("invalid geometry type {ty} encountered in {container}")))?;
            elements.push(element);
        }
        self.depth -= 1;
        Ok(elements)
    }
}
