//! WKB writing operations.

use std::io::{self, Write};

use crate::error::ConfigError;
use crate::geom::{CoordinateSequence, Geometry, GeometryType, Point, Polygon};
use crate::io::endian::EndianWriter;
use crate::io::wkb::{EWKB_M_FLAG, EWKB_SRID_FLAG, EWKB_Z_FLAG, ISO_M_OFFSET, ISO_Z_OFFSET};
use crate::types::{ByteOrder, Ordinates};

/// Writer settings. Build with [`WkbWriterConfig::builder`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WkbWriterConfig {
    byte_order: ByteOrder,
    ordinates: Ordinates,
    strict: bool,
    handle_srid: bool,
    missing_ordinate: f64,
}

impl Default for WkbWriterConfig {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::LittleEndian,
            ordinates: Ordinates::XY,
            strict: false,
            handle_srid: false,
            missing_ordinate: f64::NAN,
        }
    }
}

impl WkbWriterConfig {
    pub fn builder() -> WkbWriterConfigBuilder {
        WkbWriterConfigBuilder { config: Self::default() }
    }

    #[inline] pub fn byte_order(&self) -> ByteOrder { self.byte_order }

    /// Ordinates written for every coordinate.
    #[inline] pub fn ordinates(&self) -> Ordinates { self.ordinates }

    /// ISO type codes (`+1000`/`+2000`) instead of EWKB flag bits.
    #[inline] pub fn strict(&self) -> bool { self.strict }

    /// Write each geometry's SRID after its type word.
    #[inline] pub fn handle_srid(&self) -> bool { self.handle_srid }

    /// Value written for a Z or M the source sequence does not carry.
    #[inline] pub fn missing_ordinate(&self) -> f64 { self.missing_ordinate }
}

#[derive(Debug, Clone)]
pub struct WkbWriterConfigBuilder {
    config: WkbWriterConfig,
}

impl WkbWriterConfigBuilder {
    pub fn byte_order(mut self, byte_order: ByteOrder) -> Self { self.config.byte_order = byte_order; self }

    pub fn ordinates(mut self, ordinates: Ordinates) -> Self { self.config.ordinates = ordinates; self }

    pub fn strict(mut self, strict: bool) -> Self { self.config.strict = strict; self }

    pub fn handle_srid(mut self, handle_srid: bool) -> Self { self.config.handle_srid = handle_srid; self }

    pub fn missing_ordinate(mut self, value: f64) -> Self { self.config.missing_ordinate = value; self }

    pub fn build(self) -> Result<WkbWriterConfig, ConfigError> {
        if self.config.strict && self.config.handle_srid {
            return Err(ConfigError::SridWithStrict);
        }
        Ok(self.config)
    }
}

/// Encodes geometries as WKB or EWKB.
#[derive(Debug, Clone, Default)]
pub struct WkbWriter {
    config: WkbWriterConfig,
}

impl WkbWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WkbWriterConfig) -> Self {
        Self { config }
    }

    #[inline] pub fn config(&self) -> &WkbWriterConfig { &self.config }

    /// Encode into a buffer sized exactly for the output.
    /// Encode into a new buffer. Fails only when a count does not fit in a WKB field.
    pub fn write(&self, geometry: &Geometry) -> io::Result<Vec<u8>> {
        let len = self.encoded_len(geometry);
        let mut bytes = Vec::with_capacity(len);
        self.write_to(geometry, &mut bytes)?;
        debug_assert_eq!(bytes.len(), len, "[io::wkb::write] size pass disagrees with output");
        Ok(bytes)
    }

    /// Encode as upper-case hex.
    pub fn write_hex(&self, geometry: &Geometry) -> io::Result<String> {
        Ok(hex::encode_upper(self.write(geometry)?))
    }

    /// Encode into a stream; stream failures are returned unchanged.
    pub fn write_to(&self, geometry: &Geometry, sink: &mut impl Write) -> io::Result<()> {
        let mut out = EndianWriter::new(sink, self.config.byte_order);
        self.write_geometry(geometry, &mut out)
    }

    #[inline]
    fn header_len(&self) -> usize {
        1 + 4 + if self.config.handle_srid { 4 } else { 0 }
    }

    #[inline]
    fn coord_len(&self) -> usize {
        self.config.ordinates.dimension() * 8
    }

    #[inline]
    fn sequence_len(&self, seq: &CoordinateSequence) -> usize {
        4 + seq.len() * self.coord_len()
    }

    fn polygon_len(&self, polygon: &Polygon) -> usize {
        let rings = if polygon.is_empty() { 0 } else { polygon.rings().map(|r| self.sequence_len(r.coords())).sum::<usize>() };
        self.header_len() + 4 + rings
    }

    /// Exact number of bytes [`write`](Self::write) produces for `geometry`.
    pub fn encoded_len(&self, geometry: &Geometry) -> usize {
        match geometry {
            Geometry::Point(_) => self.header_len() + self.coord_len(),
            Geometry::LineString(g) => self.header_len() + self.sequence_len(g.coords()),
            Geometry::LinearRing(g) => self.header_len() + self.sequence_len(g.coords()),
            Geometry::Polygon(g) => self.polygon_len(g),
            Geometry::MultiPoint(g) => self.header_len() + 4 + g.len() * (self.header_len() + self.coord_len()),
            Geometry::MultiLineString(g) => {
                self.header_len() + 4 + g.geometries().iter()
                    .map(|l| self.header_len() + self.sequence_len(l.coords()))
                    .sum::<usize>()
            }
            Geometry::MultiPolygon(g) => {
                self.header_len() + 4 + g.geometries().iter().map(|p| self.polygon_len(p)).sum::<usize>()
            }
            Geometry::GeometryCollection(g) => {
                self.header_len() + 4 + g.geometries().iter().map(|c| self.encoded_len(c)).sum::<usize>()
            }
        }
    }

    fn type_word(&self, ty: GeometryType) -> u32 {
        let ordinates = self.config.ordinates;
        let mut word = ty.wkb_code();
        if self.config.strict {
            if ordinates.has_z() { word += ISO_Z_OFFSET; }
            if ordinates.has_m() { word += ISO_M_OFFSET; }
        } else {
            if ordinates.has_z() { word |= EWKB_Z_FLAG; }
            if ordinates.has_m() { word |= EWKB_M_FLAG; }
            if self.config.handle_srid { word |= EWKB_SRID_FLAG; }
        }
        word
    }

    fn write_header<W: Write>(&self, ty: GeometryType, srid: i32, out: &mut EndianWriter<W>) -> io::Result<()> {
        out.write_u8(self.config.byte_order.to_tag())?;
        out.write_u32(self.type_word(ty))?;
        if self.config.handle_srid {
            out.write_i32(srid)?;
        }
        Ok(())
    }

    fn write_count<W: Write>(&self, count: usize, out: &mut EndianWriter<W>) -> io::Result<()> {
        let count = i32::try_from(count)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "count does not fit in a WKB field"))?;
        out.write_i32(count)
    }

    fn write_coords<W: Write>(&self, seq: &CoordinateSequence, out: &mut EndianWriter<W>) -> io::Result<()> {
        let ordinates = self.config.ordinates;
        let source = seq.ordinates();
        let missing = self.config.missing_ordinate;
        for c in seq {
            out.write_f64(c.x)?;
            out.write_f64(c.y)?;
            if ordinates.has_z() {
                out.write_f64(if source.has_z() { c.z } else { missing })?;
            }
            if ordinates.has_m() {
                out.write_f64(if source.has_m() { c.m } else { missing })?;
            }
        }
        Ok(())
    }

    fn write_sequence<W: Write>(&self, seq: &CoordinateSequence, out: &mut EndianWriter<W>) -> io::Result<()> {
        self.write_count(seq.len(), out)?;
        self.write_coords(seq, out)
    }

    fn write_point<W: Write>(&self, point: &Point, out: &mut EndianWriter<W>) -> io::Result<()> {
        self.write_header(GeometryType::Point, point.srid(), out)?;
        if point.is_empty() {
            for _ in 0..self.config.ordinates.dimension() {
                out.write_f64(f64::NAN)?;
            }
            return Ok(());
        }
        self.write_coords(point.coords(), out)
    }

    fn write_polygon<W: Write>(&self, polygon: &Polygon, out: &mut EndianWriter<W>) -> io::Result<()> {
        self.write_header(GeometryType::Polygon, polygon.srid(), out)?;
        if polygon.is_empty() {
            return self.write_count(0, out);
        }
        self.write_count(1 + polygon.interiors().len(), out)?;
        for ring in polygon.rings() {
            self.write_sequence(ring.coords(), out)?;
        }
        Ok(())
    }

    fn write_geometry<W: Write>(&self, geometry: &Geometry, out: &mut EndianWriter<W>) -> io::Result<()> {
        match geometry {
            Geometry::Point(g) => self.write_point(g, out),
            Geometry::LineString(g) => {
                self.write_header(GeometryType::LineString, g.srid(), out)?;
                self.write_sequence(g.coords(), out)
            }
            Geometry::LinearRing(g) => {
                self.write_header(GeometryType::LinearRing, g.srid(), out)?;
                self.write_sequence(g.coords(), out)
            }
            Geometry::Polygon(g) => self.write_polygon(g, out),
            Geometry::MultiPoint(g) => {
                self.write_header(GeometryType::MultiPoint, g.srid(), out)?;
                self.write_count(g.len(), out)?;
                g.geometries().iter().try_for_each(|p| self.write_point(p, out))
            }
            Geometry::MultiLineString(g) => {
                self.write_header(GeometryType::MultiLineString, g.srid(), out)?;
                self.write_count(g.len(), out)?;
                g.geometries().iter().try_for_each(|l| {
                    self.write_header(GeometryType::LineString, l.srid(), out)?;
                    self.write_sequence(l.coords(), out)
                })
            }
            Geometry::MultiPolygon(g) => {
                self.write_header(GeometryType::MultiPolygon, g.srid(), out)?;
                self.write_count(g.len(), out)?;
                g.geometries().iter().try_for_each(|p| self.write_polygon(p, out))
            }
            Geometry::GeometryCollection(g) => {
                self.write_header(GeometryType::GeometryCollection, g.srid(), out)?;
                self.write_count(g.len(), out)?;
                g.geometries().iter().try_for_each(|c| self.write_geometry(c, out))
            }
        }
    }
}
