//! WKT writing operations.

use std::fmt::{self, Write};

use crate::geom::{Coordinate, CoordinateSequence, Geometry, Point, Polygon};
use crate::io::number::OrdinateFormat;
use crate::types::Ordinates;

/// Writer settings. Build with [`WktWriterConfig::builder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WktWriterConfig {
    max_ordinates: Ordinates,
    pretty: bool,
    coordinates_per_line: usize,
    indent: usize,
    emit_srid: bool,
    max_fraction_digits: Option<usize>,
}

impl Default for WktWriterConfig {
    fn default() -> Self {
        Self {
            max_ordinates: Ordinates::XYZM,
            pretty: false,
            coordinates_per_line: 0,
            indent: 2,
            emit_srid: false,
            max_fraction_digits: None,
        }
    }
}

impl WktWriterConfig {
    pub fn builder() -> WktWriterConfigBuilder {
        WktWriterConfigBuilder { config: Self::default() }
    }

    /// Widest ordinate set written. Z and M are only written where some coordinate carries them.
    #[inline] pub fn max_ordinates(&self) -> Ordinates { self.max_ordinates }

    /// Break nested elements onto indented lines.
    #[inline] pub fn pretty(&self) -> bool { self.pretty }

    /// Coordinates per line when pretty printing; 0 keeps a sequence on one line.
    #[inline] pub fn coordinates_per_line(&self) -> usize { self.coordinates_per_line }

    /// Spaces per nesting level when pretty printing.
    #[inline] pub fn indent(&self) -> usize { self.indent }

    /// Prefix the output with `SRID=n;`.
    #[inline] pub fn emit_srid(&self) -> bool { self.emit_srid }

    /// Fraction digit cap; `None` derives it from the geometry's precision model.
    #[inline] pub fn max_fraction_digits(&self) -> Option<usize> { self.max_fraction_digits }
}

#[derive(Debug, Clone)]
pub struct WktWriterConfigBuilder {
    config: WktWriterConfig,
}

impl WktWriterConfigBuilder {
    pub fn max_ordinates(mut self, ordinates: Ordinates) -> Self { self.config.max_ordinates = ordinates; self }

    pub fn pretty(mut self, pretty: bool) -> Self { self.config.pretty = pretty; self }

    pub fn coordinates_per_line(mut self, count: usize) -> Self { self.config.coordinates_per_line = count; self }

    pub fn indent(mut self, indent: usize) -> Self { self.config.indent = indent; self }

    pub fn emit_srid(mut self, emit_srid: bool) -> Self { self.config.emit_srid = emit_srid; self }

    pub fn max_fraction_digits(mut self, digits: usize) -> Self {
        self.config.max_fraction_digits = Some(digits);
        self
    }

    pub fn build(self) -> WktWriterConfig { self.config }
}

/// Writes geometries as WKT.
#[derive(Debug, Clone, Default)]
pub struct WktWriter {
    config: WktWriterConfig,
}

impl WktWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WktWriterConfig) -> Self {
        Self { config }
    }

    #[inline] pub fn config(&self) -> &WktWriterConfig { &self.config }

    pub fn write(&self, geometry: &Geometry) -> String {
        let mut text = String::new();
        // Writes into a String cannot fail.
        let _ = self.write_to(geometry, &mut text);
        text
    }

    pub fn write_to(&self, geometry: &Geometry, out: &mut impl Write) -> fmt::Result {
        let format = match self.config.max_fraction_digits {
            Some(digits) => OrdinateFormat::new(digits),
            None => OrdinateFormat::for_precision_model(&geometry.precision_model()),
        };
        let mut emitter = Emitter {
            out,
            config: &self.config,
            format,
            ordinates: geometry.present_ordinates().intersect(self.config.max_ordinates),
        };
        if self.config.emit_srid {
            write!(emitter.out, "SRID={};", geometry.srid())?;
        }
        emitter.tagged_text(geometry, 0)
    }
}

/// `POINT (x y ...)` for a single coordinate, with Z and M where they are not NaN.
pub fn to_point_text(coord: &Coordinate) -> String {
    let ordinates = Ordinates::new(!coord.z.is_nan(), !coord.m.is_nan());
    let format = OrdinateFormat::default();
    let mut text = format!("POINT {}", ordinates.suffix());
    if !ordinates.suffix().is_empty() {
        text.push(' ');
    }
    text.push('(');
    push_coordinate(&mut text, &format, coord, ordinates);
    text.push(')');
    text
}

/// `LINESTRING (...)` for a bare sequence, with the ordinates it actually carries.
pub fn to_line_string_text(seq: &CoordinateSequence) -> String {
    let present = seq.iter().fold(Ordinates::XY, |acc, c| {
        acc.union(Ordinates::new(!c.z.is_nan(), !c.m.is_nan()))
    });
    let ordinates = present.intersect(seq.ordinates());
    let format = OrdinateFormat::default();
    let mut text = String::from("LINESTRING ");
    if !ordinates.suffix().is_empty() {
        text.push_str(ordinates.suffix());
        text.push(' ');
    }
    if seq.is_empty() {
        text.push_str("EMPTY");
        return text;
    }
    text.push('(');
    for (i, coord) in seq.iter().enumerate() {
        if i > 0 {
            text.push_str(", ");
        }
        push_coordinate(&mut text, &format, coord, ordinates);
    }
    text.push(')');
    text
}

fn push_coordinate(text: &mut String, format: &OrdinateFormat, coord: &Coordinate, ordinates: Ordinates) {
    text.push_str(&format.format(coord.x));
    text.push(' ');
    text.push_str(&format.format(coord.y));
    if ordinates.has_z() {
        text.push(' ');
        text.push_str(&format.format(coord.z));
    }
    if ordinates.has_m() {
        text.push(' ');
        text.push_str(&format.format(coord.m));
    }
}

struct Emitter<'a, W: Write> {
    out: &'a mut W,
    config: &'a WktWriterConfig,
    format: OrdinateFormat,
    ordinates: Ordinates,
}

impl<W: Write> Emitter<'_, W> {
    /// Separator before element `index` of a list nested at `level`.
    fn separator(&mut self, index: usize, level: usize) -> fmt::Result {
        if index == 0 {
            return Ok(());
        }
        if self.config.pretty {
            write!(self.out, ",\n{:width$}", "", width = level * self.config.indent)
        } else {
            self.out.write_str(", ")
        }
    }

    fn tagged_text(&mut self, geometry: &Geometry, level: usize) -> fmt::Result {
        self.out.write_str(geometry.geometry_type().keyword())?;
        let suffix = self.ordinates.suffix();
        if !suffix.is_empty() {
            write!(self.out, " {suffix}")?;
        }
        self.out.write_char(' ')?;

        match geometry {
            Geometry::Point(g) => self.point_text(g),
            Geometry::LineString(g) => self.sequence_text(g.coords(), level),
            Geometry::LinearRing(g) => self.sequence_text(g.coords(), level),
            Geometry::Polygon(g) => self.polygon_text(g, level),
            Geometry::MultiPoint(g) => self.list(g.geometries(), level, |e, p, _| e.point_text(p)),
            Geometry::MultiLineString(g) => {
                self.list(g.geometries(), level, |e, l, lvl| e.sequence_text(l.coords(), lvl))
            }
            Geometry::MultiPolygon(g) => self.list(g.geometries(), level, |e, p, lvl| e.polygon_text(p, lvl)),
            Geometry::GeometryCollection(g) => {
                let srid = g.srid();
                self.list(g.geometries(), level, |e, child, lvl| {
                    if e.config.emit_srid && child.srid() != srid {
                        write!(e.out, "SRID={};", child.srid())?;
                    }
                    e.tagged_text(child, lvl)
                })
            }
        }
    }

    /// `EMPTY` or a parenthesized list of elements, each nested one level deeper.
    fn list<T>(
        &mut self,
        items: &[T],
        level: usize,
        mut item: impl FnMut(&mut Self, &T, usize) -> fmt::Result,
    ) -> fmt::Result {
        if items.is_empty() {
            return self.out.write_str("EMPTY");
        }
        self.out.write_char('(')?;
        for (i, element) in items.iter().enumerate() {
            self.separator(i, level + 1)?;
            item(self, element, level + 1)?;
        }
        self.out.write_char(')')
    }

    fn coordinate(&mut self, coord: &Coordinate) -> fmt::Result {
        write!(self.out, "{} {}", self.format.format(coord.x), self.format.format(coord.y))?;
        if self.ordinates.has_z() {
            write!(self.out, " {}", self.format.format(coord.z))?;
        }
        if self.ordinates.has_m() {
            write!(self.out, " {}", self.format.format(coord.m))?;
        }
        Ok(())
    }

    fn point_text(&mut self, point: &Point) -> fmt::Result {
        match point.coord() {
            Some(coord) => {
                self.out.write_char('(')?;
                self.coordinate(coord)?;
                self.out.write_char(')')
            }
            None => self.out.write_str("EMPTY"),
        }
    }

    fn sequence_text(&mut self, seq: &CoordinateSequence, level: usize) -> fmt::Result {
        if seq.is_empty() {
            return self.out.write_str("EMPTY");
        }
        let per_line = if self.config.pretty { self.config.coordinates_per_line } else { 0 };
        self.out.write_char('(')?;
        for (i, coord) in seq.iter().enumerate() {
            if i > 0 && per_line > 0 && i % per_line == 0 {
                self.separator(i, level + 1)?;
            } else if i > 0 {
                self.out.write_str(", ")?;
            }
            self.coordinate(coord)?;
        }
        self.out.write_char(')')
    }

    fn polygon_text(&mut self, polygon: &Polygon, level: usize) -> fmt::Result {
        if polygon.is_empty() {
            return self.out.write_str("EMPTY");
        }
        let rings: Vec<_> = polygon.rings().collect();
        self.list(&rings, level, |e, ring, lvl| e.sequence_text(ring.coords(), lvl))
    }
}
