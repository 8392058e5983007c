//! Files holding a sequence of WKT geometries.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use log::trace;

use crate::geom::Geometry;
use crate::io::wkt::WktReader;

/// Reads every geometry from a WKT text separated by whitespace or `#` comments.
/// Paths ending in `.gz` are decompressed on the fly.
#[derive(Debug, Clone, Default)]
pub struct WktFileReader {
    reader: WktReader,
    offset: usize,
    limit: Option<usize>,
}

impl WktFileReader {
    pub fn new(reader: WktReader) -> Self {
        Self { reader, offset: 0, limit: None }
    }

    /// Skip the first `offset` geometries.
    pub fn offset(mut self, offset: usize) -> Self { self.offset = offset; self }

    /// Stop after `limit` geometries.
    pub fn limit(mut self, limit: usize) -> Self { self.limit = Some(limit); self }

    pub fn read_path(&self, path: &Path) -> Result<Vec<Geometry>> {
        let file = File::open(path)
            .with_context(|| format!("[io::wkt::file] Failed to open WKT file: {}", path.display()))?;
        let mut source: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };
        let mut text = String::new();
        source.read_to_string(&mut text)
            .with_context(|| format!("[io::wkt::file] Failed to read {}", path.display()))?;
        self.read_str(&text)
            .with_context(|| format!("[io::wkt::file] Invalid WKT in {}", path.display()))
    }

    pub fn read_str(&self, text: &str) -> Result<Vec<Geometry>> {
        let selected = self.reader.geometries(text)
            .skip(self.offset)
            .take(self.limit.unwrap_or(usize::MAX));
        let geometries = selected.enumerate()
            .map(|(i, g)| g.with_context(|| format!("[io::wkt::file] Failed to parse geometry {}", self.offset + i + 1)))
            .collect::<Result<Vec<_>>>()?;
        trace!("[io::wkt::file] read {} geometries", geometries.len());
        Ok(geometries)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::geom::GeometryType;

    const TEXT: &str = "# sample\nPOINT (1 2)\nLINESTRING (0 0, 1 1)\n\nSRID=4326;POLYGON EMPTY\n";

    #[test]
    fn reads_every_geometry() {
        let geometries = WktFileReader::default().read_str(TEXT).unwrap();
        let types: Vec<_> = geometries.iter().map(Geometry::geometry_type).collect();
        assert_eq!(types, vec![GeometryType::Point, GeometryType::LineString, GeometryType::Polygon]);
        assert_eq!(geometries[2].srid(), 4326);
    }

    #[test]
    fn honours_offset_and_limit() {
        let geometries = WktFileReader::default().offset(1).limit(1).read_str(TEXT).unwrap();
        assert_eq!(geometries.len(), 1);
        assert_eq!(geometries[0].geometry_type(), GeometryType::LineString);
    }

    #[test]
    fn reads_files_and_reports_failures() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{TEXT}POINT (1 ").unwrap();
        let err = WktFileReader::default().read_path(file.path()).unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("[io::wkt::file] Invalid WKT"), "{chain}");
        assert!(chain.contains("geometry 4"), "{chain}");

        let limited = WktFileReader::default().limit(3).read_path(file.path()).unwrap();
        assert_eq!(limited.len(), 3);
    }
}
