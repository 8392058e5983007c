//! Line-oriented hex WKB files.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use log::trace;

use crate::geom::Geometry;
use crate::io::wkb::WkbReader;

/// Reads files holding one hex-encoded WKB record per line.
///
/// Blank lines are skipped and do not count towards `offset` or `limit`.
/// Paths ending in `.gz` are decompressed on the fly.
#[derive(Debug, Clone, Default)]
pub struct WkbHexFileReader {
    reader: WkbReader,
    offset: usize,
    limit: Option<usize>,
}

impl WkbHexFileReader {
    pub fn new(reader: WkbReader) -> Self {
        Self { reader, offset: 0, limit: None }
    }

    /// Skip the first `offset` records.
    pub fn offset(mut self, offset: usize) -> Self { self.offset = offset; self }

    /// Stop after `limit` records.
    pub fn limit(mut self, limit: usize) -> Self { self.limit = Some(limit); self }

    /// Read every selected record from a file.
    pub fn read_path(&self, path: &Path) -> Result<Vec<Geometry>> {
        let file = File::open(path)
            .with_context(|| format!("[io::wkb::file] Failed to open hex WKB file: {}", path.display()))?;
        let source: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };
        self.read_lines(BufReader::new(source))
            .with_context(|| format!("[io::wkb::file] Failed to read {}", path.display()))
    }

    /// Read every selected record from a line source.
    pub fn read_lines(&self, source: impl BufRead) -> Result<Vec<Geometry>> {
        let mut geometries = Vec::new();
        let mut record = 0usize;
        for (index, line) in source.lines().enumerate() {
            if self.limit.is_some_and(|limit| geometries.len() >= limit) {
                break;
            }
            let line = line.with_context(|| format!("[io::wkb::file] Failed to read line {}", index + 1))?;
            let hex = line.trim();
            if hex.is_empty() {
                continue;
            }
            record += 1;
            if record <= self.offset {
                continue;
            }
            let geometry = self.reader.read_hex(hex)
                .with_context(|| format!("[io::wkb::file] Invalid WKB on line {}", index + 1))?;
            geometries.push(geometry);
        }
        trace!("[io::wkb::file] read {} of {} records", geometries.len(), record);
        Ok(geometries)
    }
}
