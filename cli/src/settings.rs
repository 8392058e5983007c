use std::path::Path;

use anyhow::{Context, Result};
use geocodec::{
    ByteOrder, GeometryFactory, Ordinates, PrecisionModel, WkbReader, WkbReaderConfig, WkbWriter,
    WkbWriterConfig, WktReader, WktReaderConfig, WktWriter, WktWriterConfig,
};
use serde::{Deserialize, Serialize};

/// Codec settings loaded from a JSON file; command-line flags override them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub byte_order: ByteOrder,
    pub ordinates: Option<Ordinates>,
    pub iso: bool,
    pub strict: bool,
    pub handle_srid: bool,
    pub srid: i32,
    pub precision_model: PrecisionModel,
    pub repair: bool,
    pub pretty: bool,
    pub max_fraction_digits: Option<usize>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("[settings] Failed to read {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("[settings] Invalid settings file {}", path.display()))
    }

    pub fn factory(&self) -> GeometryFactory {
        GeometryFactory::new(self.precision_model, self.srid)
    }

    /// WKB reader; unless strict it repairs short or unclosed rings.
    pub fn wkb_reader(&self) -> WkbReader {
        WkbReader::with_config(self.factory(), WkbReaderConfig::builder().strict(self.strict).build())
    }

    pub fn wkt_reader(&self) -> WktReader {
        WktReader::with_config(self.factory(), WktReaderConfig::builder().repair(self.repair).build())
    }

    /// WKB writer; without explicit ordinates the geometry's own set is used.
    pub fn wkb_writer(&self, natural: Ordinates) -> Result<WkbWriter> {
        let config = WkbWriterConfig::builder()
            .byte_order(self.byte_order)
            .ordinates(self.ordinates.unwrap_or(natural))
            .strict(self.iso)
            .handle_srid(self.handle_srid)
            .build()?;
        Ok(WkbWriter::with_config(config))
    }

    pub fn wkt_writer(&self) -> WktWriter {
        let mut builder = WktWriterConfig::builder()
            .pretty(self.pretty)
            .emit_srid(self.handle_srid)
            .max_ordinates(self.ordinates.unwrap_or(Ordinates::XYZM));
        if let Some(digits) = self.max_fraction_digits {
            builder = builder.max_fraction_digits(digits);
        }
        WktWriter::with_config(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn loads_partial_settings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"byte_order": "bigendian", "ordinates": "XYZ", "precision_model": {{"type": "fixed", "scale": 100.0}}}}"#
        )
        .unwrap();
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.byte_order, ByteOrder::BigEndian);
        assert_eq!(settings.ordinates, Some(Ordinates::XYZ));
        assert_eq!(settings.precision_model, PrecisionModel::Fixed { scale: 100.0 });
        assert!(!settings.handle_srid);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_combinations() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"colour": "red"}}"#).unwrap();
        assert!(Settings::load(file.path()).is_err());

        let settings = Settings { iso: true, handle_srid: true, ..Settings::default() };
        assert!(settings.wkb_writer(Ordinates::XY).is_err());
    }

    #[test]
    fn strict_controls_wkb_repair() {
        // POLYGON((0 0, 1 0, 1 1)), unclosed
        let hex = "0103000000010000000300000000000000000000000000000000000000000000000000F03F0000000000000000000000000000F03F000000000000F03F";
        assert!(Settings::default().wkb_reader().read_hex(hex).is_ok());
        let strict = Settings { strict: true, ..Settings::default() };
        assert!(strict.wkb_reader().read_hex(hex).is_err());
    }
}
