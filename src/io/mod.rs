//! Codec module for the geometry interchange formats.
//!
//! Each format module handles reading and writing for one encoding.
//!
//! # Format Modules
//!
//! - `wkb` - Well-Known Binary, ISO and extended (EWKB), plus hex-per-line files
//! - `wkt` - Well-Known Text, including the `SRID=n;` prefix and WKT files
//!
//! `endian` and `number` hold the byte-level and decimal primitives both share.

pub mod endian;
pub mod number;
pub mod wkb;
pub mod wkt;

pub use number::OrdinateFormat;
