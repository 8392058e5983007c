//! Well-Known Binary, ISO and extended (EWKB) flavours.
//!
//! Record layout: `[byte order][u32 type word][i32 SRID?][body]`, repeated for
//! every element of a multi-geometry or collection.

mod file;
mod read;
mod write;

pub use file::WkbHexFileReader;
pub use read::{WkbReader, WkbReaderConfig, WkbReaderConfigBuilder};
pub use write::{WkbWriter, WkbWriterConfig, WkbWriterConfigBuilder};

/// EWKB flag: coordinates carry Z.
pub const EWKB_Z_FLAG: u32 = 0x8000_0000;
/// EWKB flag: coordinates carry M.
pub const EWKB_M_FLAG: u32 = 0x4000_0000;
/// EWKB flag: an SRID follows the type word.
pub const EWKB_SRID_FLAG: u32 = 0x2000_0000;

/// ISO offset added to the base code for Z.
pub const ISO_Z_OFFSET: u32 = 1000;
/// ISO offset added to the base code for M.
pub const ISO_M_OFFSET: u32 = 2000;
