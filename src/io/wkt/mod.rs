//! Well-Known Text, with the `SRID=n;` prefix and `Z`/`M`/`ZM` modifiers.

mod file;
mod read;
mod tokenizer;
mod write;

pub use file::WktFileReader;
pub use read::{WktGeometries, WktReader, WktReaderConfig, WktReaderConfigBuilder};
pub use write::{to_line_string_text, to_point_text, WktWriter, WktWriterConfig, WktWriterConfigBuilder};
