use std::path::Path;

use anyhow::{bail, Result};
use geocodec::{WkbHexFileReader, WkbReader, WktFileReader, WktReader, WktWriter, WktWriterConfig};
use log::info;

use crate::cli::{Cli, DumpArgs, Format};

pub fn run(_cli: &Cli, args: &DumpArgs) -> Result<()> {
    let format = match args.format {
        Some(format) => format,
        None => guess_format(&args.path)?,
    };

    let geometries = match format {
        Format::Wkb => {
            let mut reader = WkbHexFileReader::new(WkbReader::default()).offset(args.offset);
            if let Some(limit) = args.limit {
                reader = reader.limit(limit);
            }
            reader.read_path(&args.path)?
        }
        Format::Wkt => {
            let mut reader = WktFileReader::new(WktReader::default()).offset(args.offset);
            if let Some(limit) = args.limit {
                reader = reader.limit(limit);
            }
            reader.read_path(&args.path)?
        }
    };
    info!("[dump] read {} geometries from {}", geometries.len(), args.path.display());

    let writer = WktWriter::with_config(WktWriterConfig::builder().emit_srid(args.srid).build());
    for geometry in &geometries {
        println!("{}", writer.write(geometry));
    }

    Ok(())
}

/// Format from the extension, looking through a trailing `.gz`.
fn guess_format(path: &Path) -> Result<Format> {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let name = name.strip_suffix(".gz").unwrap_or(name);
    let extension = Path::new(name).extension().and_then(|e| e.to_str()).unwrap_or_default();
    match extension.to_ascii_lowercase().as_str() {
        "wkt" | "txt" => Ok(Format::Wkt),
        "wkb" | "hex" => Ok(Format::Wkb),
        _ => bail!("[dump] cannot tell the format of {}; pass --format", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_format_from_extension() {
        assert_eq!(guess_format(Path::new("shapes.wkt")).unwrap(), Format::Wkt);
        assert_eq!(guess_format(Path::new("dir/shapes.HEX.gz")).unwrap(), Format::Wkb);
        assert!(guess_format(Path::new("shapes.json")).is_err());
    }
}
