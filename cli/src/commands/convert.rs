use std::io::Read;

use anyhow::{bail, Context, Result};
use geocodec::ByteOrder;
use log::debug;

use crate::cli::{Cli, ConvertArgs, Format};
use crate::settings::Settings;

pub fn run(_cli: &Cli, args: &ConvertArgs) -> Result<()> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    apply_flags(&mut settings, args);

    let input = match &args.input {
        Some(text) => text.clone(),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text).context("[convert] Failed to read stdin")?;
            text
        }
    };
    let input = input.trim();
    if input.is_empty() {
        bail!("[convert] no input geometry");
    }

    let geometry = if looks_like_hex(input) {
        debug!("[convert] reading {} bytes of hex WKB", input.len() / 2);
        settings.wkb_reader().read_hex(input).context("[convert] Failed to parse WKB")?
    } else {
        debug!("[convert] reading WKT");
        settings.wkt_reader().read(input).context("[convert] Failed to parse WKT")?
    };

    let output = match args.to {
        Format::Wkb => settings.wkb_writer(geometry.ordinates())?
            .write_hex(&geometry)
            .context("[convert] Failed to encode WKB")?,
        Format::Wkt => settings.wkt_writer().write(&geometry),
    };
    println!("{output}");

    Ok(())
}

fn apply_flags(settings: &mut Settings, args: &ConvertArgs) {
    if args.ordinates.is_some() {
        settings.ordinates = args.ordinates;
    }
    if args.big_endian {
        settings.byte_order = ByteOrder::BigEndian;
    }
    settings.iso |= args.iso;
    settings.handle_srid |= args.srid;
    settings.repair |= args.repair;
    settings.strict |= args.strict;
    settings.pretty |= args.pretty;
}

fn looks_like_hex(text: &str) -> bool {
    text.len() % 2 == 0 && text.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_detection() {
        assert!(looks_like_hex("0101000000000000000000F03F0000000000000040"));
        assert!(looks_like_hex("00ab"));
        assert!(!looks_like_hex("POINT (1 2)"));
        assert!(!looks_like_hex("abc"));
    }
}
