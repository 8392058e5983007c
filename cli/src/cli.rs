use std::path::PathBuf;

use geocodec::Ordinates;

/// Geometry codec CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "geocodec", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Convert one geometry between WKT and hex WKB
    Convert(ConvertArgs),

    /// Print every geometry of a hex-WKB or WKT file as WKT
    Dump(DumpArgs),
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Well-Known Text
    Wkt,
    /// Hex-encoded Well-Known Binary, one record per line in files
    Wkb,
}

#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    /// Geometry as WKT or hex WKB, read from stdin when omitted
    pub input: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "wkb")]
    pub to: Format,

    /// JSON settings file (byte order, ordinates, SRID handling, precision, ...)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Output ordinates: XY, XYZ, XYM or XYZM
    #[arg(long)]
    pub ordinates: Option<Ordinates>,

    /// Write big-endian WKB
    #[arg(long)]
    pub big_endian: bool,

    /// Write ISO type codes instead of EWKB flags
    #[arg(long, conflicts_with = "srid")]
    pub iso: bool,

    /// Include the SRID in the output
    #[arg(long)]
    pub srid: bool,

    /// Close and pad malformed rings and lines while reading WKT
    #[arg(long)]
    pub repair: bool,

    /// Reject malformed rings, lines and byte-order tags while reading WKB
    #[arg(long)]
    pub strict: bool,

    /// Pretty-print WKT output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(clap::Args, Debug)]
pub struct DumpArgs {
    /// Input file, optionally gzip-compressed (.gz)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub path: PathBuf,

    /// Input format, guessed from the file extension when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,

    /// Number of geometries to skip
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Maximum number of geometries to print
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Prefix each geometry with its SRID
    #[arg(long)]
    pub srid: bool,
}
