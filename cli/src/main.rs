mod cli;
mod commands;
mod settings;

use cli::{Cli, Commands};
use commands::{convert, dump};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);
    match &cli.command {
        Commands::Convert(args) => convert::run(&cli, args),
        Commands::Dump(args) => dump::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
