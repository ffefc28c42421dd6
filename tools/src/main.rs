use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use ticmusic_tools::inspect::{inspect, InspectArgs};
use ticmusic_tools::pack::{pack, PackArgs};

#[derive(Parser)]
#[clap(version, about, long_about = None)]
struct Cli {
    /// Log more about what's going on (repeat for even more)
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbose: u64,

    /// Only log errors
    #[clap(short, long, global = true)]
    quiet: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Pack(PackArgs),
    Inspect(InspectArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse_from(wild::args());

    let level = match (cli.quiet, cli.verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, 2) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };

    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("Could not set up logging")?;

    match cli.command {
        Command::Pack(args) => pack(args),
        Command::Inspect(args) => inspect(&args),
    }
}
