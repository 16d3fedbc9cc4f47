//! `comp40`: compress a PPM image to a COMP40 stream, or decompress one
//! back to PPM.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::error;

use comp40::codec;

#[derive(Parser)]
#[command(name = "comp40", about = "Compress and decompress PPM images")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase logging verbosity; repeat for more detail (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Compress a PPM image into a COMP40 stream.
    Compress {
        /// Input PPM file; reads stdin if omitted.
        input: Option<PathBuf>,
    },
    /// Decompress a COMP40 stream back into a PPM image.
    Decompress {
        /// Input COMP40 file; reads stdin if omitted.
        input: Option<PathBuf>,
    },
}

fn open_input(path: &Option<PathBuf>) -> io::Result<Box<dyn Read>> {
    match path {
        Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();

    let result = match &cli.command {
        Command::Compress { input } => run_compress(input),
        Command::Decompress { input } => run_decompress(input),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    op: impl FnOnce(&mut R, &mut W) -> comp40::error::CodecResult<()>,
) -> comp40::error::CodecResult<()> {
    op(&mut reader, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn run_compress(input: &Option<PathBuf>) -> comp40::error::CodecResult<()> {
    let reader = open_input(input)?;
    let writer = BufWriter::new(io::stdout());
    run(reader, writer, codec::compress)
}

fn run_decompress(input: &Option<PathBuf>) -> comp40::error::CodecResult<()> {
    let reader = open_input(input)?;
    let writer = BufWriter::new(io::stdout());
    run(reader, writer, codec::decompress)
}
