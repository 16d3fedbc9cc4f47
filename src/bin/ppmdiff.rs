//! `ppmdiff`: per-channel RMS error between two PPM images, reconciling
//! mismatched dimensions by taking the element-wise minimum.
//!
//! A companion utility, not part of the core codec contract (spec.md
//! §6): it never reads or writes a COMP40 stream, only PPM files.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use comp40::ppm::read_ppm_untrimmed;

#[derive(Parser)]
#[command(name = "ppmdiff", about = "Compute per-channel RMS error between two PPM images")]
struct Cli {
    /// First PPM file.
    first: PathBuf,
    /// Second PPM file.
    second: PathBuf,

    /// Increase logging verbosity; repeat for more detail (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn open(path: &PathBuf) -> io::Result<Box<dyn Read>> {
    Ok(Box::new(BufReader::new(File::open(path)?)))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new().filter_level(level).init();

    match run(&cli.first, &cli.second) {
        Ok(rms) => {
            println!("{:.6}", rms);
            if rms >= 1.0 {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(first: &PathBuf, second: &PathBuf) -> comp40::error::CodecResult<f64> {
    let mut a = open(first)?;
    let mut b = open(second)?;
    let image_a = read_ppm_untrimmed(&mut a)?;
    let image_b = read_ppm_untrimmed(&mut b)?;
    Ok(rms_error(&image_a, &image_b))
}

/// The comparator's RMS error: `sqrt(sum((r1-r2)^2+(g1-g2)^2+(b1-b2)^2) /
/// (3*W*H))` over the element-wise minimum of the two images' dimensions.
/// Per spec.md §9's open question, the width/height difference is taken
/// as a signed subtraction so it can't wrap around the way an unsigned
/// one would.
fn rms_error(a: &comp40::ppm::UntrimmedPpm, b: &comp40::ppm::UntrimmedPpm) -> f64 {
    let width_diff = (a.width as i64 - b.width as i64).abs();
    let height_diff = (a.height as i64 - b.height as i64).abs();
    if width_diff > 1 || height_diff > 1 {
        error!(
            "dimensions differ by more than one pixel: {}x{} vs {}x{}",
            a.width, a.height, b.width, b.height
        );
        return 1.0;
    }

    let width = a.width.min(b.width);
    let height = a.height.min(b.height);

    let mut sum_sq = 0f64;
    for row in 0..height {
        for col in 0..width {
            let pa = a.pixel(row, col);
            let pb = b.pixel(row, col);
            sum_sq += (pa.r - pb.r) as f64 * (pa.r - pb.r) as f64;
            sum_sq += (pa.g - pb.g) as f64 * (pa.g - pb.g) as f64;
            sum_sq += (pa.b - pb.b) as f64 * (pa.b - pb.b) as f64;
        }
    }

    (sum_sq / (3.0 * width as f64 * height as f64)).sqrt()
}
