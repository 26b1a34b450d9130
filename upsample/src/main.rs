//! Command-line front end: `upsample <INPUT> <OUTPUT> <FILTER_HALF_LENGTH>`

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use upsample::filter::{UpsampleConfig, upsample_pix};
use upsample::io::{IoError, read_bmp_file, write_bmp_file};

#[derive(Parser, Debug)]
#[command(name = "upsample")]
#[command(about = "Upsample an 8-bit gray or 24-bit BMP image by 5/2")]
struct Cli {
    /// Source BMP image
    input: PathBuf,
    /// Destination BMP image
    output: PathBuf,
    /// Filter half-length L; each phase kernel has 2L + 1 taps
    filter_half_length: u32,
    /// Log level or filter string (RUST_LOG overrides)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn describe(err: &IoError) -> &'static str {
    match err {
        IoError::NotFound(_) => "file not found",
        IoError::InvalidHeader(_) => "file header error",
        IoError::UnsupportedFormat(_) => "unsupported image format",
        IoError::Truncated => "file data truncated",
        IoError::Io(_) => "I/O error",
        IoError::Core(_) => "invalid image",
    }
}

fn run(cli: &Cli) -> Result<()> {
    let pix = read_bmp_file(&cli.input)
        .map_err(|e| anyhow::anyhow!("{}: {}", describe(&e), e))
        .with_context(|| format!("reading {}", cli.input.display()))?;
    info!(
        "Loaded {} ({}x{}, {} spp)",
        cli.input.display(),
        pix.width(),
        pix.height(),
        pix.spp()
    );

    let config = UpsampleConfig::new(cli.filter_half_length);
    info!("Start filtering");
    let start = Instant::now();
    let out = upsample_pix(&pix, &config).context("filtering failed")?;
    info!("Runtime: {:.3} s", start.elapsed().as_secs_f64());

    write_bmp_file(&out, &cli.output)
        .map_err(|e| anyhow::anyhow!("{}: {}", describe(&e), e))
        .with_context(|| format!("writing {}", cli.output.display()))?;
    info!(
        "Wrote {} ({}x{})",
        cli.output.display(),
        out.width(),
        out.height()
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _logger = match upsample::setup_logging(&cli.log_level) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("logger initialization failed: {}", e);
            None
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Logging may be off, so the message always reaches stderr
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
