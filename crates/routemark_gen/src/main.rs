//! routemark-gen CLI entry point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use routemark_gen::{DEFAULT_OUTPUT_FILE, GenerateOptions, generate};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Generate route registration code from `@RequestMapping` doc annotations.
#[derive(Debug, Parser)]
#[command(name = "routemark-gen", version)]
struct Cli {
    /// Directory whose `.rs` files are scanned
    #[arg(short, long)]
    input_dir: PathBuf,

    /// Name of the generated file, written into the input directory
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output_file: String,

    /// Also log skipped functions and every handler found
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Structured logging with env-based filter, defaulting to info
    let default_filter = if cli.verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let options = GenerateOptions::new(cli.input_dir).output_file(cli.output_file);
    match generate(&options) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
