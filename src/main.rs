//! py2cpp - command line entry point
//!
//! ```text
//! py2cpp <input_python_file> <output_cpp_file> [-v|-vv]
//! ```
//!
//! Reads the whole input, translates it and writes the result. Translation
//! diagnostics are reported as `tracing` warnings on stderr; they never
//! change the exit code.

use std::path::PathBuf;
use std::process::exit;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use py2cpp::{translate_file, Error};

#[derive(Debug, Parser)]
#[command(name = "py2cpp", version, about = "Translate a Python source file to C++")]
struct Cli {
    /// Python source file to read
    input: PathBuf,

    /// C++ file to write
    output: PathBuf,

    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(_) => {
            let usage = Error::Usage {
                program: "py2cpp".to_string(),
            };
            println!("{}", usage);
            exit(1);
        }
    };

    init_tracing(cli.verbose);

    match translate_file(&cli.input, &cli.output) {
        Ok(translation) => {
            info!(
                input = %cli.input.display(),
                output = %cli.output.display(),
                diagnostics = translation.diagnostics.len(),
                "translated"
            );
            println!("Decompilation completed successfully!");
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            exit(1);
        }
    }
}
