//! CLI entrypoint for `xtract`.
//!
//! Parses command-line arguments, validates the input archive once at the
//! boundary, runs the extraction engine over it, prints a terminal summary,
//! and writes the output artifacts to the requested directory.
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use log::{LevelFilter, error};
use xtract::{engine::Engine, export::save_results, report::render_summary};

#[derive(Parser, Debug)]
#[command(
    name = "xtract-rs",
    version,
    about = "Leak archive credential extractor (Rust)"
)]
struct Args {
    /// Path to the leak archive (.zip)
    #[arg(short = 'z', long = "zipfile")]
    zipfile: PathBuf,

    /// Email domain to search for (e.g. example.com)
    #[arg(short = 'd', long = "domain")]
    domain: String,

    /// Path to the output directory
    #[arg(short = 'o', long = "output")]
    output: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Control color output (auto, always, never)
    #[arg(long = "color", value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Suppress banner and summary output (exports are still written)
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

const ASCII_TITLE: &str = r#"
 /$$   /$$ /$$                                       /$$
| $$  / $$| $$                                      | $$
|  $$/ $$/| $$$$$$$  /$$$$$$  /$$$$$$   /$$$$$$$ /$$$$$$
 \  $$$$/ |_  $$_/  /$$__  $$|____  $$ /$$_____/|_  $$_/
  >$$  $$   | $$   | $$  \__/ /$$$$$$$| $$        | $$
 /$$/\  $$  | $$ /$| $$      /$$__  $$| $$        | $$ /$$
| $$  \ $$  |  $$$$| $$     |  $$$$$$$|  $$$$$$$  |  $$$$/
|__/  |__/   \___/ |__/      \_______/ \_______/   \___/
"#;

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .try_init();
}

fn verify_inputs(args: &Args) -> Result<()> {
    if args.zipfile.extension() != Some(std::ffi::OsStr::new("zip")) {
        bail!(
            "the archive must be a .zip file: {}",
            args.zipfile.display()
        );
    }
    if !args.zipfile.exists() {
        bail!("archive not found: {}", args.zipfile.display());
    }
    if args.domain.trim().is_empty() {
        bail!("the search domain must be non-empty");
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);
    match args.color {
        ColorChoice::Always => {
            colored::control::set_override(true);
        }
        ColorChoice::Never => {
            colored::control::set_override(false);
        }
        ColorChoice::Auto => {}
    }
    if let Err(e) = verify_inputs(&args) {
        error!("{}", e);
        std::process::exit(2);
    }

    if !args.quiet {
        println!("{}", ASCII_TITLE.bold().green());
    }

    let mut engine = Engine::new();
    if let Err(e) = engine.load_from_zip(&args.zipfile, args.domain.trim()) {
        error!("failed to extract from archive: {:#}", e);
        std::process::exit(3);
    }

    if !args.quiet {
        println!("{}", render_summary(&engine));
    }

    if let Err(e) = save_results(&args.output, &engine) {
        error!("failed to write results: {:#}", e);
        std::process::exit(4);
    }
    if !args.quiet {
        println!(
            "All files saved successfully in '{}'.",
            args.output.display()
        );
    }
}
