use clap::Parser;
use picture_optimizer::imaging::RustBackend;
use picture_optimizer::{config, optimize, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "optimize-images")]
#[command(about = "Convert static images to WebP siblings, or delete them")]
#[command(long_about = "\
Convert static images to WebP siblings, or delete them

Every file under optimizer.root whose extension is listed in optimizer.types
is re-encoded to lossy WebP next to the original (logo.jpg → logo.webp).
A WebP that is not strictly smaller than its source is removed again, so
templates fall back to the original.

Settings (optimizer.toml):

  [optimizer]
  root = \"static/images\"
  quality = 100
  types = [\"jpg\", \"jpeg\", \"png\"]
  excluded_folders = [\"originals\"]

  [static]
  url = \"/static/\"
  dirs = [\"static\"]

Log verbosity follows RUST_LOG (default: warn), or -v / -vv.")]
#[command(version)]
struct Cli {
    /// Settings file; relative paths inside it resolve against its directory
    #[arg(long, default_value = "optimizer.toml")]
    config: PathBuf,

    /// Delete every .webp under the root instead of optimizing
    #[arg(long)]
    delete: bool,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        output::print_error(err.as_ref());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = config::load_settings(&cli.config)?;

    if cli.delete {
        let report = optimize::delete_all(&settings.optimizer)?;
        output::print_delete_report(&report);
    } else {
        let report = optimize::optimize(&settings.optimizer, &RustBackend::new())?;
        output::print_optimize_report(&report);
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
