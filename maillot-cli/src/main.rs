//! maillot - clip polygons to a rectangular window
//!
//! Usage:
//!   maillot clip --window 2,2 6,5 --points "3,4 3,1 5,3"
//!   maillot svg <svg> --window 0,0 50,50 [-o out.svg]
//!   maillot batch <job.yaml> [--format json]

mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use cli::{cmd_batch, cmd_clip, cmd_svg, parse_window, OutputFormat};

#[derive(Parser)]
#[command(name = "maillot")]
#[command(author, version, about = "Clip polygons to a rectangular window", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clip one polygon given on the command line
    Clip {
        /// Polygon vertices, e.g. "3,4 3,1 5,3"
        #[arg(short, long, allow_hyphen_values = true)]
        points: String,
        /// Two diagonal corners of the window, e.g. 2,2 6,5
        #[arg(short, long, num_args = 2, value_names = ["X1,Y1", "X2,Y2"], allow_hyphen_values = true, required = true)]
        window: Vec<String>,
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Clip every polygon in an SVG file
    Svg {
        /// Input SVG file
        input: PathBuf,
        /// Two diagonal corners of the window
        #[arg(short, long, num_args = 2, value_names = ["X1,Y1", "X2,Y2"], allow_hyphen_values = true, required = true)]
        window: Vec<String>,
        #[arg(short, long, value_enum, default_value = "svg")]
        format: OutputFormat,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run a YAML job file
    Batch {
        /// Job file
        job: PathBuf,
        /// Overrides the job's format (default: json)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Log to stderr so stdout only carries clipped output.
fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    // Only fails if a subscriber is already installed
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Clip { points, window, format, output } => {
            let rect = parse_window(&window[0], &window[1])?;
            cmd_clip(&points, &rect, format, output.as_deref())
        }
        Commands::Svg { input, window, format, output } => {
            let rect = parse_window(&window[0], &window[1])?;
            cmd_svg(&input, &rect, format, output.as_deref())
        }
        Commands::Batch { job, format, output } => cmd_batch(&job, format, output.as_deref()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
