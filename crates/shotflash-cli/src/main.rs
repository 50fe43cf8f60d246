//! shotflash Command-Line Interface
//!
//! Turns measurement counts into looping GIFs of qubits flashing on a device
//! diagram.
//!
//! ```text
//!      .   o   .          o   ●   o
//!      o   ●   o    ->    ●   o   ●
//!      .   o   .          o   ●   o
//!
//!            S H O T F L A S H
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{animate, devices, select, version};

/// shotflash - animate quantum measurement shots on device diagrams
#[derive(Parser)]
#[command(name = "shotflash")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render counts as a looping GIF
    Animate(AnimateArgs),

    /// List supported device diagrams
    Devices,

    /// Pick a device diagram for a backend and circuit
    Select {
        /// Backend descriptor (JSON)
        #[arg(short, long)]
        backend: PathBuf,

        /// Number of qubits in the circuit
        #[arg(short, long, conflicts_with = "counts")]
        qubits: Option<usize>,

        /// Take the circuit width from a counts file
        #[arg(short, long)]
        counts: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

/// Options for `shotflash animate`.
#[derive(Args)]
pub struct AnimateArgs {
    /// Counts file (JSON map or result object with a `counts` field)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output GIF
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Diagram style (gate, xray)
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Device name, or `auto` to pick one from the counts
    #[arg(short, long)]
    pub device: Option<String>,

    /// Backend descriptor used with `--device auto`
    #[arg(short, long)]
    pub backend: Option<PathBuf>,

    /// Frames per second
    #[arg(long)]
    pub fps: Option<i64>,

    /// Marker color (name or #rrggbb)
    #[arg(long)]
    pub color: Option<String>,

    /// Marker opacity (0.1-1.0)
    #[arg(long)]
    pub intensity: Option<f32>,

    /// Use the x-ray photo without qubit labels
    #[arg(long)]
    pub unlabelled: bool,

    /// Directory with background PNGs
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// RNG seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show shots in order instead of at random
    #[arg(long)]
    pub sequential: bool,

    /// Configuration file (defaults to ~/.shotflash/config.yaml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Animate(args) => animate::execute(&args),
        Commands::Devices => {
            devices::execute();
            Ok(())
        }
        Commands::Select {
            backend,
            qubits,
            counts,
        } => select::execute(&backend, qubits, counts.as_deref()),
        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
