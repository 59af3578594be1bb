//! CLI frontend for the damage-per-round calculator.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dpr",
    about = "Expected damage per round for d20 weapon and spell builds",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine stages to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter set file with one weapon and one spell set
    Init {
        /// Path of the set file to create
        file: PathBuf,
    },

    /// Compute expected damage for every set in a file
    Calc {
        /// Set file (JSON array of snapshots)
        file: PathBuf,

        /// Only compute the set with this name
        #[arg(short, long)]
        set: Option<String>,

        /// Show damage for every d20 roll
        #[arg(short, long)]
        rolls: bool,
    },

    /// Rank every set against the strongest one
    Compare {
        /// Set file (JSON array of snapshots)
        file: PathBuf,
    },

    /// Export computed results
    Export {
        /// Set file (JSON array of snapshots)
        file: PathBuf,

        /// Output format: json, summary
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the expected value of dice expressions
    Dice {
        /// Expressions such as 2d6+3 or 12
        #[arg(required = true)]
        exprs: Vec<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "dpr_mechanics=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Init { file } => commands::init::run(&file),
        Commands::Calc { file, set, rolls } => commands::calc::run(&file, set.as_deref(), rolls),
        Commands::Compare { file } => commands::compare::run(&file),
        Commands::Export {
            file,
            format,
            output,
        } => commands::export::run(&file, &format, output.as_deref()),
        Commands::Dice { exprs } => commands::dice::run(&exprs),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
