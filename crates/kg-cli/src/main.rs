//! CLI frontend for the Kivotos Guessr deduction game.

mod commands;
mod console;
mod render;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "kg",
    about = "Kivotos Guessr — guess the student from attribute feedback",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively
    Play {
        /// Directory containing the roster data files
        #[arg(short, long, default_value = "data")]
        dir: PathBuf,

        /// Server to play on (jp, gl, cn); defaults to the saved choice
        #[arg(short, long)]
        region: Option<String>,

        /// Read a single unified roster file instead of one file per server
        #[arg(short, long)]
        unified: Option<String>,

        /// RNG seed for a reproducible target sequence
        #[arg(long)]
        seed: Option<u64>,

        /// Settings and statistics file
        #[arg(long, default_value = commands::DEFAULT_STATE_FILE)]
        state: PathBuf,
    },

    /// List the students available on a server
    Roster {
        /// Directory containing the roster data files
        #[arg(short, long, default_value = "data")]
        dir: PathBuf,

        /// Server to list (jp, gl, cn)
        #[arg(short, long, default_value = "jp")]
        region: String,

        /// Read a single unified roster file instead of one file per server
        #[arg(short, long)]
        unified: Option<String>,
    },

    /// Validate roster data files for every server
    Check {
        /// Directory containing the roster data files
        #[arg(short, long, default_value = "data")]
        dir: PathBuf,

        /// Check a single unified roster file instead of one file per server
        #[arg(short, long)]
        unified: Option<String>,
    },

    /// Show or change saved settings
    Settings {
        /// Settings and statistics file
        #[arg(long, default_value = commands::DEFAULT_STATE_FILE)]
        state: PathBuf,

        /// Guess budget per round (1-20)
        #[arg(long)]
        max_guesses: Option<String>,

        /// Enable or disable hints (on, off)
        #[arg(long)]
        hints: Option<String>,

        /// Server (jp, gl, cn)
        #[arg(long)]
        region: Option<String>,

        /// Theme preference (light, dark, auto, system)
        #[arg(long)]
        theme: Option<String>,
    },

    /// Show win/loss statistics
    Stats {
        /// Settings and statistics file
        #[arg(long, default_value = commands::DEFAULT_STATE_FILE)]
        state: PathBuf,

        /// Reset both counters to zero
        #[arg(long)]
        reset: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("KG_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            dir,
            region,
            unified,
            seed,
            state,
        } => commands::play::run(&dir, region.as_deref(), unified, seed, &state),
        Commands::Roster {
            dir,
            region,
            unified,
        } => commands::roster::run(&dir, &region, unified),
        Commands::Check { dir, unified } => commands::check::run(&dir, unified),
        Commands::Settings {
            state,
            max_guesses,
            hints,
            region,
            theme,
        } => commands::settings::run(
            &state,
            commands::settings::Changes {
                max_guesses: max_guesses.as_deref(),
                hints: hints.as_deref(),
                region: region.as_deref(),
                theme: theme.as_deref(),
            },
        ),
        Commands::Stats { state, reset } => commands::stats::run(&state, reset),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
