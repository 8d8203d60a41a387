//! BucketStore CLI
//!
//! Demo driver for the bucketed key-value store.
//!
//! # Commands
//!
//! - `run` - Insert hashed timestamp keys and report the final size
//! - `scenario` - Replay the capacity-3 walkthrough and print the layout
//! - `version` - Show version information

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// BucketStore command-line demo driver.
#[derive(Parser)]
#[command(name = "bucketstore")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert hashed timestamp keys and report the final size
    Run {
        /// Number of keys to generate
        #[arg(short = 'n', long, default_value = "100000000")]
        count: u64,

        /// Entries per segment
        #[arg(short, long, default_value_t = bucketstore_core::DEFAULT_CAPACITY)]
        capacity: usize,

        /// Print the stored value whenever a generated key already exists
        #[arg(long)]
        print_hits: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Replay the capacity-3 walkthrough and print the store layout
    Scenario,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Run {
            count,
            capacity,
            print_hits,
            format,
        } => {
            commands::run::run(count, capacity, print_hits, &format)?;
        }
        Commands::Scenario => {
            commands::scenario::run()?;
        }
        Commands::Version => {
            println!("BucketStore CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("BucketStore Core v{}", bucketstore_core::VERSION);
        }
    }

    Ok(())
}
