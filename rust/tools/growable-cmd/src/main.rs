use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod utils;

#[derive(Parser)]
#[command(name = "growable-cmd")]
#[command(about = "Command-line utility for exercising growable arrays")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay the ArrayList walkthrough: create with capacity 2, add five values,
    /// then get, set, remove, size and clear
    Demo {
        /// Print a JSON summary instead of the step-by-step listing
        #[arg(long)]
        json: bool,
    },

    /// Run a script of operations against an array of 64-bit integers
    ///
    /// Operations: push:V, get:I, set:I:V, remove:I, len, clear
    Run {
        /// Initial capacity of the array
        #[arg(short, long, default_value_t = 4)]
        capacity: usize,

        /// Maximum number of bytes the array may hold (e.g. 4096, 64K, 1M)
        #[arg(short, long, value_parser = utils::parse_size)]
        memory_limit: Option<u64>,

        /// Report failing operations and continue instead of stopping at the first one
        #[arg(short, long)]
        keep_going: bool,

        /// Print a JSON summary instead of the step-by-step listing
        #[arg(long)]
        json: bool,

        /// Operations to apply, in order
        #[arg(required = true, allow_hyphen_values = true)]
        ops: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { json } => commands::demo::run(json),
        Commands::Run {
            capacity,
            memory_limit,
            keep_going,
            json,
            ops,
        } => commands::run::run(capacity, memory_limit, keep_going, json, ops),
    }
}
