//! Overlap Checker - tells whether two time ranges overlap
//!
//! Runs the HTTP service or evaluates a single pair from the command line.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
