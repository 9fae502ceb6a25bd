//! CLI definition using clap

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use clap::{Parser, Subcommand};

use overlap_types::OutputFormat;

#[derive(Parser)]
#[command(name = "overlap-checker")]
#[command(author = "keshu")]
#[command(version)]
#[command(about = "Checks whether two time ranges overlap")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP service
    Serve {
        /// Directory holding server.yml (falls back to $CONFIG_PATH)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Extra config file merged over server.yml
        #[arg(long = "override")]
        override_file: Option<PathBuf>,

        /// Listen port, overrides the config file
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },

    /// Check a single pair of ranges (RFC 3339 timestamps)
    Check {
        #[arg(long, value_parser = parse_timestamp)]
        start1: DateTime<FixedOffset>,

        #[arg(long, value_parser = parse_timestamp)]
        end1: DateTime<FixedOffset>,

        #[arg(long, value_parser = parse_timestamp)]
        start2: DateTime<FixedOffset>,

        #[arg(long, value_parser = parse_timestamp)]
        end2: DateTime<FixedOffset>,

        /// Output format
        #[arg(long, short = 'f', default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(value)
        .map_err(|e| format!("'{}' is not an RFC 3339 timestamp: {}", value, e))
}
