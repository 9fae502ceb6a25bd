//! Command handlers

use std::path::PathBuf;
use std::sync::Arc;

use overlap_app::config::Configuration;
use overlap_app::{router, server, OverlapEndpoint, ResponseFormatter};
use overlap_domain::model::DateRange;
use overlap_domain::service::{OverlapChecker, StrictOverlapChecker};
use overlap_infra::{logger, TracingLogger};
use overlap_types::{OutputFormat, Result};

use crate::cli::{Cli, Commands};
use crate::output::output_check;

pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve {
            config,
            override_file,
            port,
        } => cmd_serve(config, override_file, port),
        Commands::Check {
            start1,
            end1,
            start2,
            end2,
            format,
        } => cmd_check(DateRange::new(start1, end1), DateRange::new(start2, end2), format),
    }
}

fn cmd_serve(config_dir: Option<PathBuf>, override_file: Option<PathBuf>, port: Option<u16>) -> Result<()> {
    let path = Configuration::config_file(config_dir.as_deref());
    let mut config = Configuration::load(
        &path,
        override_file.as_deref(),
        Configuration::default_env_bindings(),
    )?;
    if let Some(port) = port {
        config.server.port = port;
    }

    // dropping the guard flushes the file writer
    let _guard = logger::init(&config.logger)?;
    tracing::info!("Using config path: {}", path.display());

    let endpoint = OverlapEndpoint::new(
        Arc::new(StrictOverlapChecker),
        Arc::new(TracingLogger),
        ResponseFormatter::default(),
    );
    let app = router(Arc::new(endpoint));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::run(&config, app))
}

fn cmd_check(range1: DateRange, range2: DateRange, format: OutputFormat) -> Result<()> {
    let is_overlap = StrictOverlapChecker.check(&range1, &range2);
    output_check(format, &range1, &range2, is_overlap)
}
