// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// airprint-generate — publish shared CUPS printers to iOS devices.
//
// Entry point. Initialises logging, resolves configuration, makes sure the
// Avahi services directory exists, and runs one generation pass.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use airprint_core::config::GeneratorConfig;
use airprint_core::error::Result;
use airprint_print::{CupsSpooler, Generator, RunReport};

/// Write Avahi AirPrint service files for every shared CUPS printer.
#[derive(Debug, Parser)]
#[command(name = "airprint-generate", version, about)]
struct Cli {
    /// JSON configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory to write `AirPrint-<printer>.service` files into.
    #[arg(long, value_name = "DIR")]
    service_dir: Option<PathBuf>,

    /// CUPS scheduler as host:port.
    #[arg(long, value_name = "HOST:PORT")]
    cups_server: Option<String>,
}

impl Cli {
    fn resolve_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)?,
            None => GeneratorConfig::default(),
        };
        if let Some(dir) = &self.service_dir {
            config.service_dir = dir.clone();
        }
        if let Some(server) = &self.cups_server {
            config.cups_server = server.clone();
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(report) => {
            for (printer, reason) in &report.failed {
                tracing::warn!(printer = %printer, reason = %reason, "no service file written");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "AirPrint generation failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<RunReport> {
    let config = cli.resolve_config()?;
    std::fs::create_dir_all(&config.service_dir)?;
    tracing::info!(
        service_dir = %config.service_dir.display(),
        cups_server = %config.cups_server,
        "generating AirPrint services"
    );

    let spooler = CupsSpooler::new(&config)?;
    let generator = Generator::new(spooler, config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(generator.run())
}
