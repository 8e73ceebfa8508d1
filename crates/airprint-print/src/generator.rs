// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One generation pass: list printers, derive capabilities for each shared
// one, and write its Avahi service file.
//
// Only a spooler that cannot be reached fails the run.  Everything that goes
// wrong for a single printer is logged and confined to that printer.

use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use airprint_core::config::GeneratorConfig;
use airprint_core::error::Result;
use airprint_core::types::PrinterRecord;

use crate::advertisement::AdvertisementDocument;
use crate::capabilities::PrinterCapabilities;
use crate::spooler::PrintSpooler;

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Service files written.
    pub generated: Vec<PathBuf>,
    /// Printers skipped because they are not shared.
    pub skipped: Vec<String>,
    /// Printers whose service file could not be written, with the reason.
    pub failed: Vec<(String, String)>,
}

/// Drives a generation pass against a spooler.
pub struct Generator<S> {
    spooler: S,
    config: GeneratorConfig,
}

impl<S: PrintSpooler> Generator<S> {
    pub fn new(spooler: S, config: GeneratorConfig) -> Self {
        Self { spooler, config }
    }

    /// Run once.  Returns `Err` only when the printer list cannot be obtained.
    pub async fn run(&self) -> Result<RunReport> {
        let mut printers = self.spooler.list_printers().await.inspect_err(|e| {
            error!(error = %e, "cannot list printers");
        })?;

        let mut report = RunReport::default();
        if printers.is_empty() {
            info!("no printers found");
            return Ok(report);
        }

        if self.config.sort_printers {
            printers.sort_by(|a, b| a.name.cmp(&b.name));
        }

        for printer in &printers {
            if !printer.shared {
                info!(printer = %printer.name, "skipping printer, not shared");
                report.skipped.push(printer.name.clone());
                continue;
            }

            match self.generate_one(printer).await {
                Ok(path) => report.generated.push(path),
                Err(e) => {
                    error!(printer = %printer.name, error = %e, "failed to write service file");
                    report.failed.push((printer.name.clone(), e.to_string()));
                }
            }
        }

        info!(
            generated = report.generated.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "generation complete"
        );
        Ok(report)
    }

    /// Derive capabilities for one shared printer and write its service file.
    async fn generate_one(&self, printer: &PrinterRecord) -> Result<PathBuf> {
        let descriptor = self.descriptor_text(&printer.name).await;
        let caps = PrinterCapabilities::derive(
            descriptor.as_deref(),
            &printer.name,
            &printer.make_and_model,
        );

        AdvertisementDocument::for_printer(printer, &caps)
            .write_to(&self.config.service_dir, &printer.name)
    }

    /// PPD text for `printer`, or `None` when it cannot be fetched or read.
    /// The temporary file is gone by the time this returns.
    async fn descriptor_text(&self, printer: &str) -> Option<String> {
        let fetched = self.spooler.fetch_capability_descriptor(printer).await;
        let text = fetched.and_then(|descriptor| {
            debug!(printer, path = %descriptor.path().display(), "reading PPD");
            descriptor.read_text()
        });
        match text {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(printer, error = %e, "could not read PPD, using default capabilities");
                None
            }
        }
    }
}
