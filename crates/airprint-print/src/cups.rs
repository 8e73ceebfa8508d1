// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// CUPS as the print spooler.
//
// Printers are listed with the CUPS-Get-Printers extension operation over
// IPP (the `ipp` crate's async client).  PPDs are fetched the same way
// `cupsGetPPD` does it: an HTTP GET of `/printers/<name>.ppd` on the
// scheduler, saved to a temporary file.

use std::collections::HashMap;
use std::io::Write;

use ipp::prelude::*;
use tracing::{debug, error, instrument, warn};

use airprint_core::config::GeneratorConfig;
use airprint_core::error::{AirPrintError, Result};
use airprint_core::types::{PrinterAttributes, PrinterRecord};

use crate::spooler::{PrintSpooler, TransientDescriptor};

/// Spooler backed by a CUPS scheduler.
pub struct CupsSpooler {
    /// Scheduler IPP endpoint, e.g. `ipp://localhost:631/`.
    uri: Uri,
    http: reqwest::Client,
    config: GeneratorConfig,
}

impl CupsSpooler {
    /// Create a spooler client for the scheduler named in `config`.
    ///
    /// No connection is made until the first request.
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        let raw = config.ipp_uri();
        let uri: Uri = raw
            .parse()
            .map_err(|e| AirPrintError::Config(format!("invalid CUPS server '{raw}': {e}")))?;
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AirPrintError::Config(format!("HTTP client: {e}")))?;
        Ok(Self {
            uri,
            http,
            config: config.clone(),
        })
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }
}

impl PrintSpooler for CupsSpooler {
    #[instrument(skip(self), fields(uri = %self.uri))]
    async fn list_printers(&self) -> Result<Vec<PrinterRecord>> {
        let operation = IppOperationBuilder::cups().get_printers();
        let client = AsyncIppClient::new(self.uri.clone());

        debug!("sending CUPS-Get-Printers");
        let response = client
            .send(operation)
            .await
            .map_err(|e| AirPrintError::Connection(format!("CUPS-Get-Printers: {e}")))?;

        let code = response.header().status_code();
        // CUPS answers not-found when no queues are configured.
        if matches!(code, StatusCode::ClientErrorNotFound) {
            debug!("scheduler reports no printers");
            return Ok(Vec::new());
        }
        if !code.is_success() {
            error!(status = ?code, "CUPS-Get-Printers failed");
            return Err(AirPrintError::Connection(format!(
                "CUPS-Get-Printers returned status {code:?}"
            )));
        }

        let printers = printer_records(response.attributes());
        debug!(count = printers.len(), "received printer list");
        Ok(printers)
    }

    #[instrument(skip(self))]
    async fn fetch_capability_descriptor(&self, printer: &str) -> Result<TransientDescriptor> {
        let url = self.config.descriptor_url(printer);
        let fetch_err = |reason: String| AirPrintError::DescriptorFetch {
            printer: printer.to_owned(),
            reason,
        };

        debug!(url = %url, "fetching PPD");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| fetch_err(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_err(format!("HTTP {status}")));
        }

        let body = response.bytes().await.map_err(|e| fetch_err(e.to_string()))?;

        let mut file = tempfile::Builder::new()
            .prefix("airprint-")
            .suffix(".ppd")
            .tempfile()?;
        file.write_all(&body)?;
        let path = file.into_temp_path().keep().map_err(|e| e.error)?;

        debug!(path = %path.display(), bytes = body.len(), "PPD saved");
        Ok(TransientDescriptor::new(path))
    }
}

/// Convert each printer-attributes group of a CUPS-Get-Printers response
/// into a [`PrinterRecord`].
fn printer_records(attrs: &IppAttributes) -> Vec<PrinterRecord> {
    let mut printers = Vec::new();

    for group in attrs.groups_of(DelimiterTag::PrinterAttributes) {
        let flat: PrinterAttributes = group
            .attributes()
            .iter()
            .map(|(name, attr)| (name.clone(), value_text(attr.value())))
            .collect::<HashMap<_, _>>();

        match flat.get("printer-name") {
            Some(name) if !name.is_empty() => {
                printers.push(PrinterRecord::from_attributes(name, &flat));
            }
            _ => warn!("printer group without printer-name ignored"),
        }
    }

    printers
}

/// String form of an attribute value.  Language-tagged text drops its tag;
/// `Display` would render it as `en:Room 1`.
fn value_text(value: &IppValue) -> String {
    match value {
        IppValue::TextWithLanguage { text, .. } => text.clone(),
        IppValue::NameWithLanguage { name, .. } => name.clone(),
        other => other.to_string(),
    }
}
