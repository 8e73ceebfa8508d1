// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Generator configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AirPrintError, Result};

/// Directory Avahi watches for static service definitions.
pub const DEFAULT_SERVICE_DIR: &str = "/etc/avahi/services";

/// Local CUPS scheduler.
pub const DEFAULT_CUPS_SERVER: &str = "localhost:631";

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Where `AirPrint-<printer>.service` files are written.
    pub service_dir: PathBuf,
    /// `host:port` of the CUPS scheduler.
    pub cups_server: String,
    /// Process printers in name order instead of spooler order.
    pub sort_printers: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            service_dir: PathBuf::from(DEFAULT_SERVICE_DIR),
            cups_server: DEFAULT_CUPS_SERVER.to_owned(),
            sort_printers: true,
        }
    }
}

impl GeneratorConfig {
    /// Load settings from a JSON file. Fields not present keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| AirPrintError::Config(format!("{}: {e}", path.display())))
    }

    /// IPP endpoint for scheduler-level operations such as CUPS-Get-Printers.
    pub fn ipp_uri(&self) -> String {
        format!("ipp://{}/", self.cups_server)
    }

    /// HTTP location CUPS serves a queue's PPD from.
    pub fn descriptor_url(&self, printer: &str) -> String {
        format!("http://{}/printers/{printer}.ppd", self.cups_server)
    }
}
