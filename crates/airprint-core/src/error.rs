// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the AirPrint generator.

use thiserror::Error;

/// Top-level error type for all generator operations.
#[derive(Debug, Error)]
pub enum AirPrintError {
    // -- Spooler errors --
    /// The print spooler could not be reached or refused the printer listing.
    /// This is the only error that aborts a whole generation run.
    #[error("cannot connect to print spooler: {0}")]
    Connection(String),

    #[error("could not read capability descriptor for {printer}: {reason}")]
    DescriptorFetch { printer: String, reason: String },

    // -- Output errors --
    #[error("service file encoding failed: {0}")]
    Render(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AirPrintError {
    /// Whether this error should abort the whole run rather than a single printer.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, AirPrintError>;
