// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The print spooler seen from the generator: a source of printer records and
// per-printer capability descriptors (PPD files).

use std::future::Future;
use std::path::{Path, PathBuf};

use tracing::debug;

use airprint_core::error::Result;
use airprint_core::types::PrinterRecord;

/// Source of printers and their capability descriptors.
///
/// [`CupsSpooler`](crate::cups::CupsSpooler) is the production implementation.
pub trait PrintSpooler {
    /// List every printer queue the spooler knows about.
    ///
    /// Fails with `AirPrintError::Connection` when the spooler is unreachable.
    fn list_printers(&self) -> impl Future<Output = Result<Vec<PrinterRecord>>>;

    /// Fetch the capability descriptor for one printer into a temporary file.
    fn fetch_capability_descriptor(
        &self,
        printer: &str,
    ) -> impl Future<Output = Result<TransientDescriptor>>;
}

/// A capability descriptor stored in a temporary file.
///
/// The file is removed when the guard is dropped, whichever way the caller
/// leaves its scope.  Removal errors are ignored.
#[derive(Debug)]
pub struct TransientDescriptor {
    path: PathBuf,
}

impl TransientDescriptor {
    /// Take ownership of `path`; it will be deleted on drop.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the descriptor as text.  Bytes that are not valid UTF-8 are
    /// replaced rather than rejected; PPDs are frequently Latin-1.
    pub fn read_text(&self) -> Result<String> {
        let bytes = std::fs::read(&self.path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Drop for TransientDescriptor {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            debug!(path = %self.path.display(), error = %e, "descriptor cleanup skipped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("printer.ppd");
        std::fs::write(&path, "*ColorDevice: True\n").unwrap();

        {
            let descriptor = TransientDescriptor::new(&path);
            assert_eq!(descriptor.read_text().unwrap(), "*ColorDevice: True\n");
        }
        assert!(!path.exists());
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.ppd");
        std::fs::write(&path, b"*NickName: \"Dr\xfccker\"\n*Resolution 1200dpi").unwrap();

        let text = TransientDescriptor::new(&path).read_text().unwrap();
        assert!(text.contains("1200"));
    }

    #[test]
    fn drop_of_missing_file_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let descriptor = TransientDescriptor::new(dir.path().join("gone.ppd"));
        assert!(descriptor.read_text().is_err());
        drop(descriptor);
    }
}
