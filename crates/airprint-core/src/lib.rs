// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// AirPrint generator — core types, error definitions, and configuration
// shared by the print and app crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::GeneratorConfig;
pub use error::AirPrintError;
pub use types::*;
