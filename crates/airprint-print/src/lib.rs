// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// AirPrint Print — CUPS printer listing, PPD capability derivation, and Avahi
// service file rendering.  This crate connects the domain types defined in
// `airprint-core` to the spooler and to the files Avahi advertises.

pub mod advertisement;
pub mod capabilities;
pub mod cups;
pub mod generator;
pub mod spooler;

pub use advertisement::AdvertisementDocument;
pub use capabilities::PrinterCapabilities;
pub use cups::CupsSpooler;
pub use generator::{Generator, RunReport};
pub use spooler::{PrintSpooler, TransientDescriptor};
