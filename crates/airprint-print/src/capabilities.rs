// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Printer capability derivation from PPD text.
//
// Only three things matter for the AirPrint advertisement: colour, duplex,
// and the maximum resolution.  They are found by plain substring checks on
// the PPD, then overridden for models whose PPDs are known to lie.

use tracing::debug;

/// PPD marker for a colour-capable device.
const COLOR_MARKER: &str = "ColorDevice: True";

/// PPD marker for a duplex option of any kind (including "none").
const DUPLEX_MARKER: &str = "*Duplex";

/// Duplex option values that mean the printer really prints two-sided.
const DUPLEX_VARIANTS: [&str; 2] = ["*Duplex DuplexNoTumble", "*Duplex DuplexTumble"];

/// Resolution used when the PPD gives no hint.
const DEFAULT_DPI: u32 = 600;

/// Model families forced to mono, simplex, 1200 dpi regardless of PPD.
/// Matched against the upper-cased make/model and queue name.
const MONO_LASER_MODELS: [&str; 2] = ["HL-1110", "HL1110"];

/// What the advertisement needs to know about a printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterCapabilities {
    pub supports_color: bool,
    pub supports_duplex: bool,
    pub max_resolution_dpi: u32,
}

impl Default for PrinterCapabilities {
    fn default() -> Self {
        Self {
            supports_color: false,
            supports_duplex: false,
            max_resolution_dpi: DEFAULT_DPI,
        }
    }
}

impl PrinterCapabilities {
    /// Derive capabilities from PPD text and printer identity.
    ///
    /// `descriptor` is `None` when the PPD could not be fetched; the result
    /// is then the defaults, subject to the model override.
    pub fn derive(descriptor: Option<&str>, printer_name: &str, make_and_model: &str) -> Self {
        let mut caps = Self::default();

        if let Some(ppd) = descriptor {
            caps.supports_color = ppd.contains(COLOR_MARKER);

            // A bare "*Duplex" may just be "*Duplex None".
            if ppd.contains(DUPLEX_MARKER) {
                caps.supports_duplex = DUPLEX_VARIANTS.iter().any(|v| ppd.contains(v));
            }

            if ppd.contains("1200") {
                caps.max_resolution_dpi = 1200;
            } else if ppd.contains("600") {
                caps.max_resolution_dpi = 600;
            }
        }

        if is_mono_laser(printer_name, make_and_model) {
            debug!(printer = printer_name, "applying mono laser override");
            caps = Self {
                supports_color: false,
                supports_duplex: false,
                max_resolution_dpi: 1200,
            };
        }

        caps
    }

    /// The `URF` TXT value: raster capabilities iOS uses to decide whether
    /// it can print here.  Token order is fixed.
    pub fn urf(&self) -> String {
        let mut tokens: Vec<String> = Vec::with_capacity(9);
        if self.supports_color {
            tokens.push("SRGB24".into());
        }
        tokens.push("W8".into());
        tokens.push("CP1".into());
        tokens.push("PQ3-4-5".into());
        tokens.push(format!("RS{}", self.max_resolution_dpi));
        tokens.push("IS1-2-3".into());
        tokens.push("MT1-2-3".into());
        tokens.push("OB9".into());
        if self.supports_duplex {
            tokens.push("DM1".into());
        }
        tokens.join(",")
    }

    /// CUPS printer-type bitmask advertised in the TXT record.
    pub fn printer_type(&self) -> &'static str {
        if self.supports_color {
            "0x801044"
        } else {
            "0x1044"
        }
    }
}

fn is_mono_laser(printer_name: &str, make_and_model: &str) -> bool {
    let name = printer_name.to_ascii_uppercase();
    let model = make_and_model.to_ascii_uppercase();
    MONO_LASER_MODELS
        .iter()
        .any(|m| model.contains(m) || name.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_descriptor_gives_defaults() {
        let caps = PrinterCapabilities::derive(None, "Office", "HP LaserJet");
        assert_eq!(caps, PrinterCapabilities::default());
        assert_eq!(caps.max_resolution_dpi, 600);
    }

    #[test]
    fn color_duplex_printer() {
        let ppd = "*ColorDevice: True\n*OpenUI *Duplex/2-Sided: PickOne\n*Duplex DuplexNoTumble: \"\"\n";
        let caps = PrinterCapabilities::derive(Some(ppd), "HP_LaserJet", "HP Color LaserJet");
        assert!(caps.supports_color);
        assert!(caps.supports_duplex);
        assert_eq!(caps.max_resolution_dpi, 600);
        assert_eq!(caps.urf(), "SRGB24,W8,CP1,PQ3-4-5,RS600,IS1-2-3,MT1-2-3,OB9,DM1");
        assert_eq!(caps.printer_type(), "0x801044");
    }

    #[test]
    fn tumble_variant_counts_as_duplex() {
        let caps = PrinterCapabilities::derive(Some("*Duplex DuplexTumble"), "p", "m");
        assert!(caps.supports_duplex);
    }

    #[test]
    fn bare_duplex_marker_is_not_duplex() {
        let caps = PrinterCapabilities::derive(Some("*DefaultDuplex: None\n*Duplex None: \"\""), "p", "m");
        assert!(!caps.supports_duplex);
    }

    #[test]
    fn variant_without_marker_is_ignored() {
        // "DuplexNoTumble" alone, with no "*Duplex" option line.
        let caps = PrinterCapabilities::derive(Some("DuplexNoTumble"), "p", "m");
        assert!(!caps.supports_duplex);
    }

    #[test]
    fn resolution_1200_wins_over_600() {
        let ppd = "*Resolution 600dpi: \"\"\n*Resolution 1200dpi: \"\"";
        let caps = PrinterCapabilities::derive(Some(ppd), "p", "m");
        assert_eq!(caps.max_resolution_dpi, 1200);
    }

    #[test]
    fn mono_laser_override_beats_descriptor() {
        let ppd = "*ColorDevice: True\n*Duplex DuplexNoTumble\n*Resolution 600dpi";
        let caps = PrinterCapabilities::derive(Some(ppd), "Brother_HL1110", "Brother HL-1110 series");
        assert_eq!(
            caps,
            PrinterCapabilities {
                supports_color: false,
                supports_duplex: false,
                max_resolution_dpi: 1200,
            }
        );
        assert_eq!(caps.urf(), "W8,CP1,PQ3-4-5,RS1200,IS1-2-3,MT1-2-3,OB9");
        assert_eq!(caps.printer_type(), "0x1044");
    }

    #[test]
    fn mono_laser_override_is_case_insensitive() {
        let by_name = PrinterCapabilities::derive(None, "brother_hl1110", "Generic");
        let by_model = PrinterCapabilities::derive(None, "downstairs", "brother hl-1110 series");
        assert_eq!(by_name.max_resolution_dpi, 1200);
        assert_eq!(by_model.max_resolution_dpi, 1200);
    }

    #[test]
    fn derivation_is_deterministic() {
        let ppd = "*ColorDevice: True\n*Resolution 1200dpi";
        assert_eq!(
            PrinterCapabilities::derive(Some(ppd), "p", "m"),
            PrinterCapabilities::derive(Some(ppd), "p", "m")
        );
    }
}
