// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the AirPrint generator.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;

/// Flattened attribute set for one printer as reported by the spooler.
///
/// Keys are IPP attribute names (`printer-is-shared`, `device-uri`, ...);
/// values are their string representations.
pub type PrinterAttributes = HashMap<String, String>;

/// IPP `printer-state` value for an idle printer.
pub const PRINTER_STATE_IDLE: i32 = 3;

/// Make-and-model reported when the spooler has none.
pub const UNKNOWN_MAKE_AND_MODEL: &str = "Unknown Printer";

/// A dotted quad directly after the URI scheme separator.
static DEVICE_IPV4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"://([0-9]+\.[0-9]+\.[0-9]+\.[0-9]+)").expect("device URI pattern is valid")
});

/// A printer queue known to the spooler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterRecord {
    /// Queue name, unique within the spooler.
    pub name: String,
    /// Whether the queue is shared on the network.
    pub shared: bool,
    /// IPP printer-state (3 = idle, 4 = processing, 5 = stopped).
    pub state: i32,
    /// Human-readable description.
    pub info: String,
    /// Physical location; empty when not configured.
    pub location: String,
    pub make_and_model: String,
    /// Backend connection string, e.g. `socket://192.168.1.50:9100`.
    pub device_uri: String,
}

impl PrinterRecord {
    /// Build a record from a spooler attribute set, filling in defaults for
    /// anything missing.
    pub fn from_attributes(name: &str, attrs: &PrinterAttributes) -> Self {
        let shared = attrs
            .get("printer-is-shared")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let state = attrs
            .get("printer-state")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(PRINTER_STATE_IDLE);

        let info = attrs
            .get("printer-info")
            .filter(|v| !v.is_empty())
            .cloned()
            .unwrap_or_else(|| name.to_owned());

        let make_and_model = attrs
            .get("printer-make-and-model")
            .filter(|v| !v.is_empty())
            .cloned()
            .unwrap_or_else(|| UNKNOWN_MAKE_AND_MODEL.to_owned());

        Self {
            name: name.to_owned(),
            shared,
            state,
            info,
            location: attrs.get("printer-location").cloned().unwrap_or_default(),
            make_and_model,
            device_uri: attrs.get("device-uri").cloned().unwrap_or_default(),
        }
    }

    /// Text for the `note` TXT record: the location, or the description when
    /// no location is set.
    pub fn note(&self) -> &str {
        if self.location.is_empty() {
            &self.info
        } else {
            &self.location
        }
    }

    /// IPv4 address embedded in the device URI, used for the admin URL.
    ///
    /// Only literal addresses count; hostnames and IPv6 literals yield `None`.
    pub fn admin_ipv4(&self) -> Option<Ipv4Addr> {
        let caps = DEVICE_IPV4.captures(&self.device_uri)?;
        caps.get(1)?.as_str().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> PrinterAttributes {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn missing_attributes_take_defaults() {
        let record = PrinterRecord::from_attributes("Office", &PrinterAttributes::new());
        assert_eq!(record.name, "Office");
        assert!(!record.shared);
        assert_eq!(record.state, PRINTER_STATE_IDLE);
        assert_eq!(record.info, "Office");
        assert_eq!(record.location, "");
        assert_eq!(record.make_and_model, UNKNOWN_MAKE_AND_MODEL);
        assert_eq!(record.device_uri, "");
    }

    #[test]
    fn attributes_are_parsed() {
        let record = PrinterRecord::from_attributes(
            "HP_LaserJet",
            &attrs(&[
                ("printer-is-shared", "true"),
                ("printer-state", "4"),
                ("printer-info", "HP LaserJet"),
                ("printer-location", "Room 2"),
                ("printer-make-and-model", "HP LaserJet Pro M404"),
                ("device-uri", "socket://10.0.0.7:9100"),
            ]),
        );
        assert!(record.shared);
        assert_eq!(record.state, 4);
        assert_eq!(record.info, "HP LaserJet");
        assert_eq!(record.note(), "Room 2");
        assert_eq!(record.make_and_model, "HP LaserJet Pro M404");
    }

    #[test]
    fn unparsable_state_falls_back_to_idle() {
        let record = PrinterRecord::from_attributes("p", &attrs(&[("printer-state", "idle")]));
        assert_eq!(record.state, PRINTER_STATE_IDLE);
    }

    #[test]
    fn note_falls_back_to_info() {
        let record = PrinterRecord::from_attributes("p", &attrs(&[("printer-info", "Front desk")]));
        assert_eq!(record.note(), "Front desk");
    }

    #[test]
    fn admin_ipv4_from_socket_uri() {
        let record = PrinterRecord::from_attributes(
            "p",
            &attrs(&[("device-uri", "socket://192.168.1.50:9100")]),
        );
        assert_eq!(record.admin_ipv4(), Some(Ipv4Addr::new(192, 168, 1, 50)));
    }

    #[test]
    fn admin_ipv4_absent_for_hostnames_and_usb() {
        for uri in ["", "usb://Brother/HL-1110?serial=123", "ipp://printer.local/ipp/print"] {
            let record = PrinterRecord::from_attributes("p", &attrs(&[("device-uri", uri)]));
            assert_eq!(record.admin_ipv4(), None, "uri {uri:?}");
        }
    }
}
