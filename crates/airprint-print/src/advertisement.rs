// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Avahi static service file for one AirPrint printer.
//
// Avahi picks up `*.service` files from its services directory and announces
// them over mDNS.  The document advertises the CUPS queue as `_ipp._tcp` with
// the `_universal` subtype iOS looks for, plus the TXT records AirPrint
// clients expect.  Some iOS versions are sensitive to TXT record order, so
// the order below is fixed.

use std::path::{Path, PathBuf};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::info;

use airprint_core::error::{AirPrintError, Result};
use airprint_core::types::PrinterRecord;

use crate::capabilities::PrinterCapabilities;

/// IPP over plain TCP.
pub const SERVICE_TYPE: &str = "_ipp._tcp";

/// Subtype AirPrint clients browse for.
pub const SERVICE_SUBTYPE: &str = "_universal._sub._ipp._tcp";

/// CUPS listens on the IANA IPP port.
pub const SERVICE_PORT: u16 = 631;

/// Document formats CUPS can accept from AirPrint clients.
const PDL: [&str; 7] = [
    "application/octet-stream",
    "application/pdf",
    "application/postscript",
    "image/urf",
    "image/jpeg",
    "image/png",
    "image/pwg-raster",
];

/// A rendered-but-not-yet-written service definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvertisementDocument {
    /// Instance name; Avahi replaces `%h` with the host name.
    pub service_name: String,
    pub service_type: &'static str,
    pub subtype: &'static str,
    pub port: u16,
    /// TXT records as `(key, value)` pairs in advertisement order.
    pub txt_records: Vec<(String, String)>,
}

impl AdvertisementDocument {
    /// Build the advertisement for a shared printer.
    pub fn for_printer(printer: &PrinterRecord, caps: &PrinterCapabilities) -> Self {
        let flag = |b: bool| if b { "T" } else { "F" };

        let mut txt_records: Vec<(String, String)> = [
            ("txtvers", "1".to_owned()),
            ("qtotal", "1".to_owned()),
            ("rp", format!("printers/{}", printer.name)),
            ("ty", printer.make_and_model.clone()),
            ("note", printer.note().to_owned()),
            ("product", format!("({})", printer.make_and_model)),
            ("pdl", PDL.join(",")),
            ("Color", flag(caps.supports_color).to_owned()),
            ("Duplex", flag(caps.supports_duplex).to_owned()),
            ("URF", caps.urf()),
            ("printer-state", printer.state.to_string()),
            ("printer-type", caps.printer_type().to_owned()),
            ("Transparent", "T".to_owned()),
            ("Binary", "T".to_owned()),
            ("PaperMax", "legal-A4".to_owned()),
            ("kind", "document,envelope,photo".to_owned()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v))
        .collect();

        if let Some(ip) = printer.admin_ipv4() {
            txt_records.push(("adminurl".to_owned(), format!("http://{ip}")));
        }

        Self {
            service_name: format!("AirPrint {} @ %h", printer.info),
            service_type: SERVICE_TYPE,
            subtype: SERVICE_SUBTYPE,
            port: SERVICE_PORT,
            txt_records,
        }
    }

    /// File name Avahi will see for `printer_name`.
    pub fn file_name(printer_name: &str) -> String {
        format!("AirPrint-{printer_name}.service")
    }

    /// Encode as an indented Avahi service-group XML document.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(render_err)?;
        writer
            .write_event(Event::Start(BytesStart::new("service-group")))
            .map_err(render_err)?;

        let mut name = BytesStart::new("name");
        name.push_attribute(("replace-wildcards", "yes"));
        write_text_element(&mut writer, name, &self.service_name)?;

        writer
            .write_event(Event::Start(BytesStart::new("service")))
            .map_err(render_err)?;
        write_text_element(&mut writer, BytesStart::new("type"), self.service_type)?;
        write_text_element(&mut writer, BytesStart::new("subtype"), self.subtype)?;
        write_text_element(&mut writer, BytesStart::new("port"), &self.port.to_string())?;
        for (key, value) in &self.txt_records {
            write_text_element(&mut writer, BytesStart::new("txt-record"), &format!("{key}={value}"))?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("service")))
            .map_err(render_err)?;
        writer
            .write_event(Event::End(BytesEnd::new("service-group")))
            .map_err(render_err)?;

        let mut xml = String::from_utf8(writer.into_inner()).map_err(render_err)?;
        xml.push('\n');
        Ok(xml)
    }

    /// Write the document to `<dir>/AirPrint-<printer_name>.service`,
    /// replacing any previous version.
    pub fn write_to(&self, dir: &Path, printer_name: &str) -> Result<PathBuf> {
        let path = dir.join(Self::file_name(printer_name));
        std::fs::write(&path, self.to_xml()?)?;
        info!(path = %path.display(), "generated service file");
        Ok(path)
    }

    /// Value of the first TXT record with `key`.
    pub fn txt(&self, key: &str) -> Option<&str> {
        self.txt_records
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, start: BytesStart<'_>, text: &str) -> Result<()> {
    let end = start.to_end().into_owned();
    writer.write_event(Event::Start(start)).map_err(render_err)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(render_err)?;
    writer.write_event(Event::End(end)).map_err(render_err)?;
    Ok(())
}

fn render_err(e: impl std::fmt::Display) -> AirPrintError {
    AirPrintError::Render(e.to_string())
}
