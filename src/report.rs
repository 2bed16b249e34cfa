//! Report rendering.
//!
//! A report is an ordered list of text lines, each carrying the log level
//! it is emitted at. Section order is fixed: header, raw critical
//! extensions, raw non-critical extensions, then the parsed common
//! extensions. Certificates below version 3 short-circuit after the header.

use std::fmt::Display;

use log::Level;

use crate::cert::{
    ext::{registry, DecodedExtensions, ExtField, ExtensionEntry},
    Certificate,
};
use crate::utils::hex_dump;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportLine {
    pub level: Level,
    pub text: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Report {
    pub lines: Vec<ReportLine>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    fn info(&mut self, text: impl Into<String>) {
        self.lines.push(ReportLine {
            level: Level::Info,
            text: text.into(),
        });
    }

    fn debug(&mut self, text: impl Into<String>) {
        self.lines.push(ReportLine {
            level: Level::Debug,
            text: text.into(),
        });
    }

    /// Forward every line through the `log` facade at its level.
    pub fn emit(self: &Self) {
        for line in &self.lines {
            log::log!(line.level, "{}", line.text);
        }
    }

    pub fn texts(self: &Self) -> Vec<&str> {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.texts().join("\n"))
    }
}

/// Full per-certificate report, sections in the fixed order.
pub fn certificate_report(cert: &Certificate) -> Report {
    let mut report = Report::new();

    report.info(format!("Subject: {}", cert.subject));
    report.info(format!("Issuer: {}", cert.issuer));
    report.info(format!("Serial Number: {}", cert.serial_decimal()));
    report.debug(format!("Valid From: {}", cert.validity.not_before));
    report.debug(format!("Valid Until: {}", cert.validity.not_after));
    report.debug(format!("Version: {}", cert.version));
    report.debug(format!("Signature Algorithm: {}", cert.signature_algorithm));

    if cert.version < 3 {
        report.info("");
        report.info("This is not a v3 certificate. No extensions available.");
        return report;
    }

    report.info("");
    report.info("--- X.509 v3 Extensions ---");

    raw_section(&mut report, "Critical Extensions:", cert.critical_extensions());
    raw_section(
        &mut report,
        "Non-Critical Extensions:",
        cert.noncritical_extensions(),
    );

    let decoded = DecodedExtensions::from_certificate(cert);
    report.info("");
    common_section(&mut report, Some(&decoded));

    report
}

/// Just the parsed common-extension section. `None` stands for a missing
/// certificate and produces the two-line error form.
pub fn common_extensions_report(decoded: Option<&DecodedExtensions>) -> Report {
    let mut report = Report::new();
    common_section(&mut report, decoded);

    report
}

fn raw_section(report: &mut Report, title: &str, entries: Vec<&ExtensionEntry>) {
    if entries.is_empty() {
        return;
    }

    report.info("");
    report.info(title);

    for entry in entries {
        report.info(format!("  {} ({})", entry.name(), entry.oid));
        report.info(format!("    Critical: {}", entry.critical));
        report.info(format!("    Length: {} bytes", entry.value.len()));
        if !entry.value.is_empty() {
            report.info(format!("    Raw Value: {}", hex_dump(&entry.value)));
        }
    }
}

fn common_section(report: &mut Report, decoded: Option<&DecodedExtensions>) {
    report.info("--- Common Extensions (Parsed) ---");

    let Some(decoded) = decoded else {
        report.info("Error: Certificate is null");
        return;
    };

    match &decoded.basic_constraints {
        ExtField::Decoded(bc) if bc.ca => {
            report.info("Basic Constraints:");
            report.info("  CA: true");
            report.info(format!("  Path Length: {}", bc.path_length_label()));
        }
        ExtField::Malformed(message) => {
            report.info(format!("Basic Constraints: Error parsing - {}", message));
        }
        // absent and ca=false report the same way
        _ => report.info("Basic Constraints: CA: false"),
    }

    match &decoded.key_usage {
        ExtField::Decoded(ku) => {
            report.info("Key Usage:");
            for name in ku.active_names() {
                report.info(format!("  {}", name));
            }
        }
        ExtField::Malformed(message) => {
            report.info(format!("Key Usage: Error parsing - {}", message));
        }
        ExtField::Absent => {}
    }

    match &decoded.extended_key_usage {
        ExtField::Decoded(eku) => {
            report.info("Extended Key Usage:");
            for oid in &eku.0 {
                report.info(format!(
                    "  {} ({})",
                    registry::extended_key_usage_name(oid),
                    oid
                ));
            }
        }
        ExtField::Malformed(message) => {
            report.info(format!("Extended Key Usage: Error parsing - {}", message));
        }
        ExtField::Absent => {}
    }

    alt_name_lines(report, "Subject Alternative Names", &decoded.subject_alt_names);
    alt_name_lines(report, "Issuer Alternative Names", &decoded.issuer_alt_names);
}

fn alt_name_lines(
    report: &mut Report,
    title: &str,
    names: &ExtField<crate::cert::ext::AltNames>,
) {
    match names {
        ExtField::Decoded(names) if !names.is_empty() => {
            report.info(format!("{}:", title));
            for name in names {
                report.info(format!(
                    "  {}: {}",
                    registry::san_type_name(name.type_tag()),
                    name
                ));
            }
        }
        ExtField::Malformed(message) => {
            report.info(format!("{}: Error parsing - {}", title, message));
        }
        _ => {}
    }
}
