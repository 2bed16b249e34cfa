//! Static OID registries used by the report.
//!
//! All lookups are total: anything outside the tables resolves to an
//! explicit "Unknown ..." fallback, never an error.

/// Well-known certificate extension OIDs.
pub const EXTENSION_NAMES: &[(&str, &str)] = &[
    ("2.5.29.19", "Basic Constraints"),
    ("2.5.29.15", "Key Usage"),
    ("2.5.29.37", "Extended Key Usage"),
    ("2.5.29.17", "Subject Alternative Name"),
    ("2.5.29.18", "Issuer Alternative Name"),
    ("2.5.29.14", "Subject Key Identifier"),
    ("2.5.29.35", "Authority Key Identifier"),
    ("2.5.29.31", "CRL Distribution Points"),
    ("1.3.6.1.5.5.7.1.1", "Authority Information Access"),
    ("2.5.29.32", "Certificate Policies"),
    ("2.5.29.36", "Policy Constraints"),
    ("2.5.29.54", "Inhibit Any Policy"),
    ("2.5.29.9", "Subject Directory Attributes"),
];

/// Well-known extended key usage OIDs.
pub const EXTENDED_KEY_USAGE_NAMES: &[(&str, &str)] = &[
    ("1.3.6.1.5.5.7.3.1", "Server Authentication"),
    ("1.3.6.1.5.5.7.3.2", "Client Authentication"),
    ("1.3.6.1.5.5.7.3.3", "Code Signing"),
    ("1.3.6.1.5.5.7.3.4", "Email Protection"),
    ("1.3.6.1.5.5.7.3.8", "Time Stamping"),
    ("1.3.6.1.5.5.7.3.9", "OCSP Signing"),
    ("1.3.6.1.4.1.311.10.3.3", "Microsoft Server Gated Crypto"),
    ("2.16.840.1.113730.4.1", "Netscape Server Gated Crypto"),
];

/// GeneralName type tags 0 through 8, in tag order.
const SAN_TYPE_NAMES: [&str; 9] = [
    "Other Name",
    "RFC 822 Name (Email)",
    "DNS Name",
    "X.400 Address",
    "Directory Name",
    "EDI Party Name",
    "URI",
    "IP Address",
    "Registered ID",
];

pub fn extension_name(oid: &str) -> &'static str {
    EXTENSION_NAMES
        .iter()
        .find(|(known, _)| *known == oid)
        .map(|(_, name)| *name)
        .unwrap_or("Unknown Extension")
}

pub fn extended_key_usage_name(oid: &str) -> &'static str {
    EXTENDED_KEY_USAGE_NAMES
        .iter()
        .find(|(known, _)| *known == oid)
        .map(|(_, name)| *name)
        .unwrap_or("Unknown EKU")
}

pub fn san_type_name(tag: u32) -> String {
    match SAN_TYPE_NAMES.get(tag as usize) {
        Some(name) => (*name).to_owned(),
        None => format!("Unknown Type ({})", tag),
    }
}
