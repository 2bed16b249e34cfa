use std::fmt::Display;

use der::{
    asn1::{Ia5StringRef, PrintableStringRef, TeletexStringRef, Utf8StringRef},
    oid::db::DB,
    Encode, Tag, Tagged,
};

use crate::utils::{to_hex_str, VecInto};

pub type Name = RdnSequence;

/// Distinguished name rendered the way the report prints subjects and
/// issuers: `KEY=value` attributes joined by `, ` in DER order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RdnSequence(pub Vec<RelativeDistinguishedName>);

impl Display for RdnSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rdn = self
            .0
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}", rdn)
    }
}

impl From<x509_cert::name::RdnSequence> for RdnSequence {
    fn from(value: x509_cert::name::RdnSequence) -> Self {
        Self(value.0.vec_into())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RelativeDistinguishedName(pub Vec<String>);

impl Display for RelativeDistinguishedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

impl From<x509_cert::name::RelativeDistinguishedName> for RelativeDistinguishedName {
    fn from(value: x509_cert::name::RelativeDistinguishedName) -> Self {
        Self(
            value
                .0
                .iter()
                .map(|tv| format!("{}={}", attribute_key(tv.oid), attribute_value(&tv.value)))
                .collect(),
        )
    }
}

/// Shortest registered name for the attribute OID, uppercased ("CN", "O",
/// "C", ...); falls back to the dotted form for unregistered OIDs.
fn attribute_key(oid: der::oid::ObjectIdentifier) -> String {
    DB.find_names_for_oid(oid)
        .min_by_key(|name| name.len())
        .map(|name| name.to_ascii_uppercase())
        .unwrap_or_else(|| oid.to_string())
}

fn attribute_value(value: &der::Any) -> String {
    let text = match value.tag() {
        Tag::PrintableString => PrintableStringRef::try_from(value)
            .ok()
            .map(|s| s.to_string()),
        Tag::Utf8String => Utf8StringRef::try_from(value).ok().map(|s| s.to_string()),
        Tag::Ia5String => Ia5StringRef::try_from(value).ok().map(|s| s.to_string()),
        Tag::TeletexString => TeletexStringRef::try_from(value).ok().map(|s| s.to_string()),
        _ => None,
    };

    match text {
        Some(text) => escape_attribute_value(&text),
        // non-string attribute values print as '#' plus the DER hex form
        None => match value.to_der() {
            Ok(der) => format!("#{}", to_hex_str(&der)),
            Err(_) => "#".to_owned(),
        },
    }
}

fn escape_attribute_value(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let last = text.chars().count().saturating_sub(1);

    for (i, c) in text.chars().enumerate() {
        match c {
            '#' if i == 0 => out.push_str("\\#"),
            ' ' if i == 0 || i == last => out.push_str("\\ "),
            '"' | '+' | ',' | ';' | '<' | '>' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use der::Decode;

    use super::{escape_attribute_value, RdnSequence, RelativeDistinguishedName};

    #[test]
    fn test_rdn_display() {
        let name = RdnSequence(vec![
            RelativeDistinguishedName(vec!["CN=localhost".to_owned()]),
            RelativeDistinguishedName(vec!["O=Example".to_owned()]),
        ]);

        assert_eq!(name.to_string(), "CN=localhost, O=Example");
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape_attribute_value("a,b+c"), "a\\,b\\+c");
        assert_eq!(escape_attribute_value(" padded "), "\\ padded\\ ");
        assert_eq!(escape_attribute_value("#hash"), "\\#hash");
        assert_eq!(escape_attribute_value("plain"), "plain");
    }

    #[test]
    fn test_unknown_attribute_oid_prints_dotted() {
        // jurisdictionOfIncorporationCountryName, value "CN"
        let der_rdn = x509_cert::name::RelativeDistinguishedName::from_der(
            b"\x31\x13\x30\x11\x06\x0b\x2b\x06\x01\x04\x01\x82\x37\x3c\x02\x01\x03\x13\x02\x43\x4e",
        )
        .unwrap();

        let rdn = RelativeDistinguishedName::from(der_rdn);

        assert_eq!(rdn.to_string(), "1.3.6.1.4.1.311.60.2.1.3=CN");
    }
}
