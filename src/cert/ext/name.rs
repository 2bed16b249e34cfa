use std::fmt::Display;

use der::asn1::Utf8StringRef;

use crate::utils::to_hex_str;

pub type AltNames = Vec<GeneralName>;

/// One alternative-name value, tagged the way the GeneralName CHOICE
/// numbers its alternatives (0 through 8). The decoder only ever produces
/// the arms the underlying parser can represent; `X400Address` and
/// `Unknown` exist so the tag space is closed over all nine alternatives.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GeneralName {
    OtherName(String),
    Rfc822Name(String),
    DnsName(String),
    X400Address(String),
    DirectoryName(String),
    EdiPartyName(String),
    UniformResourceIdentifier(String),
    IpAddress(String),
    RegisteredId(String),
    Unknown(u32, String),
}

impl GeneralName {
    /// Numeric GeneralName tag (0-8).
    pub fn type_tag(self: &Self) -> u32 {
        match self {
            Self::OtherName(_) => 0,
            Self::Rfc822Name(_) => 1,
            Self::DnsName(_) => 2,
            Self::X400Address(_) => 3,
            Self::DirectoryName(_) => 4,
            Self::EdiPartyName(_) => 5,
            Self::UniformResourceIdentifier(_) => 6,
            Self::IpAddress(_) => 7,
            Self::RegisteredId(_) => 8,
            Self::Unknown(tag, _) => *tag,
        }
    }

    pub fn value(self: &Self) -> &str {
        match self {
            Self::OtherName(v)
            | Self::Rfc822Name(v)
            | Self::DnsName(v)
            | Self::X400Address(v)
            | Self::DirectoryName(v)
            | Self::EdiPartyName(v)
            | Self::UniformResourceIdentifier(v)
            | Self::IpAddress(v)
            | Self::RegisteredId(v)
            | Self::Unknown(_, v) => v,
        }
    }
}

impl Display for GeneralName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl From<x509_cert::ext::pkix::name::GeneralName> for GeneralName {
    fn from(value: x509_cert::ext::pkix::name::GeneralName) -> Self {
        match value {
            x509_cert::ext::pkix::name::GeneralName::OtherName(name) => Self::OtherName(format!(
                "{} = UTF8String:{}",
                name.type_id,
                Utf8StringRef::try_from(&name.value)
                    .map(|v| v.as_str())
                    .unwrap_or("<parse error>")
            )),
            x509_cert::ext::pkix::name::GeneralName::Rfc822Name(name) => {
                Self::Rfc822Name(name.to_string())
            }
            x509_cert::ext::pkix::name::GeneralName::DnsName(name) => {
                Self::DnsName(name.to_string())
            }
            x509_cert::ext::pkix::name::GeneralName::DirectoryName(name) => {
                Self::DirectoryName(name.to_string())
            }
            x509_cert::ext::pkix::name::GeneralName::EdiPartyName(name) => {
                Self::EdiPartyName(edi_party_label(&name))
            }
            x509_cert::ext::pkix::name::GeneralName::UniformResourceIdentifier(name) => {
                Self::UniformResourceIdentifier(name.to_string())
            }
            x509_cert::ext::pkix::name::GeneralName::IpAddress(name) => {
                Self::IpAddress(format_ip(name.as_bytes()))
            }
            x509_cert::ext::pkix::name::GeneralName::RegisteredId(name) => {
                Self::RegisteredId(name.to_string())
            }
        }
    }
}

fn edi_party_label(name: &x509_cert::ext::pkix::name::EdiPartyName) -> String {
    let assigner = name
        .name_assigner
        .as_ref()
        .map(directory_string)
        .unwrap_or_default();

    format!("{}partyName={}", assigner, directory_string(&name.party_name))
}

fn directory_string(value: &x509_cert::ext::pkix::name::DirectoryString) -> String {
    match value {
        x509_cert::ext::pkix::name::DirectoryString::PrintableString(ss) => ss.to_string(),
        x509_cert::ext::pkix::name::DirectoryString::TeletexString(ss) => ss.to_string(),
        x509_cert::ext::pkix::name::DirectoryString::Utf8String(ss) => ss.to_string(),
    }
}

// 4 bytes is IPv4, 16 is IPv6; anything else dumps as plain hex
fn format_ip(bytes: &[u8]) -> String {
    match bytes.len() {
        4 => format!("{}.{}.{}.{}", bytes[0], bytes[1], bytes[2], bytes[3]),
        16 => bytes
            .chunks(2)
            .map(|pair| format!("{:x}", u16::from_be_bytes([pair[0], pair[1]])))
            .collect::<Vec<String>>()
            .join(":"),
        _ => to_hex_str(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::{format_ip, GeneralName};

    #[test]
    fn test_type_tags() {
        assert_eq!(GeneralName::OtherName("".into()).type_tag(), 0);
        assert_eq!(GeneralName::Rfc822Name("".into()).type_tag(), 1);
        assert_eq!(GeneralName::DnsName("".into()).type_tag(), 2);
        assert_eq!(GeneralName::X400Address("".into()).type_tag(), 3);
        assert_eq!(GeneralName::DirectoryName("".into()).type_tag(), 4);
        assert_eq!(GeneralName::EdiPartyName("".into()).type_tag(), 5);
        assert_eq!(
            GeneralName::UniformResourceIdentifier("".into()).type_tag(),
            6
        );
        assert_eq!(GeneralName::IpAddress("".into()).type_tag(), 7);
        assert_eq!(GeneralName::RegisteredId("".into()).type_tag(), 8);
        assert_eq!(GeneralName::Unknown(11, "".into()).type_tag(), 11);
    }

    #[test]
    fn test_format_ip() {
        assert_eq!(format_ip(&[127, 0, 0, 1]), "127.0.0.1");
        assert_eq!(
            format_ip(&[0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]),
            "2001:db8:0:0:0:0:0:1"
        );
        assert_eq!(format_ip(&[1, 2, 3]), "010203");
    }

    #[test]
    fn test_display_is_value() {
        let name = GeneralName::DnsName("example.test".into());

        assert_eq!(name.to_string(), "example.test");
    }
}
