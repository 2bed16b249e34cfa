use der::{
    oid::db::rfc5912::{ID_CE_ISSUER_ALT_NAME, ID_CE_SUBJECT_ALT_NAME},
    Decode,
};

use crate::utils::VecInto;

pub mod registry;

mod constraints;
mod keyusage;
mod name;

pub use constraints::BasicConstraints;
pub use keyusage::{ExtendedKeyUsage, KeyUsage, KEY_USAGE_NAMES};
pub use name::{AltNames, GeneralName};

use super::Certificate;

pub use der::oid::AssociatedOid;

/// One raw extension as listed in the certificate: OID, criticality and the
/// undecoded DER value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtensionEntry {
    pub oid: String,
    pub critical: bool,
    pub value: Vec<u8>,
}

impl ExtensionEntry {
    pub fn name(self: &Self) -> &'static str {
        registry::extension_name(&self.oid)
    }
}

impl From<x509_cert::ext::Extension> for ExtensionEntry {
    fn from(value: x509_cert::ext::Extension) -> Self {
        Self {
            oid: value.extn_id.to_string(),
            critical: value.critical,
            value: value.extn_value.into_bytes(),
        }
    }
}

/// Decode outcome of a single structured extension. Distinguishes an
/// extension that is not in the certificate from one that is present but
/// whose DER value does not parse.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExtField<T> {
    Absent,
    Decoded(T),
    Malformed(String),
}

impl<T> Default for ExtField<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> ExtField<T> {
    pub fn decoded(self: &Self) -> Option<&T> {
        match self {
            Self::Decoded(value) => Some(value),
            _ => None,
        }
    }
}

/// The structured extensions the report parses, each decoded independently:
/// a malformed value is captured on its own field and never disturbs the
/// others.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DecodedExtensions {
    pub basic_constraints: ExtField<BasicConstraints>,
    pub key_usage: ExtField<KeyUsage>,
    pub extended_key_usage: ExtField<ExtendedKeyUsage>,
    pub subject_alt_names: ExtField<AltNames>,
    pub issuer_alt_names: ExtField<AltNames>,
}

impl DecodedExtensions {
    pub fn from_certificate(cert: &Certificate) -> Self {
        let mut out = Self::default();

        let Some(extensions) = cert.pkix_extensions() else {
            return out;
        };

        for ext in extensions {
            let bytes = ext.extn_value.as_bytes();

            match ext.extn_id {
                BasicConstraints::OID => {
                    out.basic_constraints =
                        match x509_cert::ext::pkix::BasicConstraints::from_der(bytes) {
                            Ok(bc) => ExtField::Decoded(bc.into()),
                            Err(err) => ExtField::Malformed(err.to_string()),
                        };
                }
                KeyUsage::OID => {
                    out.key_usage = match x509_cert::ext::pkix::KeyUsage::from_der(bytes) {
                        Ok(ku) => ExtField::Decoded(ku.into()),
                        Err(err) => ExtField::Malformed(err.to_string()),
                    };
                }
                ExtendedKeyUsage::OID => {
                    out.extended_key_usage =
                        match x509_cert::ext::pkix::ExtendedKeyUsage::from_der(bytes) {
                            // an empty purpose list reports the same as no extension
                            Ok(eku) if eku.0.is_empty() => ExtField::Absent,
                            Ok(eku) => ExtField::Decoded(eku.into()),
                            Err(err) => ExtField::Malformed(err.to_string()),
                        };
                }
                ID_CE_SUBJECT_ALT_NAME => {
                    out.subject_alt_names =
                        match x509_cert::ext::pkix::SubjectAltName::from_der(bytes) {
                            Ok(san) => ExtField::Decoded(san.0.vec_into()),
                            Err(err) => ExtField::Malformed(err.to_string()),
                        };
                }
                ID_CE_ISSUER_ALT_NAME => {
                    out.issuer_alt_names =
                        match x509_cert::ext::pkix::IssuerAltName::from_der(bytes) {
                            Ok(ian) => ExtField::Decoded(ian.0.vec_into()),
                            Err(err) => ExtField::Malformed(err.to_string()),
                        };
                }
                _ => {}
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> Certificate {
        Certificate::load_der(include_bytes!("../examples/server.der")).unwrap()
    }

    fn client() -> Certificate {
        Certificate::load_der(include_bytes!("../examples/client.der")).unwrap()
    }

    #[test]
    fn test_end_entity_basic_constraints() {
        let decoded = DecodedExtensions::from_certificate(&server());
        let bc = decoded.basic_constraints.decoded().unwrap();

        assert!(!bc.ca);
        assert_eq!(bc.path_len_constraint, None);
    }

    #[test]
    fn test_bounded_ca_basic_constraints() {
        let decoded = DecodedExtensions::from_certificate(&client());
        let bc = decoded.basic_constraints.decoded().unwrap();

        assert!(bc.ca);
        assert_eq!(bc.path_len_constraint, Some(0));
        assert_eq!(bc.path_length_label(), "0");
    }

    #[test]
    fn test_unbounded_ca_basic_constraints() {
        let ca = Certificate::load_der(include_bytes!("../examples/ca.der")).unwrap();
        let decoded = DecodedExtensions::from_certificate(&ca);
        let bc = decoded.basic_constraints.decoded().unwrap();

        assert!(bc.ca);
        assert_eq!(bc.path_length_label(), "unlimited");
    }

    #[test]
    fn test_key_usage_flags() {
        let decoded = DecodedExtensions::from_certificate(&server());
        let ku = decoded.key_usage.decoded().unwrap();

        assert_eq!(
            ku.active_names().collect::<Vec<_>>(),
            vec!["Digital Signature", "Key Encipherment"]
        );
    }

    #[test]
    fn test_extended_key_usage_order() {
        let decoded = DecodedExtensions::from_certificate(&server());
        let eku = decoded.extended_key_usage.decoded().unwrap();

        assert_eq!(
            eku.0,
            vec!["1.3.6.1.5.5.7.3.1".to_owned(), "1.3.6.1.5.5.7.3.2".to_owned()]
        );
    }

    #[test]
    fn test_subject_alt_names() {
        let decoded = DecodedExtensions::from_certificate(&server());
        let sans = decoded.subject_alt_names.decoded().unwrap();

        let pairs: Vec<(u32, &str)> = sans.iter().map(|n| (n.type_tag(), n.value())).collect();

        assert_eq!(
            pairs,
            vec![
                (2, "localhost"),
                (2, "server.test.local"),
                (7, "127.0.0.1"),
                (1, "admin@test.local"),
                (6, "https://test.local/"),
            ]
        );
    }

    #[test]
    fn test_issuer_alt_names() {
        let decoded = DecodedExtensions::from_certificate(&client());
        let ians = decoded.issuer_alt_names.decoded().unwrap();

        assert_eq!(ians.len(), 1);
        assert_eq!(ians[0].type_tag(), 1);
        assert_eq!(ians[0].value(), "ca@test.local");
    }

    #[test]
    fn test_absent_fields_stay_absent() {
        let decoded = DecodedExtensions::from_certificate(&server());

        // the server fixture carries no issuer alternative name
        assert_eq!(decoded.issuer_alt_names, ExtField::Absent);
    }

    #[test]
    fn test_v1_certificate_has_no_fields() {
        let cert = Certificate::load_der(include_bytes!("../examples/legacy_v1.der")).unwrap();
        let decoded = DecodedExtensions::from_certificate(&cert);

        assert_eq!(decoded, DecodedExtensions::default());
    }

    #[test]
    fn test_decode_is_idempotent() {
        let cert = server();

        assert_eq!(
            DecodedExtensions::from_certificate(&cert),
            DecodedExtensions::from_certificate(&cert)
        );
    }
}
