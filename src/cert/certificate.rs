use std::{fmt::Display, io::Read};

use chrono::{DateTime, Utc};
use der::{
    oid::db::rfc5912::{
        ECDSA_WITH_SHA_224, ECDSA_WITH_SHA_256, ECDSA_WITH_SHA_384, ECDSA_WITH_SHA_512,
        SHA_1_WITH_RSA_ENCRYPTION, SHA_224_WITH_RSA_ENCRYPTION, SHA_256_WITH_RSA_ENCRYPTION,
        SHA_384_WITH_RSA_ENCRYPTION, SHA_512_WITH_RSA_ENCRYPTION,
    },
    Decode,
};
use num_bigint::BigUint;

use crate::{
    errors::{CertInspectError, CertInspectErrorKind, CertInspectResult},
    utils::VecInto,
};

use super::{ext::ExtensionEntry, name::RdnSequence};

/// Read-only view of a parsed X.509 certificate, carrying exactly what the
/// extension report needs. The original `x509_cert` object stays inside for
/// the structured extension decode.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Certificate {
    /// 1-based certificate version (1, 2 or 3).
    pub version: u8,
    pub serial_number: Vec<u8>,
    pub subject: RdnSequence,
    pub issuer: RdnSequence,
    pub validity: Validity,
    pub signature_algorithm: SignatureAlgorithm,
    /// Raw extension listing in certificate order.
    pub extensions: Vec<ExtensionEntry>,
    __inner: x509_cert::Certificate,
}

impl TryFrom<x509_cert::Certificate> for Certificate {
    type Error = CertInspectError;

    fn try_from(value: x509_cert::Certificate) -> Result<Self, Self::Error> {
        let __inner_original_cert = value.clone();
        let version = value.tbs_certificate.version as u8 + 1;
        let serial_number = value.tbs_certificate.serial_number.as_bytes().to_vec();
        let subject = value.tbs_certificate.subject.into();
        let issuer = value.tbs_certificate.issuer.into();
        let validity = value.tbs_certificate.validity.into();
        let signature_algorithm = value.signature_algorithm.into();
        let extensions = value
            .tbs_certificate
            .extensions
            .unwrap_or_default()
            .vec_into();

        Ok(Self {
            version,
            serial_number,
            subject,
            issuer,
            validity,
            signature_algorithm,
            extensions,
            __inner: __inner_original_cert,
        })
    }
}

impl Certificate {
    // 从 DER 数据导入证书
    pub fn load_der(bin: &[u8]) -> Result<Self, CertInspectError> {
        x509_cert::Certificate::from_der(bin)
            .map_app_err(CertInspectErrorKind::InvalidCertificate)?
            .try_into()
    }

    // 从 PEM 文件导入证书链
    pub fn load_pem_chain(input: &str) -> Result<Vec<Self>, CertInspectError> {
        fn find_boundary<T>(haystack: &[T], needle: &[T]) -> Option<usize>
        where
            for<'a> &'a [T]: PartialEq,
        {
            haystack
                .windows(needle.len())
                .position(|window| window == needle)
        }

        let mut certs = Vec::new();
        let mut position: usize = 0;

        if input.trim().is_empty() {
            return Err(CertInspectError {
                kind: CertInspectErrorKind::InvalidPEMCertificate,
                message: "empty input".to_owned(),
            });
        }

        let start_boundary = &b"-----BEGIN CERTIFICATE-----"[..];
        let end_boundary = &b"-----END CERTIFICATE-----"[..];

        let mut input = input.as_bytes();

        // Strip the trailing whitespaces
        loop {
            if input.is_empty() {
                break;
            }
            let last_pos = input.len() - 1;

            match input.get(last_pos) {
                Some(b'\r') | Some(b'\n') => {
                    input = &input[..last_pos];
                }
                _ => break,
            }
        }

        while position < input.len() - 1 {
            let rest = &input[position..];
            let start_pos = find_boundary(rest, start_boundary).ok_or(CertInspectError {
                kind: CertInspectErrorKind::InvalidPEMCertificate,
                message: "".to_owned(),
            })?;
            let end_pos = find_boundary(rest, end_boundary).ok_or(CertInspectError {
                kind: CertInspectErrorKind::InvalidPEMCertificate,
                message: "".to_owned(),
            })? + end_boundary.len();

            let cert_buf = &rest[start_pos..end_pos];

            let mut decoder = pem_rfc7468::Decoder::new_detect_wrap(cert_buf)
                .map_app_err(CertInspectErrorKind::InvalidPEMCertificate)?;
            let mut buf = vec![];
            decoder
                .read_to_end(&mut buf)
                .map_app_err(CertInspectErrorKind::InvalidPEMCertificate)?;

            certs.push(Self::load_der(&buf)?);

            position += end_pos;
        }

        Ok(certs)
    }

    /// Serial number in decimal, the way certificate reports print it.
    pub fn serial_decimal(self: &Self) -> String {
        BigUint::from_bytes_be(&self.serial_number).to_str_radix(10)
    }

    /// Critical extensions sorted by OID string for deterministic output.
    pub fn critical_extensions(self: &Self) -> Vec<&ExtensionEntry> {
        self.extension_entries(true)
    }

    /// Non-critical extensions sorted by OID string.
    pub fn noncritical_extensions(self: &Self) -> Vec<&ExtensionEntry> {
        self.extension_entries(false)
    }

    fn extension_entries(self: &Self, critical: bool) -> Vec<&ExtensionEntry> {
        let mut entries: Vec<&ExtensionEntry> = self
            .extensions
            .iter()
            .filter(|entry| entry.critical == critical)
            .collect();
        entries.sort_by(|a, b| a.oid.cmp(&b.oid));

        entries
    }

    pub(crate) fn pkix_extensions(self: &Self) -> Option<&[x509_cert::ext::Extension]> {
        self.__inner.tbs_certificate.extensions.as_deref()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SignatureAlgorithm {
    Sha1WithRSA,
    Sha224WithRSA,
    Sha256WithRSA,
    Sha384WithRSA,
    Sha512WithRSA,
    Sha224WithECDSA,
    Sha256WithECDSA,
    Sha384WithECDSA,
    Sha512WithECDSA,
    Unsupported(String),
}

impl Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Sha1WithRSA => "SHA1withRSA",
            Self::Sha224WithRSA => "SHA224withRSA",
            Self::Sha256WithRSA => "SHA256withRSA",
            Self::Sha384WithRSA => "SHA384withRSA",
            Self::Sha512WithRSA => "SHA512withRSA",
            Self::Sha224WithECDSA => "SHA224withECDSA",
            Self::Sha256WithECDSA => "SHA256withECDSA",
            Self::Sha384WithECDSA => "SHA384withECDSA",
            Self::Sha512WithECDSA => "SHA512withECDSA",
            Self::Unsupported(oid) => oid,
        };

        write!(f, "{}", name)
    }
}

impl From<x509_cert::spki::AlgorithmIdentifierOwned> for SignatureAlgorithm {
    fn from(value: x509_cert::spki::AlgorithmIdentifierOwned) -> Self {
        match value.oid {
            SHA_1_WITH_RSA_ENCRYPTION => Self::Sha1WithRSA,
            SHA_224_WITH_RSA_ENCRYPTION => Self::Sha224WithRSA,
            SHA_256_WITH_RSA_ENCRYPTION => Self::Sha256WithRSA,
            SHA_384_WITH_RSA_ENCRYPTION => Self::Sha384WithRSA,
            SHA_512_WITH_RSA_ENCRYPTION => Self::Sha512WithRSA,
            ECDSA_WITH_SHA_224 => Self::Sha224WithECDSA,
            ECDSA_WITH_SHA_256 => Self::Sha256WithECDSA,
            ECDSA_WITH_SHA_384 => Self::Sha384WithECDSA,
            ECDSA_WITH_SHA_512 => Self::Sha512WithECDSA,
            oid => Self::Unsupported(oid.to_string()),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Validity {
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
}

impl From<x509_cert::time::Validity> for Validity {
    fn from(value: x509_cert::time::Validity) -> Self {
        let to_utc = |time: x509_cert::time::Time| {
            DateTime::from_timestamp(time.to_unix_duration().as_secs() as i64, 0)
                .unwrap_or(DateTime::UNIX_EPOCH)
        };

        Self {
            not_before: to_utc(value.not_before),
            not_after: to_utc(value.not_after),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_der_v3() {
        let cert = Certificate::load_der(include_bytes!("../examples/server.der")).unwrap();

        assert_eq!(cert.version, 3);
        assert_eq!(cert.signature_algorithm, SignatureAlgorithm::Sha256WithRSA);
        assert_eq!(cert.signature_algorithm.to_string(), "SHA256withRSA");
        assert!(cert.subject.to_string().starts_with("CN=localhost"));
        assert!(cert
            .issuer
            .to_string()
            .starts_with("CN=CertInspect Test CA"));
    }

    #[test]
    fn test_serial_decimal() {
        let cert = Certificate::load_der(include_bytes!("../examples/server.der")).unwrap();

        assert_eq!(
            cert.serial_decimal(),
            "601548407995904520069491074531890016898898477428"
        );
    }

    #[test]
    fn test_load_der_v1() {
        let cert = Certificate::load_der(include_bytes!("../examples/legacy_v1.der")).unwrap();

        assert_eq!(cert.version, 1);
        assert!(cert.extensions.is_empty());
        assert_eq!(cert.serial_decimal(), "4242");
    }

    #[test]
    fn test_load_pem_chain() {
        let certs =
            Certificate::load_pem_chain(include_str!("../examples/chain.pem")).unwrap();

        assert_eq!(certs.len(), 2);
        assert!(certs[0].subject.to_string().starts_with("CN=localhost"));
        assert!(certs[1]
            .subject
            .to_string()
            .starts_with("CN=CertInspect Test CA"));
    }

    #[test]
    fn test_load_pem_chain_rejects_garbage() {
        assert!(Certificate::load_pem_chain("no pem here").is_err());
    }

    #[test]
    fn test_extension_partitions_are_sorted() {
        let cert = Certificate::load_der(include_bytes!("../examples/server.der")).unwrap();

        let critical: Vec<&str> = cert
            .critical_extensions()
            .iter()
            .map(|e| e.oid.as_str())
            .collect();
        let noncritical: Vec<&str> = cert
            .noncritical_extensions()
            .iter()
            .map(|e| e.oid.as_str())
            .collect();

        // basic constraints + key usage are critical in the fixture
        assert_eq!(critical, vec!["2.5.29.15", "2.5.29.19"]);
        // EKU + SAN are not
        assert_eq!(noncritical, vec!["2.5.29.17", "2.5.29.37"]);
    }
}
