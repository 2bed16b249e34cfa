//! JKS keystore reading.
//!
//! A JKS file is a big-endian stream: magic, format version, entry count,
//! the entries, then a SHA-1 digest over the password (UTF-16BE), a fixed
//! whitener string and the payload. Only the certificate material is read;
//! protected private-key blobs are skipped, never decrypted.

use chrono::{DateTime, Utc};
use sha1::{Digest, Sha1};
use std::path::Path;

use crate::{
    cert::Certificate,
    errors::{CertInspectError, CertInspectErrorKind, CertInspectResult},
};

const MAGIC: u32 = 0xFEED_FEED;
const WHITENER: &[u8] = b"Mighty Aphrodite";
const DIGEST_LEN: usize = 20;

const TAG_PRIVATE_KEY: u32 = 1;
const TAG_TRUSTED_CERT: u32 = 2;

#[derive(Clone, Debug)]
pub struct Keystore {
    pub entries: Vec<KeystoreEntry>,
}

#[derive(Clone, Debug)]
pub struct KeystoreEntry {
    pub alias: String,
    pub created: DateTime<Utc>,
    pub value: KeystoreValue,
}

#[derive(Clone, Debug)]
pub enum KeystoreValue {
    TrustedCertificate(Certificate),
    /// A key entry's certificate chain, leaf first. The protected key bytes
    /// themselves are not kept.
    KeyEntry { chain: Vec<Certificate> },
    /// Entry whose certificate is not X.509, or whose bytes do not parse.
    Opaque { cert_type: String },
}

impl Keystore {
    pub fn open<P: AsRef<Path>>(
        filename: P,
        password: Option<&str>,
    ) -> Result<Self, CertInspectError> {
        let data = std::fs::read(filename).map_app_err(CertInspectErrorKind::IoError)?;

        Self::parse(&data, password)
    }

    pub fn parse(data: &[u8], password: Option<&str>) -> Result<Self, CertInspectError> {
        if data.len() < 12 + DIGEST_LEN {
            return Err(CertInspectError {
                kind: CertInspectErrorKind::InvalidKeystore,
                message: "keystore file is truncated".to_owned(),
            });
        }

        let (body, stored_digest) = data.split_at(data.len() - DIGEST_LEN);

        if let Some(password) = password {
            verify_integrity(body, stored_digest, password)?;
        }

        let mut reader = Reader::new(body);

        let magic = reader.read_u32()?;
        if magic != MAGIC {
            return Err(CertInspectError {
                kind: CertInspectErrorKind::InvalidKeystore,
                message: format!("bad keystore magic 0x{:08x}", magic),
            });
        }

        let version = reader.read_u32()?;
        if version != 1 && version != 2 {
            return Err(CertInspectError {
                kind: CertInspectErrorKind::InvalidKeystore,
                message: format!("unsupported keystore version {}", version),
            });
        }

        let count = reader.read_u32()?;
        // count is untrusted input, so no pre-allocation from it
        let mut entries = Vec::new();

        for _ in 0..count {
            let tag = reader.read_u32()?;
            let alias = reader.read_utf()?;
            let created = reader.read_date()?;

            let value = match tag {
                TAG_PRIVATE_KEY => {
                    let key_len = reader.read_u32()?;
                    reader.skip(key_len as usize)?;

                    let chain_len = reader.read_u32()?;
                    let mut chain = Vec::new();
                    for _ in 0..chain_len {
                        if let Some(cert) = read_cert_record(&mut reader, version)? {
                            chain.push(cert);
                        }
                    }

                    KeystoreValue::KeyEntry { chain }
                }
                TAG_TRUSTED_CERT => {
                    let (cert_type, cert) = read_typed_cert_record(&mut reader, version)?;
                    match cert {
                        Some(cert) => KeystoreValue::TrustedCertificate(cert),
                        None => KeystoreValue::Opaque { cert_type },
                    }
                }
                tag => {
                    return Err(CertInspectError {
                        kind: CertInspectErrorKind::InvalidKeystore,
                        message: format!("unsupported keystore entry tag {}", tag),
                    })
                }
            };

            entries.push(KeystoreEntry {
                alias,
                created,
                value,
            });
        }

        if reader.remaining() != 0 {
            return Err(CertInspectError {
                kind: CertInspectErrorKind::InvalidKeystore,
                message: "trailing data after keystore entries".to_owned(),
            });
        }

        Ok(Self { entries })
    }

    pub fn aliases(self: &Self) -> Vec<&str> {
        self.entries.iter().map(|e| e.alias.as_str()).collect()
    }

    // alias lookup is case-insensitive, matching keystore convention
    pub fn entry(self: &Self, alias: &str) -> Option<&KeystoreEntry> {
        self.entries
            .iter()
            .find(|e| e.alias.eq_ignore_ascii_case(alias))
    }

    /// The X.509 certificate stored under `alias`: the certificate itself
    /// for a trusted entry, the leaf of the chain for a key entry.
    pub fn certificate(self: &Self, alias: &str) -> Option<&Certificate> {
        match &self.entry(alias)?.value {
            KeystoreValue::TrustedCertificate(cert) => Some(cert),
            KeystoreValue::KeyEntry { chain } => chain.first(),
            KeystoreValue::Opaque { .. } => None,
        }
    }
}

fn verify_integrity(
    body: &[u8],
    stored_digest: &[u8],
    password: &str,
) -> Result<(), CertInspectError> {
    let mut md = Sha1::new();
    for unit in password.encode_utf16() {
        md.update(unit.to_be_bytes());
    }
    md.update(WHITENER);
    md.update(body);

    if md.finalize().as_slice() != stored_digest {
        return Err(CertInspectError {
            kind: CertInspectErrorKind::KeystoreIntegrity,
            message: "keystore integrity check failed: password incorrect or file corrupted"
                .to_owned(),
        });
    }

    Ok(())
}

// version 1 records carry no certificate type string and are always X.509
fn read_typed_cert_record(
    reader: &mut Reader<'_>,
    version: u32,
) -> Result<(String, Option<Certificate>), CertInspectError> {
    let cert_type = if version == 2 {
        reader.read_utf()?
    } else {
        "X.509".to_owned()
    };

    let len = reader.read_u32()?;
    let bytes = reader.read_bytes(len as usize)?;

    if cert_type != "X.509" {
        return Ok((cert_type, None));
    }

    Ok((cert_type, Certificate::load_der(bytes).ok()))
}

fn read_cert_record(
    reader: &mut Reader<'_>,
    version: u32,
) -> Result<Option<Certificate>, CertInspectError> {
    let (_, cert) = read_typed_cert_record(reader, version)?;

    Ok(cert)
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(self: &Self) -> usize {
        self.data.len() - self.pos
    }

    fn read_bytes(self: &mut Self, len: usize) -> Result<&'a [u8], CertInspectError> {
        if self.remaining() < len {
            return Err(CertInspectError {
                kind: CertInspectErrorKind::InvalidKeystore,
                message: "unexpected end of keystore data".to_owned(),
            });
        }

        let out = &self.data[self.pos..self.pos + len];
        self.pos += len;

        Ok(out)
    }

    fn skip(self: &mut Self, len: usize) -> Result<(), CertInspectError> {
        self.read_bytes(len).map(|_| ())
    }

    fn read_u16(self: &mut Self) -> Result<u16, CertInspectError> {
        let b = self.read_bytes(2)?;

        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn read_u32(self: &mut Self) -> Result<u32, CertInspectError> {
        let b = self.read_bytes(4)?;

        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_u64(self: &mut Self) -> Result<u64, CertInspectError> {
        let b = self.read_bytes(8)?;

        Ok(u64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    // java writeUTF record: u16 length followed by (modified) UTF-8 bytes
    fn read_utf(self: &mut Self) -> Result<String, CertInspectError> {
        let len = self.read_u16()?;
        let bytes = self.read_bytes(len as usize)?;

        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    fn read_date(self: &mut Self) -> Result<DateTime<Utc>, CertInspectError> {
        let millis = self.read_u64()?;

        Ok(DateTime::from_timestamp_millis(millis as i64).unwrap_or(DateTime::UNIX_EPOCH))
    }
}
