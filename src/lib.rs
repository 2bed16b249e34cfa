//! Read-only inspector for X.509 v3 certificate extensions.
//!
//! Certificates come out of JKS keystores ([`store::Keystore`]) or PEM
//! bundles ([`cert::Certificate::load_pem_chain`]). Each certificate is
//! decoded into [`cert::ext::DecodedExtensions`] and rendered as an ordered
//! [`report::Report`] emitted through the `log` facade: header block, raw
//! critical/non-critical extension dumps with OID names and hex values,
//! then the parsed common extensions (basic constraints, key usage,
//! extended key usage, subject/issuer alternative names).
//!
//! Nothing here validates, chain-builds or verifies anything; a malformed
//! extension turns into an inline error line and the rest of the report
//! still prints.

use std::path::Path;

use errors::{CertInspectError, CertInspectErrorKind, CertInspectResult};

pub mod cert;
pub mod errors;
pub mod report;
pub mod store;
pub mod utils;

use cert::Certificate;
use report::certificate_report;
use store::Keystore;

/// Open a keystore file and report one alias, or every alias when `alias`
/// is `None`.
pub fn inspect_keystore_file<P: AsRef<Path>>(
    filename: P,
    password: Option<&str>,
    alias: Option<&str>,
) -> Result<(), CertInspectError> {
    let store = Keystore::open(filename, password)?;

    inspect_keystore(&store, alias);

    Ok(())
}

/// Report certificates from an already-loaded keystore. Aliased entries
/// that do not hold an X.509 certificate are skipped with a warning; the
/// rest of the batch still prints.
pub fn inspect_keystore(store: &Keystore, alias: Option<&str>) {
    match alias {
        Some(alias) => inspect_alias(store, alias),
        None => {
            for entry in &store.entries {
                inspect_alias(store, &entry.alias);
                log::info!("");
            }
        }
    }
}

fn inspect_alias(store: &Keystore, alias: &str) {
    match store.certificate(alias) {
        Some(cert) => {
            log::info!("=== Certificate: {} ===", alias);
            certificate_report(cert).emit();
        }
        None => log::warn!(
            "Certificate with alias '{}' is not an X.509 certificate or does not exist",
            alias
        ),
    }
}

/// Report every certificate found in a PEM bundle file.
pub fn inspect_pem_file<P: AsRef<Path>>(filename: P) -> Result<(), CertInspectError> {
    let input =
        std::fs::read_to_string(filename).map_app_err(CertInspectErrorKind::IoError)?;
    let certs = Certificate::load_pem_chain(&input)?;

    for (index, cert) in certs.iter().enumerate() {
        log::info!("=== Certificate {} ===", index + 1);
        certificate_report(cert).emit();
        log::info!("");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::KeystoreValue;

    #[test]
    fn test_inspect_keystore_all_aliases() {
        let store =
            Keystore::parse(include_bytes!("./examples/truststore.jks"), Some("changeit"))
                .unwrap();

        // all three entries are reportable certificates
        for alias in store.aliases() {
            assert!(store.certificate(alias).is_some());
        }

        // emits through the log facade; must not panic without a logger
        inspect_keystore(&store, None);
        inspect_keystore(&store, Some("server"));
        inspect_keystore(&store, Some("no-such-alias"));
    }

    #[test]
    fn test_inspect_keystore_skips_opaque_entries() {
        let store =
            Keystore::parse(include_bytes!("./examples/mixed.jks"), Some("changeit")).unwrap();

        assert!(matches!(
            store.entry("weird").unwrap().value,
            KeystoreValue::Opaque { .. }
        ));

        // the batch keeps going past the non-X.509 entry
        inspect_keystore(&store, None);
    }

    #[test]
    fn test_inspect_keystore_file_missing_path() {
        let err = inspect_keystore_file("/nonexistent/path.jks", Some("changeit"), None)
            .unwrap_err();

        assert_eq!(err.kind, CertInspectErrorKind::IoError);
    }

    #[test]
    fn test_inspect_pem_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/src/examples/chain.pem");

        assert!(inspect_pem_file(path).is_ok());
    }

    #[test]
    fn test_inspect_pem_file_missing_path() {
        let err = inspect_pem_file("/nonexistent/chain.pem").unwrap_err();

        assert_eq!(err.kind, CertInspectErrorKind::IoError);
    }
}
