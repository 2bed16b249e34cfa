use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CertInspectErrorKind {
    /// IO Error.
    IoError,

    /// Invalid Keystore Format.
    InvalidKeystore,

    /// Keystore Integrity Check Failed.
    KeystoreIntegrity,

    /// Invalid PEM Certificate.
    InvalidPEMCertificate,

    /// Invalid Certificate.
    InvalidCertificate,

    /// Unknown Error.
    Unknown,
}

#[derive(Debug)]
pub struct CertInspectError {
    pub kind: CertInspectErrorKind,
    pub message: String,
}

impl fmt::Display for CertInspectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for CertInspectError {}

pub trait CertInspectResult<T> {
    fn map_app_err(self: Self, kind: CertInspectErrorKind) -> Result<T, CertInspectError>;
    fn map_unknown_err(self: Self) -> Result<T, CertInspectError>;
}

impl<T, E> CertInspectResult<T> for std::result::Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn map_app_err(self: Self, kind: CertInspectErrorKind) -> Result<T, CertInspectError> {
        self.map_err(|err| CertInspectError {
            kind: kind,
            message: err.to_string(),
        })
    }

    fn map_unknown_err(self: Self) -> Result<T, CertInspectError> {
        self.map_app_err(CertInspectErrorKind::Unknown)
    }
}
