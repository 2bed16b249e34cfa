use der::oid::{
    db::rfc5280::{ID_CE_EXT_KEY_USAGE, ID_CE_KEY_USAGE},
    AssociatedOid, ObjectIdentifier,
};

/// Key usage flag names in bit order, as defined by RFC 5280.
pub const KEY_USAGE_NAMES: [&str; 9] = [
    "Digital Signature",
    "Non Repudiation",
    "Key Encipherment",
    "Data Encipherment",
    "Key Agreement",
    "Key Cert Sign",
    "CRL Sign",
    "Encipher Only",
    "Decipher Only",
];

/// Fixed 9-slot key usage vector; slot order matches [`KEY_USAGE_NAMES`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyUsage(pub [bool; 9]);

impl AssociatedOid for KeyUsage {
    const OID: ObjectIdentifier = ID_CE_KEY_USAGE;
}

impl From<x509_cert::ext::pkix::KeyUsage> for KeyUsage {
    fn from(value: x509_cert::ext::pkix::KeyUsage) -> Self {
        Self([
            value.digital_signature(),
            value.non_repudiation(),
            value.key_encipherment(),
            value.data_encipherment(),
            value.key_agreement(),
            value.key_cert_sign(),
            value.crl_sign(),
            value.encipher_only(),
            value.decipher_only(),
        ])
    }
}

impl KeyUsage {
    /// Names of the set flags, in the fixed bit order.
    pub fn active_names(self: &Self) -> impl Iterator<Item = &'static str> + '_ {
        self.0
            .iter()
            .zip(KEY_USAGE_NAMES)
            .filter_map(|(set, name)| set.then_some(name))
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtendedKeyUsage(pub Vec<String>);

impl AssociatedOid for ExtendedKeyUsage {
    const OID: ObjectIdentifier = ID_CE_EXT_KEY_USAGE;
}

impl From<x509_cert::ext::pkix::ExtendedKeyUsage> for ExtendedKeyUsage {
    fn from(value: x509_cert::ext::pkix::ExtendedKeyUsage) -> Self {
        Self(value.0.iter().map(|v| v.to_string()).collect())
    }
}
