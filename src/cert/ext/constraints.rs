use der::oid::{db::rfc5280::ID_CE_BASIC_CONSTRAINTS, AssociatedOid, ObjectIdentifier};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BasicConstraints {
    pub ca: bool,
    pub path_len_constraint: Option<u8>,
}

impl AssociatedOid for BasicConstraints {
    const OID: ObjectIdentifier = ID_CE_BASIC_CONSTRAINTS;
}

impl From<x509_cert::ext::pkix::BasicConstraints> for BasicConstraints {
    fn from(value: x509_cert::ext::pkix::BasicConstraints) -> Self {
        Self {
            ca: value.ca,
            path_len_constraint: value.path_len_constraint,
        }
    }
}

impl BasicConstraints {
    /// Path length as the report prints it. A CA certificate that encodes
    /// no pathLenConstraint may sign chains of any depth.
    pub fn path_length_label(self: &Self) -> String {
        match self.path_len_constraint {
            Some(depth) => depth.to_string(),
            None => "unlimited".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BasicConstraints;

    #[test]
    fn test_path_length_label() {
        let bounded = BasicConstraints {
            ca: true,
            path_len_constraint: Some(0),
        };
        let unbounded = BasicConstraints {
            ca: true,
            path_len_constraint: None,
        };

        assert_eq!(bounded.path_length_label(), "0");
        assert_eq!(unbounded.path_length_label(), "unlimited");
    }
}
