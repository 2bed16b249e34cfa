pub mod ext;
pub mod name;

mod certificate;

pub use certificate::{Certificate, SignatureAlgorithm, Validity};
