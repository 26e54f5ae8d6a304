use thiserror::Error;

/// Error taxonomy for every parsing, derivation, and encryption operation
/// in this crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("unrecognized key format")]
    UnrecognizedFormat,

    #[error("invalid checksum")]
    InvalidChecksum,

    #[error("invalid character in base58 string")]
    InvalidCharacter,

    #[error("invalid curve point")]
    InvalidPoint,

    #[error("invalid scalar")]
    InvalidScalar,

    #[error("invalid derivation path: {0}")]
    InvalidPath(String),

    #[error("invalid derivation")]
    InvalidDerivation,

    #[error("invalid passphrase")]
    InvalidPassphrase,

    #[error("secure entropy source unavailable")]
    EntropyUnavailable,
}
