use crate::curve::{CurveType, KeyRole};

/// Unified error type for all crypto operations.
///
/// Covers errors from hashing pipelines, curve detection, key parsing,
/// signing, and address handling. Signature verification never produces an
/// error for an invalid signature; it returns `false` instead.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// A key's byte length does not match the curve registry.
    #[error("invalid {role} key size for {curve}: expected {expected} bytes, got {got}")]
    InvalidKeySize {
        /// The curve the key was presented for.
        curve: CurveType,
        /// Whether the key was public or private.
        role: KeyRole,
        /// The accepted length(s), as text.
        expected: &'static str,
        /// The length actually supplied.
        got: usize,
    },

    /// No curve in the registry matches the key's byte length.
    #[error("unrecognized key format: no curve matches a {role} key of {got} bytes")]
    UnrecognizedKeyFormat {
        /// Whether the key was public or private.
        role: KeyRole,
        /// The length actually supplied.
        got: usize,
    },

    /// The private key bytes are not a valid scalar for the curve.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// The public key bytes are not a valid point on the curve.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// The signature bytes cannot be decoded for the curve.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// The signing operation itself failed.
    #[error("signing failed: {0}")]
    SigningFailed(String),

    /// A hex string could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Address bytes or text are not a well-formed 20-byte address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

impl From<hex::FromHexError> for CryptoError {
    fn from(e: hex::FromHexError) -> Self {
        CryptoError::InvalidHex(e.to_string())
    }
}
