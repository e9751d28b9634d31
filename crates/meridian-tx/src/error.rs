/// Error types for transaction encoding and building.
#[derive(Debug, thiserror::Error)]
pub enum TxError {
    /// The message type identifier is not one of the supported set.
    #[error("unsupported message type: {0}")]
    UnsupportedMessageType(String),

    /// A required message or frame field was left at its default value.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A field is present but its value is out of range.
    #[error("invalid parameter {field}: {reason}")]
    InvalidParameter {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Signing or key derivation failed while building a transaction.
    #[error("crypto error: {0}")]
    Crypto(#[from] meridian_crypto::CryptoError),
}
