/// Error types for key encryption and storage.
#[derive(Debug, thiserror::Error)]
pub enum KeystoreError {
    /// AES-GCM authentication failed. The cause is indistinguishable by
    /// design: either the password is wrong or the stored data is damaged.
    #[error("wrong password or corrupt keystore data")]
    WrongPasswordOrCorruptData,

    /// The decrypted key does not reproduce the stored public key or
    /// address.
    #[error("decrypted key does not match stored entry")]
    IntegrityViolation,

    /// Key derivation failed.
    #[error("key derivation error: {0}")]
    Kdf(String),

    /// The background derivation worker has shut down.
    #[error("derivation worker unavailable")]
    WorkerUnavailable,

    /// An underlying cryptographic operation failed.
    #[error("crypto error: {0}")]
    Crypto(#[from] meridian_crypto::CryptoError),
}
