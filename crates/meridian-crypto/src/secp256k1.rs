//! Shared ECDSA primitive for the two secp256k1 curve families.
//!
//! SECP256K1 and ETHSECP256K1 differ only in public key encoding and
//! address pipeline; both hash the message with SHA-256 and sign the digest
//! with deterministic RFC 6979 nonces, producing a 64-byte r‖s signature
//! with low-S normalization and no recovery byte.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};

use crate::hash::sha256;
use crate::CryptoError;

/// Derive the SEC1 compressed (33-byte) public key.
pub fn derive_public_key_compressed(private_key: &[u8]) -> Result<[u8; 33], CryptoError> {
    let signing_key = parse_private(private_key)?;
    let point = signing_key.verifying_key().to_encoded_point(true);
    let mut out = [0u8; 33];
    out.copy_from_slice(point.as_bytes());
    Ok(out)
}

/// Derive the SEC1 uncompressed (65-byte, 0x04-prefixed) public key.
pub fn derive_public_key_uncompressed(private_key: &[u8]) -> Result<[u8; 65], CryptoError> {
    let signing_key = parse_private(private_key)?;
    let point = signing_key.verifying_key().to_encoded_point(false);
    let mut out = [0u8; 65];
    out.copy_from_slice(point.as_bytes());
    Ok(out)
}

/// Sign a message: SHA-256 the message, ECDSA-sign the digest.
///
/// # Returns
/// The 64-byte r‖s signature, low-S normalized, recovery byte stripped.
pub fn sign(message: &[u8], private_key: &[u8]) -> Result<[u8; 64], CryptoError> {
    let signing_key = parse_private(private_key)?;
    let digest = sha256(message);
    let sig: Signature = signing_key
        .sign_prehash(&digest)
        .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
    let sig = sig.normalize_s().unwrap_or(sig);
    let mut out = [0u8; 64];
    out.copy_from_slice(&sig.to_bytes());
    Ok(out)
}

/// Verify a 64-byte signature: re-hash the message and check against the
/// SEC1-encoded public key (compressed or uncompressed).
///
/// # Returns
/// `Ok(false)` when the signature does not check out; `InvalidPublicKey`
/// or `InvalidSignature` when the inputs cannot be parsed at all.
pub fn verify(
    message: &[u8],
    signature: &[u8; 64],
    sec1_public_key: &[u8],
) -> Result<bool, CryptoError> {
    let verifying_key = VerifyingKey::from_sec1_bytes(sec1_public_key)
        .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;
    let sig = Signature::from_slice(signature)
        .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
    let digest = sha256(message);
    Ok(verifying_key.verify_prehash(&digest, &sig).is_ok())
}

fn parse_private(private_key: &[u8]) -> Result<SigningKey, CryptoError> {
    SigningKey::from_slice(private_key).map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))
}
