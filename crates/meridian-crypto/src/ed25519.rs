//! Ed25519 signing primitives (RFC 8032).
//!
//! Ed25519 signs the raw message directly; there is no pre-hash step.

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};

use crate::CryptoError;

/// Derive the 32-byte public key for a 32-byte Ed25519 seed.
pub fn derive_public_key(private_key: &[u8; 32]) -> [u8; 32] {
    let signing_key = SigningKey::from_bytes(private_key);
    signing_key.verifying_key().to_bytes()
}

/// Sign a message, producing a 64-byte signature.
pub fn sign(message: &[u8], private_key: &[u8; 32]) -> [u8; 64] {
    let signing_key = SigningKey::from_bytes(private_key);
    signing_key.sign(message).to_bytes()
}

/// Verify a 64-byte signature over a message.
///
/// # Returns
/// `Ok(false)` for a signature that does not check out; `InvalidPublicKey`
/// if the key bytes are not a valid curve point.
pub fn verify(
    message: &[u8],
    signature: &[u8; 64],
    public_key: &[u8; 32],
) -> Result<bool, CryptoError> {
    let verifying_key = VerifyingKey::from_bytes(public_key)
        .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;
    let sig = ed25519_dalek::Signature::from_bytes(signature);
    Ok(verifying_key.verify(message, &sig).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Pinned fixture: seed of 32 0x01 bytes.
    const SEED: [u8; 32] = [0x01; 32];
    const EXPECTED_PUB: &str = "8a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c";
    const EXPECTED_SIG_HELLO: &str =
        "e1430c6ebd0d53573b5c803452174f8991ef5955e0906a09e8fdc7310459e9c8\
         2a402526748c3431fe7f0e5faafbf7e703234789734063ee42be17af16438d08";

    #[test]
    fn test_pinned_public_key() {
        assert_eq!(hex::encode(derive_public_key(&SEED)), EXPECTED_PUB);
    }

    #[test]
    fn test_pinned_signature_is_deterministic() {
        let sig = sign(b"hello", &SEED);
        assert_eq!(hex::encode(sig), EXPECTED_SIG_HELLO);
        // Ed25519 signing is deterministic per RFC 8032.
        assert_eq!(sign(b"hello", &SEED), sig);
    }

    #[test]
    fn test_sign_verify_round_trip() {
        let public = derive_public_key(&SEED);
        let sig = sign(b"hello", &SEED);
        assert!(verify(b"hello", &sig, &public).unwrap());
    }

    #[test]
    fn test_verify_rejects_flipped_bit() {
        let public = derive_public_key(&SEED);
        let sig = sign(b"hello", &SEED);
        let mut message = b"hello".to_vec();
        message[0] ^= 0x01;
        assert!(!verify(&message, &sig, &public).unwrap());
    }
}
