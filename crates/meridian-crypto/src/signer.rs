//! Unified signing dispatch across all supported curves.
//!
//! Every entry point validates byte lengths against the curve registry
//! before any curve math runs; a wrong length is a typed `InvalidKeySize`
//! error, never a panic or a silent truncation. Plaintext key lifetime and
//! clearing remain the caller's responsibility; nothing here caches keys.

use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, Zeroizing};

use crate::curve::{check_key_len, check_signature_len, CurveType, KeyRole};
use crate::{bls12381, ed25519, secp256k1, CryptoError};

/// Derive the public key for a private key on the given curve.
///
/// Mirrors each curve's key generation exactly: Ed25519 and BLS12-381
/// produce their fixed-size encodings, SECP256K1 the 33-byte compressed
/// SEC1 point, and ETHSECP256K1 the 65-byte uncompressed SEC1 point
/// (0x04-prefixed).
///
/// # Arguments
/// * `private_key` - The 32-byte private key.
/// * `curve` - The curve family.
///
/// # Returns
/// The public key bytes, or a typed error for a bad length or scalar.
pub fn derive_public_key(private_key: &[u8], curve: CurveType) -> Result<Vec<u8>, CryptoError> {
    check_key_len(private_key, curve, KeyRole::Private)?;
    let seed: &[u8; 32] = private_key.try_into().expect("length checked above");
    match curve {
        CurveType::Ed25519 => Ok(ed25519::derive_public_key(seed).to_vec()),
        CurveType::Bls12381 => Ok(bls12381::derive_public_key(seed)?.to_vec()),
        CurveType::Secp256k1 => Ok(secp256k1::derive_public_key_compressed(private_key)?.to_vec()),
        CurveType::EthSecp256k1 => {
            Ok(secp256k1::derive_public_key_uncompressed(private_key)?.to_vec())
        }
    }
}

/// Sign a message with a private key on the given curve.
///
/// - Ed25519 signs the raw message (no pre-hash).
/// - SECP256K1 / ETHSECP256K1 share one primitive: SHA-256 the message,
///   sign the digest, return 64-byte r‖s with the recovery byte stripped.
/// - BLS12-381 hashes the message onto G2 and scales by the secret scalar.
///
/// # Arguments
/// * `message` - The message bytes to sign.
/// * `private_key` - The 32-byte private key.
/// * `curve` - The curve family.
///
/// # Returns
/// The fixed-size signature for the curve (64 or 96 bytes).
pub fn sign(message: &[u8], private_key: &[u8], curve: CurveType) -> Result<Vec<u8>, CryptoError> {
    check_key_len(private_key, curve, KeyRole::Private)?;
    let seed: &[u8; 32] = private_key.try_into().expect("length checked above");
    match curve {
        CurveType::Ed25519 => Ok(ed25519::sign(message, seed).to_vec()),
        CurveType::Bls12381 => Ok(bls12381::sign(message, seed)?.to_vec()),
        CurveType::Secp256k1 | CurveType::EthSecp256k1 => {
            Ok(secp256k1::sign(message, private_key)?.to_vec())
        }
    }
}

/// Verify a signature over a message for the given curve.
///
/// An invalid signature is an expected outcome and returns `Ok(false)`.
/// Malformed inputs (wrong lengths, bytes that are not curve points) fail
/// fast with a typed error.
///
/// # Arguments
/// * `message` - The message the signature covers.
/// * `signature` - The signature bytes (64 or 96 depending on curve).
/// * `public_key` - The public key bytes.
/// * `curve` - The curve family.
pub fn verify(
    message: &[u8],
    signature: &[u8],
    public_key: &[u8],
    curve: CurveType,
) -> Result<bool, CryptoError> {
    check_key_len(public_key, curve, KeyRole::Public)?;
    check_signature_len(signature, curve)?;
    match curve {
        CurveType::Ed25519 => {
            let sig: &[u8; 64] = signature.try_into().expect("length checked above");
            let pk: &[u8; 32] = public_key.try_into().expect("length checked above");
            ed25519::verify(message, sig, pk)
        }
        CurveType::Bls12381 => {
            let sig: &[u8; 96] = signature.try_into().expect("length checked above");
            let pk: &[u8; 48] = public_key.try_into().expect("length checked above");
            bls12381::verify(message, sig, pk)
        }
        CurveType::Secp256k1 => {
            let sig: &[u8; 64] = signature.try_into().expect("length checked above");
            secp256k1::verify(message, sig, public_key)
        }
        CurveType::EthSecp256k1 => {
            let sig: &[u8; 64] = signature.try_into().expect("length checked above");
            // Re-prefix a bare 64-byte point so k256 can parse it as SEC1.
            if public_key.len() == 64 {
                let mut sec1 = [0u8; 65];
                sec1[0] = 0x04;
                sec1[1..].copy_from_slice(public_key);
                secp256k1::verify(message, sig, &sec1)
            } else {
                secp256k1::verify(message, sig, public_key)
            }
        }
    }
}

/// Generate a fresh random private key for the given curve.
///
/// Uses the OS random number generator. For BLS12-381 the random bytes are
/// run through the standard key-generation procedure so the result is a
/// valid scalar; for secp256k1 rejection sampling inside k256 guarantees a
/// valid nonzero scalar. The returned buffer wipes itself on drop, as do
/// the intermediate seed copies made here.
pub fn generate_private_key(curve: CurveType) -> Zeroizing<Vec<u8>> {
    match curve {
        CurveType::Ed25519 => {
            let mut seed = [0u8; 32];
            OsRng.fill_bytes(&mut seed);
            let key = Zeroizing::new(seed.to_vec());
            seed.zeroize();
            key
        }
        CurveType::Bls12381 => {
            let mut ikm = [0u8; 32];
            OsRng.fill_bytes(&mut ikm);
            let mut scalar = bls12381::secret_key_from_ikm(&ikm);
            ikm.zeroize();
            let key = Zeroizing::new(scalar.to_vec());
            scalar.zeroize();
            key
        }
        CurveType::Secp256k1 | CurveType::EthSecp256k1 => {
            // SigningKey wipes its own scalar on drop.
            let mut bytes = SigningKey::random(&mut OsRng).to_bytes();
            let key = Zeroizing::new(bytes.to_vec());
            bytes.as_mut_slice().zeroize();
            key
        }
    }
}
