//! BLS12-381 signing primitives in the minimal-public-key setting.
//!
//! Public keys are 48-byte compressed G1 points and signatures are 96-byte
//! compressed G2 points. Signing hashes the message onto G2 with the
//! standard ciphersuite and scales by the secret scalar; verification is
//! the pairing check e(G1, sig) == e(pk, H(msg)).

use blst::min_pk::{PublicKey, SecretKey, Signature};
use blst::BLST_ERROR;

use crate::CryptoError;

/// Hash-to-curve domain separation tag for the min_pk basic scheme.
const DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_NUL_";

/// Derive the 48-byte compressed G1 public key for a 32-byte secret scalar.
pub fn derive_public_key(private_key: &[u8; 32]) -> Result<[u8; 48], CryptoError> {
    let sk = parse_secret(private_key)?;
    Ok(sk.sk_to_pk().to_bytes())
}

/// Sign a message, producing a 96-byte G2 signature.
pub fn sign(message: &[u8], private_key: &[u8; 32]) -> Result<[u8; 96], CryptoError> {
    let sk = parse_secret(private_key)?;
    Ok(sk.sign(message, DST, &[]).to_bytes())
}

/// Verify a 96-byte signature over a message against a 48-byte public key.
///
/// # Returns
/// `Ok(false)` when the pairing check fails; `InvalidPublicKey` or
/// `InvalidSignature` when the points cannot be decoded.
pub fn verify(
    message: &[u8],
    signature: &[u8; 96],
    public_key: &[u8; 48],
) -> Result<bool, CryptoError> {
    let pk = PublicKey::from_bytes(public_key)
        .map_err(|e| CryptoError::InvalidPublicKey(format!("{:?}", e)))?;
    let sig = Signature::from_bytes(signature)
        .map_err(|e| CryptoError::InvalidSignature(format!("{:?}", e)))?;
    Ok(sig.verify(true, message, DST, &[], &pk, true) == BLST_ERROR::BLST_SUCCESS)
}

fn parse_secret(private_key: &[u8; 32]) -> Result<SecretKey, CryptoError> {
    SecretKey::from_bytes(private_key)
        .map_err(|e| CryptoError::InvalidPrivateKey(format!("{:?}", e)))
}

/// Generate a fresh random secret scalar from 32 bytes of IKM.
pub(crate) fn secret_key_from_ikm(ikm: &[u8; 32]) -> [u8; 32] {
    // key_gen only fails for IKM shorter than 32 bytes.
    let sk = SecretKey::key_gen(ikm, &[]).expect("32-byte IKM is always accepted");
    sk.to_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: [u8; 32] = [0x01; 32];

    #[test]
    fn test_public_key_sizes_and_determinism() {
        let pk1 = derive_public_key(&SEED).unwrap();
        let pk2 = derive_public_key(&SEED).unwrap();
        assert_eq!(pk1, pk2);
        assert_eq!(pk1.len(), 48);
    }

    #[test]
    fn test_sign_verify_round_trip() {
        let public = derive_public_key(&SEED).unwrap();
        let sig = sign(b"meridian", &SEED).unwrap();
        assert_eq!(sig.len(), 96);
        assert!(verify(b"meridian", &sig, &public).unwrap());
        assert!(!verify(b"other message", &sig, &public).unwrap());
    }

    #[test]
    fn test_verify_rejects_wrong_key() {
        let sig = sign(b"meridian", &SEED).unwrap();
        let other = derive_public_key(&[0x02; 32]).unwrap();
        assert!(!verify(b"meridian", &sig, &other).unwrap());
    }

    #[test]
    fn test_zero_scalar_rejected() {
        assert!(derive_public_key(&[0u8; 32]).is_err());
        assert!(sign(b"x", &[0u8; 32]).is_err());
    }

    #[test]
    fn test_garbage_signature_is_an_error() {
        let public = derive_public_key(&SEED).unwrap();
        let err = verify(b"x", &[0xFFu8; 96], &public).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidSignature(_)));
    }
}
