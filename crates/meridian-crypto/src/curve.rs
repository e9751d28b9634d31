//! Curve registry and byte-length based curve detection.
//!
//! The registry is the canonical size table for every supported curve
//! family. All key material entering the crate is validated against it
//! before any curve math runs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CryptoError;

/// The supported elliptic-curve / signature families.
///
/// The curve type of a key is fixed at creation and never changes; it
/// selects the hash pipeline, signature algorithm, and byte sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveType {
    /// Ed25519 (RFC 8032). Signs the raw message, no pre-hash.
    #[serde(rename = "ED25519")]
    Ed25519,
    /// BLS12-381, minimal-public-key setting: G1 public keys, G2 signatures.
    #[serde(rename = "BLS12381")]
    Bls12381,
    /// secp256k1 ECDSA with compressed public keys and Bitcoin-style
    /// Hash160 addresses.
    #[serde(rename = "SECP256K1")]
    Secp256k1,
    /// secp256k1 ECDSA with uncompressed public keys and Ethereum-style
    /// Keccak-256 addresses.
    #[serde(rename = "ETHSECP256K1")]
    EthSecp256k1,
}

/// Whether a byte buffer is a public or a private key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    /// A public key.
    Public,
    /// A private key.
    Private,
}

/// Length of every supported private key in bytes.
pub const PRIVATE_KEY_LEN: usize = 32;

/// Public key length for Ed25519.
pub const ED25519_PUBLIC_KEY_LEN: usize = 32;
/// Public key length for BLS12-381 (compressed G1 point).
pub const BLS12381_PUBLIC_KEY_LEN: usize = 48;
/// Public key length for secp256k1 (SEC1 compressed point).
pub const SECP256K1_PUBLIC_KEY_LEN: usize = 33;
/// Public key length for Ethereum secp256k1 without the SEC1 prefix.
pub const ETH_PUBLIC_KEY_LEN: usize = 64;
/// Public key length for Ethereum secp256k1 with the 0x04 SEC1 prefix.
pub const ETH_PUBLIC_KEY_PREFIXED_LEN: usize = 65;

/// Signature length for Ed25519 and both secp256k1 variants.
pub const SIGNATURE_LEN_64: usize = 64;
/// Signature length for BLS12-381 (compressed G2 point).
pub const BLS12381_SIGNATURE_LEN: usize = 96;

impl CurveType {
    /// All supported curves, in detection priority order.
    pub const ALL: [CurveType; 4] = [
        CurveType::Ed25519,
        CurveType::Bls12381,
        CurveType::Secp256k1,
        CurveType::EthSecp256k1,
    ];

    /// The private key length for this curve in bytes.
    pub fn private_key_len(&self) -> usize {
        PRIVATE_KEY_LEN
    }

    /// The canonical public key length for this curve in bytes.
    ///
    /// For [`CurveType::EthSecp256k1`] this is the prefixed 65-byte form;
    /// the 64-byte unprefixed form is also accepted on input.
    pub fn public_key_len(&self) -> usize {
        match self {
            CurveType::Ed25519 => ED25519_PUBLIC_KEY_LEN,
            CurveType::Bls12381 => BLS12381_PUBLIC_KEY_LEN,
            CurveType::Secp256k1 => SECP256K1_PUBLIC_KEY_LEN,
            CurveType::EthSecp256k1 => ETH_PUBLIC_KEY_PREFIXED_LEN,
        }
    }

    /// Whether `len` is an acceptable public key length for this curve.
    pub fn accepts_public_key_len(&self, len: usize) -> bool {
        match self {
            CurveType::EthSecp256k1 => {
                len == ETH_PUBLIC_KEY_LEN || len == ETH_PUBLIC_KEY_PREFIXED_LEN
            }
            _ => len == self.public_key_len(),
        }
    }

    /// The signature length for this curve in bytes.
    pub fn signature_len(&self) -> usize {
        match self {
            CurveType::Bls12381 => BLS12381_SIGNATURE_LEN,
            _ => SIGNATURE_LEN_64,
        }
    }

    /// A human-readable description of the accepted public key lengths.
    pub(crate) fn public_key_len_description(&self) -> &'static str {
        match self {
            CurveType::Ed25519 => "32",
            CurveType::Bls12381 => "48",
            CurveType::Secp256k1 => "33",
            CurveType::EthSecp256k1 => "64 or 65",
        }
    }
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CurveType::Ed25519 => "ED25519",
            CurveType::Bls12381 => "BLS12381",
            CurveType::Secp256k1 => "SECP256K1",
            CurveType::EthSecp256k1 => "ETHSECP256K1",
        };
        f.write_str(name)
    }
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyRole::Public => f.write_str("public"),
            KeyRole::Private => f.write_str("private"),
        }
    }
}

/// A single length-based detector: maps a key byte length to a curve, if any.
type Detector = fn(usize) -> Option<CurveType>;

/// Detect the curve for a public key of the given length.
fn detect_public(len: usize) -> Option<CurveType> {
    match len {
        ED25519_PUBLIC_KEY_LEN => Some(CurveType::Ed25519),
        SECP256K1_PUBLIC_KEY_LEN => Some(CurveType::Secp256k1),
        BLS12381_PUBLIC_KEY_LEN => Some(CurveType::Bls12381),
        ETH_PUBLIC_KEY_LEN | ETH_PUBLIC_KEY_PREFIXED_LEN => Some(CurveType::EthSecp256k1),
        _ => None,
    }
}

/// Detect the curve for a private key of the given length.
///
/// A bare 32-byte private key cannot distinguish Ed25519 from BLS12-381;
/// the documented policy defaults to Ed25519. Callers holding the matching
/// public key should detect from that instead.
fn detect_private(len: usize) -> Option<CurveType> {
    if len == PRIVATE_KEY_LEN {
        Some(CurveType::Ed25519)
    } else {
        None
    }
}

/// Detect the curve type from a key's byte length and role.
///
/// # Arguments
/// * `len` - The key length in bytes.
/// * `role` - Whether the bytes are a public or a private key.
///
/// # Returns
/// The unique `CurveType` consistent with the length, or
/// `UnrecognizedKeyFormat` if no curve matches.
pub fn detect_curve(len: usize, role: KeyRole) -> Result<CurveType, CryptoError> {
    let detector: Detector = match role {
        KeyRole::Public => detect_public,
        KeyRole::Private => detect_private,
    };
    detector(len).ok_or(CryptoError::UnrecognizedKeyFormat { role, got: len })
}

/// Detect the curve type from whichever key material is available.
///
/// Public-key detection runs first because it is unambiguous; the private
/// key length is consulted only as a fallback.
///
/// # Arguments
/// * `public_key` - The public key bytes, if known.
/// * `private_key` - The private key bytes, if known.
///
/// # Returns
/// The detected `CurveType`, or `UnrecognizedKeyFormat` if neither key
/// matches a known curve.
pub fn detect_curve_for_keys(
    public_key: Option<&[u8]>,
    private_key: Option<&[u8]>,
) -> Result<CurveType, CryptoError> {
    let attempts: [(Option<&[u8]>, KeyRole); 2] = [
        (public_key, KeyRole::Public),
        (private_key, KeyRole::Private),
    ];
    let mut last_len = 0;
    let mut last_role = KeyRole::Private;
    for (key, role) in attempts {
        if let Some(bytes) = key {
            if let Ok(curve) = detect_curve(bytes.len(), role) {
                return Ok(curve);
            }
            last_len = bytes.len();
            last_role = role;
        }
    }
    Err(CryptoError::UnrecognizedKeyFormat {
        role: last_role,
        got: last_len,
    })
}

/// Validate a key length against the registry, for the given curve and role.
pub(crate) fn check_key_len(
    key: &[u8],
    curve: CurveType,
    role: KeyRole,
) -> Result<(), CryptoError> {
    let ok = match role {
        KeyRole::Private => key.len() == curve.private_key_len(),
        KeyRole::Public => curve.accepts_public_key_len(key.len()),
    };
    if ok {
        Ok(())
    } else {
        Err(CryptoError::InvalidKeySize {
            curve,
            role,
            expected: match role {
                KeyRole::Private => "32",
                KeyRole::Public => curve.public_key_len_description(),
            },
            got: key.len(),
        })
    }
}

/// Validate a signature length against the registry.
pub(crate) fn check_signature_len(sig: &[u8], curve: CurveType) -> Result<(), CryptoError> {
    if sig.len() == curve.signature_len() {
        Ok(())
    } else {
        Err(CryptoError::InvalidSignature(format!(
            "expected {} bytes for {}, got {}",
            curve.signature_len(),
            curve,
            sig.len()
        )))
    }
}
