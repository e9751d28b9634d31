//! Address derivation and the 20-byte address type.
//!
//! Every curve family maps a public key to a 20-byte address through its own
//! hash pipeline. The canonical textual form is 40 lowercase hex characters
//! with no prefix; parsing and comparison are case-insensitive.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::curve::{check_key_len, CurveType, KeyRole, ETH_PUBLIC_KEY_PREFIXED_LEN};
use crate::hash::{hash160, keccak256, sha256};
use crate::CryptoError;

/// Length of an address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// SEC1 tag for an uncompressed point.
const SEC1_UNCOMPRESSED: u8 = 0x04;

/// A 20-byte account address.
///
/// Displays as 40 lowercase hex characters without a prefix. Two addresses
/// compare equal regardless of the case they were parsed from.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Create an address from a raw 20-byte array.
    pub fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Address(bytes)
    }

    /// Create an address from a byte slice.
    ///
    /// # Returns
    /// `Ok(Address)` if the slice is exactly 20 bytes, or `InvalidAddress`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidAddress(format!("expected {} bytes, got {}", ADDRESS_LEN, bytes.len()))
        })?;
        Ok(Address(arr))
    }

    /// The raw 20 address bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// The canonical textual form: 40 lowercase hex characters, no prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = CryptoError;

    /// Parse an address from hex, accepting either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ADDRESS_LEN * 2 {
            return Err(CryptoError::InvalidAddress(format!(
                "expected {} hex characters, got {}",
                ADDRESS_LEN * 2,
                s.len()
            )));
        }
        let bytes = hex::decode(s)
            .map_err(|e| CryptoError::InvalidAddress(format!("invalid hex: {}", e)))?;
        Address::from_bytes(&bytes)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Derive the 20-byte address for a public key on the given curve.
///
/// Deterministic and pure. The key length is validated against the curve
/// registry before any hashing runs.
///
/// Pipelines:
/// - Ed25519 / BLS12-381: first 20 bytes of SHA-256(key).
/// - secp256k1: RIPEMD-160(SHA-256(key)), all 20 bytes.
/// - Ethereum secp256k1: last 20 bytes of Keccak-256 over the 64-byte point;
///   a 65-byte key must carry the 0x04 uncompressed prefix, which is
///   stripped before hashing.
///
/// # Arguments
/// * `public_key` - The public key bytes.
/// * `curve` - The curve family the key belongs to.
///
/// # Returns
/// `Ok(Address)` on success, `InvalidKeySize` on a length mismatch, or
/// `InvalidPublicKey` for a 65-byte Ethereum key without the 0x04 prefix.
pub fn derive_address(public_key: &[u8], curve: CurveType) -> Result<Address, CryptoError> {
    check_key_len(public_key, curve, KeyRole::Public)?;

    let mut out = [0u8; ADDRESS_LEN];
    match curve {
        CurveType::Ed25519 | CurveType::Bls12381 => {
            let digest = sha256(public_key);
            out.copy_from_slice(&digest[..ADDRESS_LEN]);
        }
        CurveType::Secp256k1 => {
            out = hash160(public_key);
        }
        CurveType::EthSecp256k1 => {
            let point = if public_key.len() == ETH_PUBLIC_KEY_PREFIXED_LEN {
                if public_key[0] != SEC1_UNCOMPRESSED {
                    return Err(CryptoError::InvalidPublicKey(format!(
                        "65-byte key must start with 0x04, got 0x{:02x}",
                        public_key[0]
                    )));
                }
                &public_key[1..]
            } else {
                public_key
            };
            let digest = keccak256(point);
            out.copy_from_slice(&digest[32 - ADDRESS_LEN..]);
        }
    }
    Ok(Address(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Public key for the Ed25519 seed of 32 0x01 bytes.
    const ED25519_PUB: &str = "8a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c";
    const ED25519_ADDR: &str = "34750f98bd59fcfc946da45aaabe933be154a4b5";

    // Compressed secp256k1 generator point (public key of scalar 1).
    const SECP_PUB: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const SECP_ADDR: &str = "751e76e8199196d454941c45d1b3a323f1433bd6";

    // Uncompressed secp256k1 generator point and its Ethereum address.
    const ETH_PUB: &str = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
                           483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";
    const ETH_ADDR: &str = "7e5f4552091a69125d5dfcb7b8c2659029395bdf";

    #[test]
    fn test_ed25519_address_fixture() {
        let pub_key = hex::decode(ED25519_PUB).unwrap();
        let addr = derive_address(&pub_key, CurveType::Ed25519).unwrap();
        assert_eq!(addr.to_hex(), ED25519_ADDR);
    }

    #[test]
    fn test_secp256k1_address_matches_hash160() {
        let pub_key = hex::decode(SECP_PUB).unwrap();
        let addr = derive_address(&pub_key, CurveType::Secp256k1).unwrap();
        assert_eq!(addr.to_hex(), SECP_ADDR);
        // Independently recompute RIPEMD160(SHA256(pubkey)).
        assert_eq!(addr.as_bytes(), &hash160(&pub_key));
    }

    #[test]
    fn test_eth_address_fixture_prefixed() {
        let pub_key = hex::decode(ETH_PUB).unwrap();
        assert_eq!(pub_key.len(), 65);
        let addr = derive_address(&pub_key, CurveType::EthSecp256k1).unwrap();
        assert_eq!(addr.to_hex(), ETH_ADDR);
    }

    #[test]
    fn test_eth_address_fixture_unprefixed() {
        let pub_key = hex::decode(ETH_PUB).unwrap();
        let addr = derive_address(&pub_key[1..], CurveType::EthSecp256k1).unwrap();
        assert_eq!(addr.to_hex(), ETH_ADDR);
    }

    #[test]
    fn test_eth_bad_prefix_rejected() {
        let mut pub_key = hex::decode(ETH_PUB).unwrap();
        pub_key[0] = 0x05;
        let err = derive_address(&pub_key, CurveType::EthSecp256k1).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidPublicKey(_)));
    }

    #[test]
    fn test_bls_address_is_sha256_prefix() {
        let pub_key = vec![0x07u8; 48];
        let addr = derive_address(&pub_key, CurveType::Bls12381).unwrap();
        assert_eq!(addr.as_bytes(), &sha256(&pub_key)[..20]);
    }

    #[test]
    fn test_wrong_length_rejected_before_hashing() {
        let err = derive_address(&[0u8; 31], CurveType::Ed25519).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidKeySize { got: 31, .. }));
        assert!(derive_address(&[0u8; 33], CurveType::Ed25519).is_err());
        assert!(derive_address(&[0u8; 32], CurveType::Secp256k1).is_err());
        assert!(derive_address(&[0u8; 48], CurveType::EthSecp256k1).is_err());
    }

    #[test]
    fn test_address_parse_case_insensitive() {
        let lower: Address = ED25519_ADDR.parse().unwrap();
        let upper: Address = ED25519_ADDR.to_uppercase().parse().unwrap();
        assert_eq!(lower, upper);
        // Canonical form is always lowercase.
        assert_eq!(upper.to_string(), ED25519_ADDR);
    }

    #[test]
    fn test_address_parse_rejects_bad_input() {
        assert!("".parse::<Address>().is_err());
        assert!("0x34750f98bd59fcfc946da45aaabe933be154a4b5".parse::<Address>().is_err());
        assert!("zz750f98bd59fcfc946da45aaabe933be154a4b5".parse::<Address>().is_err());
    }

    #[test]
    fn test_address_serde_is_hex_string() {
        let addr: Address = ED25519_ADDR.parse().unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", ED25519_ADDR));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, back);
    }
}
