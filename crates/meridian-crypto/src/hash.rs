//! Hash function primitives for the Meridian wallet core.
//!
//! Provides SHA-256, RIPEMD-160, Hash160, and Keccak-256. Each curve family
//! uses a different subset of these in its address pipeline, so they live
//! here as free functions rather than behind the curve modules.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use sha3::Keccak256;

/// Compute SHA-256 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte SHA-256 digest.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute RIPEMD-160 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 20-byte RIPEMD-160 digest.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 20];
    output.copy_from_slice(&result);
    output
}

/// Compute Hash160: RIPEMD-160(SHA-256(data)).
///
/// This is the Bitcoin-style double hash used for secp256k1 addresses.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 20-byte Hash160 digest.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}

/// Compute Keccak-256 hash of the input data.
///
/// Keccak-256 is the original (pre-FIPS) padding variant used by Ethereum
/// for address derivation; it is not SHA3-256.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte Keccak-256 digest.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}
