#![deny(missing_docs)]

//! Meridian Wallet SDK - Cryptographic primitives.
//!
//! This crate provides the curve-level building blocks for the wallet core:
//! - Hash functions (SHA-256, RIPEMD-160, Hash160, Keccak-256)
//! - Curve registry and byte-length based curve detection
//! - Address derivation (20-byte addresses, per-curve hash pipelines)
//! - Signing and verification for Ed25519, BLS12-381, secp256k1 and
//!   Ethereum-style secp256k1

pub mod hash;
pub mod curve;
pub mod address;
pub mod ed25519;
pub mod secp256k1;
pub mod bls12381;
pub mod signer;

mod error;
pub use error::CryptoError;

pub use address::{derive_address, Address, ADDRESS_LEN};
pub use curve::{detect_curve, CurveType, KeyRole};
pub use signer::{derive_public_key, generate_private_key, sign, verify};
