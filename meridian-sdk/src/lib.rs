#![deny(missing_docs)]

//! Meridian Wallet SDK - Complete SDK.
//!
//! Re-exports all Meridian SDK components for convenient single-crate
//! usage.

pub use meridian_crypto as crypto;
pub use meridian_keystore as keystore;
pub use meridian_tx as tx;
