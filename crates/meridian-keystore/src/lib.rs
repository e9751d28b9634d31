#![deny(missing_docs)]

//! Meridian Wallet SDK - Encrypted key storage.
//!
//! Private keys at rest are wrapped with AES-256-GCM under a key derived
//! from the user's password with Argon2id:
//! - `kdf` - Argon2id derivation and cost parameters
//! - `worker` - a thread pool that keeps slow derivations off the
//!   caller's thread
//! - `keystore` - encrypted key entries with integrity checking

pub mod kdf;
pub mod keystore;
pub mod worker;

mod error;
pub use error::KeystoreError;

pub use kdf::{derive_key, random_salt, KdfParams, DERIVED_KEY_LEN, SALT_LEN};
pub use keystore::{decrypt_private_key, encrypt_private_key, EncryptedKeyEntry, KeyEntry};
pub use worker::{KdfWorker, PendingDerivation};
