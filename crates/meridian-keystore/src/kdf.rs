//! Password key derivation via Argon2id.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use zeroize::Zeroizing;

use crate::KeystoreError;

/// Length of the random KDF salt in bytes.
pub const SALT_LEN: usize = 16;

/// Length of the derived symmetric key in bytes (AES-256).
pub const DERIVED_KEY_LEN: usize = 32;

/// Argon2id cost parameters.
///
/// The defaults target an interactive unlock of a few hundred
/// milliseconds on commodity hardware. Tests drop them to near-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Number of passes over memory.
    pub t_cost: u32,
    /// Memory budget in KiB.
    pub m_cost_kib: u32,
    /// Lanes of parallelism.
    pub p_cost: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            t_cost: 3,
            m_cost_kib: 32 * 1024,
            p_cost: 4,
        }
    }
}

impl KdfParams {
    /// Cheap parameters for test use only.
    pub fn insecure_fast() -> Self {
        Self {
            t_cost: 1,
            m_cost_kib: 16,
            p_cost: 1,
        }
    }
}

/// Generate a fresh random salt.
pub fn random_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}

/// Derive a 32-byte symmetric key from a password and salt.
///
/// Deterministic for a given (password, salt, params) triple; the output
/// is zeroized on drop.
pub fn derive_key(
    password: &[u8],
    salt: &[u8],
    params: KdfParams,
) -> Result<Zeroizing<[u8; DERIVED_KEY_LEN]>, KeystoreError> {
    let argon_params = Params::new(
        params.m_cost_kib,
        params.t_cost,
        params.p_cost,
        Some(DERIVED_KEY_LEN),
    )
    .map_err(|e| KeystoreError::Kdf(e.to_string()))?;
    let argon = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params);

    let mut key = Zeroizing::new([0u8; DERIVED_KEY_LEN]);
    argon
        .hash_password_into(password, salt, key.as_mut())
        .map_err(|e| KeystoreError::Kdf(e.to_string()))?;
    Ok(key)
}
