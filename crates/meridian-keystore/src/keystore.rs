//! Key entries: the in-memory aggregate and its encrypted at-rest form.
//!
//! [`KeyEntry`] carries a decrypted private key together with the public
//! key, address, and metadata derived from it; it never serializes. The
//! persisted form is [`EncryptedKeyEntry`], which wraps the private key
//! with AES-256-GCM under an Argon2id-derived key. The GCM nonce is
//! derived from the encryption key itself, which makes encryption
//! deterministic for a (password, salt) pair. The salt is fresh per
//! entry, so no key/nonce pair is ever reused across entries.

use std::fmt;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use meridian_crypto::{
    derive_address, derive_public_key, detect_curve, generate_private_key, Address, CurveType,
    KeyRole,
};

use crate::kdf::{derive_key, random_salt, KdfParams, DERIVED_KEY_LEN, SALT_LEN};
use crate::KeystoreError;

/// GCM nonce length in bytes.
const NONCE_LEN: usize = 12;

fn nonce_for(derived_key: &[u8; DERIVED_KEY_LEN]) -> [u8; NONCE_LEN] {
    let digest = Sha256::digest(derived_key);
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&digest[..NONCE_LEN]);
    nonce
}

/// Encrypt a private key under an already-derived symmetric key.
pub fn encrypt_private_key(
    private_key: &[u8],
    derived_key: &[u8; DERIVED_KEY_LEN],
) -> Result<Vec<u8>, KeystoreError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(derived_key));
    let nonce = nonce_for(derived_key);
    cipher
        .encrypt(Nonce::from_slice(&nonce), private_key)
        .map_err(|_| KeystoreError::WrongPasswordOrCorruptData)
}

/// Decrypt a private key under an already-derived symmetric key.
///
/// GCM authentication failure is reported as
/// [`KeystoreError::WrongPasswordOrCorruptData`]; the two causes cannot
/// be told apart.
pub fn decrypt_private_key(
    ciphertext: &[u8],
    derived_key: &[u8; DERIVED_KEY_LEN],
) -> Result<Zeroizing<Vec<u8>>, KeystoreError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(derived_key));
    let nonce = nonce_for(derived_key);
    cipher
        .decrypt(Nonce::from_slice(&nonce), ciphertext)
        .map(Zeroizing::new)
        .map_err(|_| KeystoreError::WrongPasswordOrCorruptData)
}

/// A decrypted key with everything derived from it.
///
/// This is the in-memory carrier handed to signing and address code. The
/// private key wipes itself on drop, the type has no serde impls, and
/// `Debug` redacts the secret.
pub struct KeyEntry {
    private_key: Zeroizing<Vec<u8>>,
    public_key: Vec<u8>,
    address: Address,
    curve_type: CurveType,
    nickname: Option<String>,
    created_at: u64,
}

impl KeyEntry {
    /// Build an entry from raw private key bytes.
    ///
    /// When `curve` is `None` it is detected from the key length, with
    /// 32-byte keys treated as Ed25519. The public key and address are
    /// derived here and fixed for the entry's lifetime.
    pub fn import(
        private_key: &[u8],
        curve: Option<CurveType>,
        nickname: Option<String>,
        created_at: u64,
    ) -> Result<Self, KeystoreError> {
        let curve = match curve {
            Some(curve) => curve,
            None => detect_curve(private_key.len(), KeyRole::Private)?,
        };
        let public_key = derive_public_key(private_key, curve)?;
        let address = derive_address(&public_key, curve)?;
        Ok(Self {
            private_key: Zeroizing::new(private_key.to_vec()),
            public_key,
            address,
            curve_type: curve,
            nickname,
            created_at,
        })
    }

    /// Generate a fresh key on `curve` and build its entry.
    pub fn generate(
        curve: CurveType,
        nickname: Option<String>,
        created_at: u64,
    ) -> Result<Self, KeystoreError> {
        let private_key = generate_private_key(curve);
        Self::import(&private_key, Some(curve), nickname, created_at)
    }

    /// Encrypt this entry under `password` with a fresh salt.
    pub fn encrypt(
        &self,
        password: &[u8],
        params: KdfParams,
    ) -> Result<EncryptedKeyEntry, KeystoreError> {
        let salt = random_salt();
        let derived = derive_key(password, &salt, params)?;
        let ciphertext = encrypt_private_key(&self.private_key, &derived)?;
        Ok(EncryptedKeyEntry {
            public_key: hex::encode(&self.public_key),
            encrypted_private_key: hex::encode(ciphertext),
            salt: hex::encode(salt),
            address: self.address.to_hex(),
            curve_type: self.curve_type,
            nickname: self.nickname.clone(),
            created_at: self.created_at,
        })
    }

    /// The raw private key bytes.
    pub fn private_key(&self) -> &[u8] {
        &self.private_key
    }

    /// The derived public key bytes.
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// The derived 20-byte address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The curve the key belongs to.
    pub fn curve_type(&self) -> CurveType {
        self.curve_type
    }

    /// The optional display name.
    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }

    /// Creation time in microseconds since the Unix epoch.
    pub fn created_at(&self) -> u64 {
        self.created_at
    }
}

impl fmt::Debug for KeyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyEntry")
            .field("private_key", &"<redacted>")
            .field("public_key", &hex::encode(&self.public_key))
            .field("address", &self.address)
            .field("curve_type", &self.curve_type)
            .field("nickname", &self.nickname)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// A stored key entry: everything public in the clear, the private key
/// encrypted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedKeyEntry {
    /// Hex-encoded public key.
    pub public_key: String,
    /// Hex-encoded AES-GCM ciphertext of the private key.
    pub encrypted_private_key: String,
    /// Hex-encoded KDF salt.
    pub salt: String,
    /// Hex-encoded 20-byte address.
    pub address: String,
    /// The curve the key belongs to.
    pub curve_type: CurveType,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// Creation time in microseconds since the Unix epoch.
    pub created_at: u64,
}

impl EncryptedKeyEntry {
    /// Encrypt an existing private key into a stored entry.
    pub fn import(
        private_key: &[u8],
        curve: Option<CurveType>,
        password: &[u8],
        params: KdfParams,
        nickname: Option<String>,
        created_at: u64,
    ) -> Result<Self, KeystoreError> {
        KeyEntry::import(private_key, curve, nickname, created_at)?.encrypt(password, params)
    }

    /// Generate a fresh key on `curve` and encrypt it into a stored entry.
    pub fn generate(
        curve: CurveType,
        password: &[u8],
        params: KdfParams,
        nickname: Option<String>,
        created_at: u64,
    ) -> Result<Self, KeystoreError> {
        KeyEntry::generate(curve, nickname, created_at)?.encrypt(password, params)
    }

    /// The decoded KDF salt.
    pub fn salt_bytes(&self) -> Result<[u8; SALT_LEN], KeystoreError> {
        let raw = hex::decode(&self.salt)
            .map_err(|_| KeystoreError::WrongPasswordOrCorruptData)?;
        raw.try_into()
            .map_err(|_| KeystoreError::WrongPasswordOrCorruptData)
    }

    /// Decrypt with `password` back into an in-memory [`KeyEntry`].
    ///
    /// After decryption the public key and address are re-derived and
    /// checked against the stored values; a mismatch means the entry was
    /// tampered with and is reported as
    /// [`KeystoreError::IntegrityViolation`].
    pub fn decrypt(
        &self,
        password: &[u8],
        params: KdfParams,
    ) -> Result<KeyEntry, KeystoreError> {
        let salt = self.salt_bytes()?;
        let derived = derive_key(password, &salt, params)?;
        self.decrypt_with_derived(&derived)
    }

    /// Decrypt with a key already derived elsewhere (for example on a
    /// [`crate::KdfWorker`]).
    pub fn decrypt_with_derived(
        &self,
        derived_key: &[u8; DERIVED_KEY_LEN],
    ) -> Result<KeyEntry, KeystoreError> {
        let ciphertext = hex::decode(&self.encrypted_private_key)
            .map_err(|_| KeystoreError::WrongPasswordOrCorruptData)?;
        let private_key = decrypt_private_key(&ciphertext, derived_key)?;

        let public_key = derive_public_key(&private_key, self.curve_type)?;
        if hex::encode(&public_key) != self.public_key {
            return Err(KeystoreError::IntegrityViolation);
        }
        let address = derive_address(&public_key, self.curve_type)?;
        if address.to_hex() != self.address {
            return Err(KeystoreError::IntegrityViolation);
        }
        Ok(KeyEntry {
            private_key,
            public_key,
            address,
            curve_type: self.curve_type,
            nickname: self.nickname.clone(),
            created_at: self.created_at,
        })
    }
}
