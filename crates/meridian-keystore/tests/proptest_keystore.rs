use proptest::prelude::*;

use meridian_keystore::{
    decrypt_private_key, derive_key, encrypt_private_key, EncryptedKeyEntry, KdfParams,
    KeystoreError, SALT_LEN,
};

fn fast() -> KdfParams {
    KdfParams::insecure_fast()
}

proptest! {
    // Argon2 dominates each case even at test cost, keep the counts low.
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn encrypt_decrypt_roundtrip(
        plaintext in prop::collection::vec(any::<u8>(), 1..64),
        password in prop::collection::vec(any::<u8>(), 1..24),
        salt in prop::array::uniform16(any::<u8>()),
    ) {
        let key = derive_key(&password, &salt, fast()).unwrap();
        let ciphertext = encrypt_private_key(&plaintext, &key).unwrap();
        prop_assert_ne!(&ciphertext, &plaintext);

        let recovered = decrypt_private_key(&ciphertext, &key).unwrap();
        prop_assert_eq!(recovered.as_slice(), plaintext.as_slice());
    }

    #[test]
    fn tampered_ciphertext_never_decrypts(
        plaintext in prop::collection::vec(any::<u8>(), 1..64),
        salt in prop::array::uniform16(any::<u8>()),
        flip in any::<prop::sample::Index>(),
    ) {
        let key = derive_key(b"password", &salt, fast()).unwrap();
        let mut ciphertext = encrypt_private_key(&plaintext, &key).unwrap();
        let idx = flip.index(ciphertext.len());
        ciphertext[idx] ^= 0x01;

        prop_assert!(matches!(
            decrypt_private_key(&ciphertext, &key),
            Err(KeystoreError::WrongPasswordOrCorruptData)
        ));
    }

    #[test]
    fn entry_roundtrips_for_any_password(
        password in prop::collection::vec(any::<u8>(), 1..24),
        seed in prop::array::uniform32(1u8..),
    ) {
        let entry =
            EncryptedKeyEntry::import(&seed, None, &password, fast(), None, 0).unwrap();
        let recovered = entry.decrypt(&password, fast()).unwrap();
        prop_assert_eq!(recovered.private_key(), seed.as_slice());

        prop_assert_eq!(entry.salt_bytes().unwrap().len(), SALT_LEN);
    }
}
