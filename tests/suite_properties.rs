use proptest::prelude::*;

use ephemeral_cipher::{derive_cipher_suite, derive_key, CipherSuite, HashFunction, KEY_LEN};

// Strategy for generating arbitrary cipher suites.
fn arb_suite() -> impl Strategy<Value = CipherSuite> {
    prop_oneof![
        Just(CipherSuite::Aes256Gcm),
        Just(CipherSuite::ChaCha20Poly1305),
        Just(CipherSuite::XChaCha20Poly1305),
    ]
}

// Strategy for generating arbitrary hash selectors.
fn arb_hash() -> impl Strategy<Value = HashFunction> {
    prop_oneof![
        Just(HashFunction::Sha256),
        Just(HashFunction::Sha384),
        Just(HashFunction::Sha512),
    ]
}

// Strategy for a suite together with a nonce of its required length.
fn arb_suite_and_nonce() -> impl Strategy<Value = (CipherSuite, Vec<u8>)> {
    arb_suite().prop_flat_map(|suite| {
        (
            Just(suite),
            prop::collection::vec(any::<u8>(), suite.nonce_len()),
        )
    })
}

proptest! {
    #[test]
    fn derivation_is_deterministic(
        hash in arb_hash(),
        secret in prop::collection::vec(any::<u8>(), 1..256),
        context in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let a = derive_key(hash, &secret, &context).unwrap();
        let b = derive_key(hash, &secret, &context).unwrap();
        prop_assert_eq!(a.as_bytes().len(), KEY_LEN);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn secret_change_changes_key(
        hash in arb_hash(),
        secret in prop::collection::vec(any::<u8>(), 1..128),
        index in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let mut altered = secret.clone();
        let i = index.index(altered.len());
        altered[i] ^= 1 << bit;

        let a = derive_key(hash, &secret, b"ctx").unwrap();
        let b = derive_key(hash, &altered, b"ctx").unwrap();
        prop_assert_ne!(a, b);
    }

    #[test]
    fn seal_open_roundtrip(
        (suite, nonce) in arb_suite_and_nonce(),
        hash in arb_hash(),
        secret in prop::collection::vec(any::<u8>(), 1..64),
        plaintext in prop::collection::vec(any::<u8>(), 0..1024),
        aad in prop::collection::vec(any::<u8>(), 0..128),
    ) {
        let (aead, _key) = derive_cipher_suite(suite, hash, &secret, b"roundtrip").unwrap();

        let ciphertext = aead.seal(&nonce, &plaintext, &aad).unwrap();
        prop_assert_eq!(ciphertext.len(), plaintext.len() + suite.tag_len());

        let opened = aead.open(&nonce, &ciphertext, &aad).unwrap();
        prop_assert_eq!(opened, plaintext);
    }

    #[test]
    fn tampered_ciphertext_never_opens(
        (suite, nonce) in arb_suite_and_nonce(),
        plaintext in prop::collection::vec(any::<u8>(), 0..256),
        aad in prop::collection::vec(any::<u8>(), 0..32),
        index in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let aead = suite.construct(&[0x42; 32]).unwrap();
        let mut ciphertext = aead.seal(&nonce, &plaintext, &aad).unwrap();

        let i = index.index(ciphertext.len());
        ciphertext[i] ^= 1 << bit;
        prop_assert!(aead.open(&nonce, &ciphertext, &aad).is_err());
    }

    #[test]
    fn wrong_key_length_always_rejected(
        suite in arb_suite(),
        key in prop::collection::vec(any::<u8>(), 0..96)
            .prop_filter("valid key length", |k| k.len() != KEY_LEN),
    ) {
        let result = suite.construct(&key);
        let is_construction_failure = matches!(
            result,
            Err(ephemeral_cipher::CryptoError::SuiteConstructionFailed { .. })
        );
        prop_assert!(is_construction_failure);
    }
}
