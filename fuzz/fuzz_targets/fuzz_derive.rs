#![no_main]

use libfuzzer_sys::fuzz_target;

use ephemeral_cipher::{derive_cipher_suite, CipherSuite, HashFunction};

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let suite = CipherSuite::ALL[usize::from(selector & 0x0F) % CipherSuite::ALL.len()];
    let hash = HashFunction::ALL[usize::from(selector >> 4) % HashFunction::ALL.len()];
    let (secret, context) = rest.split_at(rest.len() / 2);

    // Derivation at the fixed key length must succeed for every input.
    let (aead, key) = derive_cipher_suite(suite, hash, secret, context).unwrap();
    assert_eq!(key.as_bytes().len(), 32);

    let nonce = vec![0u8; aead.nonce_len()];
    let sealed = aead.seal(&nonce, context, secret).unwrap();
    assert_eq!(aead.open(&nonce, &sealed, secret).unwrap(), context);
});
