use hkdf::Hkdf;
use sha2::{Sha256, Sha384, Sha512};

use super::suite::AeadSuite;
use super::{CipherSuite, DerivedKey, HashFunction};
use crate::error::CryptoError;

/// Derive a [`KEY_LEN`](super::KEY_LEN)-byte key from an ephemeral shared
/// secret via HKDF.
///
/// No salt is used: the shared secret is expected to carry its own entropy.
/// Callers that need independent salting fold it into `context`, which is
/// passed as the HKDF `info` label.
///
/// The output key is wiped on drop, including on the error path. The HKDF
/// pseudorandom key held as HMAC state is not: `hkdf`/`hmac` have no zeroize
/// support, so it is freed unwiped when this function returns.
pub fn derive_key(
    hash: HashFunction,
    shared_secret: &[u8],
    context: &[u8],
) -> Result<DerivedKey, CryptoError> {
    let mut key = DerivedKey::zeroed();

    let expanded = match hash {
        HashFunction::Sha256 => Hkdf::<Sha256>::new(None, shared_secret).expand(context, &mut key.0),
        HashFunction::Sha384 => Hkdf::<Sha384>::new(None, shared_secret).expand(context, &mut key.0),
        HashFunction::Sha512 => Hkdf::<Sha512>::new(None, shared_secret).expand(context, &mut key.0),
    };
    expanded.map_err(|source| CryptoError::KeyDerivationFailed { hash, source })?;

    Ok(key)
}

/// Derive an AEAD cipher suite from an ephemeral shared secret, typically
/// produced by a handshake or key exchange.
///
/// Returns the keyed suite together with the derived key. The suite holds no
/// reference to `shared_secret`.
pub fn derive_cipher_suite(
    suite: CipherSuite,
    hash: HashFunction,
    shared_secret: &[u8],
    context: &[u8],
) -> Result<(AeadSuite, DerivedKey), CryptoError> {
    let key = derive_key(hash, shared_secret, context)?;
    let aead = suite.construct(key.as_bytes())?;

    tracing::debug!(
        suite = %suite,
        hash = %hash,
        context_len = context.len(),
        "derived cipher suite"
    );

    Ok((aead, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KEY_LEN;

    /// RFC 5869 test case 3: SHA-256, zero-length salt and info.
    #[test]
    fn rfc5869_case3() {
        let ikm = [0x0bu8; 22];
        let key = derive_key(HashFunction::Sha256, &ikm, &[]).unwrap();

        let expected =
            hex::decode("8da4e775a563c18f715f802a063c5a31b8a11f5c5ee1879ec3454e5f3c738d2d")
                .unwrap();
        assert_eq!(key.as_bytes().as_slice(), expected.as_slice());
    }

    #[test]
    fn pinned_sha256_key() {
        let key = derive_key(HashFunction::Sha256, &[0x01; 32], b"").unwrap();

        let expected =
            hex::decode("29cbef482b4acd04af7fb3d5e8bedbaa393040396f69e325f1029ec8f99f1ed2")
                .unwrap();
        assert_eq!(key.as_bytes().as_slice(), expected.as_slice());
    }

    #[test]
    fn pinned_sha384_and_sha512_keys() {
        let sha384 = derive_key(HashFunction::Sha384, &[0x01; 32], b"").unwrap();
        let sha512 = derive_key(HashFunction::Sha512, &[0x01; 32], b"").unwrap();

        assert_eq!(
            hex::encode(sha384.as_bytes()),
            "2975f687467be981c4ff7964fbea3d050dcb9700aecb737186a578e80929fd3c"
        );
        assert_eq!(
            hex::encode(sha512.as_bytes()),
            "fa5c70b4a6169ef56878ccb7343566e49050a1b897b63d534219605e5a8fc68a"
        );
    }

    #[test]
    fn context_is_hkdf_info() {
        let key = derive_key(HashFunction::Sha256, &[0x01; 32], b"handshake").unwrap();
        assert_eq!(
            hex::encode(key.as_bytes()),
            "b75c8e83d88bc364ba40e3e1c422c5ca2281cf6d927559e0f879f1dd80441160"
        );
    }

    #[test]
    fn key_length_is_fixed() {
        for len in [1usize, 32, 1000] {
            let secret = vec![0x5A; len];
            for hash in HashFunction::ALL {
                let key = derive_key(hash, &secret, b"ctx").unwrap();
                assert_eq!(key.as_bytes().len(), KEY_LEN);
            }
        }
    }

    #[test]
    fn derivation_is_deterministic() {
        for hash in HashFunction::ALL {
            let a = derive_key(hash, b"shared secret", b"context").unwrap();
            let b = derive_key(hash, b"shared secret", b"context").unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn derived_suite_uses_derived_key() {
        let (aead, key) =
            derive_cipher_suite(CipherSuite::ChaCha20Poly1305, HashFunction::Sha256, &[7; 32], b"x")
                .unwrap();

        let direct = CipherSuite::ChaCha20Poly1305
            .construct(key.as_bytes())
            .unwrap();
        let nonce = [0u8; 12];
        let ciphertext = aead.seal(&nonce, b"payload", b"").unwrap();
        assert_eq!(direct.open(&nonce, &ciphertext, b"").unwrap(), b"payload");
    }
}
