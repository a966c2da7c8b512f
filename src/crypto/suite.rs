use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{Aead, AeadInPlace, KeyInit, Payload};
use aes_gcm::Aes256Gcm;
use chacha20poly1305::{ChaCha20Poly1305, Nonce, XChaCha20Poly1305, XNonce};

use super::CipherSuite;
use crate::error::CryptoError;

/// AEAD via AES-256-GCM.
pub fn aes256_gcm() -> CipherSuite {
    CipherSuite::Aes256Gcm
}

/// AEAD via ChaCha20-Poly1305. Expects a 256-bit key.
pub fn chacha20_poly1305() -> CipherSuite {
    CipherSuite::ChaCha20Poly1305
}

/// AEAD via XChaCha20-Poly1305. Expects a 256-bit key.
pub fn xchacha20_poly1305() -> CipherSuite {
    CipherSuite::XChaCha20Poly1305
}

impl CipherSuite {
    /// Instantiate this suite from a raw key.
    ///
    /// The key must be exactly [`CipherSuite::key_len`] bytes; it is never
    /// truncated or padded.
    pub fn construct(self, key: &[u8]) -> Result<AeadSuite, CryptoError> {
        AeadSuite::new(self, key)
    }
}

/// A keyed AEAD cipher, ready to seal and open.
///
/// Nonces are supplied by the caller on every call. The ChaCha variants wipe
/// their key on drop. For AES-256-GCM the round keys and GHASH subkey are
/// wiped by the backend in use; polyval's aarch64 PMULL backend does not
/// wipe the subkey.
pub enum AeadSuite {
    Aes256Gcm(Box<Aes256Gcm>),
    ChaCha20Poly1305(ChaCha20Poly1305),
    XChaCha20Poly1305(XChaCha20Poly1305),
}

impl AeadSuite {
    pub(crate) fn new(suite: CipherSuite, key: &[u8]) -> Result<Self, CryptoError> {
        let invalid_length = |_| {
            CryptoError::InvalidKeyLength {
                expected: suite.key_len(),
                actual: key.len(),
            }
            .in_suite(suite)
        };

        let aead = match suite {
            CipherSuite::Aes256Gcm => {
                Self::Aes256Gcm(Box::new(Aes256Gcm::new_from_slice(key).map_err(invalid_length)?))
            }
            CipherSuite::ChaCha20Poly1305 => {
                Self::ChaCha20Poly1305(ChaCha20Poly1305::new_from_slice(key).map_err(invalid_length)?)
            }
            CipherSuite::XChaCha20Poly1305 => Self::XChaCha20Poly1305(
                XChaCha20Poly1305::new_from_slice(key).map_err(invalid_length)?,
            ),
        };

        tracing::trace!(suite = %suite, "constructed AEAD suite");
        Ok(aead)
    }

    pub fn cipher_suite(&self) -> CipherSuite {
        match self {
            Self::Aes256Gcm(_) => CipherSuite::Aes256Gcm,
            Self::ChaCha20Poly1305(_) => CipherSuite::ChaCha20Poly1305,
            Self::XChaCha20Poly1305(_) => CipherSuite::XChaCha20Poly1305,
        }
    }

    pub fn key_len(&self) -> usize {
        self.cipher_suite().key_len()
    }

    pub fn nonce_len(&self) -> usize {
        self.cipher_suite().nonce_len()
    }

    pub fn tag_len(&self) -> usize {
        self.cipher_suite().tag_len()
    }

    fn check_nonce(&self, nonce: &[u8]) -> Result<(), CryptoError> {
        let expected = self.nonce_len();
        if nonce.len() != expected {
            return Err(CryptoError::InvalidNonceLength {
                expected,
                actual: nonce.len(),
            });
        }
        Ok(())
    }

    /// Encrypt `plaintext`, authenticating `aad`. Returns ciphertext with the
    /// 16-byte tag appended.
    pub fn seal(&self, nonce: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.check_nonce(nonce)?;

        let payload = Payload {
            msg: plaintext,
            aad,
        };
        let sealed = match self {
            Self::Aes256Gcm(cipher) => cipher.encrypt(GenericArray::from_slice(nonce), payload),
            Self::ChaCha20Poly1305(cipher) => cipher.encrypt(Nonce::from_slice(nonce), payload),
            Self::XChaCha20Poly1305(cipher) => cipher.encrypt(XNonce::from_slice(nonce), payload),
        };
        sealed.map_err(|_| CryptoError::SealFailed)
    }

    /// Decrypt and verify `ciphertext` (tag appended) against `aad`.
    ///
    /// Any modification of the ciphertext, nonce or associated data yields
    /// [`CryptoError::OpenFailed`].
    pub fn open(&self, nonce: &[u8], ciphertext: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.check_nonce(nonce)?;
        if ciphertext.len() < self.tag_len() {
            return Err(CryptoError::OpenFailed);
        }

        let payload = Payload {
            msg: ciphertext,
            aad,
        };
        let opened = match self {
            Self::Aes256Gcm(cipher) => cipher.decrypt(GenericArray::from_slice(nonce), payload),
            Self::ChaCha20Poly1305(cipher) => cipher.decrypt(Nonce::from_slice(nonce), payload),
            Self::XChaCha20Poly1305(cipher) => cipher.decrypt(XNonce::from_slice(nonce), payload),
        };
        opened.map_err(|_| CryptoError::OpenFailed)
    }

    /// Encrypt `buffer` in place and append the tag.
    pub fn seal_in_place(
        &self,
        nonce: &[u8],
        aad: &[u8],
        buffer: &mut Vec<u8>,
    ) -> Result<(), CryptoError> {
        self.check_nonce(nonce)?;

        let sealed = match self {
            Self::Aes256Gcm(cipher) => {
                cipher.encrypt_in_place(GenericArray::from_slice(nonce), aad, buffer)
            }
            Self::ChaCha20Poly1305(cipher) => {
                cipher.encrypt_in_place(Nonce::from_slice(nonce), aad, buffer)
            }
            Self::XChaCha20Poly1305(cipher) => {
                cipher.encrypt_in_place(XNonce::from_slice(nonce), aad, buffer)
            }
        };
        sealed.map_err(|_| CryptoError::SealFailed)
    }

    /// Verify and decrypt `buffer` in place, stripping the tag.
    ///
    /// On failure the buffer contents are unspecified and must be discarded.
    pub fn open_in_place(
        &self,
        nonce: &[u8],
        aad: &[u8],
        buffer: &mut Vec<u8>,
    ) -> Result<(), CryptoError> {
        self.check_nonce(nonce)?;
        if buffer.len() < self.tag_len() {
            return Err(CryptoError::OpenFailed);
        }

        let opened = match self {
            Self::Aes256Gcm(cipher) => {
                cipher.decrypt_in_place(GenericArray::from_slice(nonce), aad, buffer)
            }
            Self::ChaCha20Poly1305(cipher) => {
                cipher.decrypt_in_place(Nonce::from_slice(nonce), aad, buffer)
            }
            Self::XChaCha20Poly1305(cipher) => {
                cipher.decrypt_in_place(XNonce::from_slice(nonce), aad, buffer)
            }
        };
        opened.map_err(|_| CryptoError::OpenFailed)
    }
}

impl std::fmt::Debug for AeadSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AeadSuite").field(&self.cipher_suite()).finish()
    }
}
