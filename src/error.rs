use crate::crypto::{CipherSuite, HashFunction};

/// Errors from key derivation, suite construction and AEAD operations.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("failed to derive key via HKDF-{hash}")]
    KeyDerivationFailed {
        hash: HashFunction,
        #[source]
        source: hkdf::InvalidLength,
    },

    #[error("failed to construct {suite} suite")]
    SuiteConstructionFailed {
        suite: CipherSuite,
        #[source]
        source: Box<CryptoError>,
    },

    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("invalid nonce length: expected {expected}, got {actual}")]
    InvalidNonceLength { expected: usize, actual: usize },

    #[error("AEAD encryption failed")]
    SealFailed,

    #[error("AEAD decryption failed: ciphertext is invalid or tampered")]
    OpenFailed,
}

impl CryptoError {
    /// Wraps `self` as the cause of a failed construction of `suite`.
    pub(crate) fn in_suite(self, suite: CipherSuite) -> Self {
        Self::SuiteConstructionFailed {
            suite,
            source: Box::new(self),
        }
    }
}

/// Errors from parsing and validating suite configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown cipher suite: '{0}' (supported: aes-256-gcm, chacha20-poly1305, xchacha20-poly1305)")]
    UnknownCipherSuite(String),

    #[error("unknown hash function: '{0}' (supported: sha256, sha384, sha512)")]
    UnknownHashFunction(String),

    #[error("{suite} requires hardware AES acceleration, which this CPU does not provide")]
    HardwareAesUnavailable { suite: CipherSuite },
}

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
