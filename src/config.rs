use serde::{Deserialize, Serialize};

use crate::crypto::derive::derive_cipher_suite;
use crate::crypto::suite::AeadSuite;
use crate::crypto::{hardware, CipherSuite, DerivedKey, HashFunction};
use crate::error::{ConfigError, CryptoError};

/// Algorithm choice for deriving cipher suites, fixed before any key
/// material exists.
///
/// Deserialization goes through [`SuiteConfigBuilder::build`], so a loaded
/// config is validated the same way as a built one.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSuiteConfig")]
pub struct SuiteConfig {
    /// AEAD suite to instantiate (default: ChaCha20-Poly1305).
    pub suite: CipherSuite,

    /// Hash function for HKDF (default: SHA-256).
    pub hash: HashFunction,

    /// Refuse AES-256-GCM on CPUs without AES acceleration (default: false).
    pub require_hardware_aes: bool,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            suite: CipherSuite::ChaCha20Poly1305,
            hash: HashFunction::Sha256,
            require_hardware_aes: false,
        }
    }
}

impl SuiteConfig {
    /// Create a builder for constructing a `SuiteConfig`.
    pub fn builder() -> SuiteConfigBuilder {
        SuiteConfigBuilder::default()
    }

    /// Check the configuration against this machine.
    ///
    /// `build()` and deserialization already do this.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.require_hardware_aes {
            hardware::ensure_supported(self.suite)?;
        }
        Ok(())
    }

    /// Derive the configured suite from `shared_secret`, labelled by `context`.
    pub fn derive(
        &self,
        shared_secret: &[u8],
        context: &[u8],
    ) -> Result<(AeadSuite, DerivedKey), CryptoError> {
        derive_cipher_suite(self.suite, self.hash, shared_secret, context)
    }
}

/// Unvalidated wire form of [`SuiteConfig`].
#[derive(Deserialize)]
#[serde(default)]
struct RawSuiteConfig {
    suite: CipherSuite,
    hash: HashFunction,
    require_hardware_aes: bool,
}

impl Default for RawSuiteConfig {
    fn default() -> Self {
        let defaults = SuiteConfig::default();
        Self {
            suite: defaults.suite,
            hash: defaults.hash,
            require_hardware_aes: defaults.require_hardware_aes,
        }
    }
}

impl TryFrom<RawSuiteConfig> for SuiteConfig {
    type Error = ConfigError;

    fn try_from(raw: RawSuiteConfig) -> Result<Self, Self::Error> {
        SuiteConfig::builder()
            .suite(raw.suite)
            .hash(raw.hash)
            .require_hardware_aes(raw.require_hardware_aes)
            .build()
    }
}

/// Builder for [`SuiteConfig`].
#[derive(Debug, Clone)]
pub struct SuiteConfigBuilder {
    suite: CipherSuite,
    hash: HashFunction,
    require_hardware_aes: bool,
}

impl Default for SuiteConfigBuilder {
    fn default() -> Self {
        let defaults = SuiteConfig::default();
        Self {
            suite: defaults.suite,
            hash: defaults.hash,
            require_hardware_aes: defaults.require_hardware_aes,
        }
    }
}

impl SuiteConfigBuilder {
    pub fn suite(mut self, suite: CipherSuite) -> Self {
        self.suite = suite;
        self
    }

    pub fn hash(mut self, hash: HashFunction) -> Self {
        self.hash = hash;
        self
    }

    pub fn require_hardware_aes(mut self, require: bool) -> Self {
        self.require_hardware_aes = require;
        self
    }

    /// Build the `SuiteConfig`, checking hardware support if required.
    pub fn build(self) -> Result<SuiteConfig, ConfigError> {
        let config = SuiteConfig {
            suite: self.suite,
            hash: self.hash,
            require_hardware_aes: self.require_hardware_aes,
        };
        config.validate()?;
        Ok(config)
    }
}
