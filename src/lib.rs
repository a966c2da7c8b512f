pub mod config;
pub mod crypto;
pub mod error;

// Re-export key types at crate root for convenience.
pub use config::SuiteConfig;
pub use crypto::derive::{derive_cipher_suite, derive_key};
pub use crypto::suite::{aes256_gcm, chacha20_poly1305, xchacha20_poly1305, AeadSuite};
pub use crypto::{CipherSuite, DerivedKey, HashFunction, KEY_LEN, TAG_LEN};
pub use error::{ConfigError, CryptoError, Error, Result};
