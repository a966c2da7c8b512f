//! One-time CPU feature detection for hardware AES.
//!
//! AES-256-GCM is constant-time only when the CPU provides AES and carry-less
//! multiply instructions. Callers that insist on this opt in through
//! [`SuiteConfig`](crate::config::SuiteConfig); detection runs once per
//! process and is never consulted on the seal/open path.

use std::sync::OnceLock;

use super::CipherSuite;
use crate::error::ConfigError;

static AES_ACCELERATION: OnceLock<bool> = OnceLock::new();

/// Whether this CPU accelerates AES-GCM. Detected on first call, cached after.
pub fn aes_acceleration_available() -> bool {
    *AES_ACCELERATION.get_or_init(|| {
        let available = detect();
        tracing::debug!(available, "detected hardware AES support");
        available
    })
}

/// Reject `suite` if it depends on hardware AES and the CPU lacks it.
pub fn ensure_supported(suite: CipherSuite) -> Result<(), ConfigError> {
    match suite {
        CipherSuite::Aes256Gcm if !aes_acceleration_available() => {
            Err(ConfigError::HardwareAesUnavailable { suite })
        }
        _ => Ok(()),
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn detect() -> bool {
    is_x86_feature_detected!("aes") && is_x86_feature_detected!("pclmulqdq")
}

#[cfg(target_arch = "aarch64")]
fn detect() -> bool {
    std::arch::is_aarch64_feature_detected!("aes")
        && std::arch::is_aarch64_feature_detected!("pmull")
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
fn detect() -> bool {
    false
}
