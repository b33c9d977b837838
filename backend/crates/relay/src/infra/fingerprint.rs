//! Device Fingerprinting
//!
//! Derives a stable, opaque device identifier from the machine id and
//! platform. The raw machine id never leaves this module; only its
//! SHA-256 digest does.

use std::path::PathBuf;

use platform::crypto::{sha256_parts, to_hex};
use tokio::sync::OnceCell;

use crate::domain::gateway::FingerprintSource;
use crate::domain::value_objects::DeviceFingerprint;

const MACHINE_ID_PATHS: [&str; 2] = ["/etc/machine-id", "/var/lib/dbus/machine-id"];

/// Machine-id based fingerprint source
///
/// The first acquisition is cached; `warm` performs it ahead of time.
#[derive(Debug)]
pub struct DeviceFingerprinter {
    sources: Vec<PathBuf>,
    cache: OnceCell<Option<DeviceFingerprint>>,
}

impl Default for DeviceFingerprinter {
    fn default() -> Self {
        Self::with_sources(MACHINE_ID_PATHS.iter().map(PathBuf::from).collect())
    }
}

impl DeviceFingerprinter {
    pub fn with_sources(sources: Vec<PathBuf>) -> Self {
        Self {
            sources,
            cache: OnceCell::new(),
        }
    }

    /// Acquire once so a later `acquire` returns immediately
    pub async fn warm(&self) {
        let available = self.acquire().await.is_some();
        tracing::debug!(available, "Device fingerprint pre-warmed");
    }

    async fn compute(&self) -> Option<DeviceFingerprint> {
        for path in &self.sources {
            match tokio::fs::read_to_string(path).await {
                Ok(id) if !id.trim().is_empty() => {
                    let digest =
                        sha256_parts([id.trim(), std::env::consts::OS, std::env::consts::ARCH]);
                    return DeviceFingerprint::new(to_hex(&digest));
                }
                Ok(_) => continue,
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "Machine id unavailable");
                }
            }
        }
        None
    }
}

impl FingerprintSource for DeviceFingerprinter {
    async fn acquire(&self) -> Option<DeviceFingerprint> {
        self.cache.get_or_init(|| self.compute()).await.clone()
    }
}
