//! Parameters that survive a reboot.
//!
//! `save` encodes the current [`Settings`] as a small JSON object and hands it
//! to [`Platform::persist`](crate::platform::Platform::persist). At start-up
//! the shell asks [`Platform::restore`](crate::platform::Platform::restore)
//! for that blob and applies it over the [`Config`](super::Config) defaults.
//!
//! ```text
//! {"threshold":"info","mode":"command"}
//! ```

use heapless::Vec;
use serde::{Deserialize, Serialize};

use super::error::Error;
use super::log::Level;
use super::mode::Mode;

/// Maximum size of an encoded settings blob.
pub const SETTINGS_BLOB_LEN: usize = 64;

/// Encoded settings.
pub type SettingsBlob = Vec<u8, SETTINGS_BLOB_LEN>;

/// Persisted shell parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Debug threshold.
    pub threshold: Level,
    /// Mode to start in.
    pub mode: Mode,
}

impl Settings {
    /// Encodes the settings.
    pub fn encode(&self) -> Result<SettingsBlob, Error> {
        let mut buf = [0u8; SETTINGS_BLOB_LEN];
        let len = serde_json_core::to_slice(self, &mut buf).map_err(|_| Error::Settings)?;
        Vec::from_slice(&buf[..len]).map_err(|_| Error::Settings)
    }

    /// Decodes a blob produced by [`encode`](Self::encode).
    pub fn decode(blob: &[u8]) -> Result<Self, Error> {
        serde_json_core::from_slice::<Settings>(blob)
            .map(|(settings, _)| settings)
            .map_err(|_| Error::Settings)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Settings {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Settings {{ threshold: {}, mode: {} }}",
            self.threshold,
            self.mode
        )
    }
}
