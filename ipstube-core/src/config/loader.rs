//! Configuration persistence
//!
//! Decodes a [`ClockConfig`] from a postcard blob read out of flash by the
//! board code. Falls back to the default preset if the blob is missing,
//! corrupt or from another layout version.

use super::hardware::ClockConfig;
use super::types::CONFIG_VERSION;

/// Maximum serialized config size (binary)
pub const MAX_CONFIG_SIZE: usize = 256;

/// Configuration persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Deserialization failed
    Deserialize,
    /// Serialization failed (buffer too small)
    Serialize,
    /// Config version mismatch
    VersionMismatch,
}

/// Load configuration from a postcard blob
pub fn load_config(bytes: &[u8]) -> Result<ClockConfig, ConfigError> {
    debug!("Decoding {} bytes of config", bytes.len());

    let config: ClockConfig = postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;

    if config.version != CONFIG_VERSION {
        warn!(
            "Config version mismatch: found {}, expected {}",
            config.version, CONFIG_VERSION
        );
        return Err(ConfigError::VersionMismatch);
    }

    info!(
        "Configuration loaded: {} panels {}x{}",
        config.panel.count, config.panel.width, config.panel.height
    );
    Ok(config)
}

/// Load configuration, falling back to [`ClockConfig::default`]
pub fn load_or_default(bytes: &[u8]) -> ClockConfig {
    match load_config(bytes) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config: {:?}, using defaults", e);
            ClockConfig::default()
        }
    }
}

/// Serialize configuration into `buffer`
///
/// Returns the used prefix of `buffer`.
pub fn store_config<'b>(
    config: &ClockConfig,
    buffer: &'b mut [u8],
) -> Result<&'b mut [u8], ConfigError> {
    let bytes = postcard::to_slice(config, buffer).map_err(|_| ConfigError::Serialize)?;
    debug!("Serialized config into {} bytes", bytes.len());
    Ok(bytes)
}
