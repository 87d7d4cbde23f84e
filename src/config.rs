//! Synchronizer configuration.
//!
//! # Example
//!
//! ```
//! use ac3_sync::{LfeMode, SyncConfig};
//!
//! let config = SyncConfig::from_json(r#"{ "lfe_mode": "layout" }"#).unwrap();
//! assert_eq!(config.lfe_mode, LfeMode::Layout);
//! assert_eq!(config.channel_capacity, 64);
//! ```

use serde::{Deserialize, Serialize};

use crate::bitstream::LfeMode;
use crate::error::Result;

/// Default initial buffer capacity (8KB, two of the largest frames).
pub const DEFAULT_INITIAL_CAPACITY: usize = 8 * 1024;

/// Default capacity of the task command and event channels.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Configuration for [`FrameSynchronizer`](crate::FrameSynchronizer) and
/// the synchronizer task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Initial capacity of the accumulation buffer.
    pub initial_capacity: usize,
    /// How the LFE flag is decoded.
    pub lfe_mode: LfeMode,
    /// Channel capacity for the synchronizer task.
    pub channel_capacity: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            lfe_mode: LfeMode::default(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl SyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_lfe_mode(mut self, lfe_mode: LfeMode) -> Self {
        self.lfe_mode = lfe_mode;
        self
    }

    /// Set the task channel capacity (minimum 1).
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    /// Parse a configuration; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.channel_capacity = config.channel_capacity.max(1);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Ac3Error;

    #[test]
    fn test_config_default() {
        let config = SyncConfig::default();
        assert_eq!(config.initial_capacity, DEFAULT_INITIAL_CAPACITY);
        assert_eq!(config.lfe_mode, LfeMode::Compat);
        assert_eq!(config.channel_capacity, DEFAULT_CHANNEL_CAPACITY);
    }

    #[test]
    fn test_config_builder() {
        let config = SyncConfig::new()
            .with_initial_capacity(512)
            .with_lfe_mode(LfeMode::Layout)
            .with_channel_capacity(0);

        assert_eq!(config.initial_capacity, 512);
        assert_eq!(config.lfe_mode, LfeMode::Layout);
        assert_eq!(config.channel_capacity, 1);
    }

    #[test]
    fn test_from_json_partial() {
        let config = SyncConfig::from_json(r#"{ "initial_capacity": 1024 }"#).unwrap();
        assert_eq!(config.initial_capacity, 1024);
        assert_eq!(config.lfe_mode, LfeMode::Compat);
        assert_eq!(config.channel_capacity, DEFAULT_CHANNEL_CAPACITY);
    }

    #[test]
    fn test_from_json_clamps_channel_capacity() {
        let config = SyncConfig::from_json(r#"{ "channel_capacity": 0 }"#).unwrap();
        assert_eq!(config.channel_capacity, 1);
    }

    #[test]
    fn test_from_json_invalid() {
        let result = SyncConfig::from_json(r#"{ "lfe_mode": "bogus" }"#);
        assert!(matches!(result, Err(Ac3Error::Json(_))));
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = SyncConfig::new().with_lfe_mode(LfeMode::Layout);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SyncConfig::from_json(&json).unwrap(), config);
    }
}
