//! Dispatcher configuration.

use crate::error::ConfigError;

/// Namespace prefixed to every event name.
pub const DEFAULT_NAMESPACE: &str = "hashactions";

/// Settings for a hash dispatcher.
///
/// With the `serde` feature the struct can be loaded from application
/// settings; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct DispatcherConfig {
    /// Strip the bare `#` from the visible URL whenever the fragment becomes
    /// empty, however that happened.
    pub hide_empty_hash_from_url: bool,
    /// Event name prefix.
    pub namespace: String,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            hide_empty_hash_from_url: false,
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl DispatcherConfig {
    /// Check that the namespace can be embedded in event names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.is_empty() {
            return Err(ConfigError::EmptyNamespace);
        }
        if self.namespace.contains(':') {
            return Err(ConfigError::InvalidNamespace(self.namespace.clone()));
        }
        Ok(())
    }
}
