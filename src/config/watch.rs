//! `[watch]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `[watch]` section in renderall.toml - change watcher settings.
///
/// # Example
/// ```toml
/// [watch]
/// debounce = 2   # seconds
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct WatchConfig {
    /// Window (seconds) in which repeated events on the same path are dropped.
    #[serde(default = "defaults::watch::debounce")]
    #[educe(Default = defaults::watch::debounce())]
    pub debounce: u64,
}

impl WatchConfig {
    pub const fn debounce_delay(&self) -> Duration {
        Duration::from_secs(self.debounce)
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::time::Duration;

    #[test]
    fn test_watch_config_default() {
        let config: SiteConfig = toml::from_str("").unwrap();
        assert_eq!(config.watch.debounce, 5);
        assert_eq!(config.watch.debounce_delay(), Duration::from_secs(5));
    }

    #[test]
    fn test_watch_config_override() {
        let config: SiteConfig = toml::from_str("[watch]\ndebounce = 0").unwrap();
        assert_eq!(config.watch.debounce_delay(), Duration::ZERO);
    }

    #[test]
    fn test_unknown_field_rejection() {
        let result: Result<SiteConfig, _> = toml::from_str("[watch]\ninterval = 3");
        assert!(result.is_err());
    }
}
