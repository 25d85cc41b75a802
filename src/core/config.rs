//! Engine configuration loaded from the environment

use std::env;

/// Storage key used by the mobile app; kept for on-disk compatibility
pub const DEFAULT_STORAGE_KEY: &str = "@pingit/reminders";

/// Default path backing the file store in the demo shell
pub const DEFAULT_STORAGE_PATH: &str = "pingit.json";

/// Runtime configuration for the reminder engine
#[derive(Debug, Clone)]
pub struct Config {
    /// Key under which the reminder collection is persisted
    pub storage_key: String,
    /// Path of the file store used outside the mobile shell
    pub storage_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_path: DEFAULT_STORAGE_PATH.to_string(),
        }
    }
}

impl Config {
    /// Build a config from `PINGIT_*` environment variables, falling back
    /// to the defaults for anything unset
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Config {
            storage_key: env::var("PINGIT_STORAGE_KEY").unwrap_or(defaults.storage_key),
            storage_path: env::var("PINGIT_STORAGE_PATH").unwrap_or(defaults.storage_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_mobile_app_key() {
        let config = Config::default();
        assert_eq!(config.storage_key, "@pingit/reminders");
    }
}
