use std::sync::Arc;

use rusqlite::Result;

use crate::clock::Clock;
use crate::store::Store;

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Whether to use an in-memory store
    pub is_test_mode: bool,
    /// Custom database file path (ignored if in test mode)
    pub custom_path: Option<String>,
}

impl StoreConfig {
    /// Gets the effective database path
    pub fn get_path(&self) -> &str {
        if self.is_test_mode {
            ":memory:"
        } else {
            self.custom_path.as_deref().unwrap_or("star_practice.db")
        }
    }
}

/// Factory for creating Store instances
pub struct StoreFactory;

impl StoreFactory {
    /// Creates a store with the specified configuration and clock
    pub fn create(config: StoreConfig, clock: Arc<dyn Clock>) -> Result<Store> {
        Store::with_clock(config.get_path(), clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;

    #[test]
    fn test_default_path() {
        let config = StoreConfig {
            is_test_mode: false,
            custom_path: None,
        };
        assert_eq!(config.get_path(), "star_practice.db");
    }

    #[test]
    fn test_test_mode_path() {
        let config = StoreConfig {
            is_test_mode: true,
            custom_path: None,
        };
        assert_eq!(config.get_path(), ":memory:");
    }

    #[test]
    fn test_custom_path() {
        let config = StoreConfig {
            is_test_mode: false,
            custom_path: Some("custom.db".to_string()),
        };
        assert_eq!(config.get_path(), "custom.db");
    }

    #[test]
    fn test_test_mode_ignores_custom_path() {
        let config = StoreConfig {
            is_test_mode: true,
            custom_path: Some("custom.db".to_string()),
        };
        assert_eq!(config.get_path(), ":memory:");
    }

    #[test]
    fn test_create_with_test_mode() {
        let config = StoreConfig {
            is_test_mode: true,
            custom_path: None,
        };
        let store = StoreFactory::create(config, Arc::new(SystemClock));
        assert!(store.is_ok());
        assert!(store.unwrap().count_children().is_ok());
    }
}
