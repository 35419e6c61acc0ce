//! Configuration Module
//!
//! Cache sizing and TTL parameters, loaded from environment variables
//! with documented defaults.

use std::env;
use std::str::FromStr;

use crate::error::{CacheError, Result};

/// Cache layer configuration.
///
/// Missing variables fall back to the documented defaults. Values that
/// are present but unparseable, and zero values, are a fatal configuration
/// error at startup rather than something silently replaced.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum pages held per read-through cache
    pub page_capacity: usize,
    /// TTL in seconds for cached list pages; short, list views are
    /// refreshed on user interaction anyway
    pub page_ttl_secs: u64,
    /// Maximum artifacts held per panel cache
    pub panel_capacity: usize,
    /// Background sweep interval in seconds
    pub sweep_interval_secs: u64,
}

impl CacheConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `DASHCACHE_PAGE_CAPACITY` - pages per list cache (default: 256)
    /// - `DASHCACHE_PAGE_TTL` - list page TTL in seconds (default: 60)
    /// - `DASHCACHE_PANEL_CAPACITY` - artifacts per panel cache (default: 512)
    /// - `DASHCACHE_SWEEP_INTERVAL` - sweep frequency in seconds (default: 30)
    pub fn from_env() -> Result<Self> {
        let config = Self {
            page_capacity: read_var("DASHCACHE_PAGE_CAPACITY", 256)?,
            page_ttl_secs: read_var("DASHCACHE_PAGE_TTL", 60)?,
            panel_capacity: read_var("DASHCACHE_PANEL_CAPACITY", 512)?,
            sweep_interval_secs: read_var("DASHCACHE_SWEEP_INTERVAL", 30)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would construct a useless cache.
    pub fn validate(&self) -> Result<()> {
        if self.page_capacity == 0 {
            return Err(CacheError::Configuration(
                "page_capacity must be greater than zero".to_string(),
            ));
        }
        if self.page_ttl_secs == 0 {
            return Err(CacheError::Configuration(
                "page_ttl_secs must be greater than zero".to_string(),
            ));
        }
        if self.panel_capacity == 0 {
            return Err(CacheError::Configuration(
                "panel_capacity must be greater than zero".to_string(),
            ));
        }
        if self.sweep_interval_secs == 0 {
            return Err(CacheError::Configuration(
                "sweep_interval_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            page_capacity: 256,
            page_ttl_secs: 60,
            panel_capacity: 512,
            sweep_interval_secs: 30,
        }
    }
}

fn read_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| {
            CacheError::Configuration(format!("{name} has unparseable value '{raw}'"))
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.page_capacity, 256);
        assert_eq!(config.page_ttl_secs, 60);
        assert_eq!(config.panel_capacity, 512);
        assert_eq!(config.sweep_interval_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let config = CacheConfig {
            page_ttl_secs: 0,
            ..CacheConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CacheError::Configuration(_))
        ));
    }

    #[test]
    fn test_from_env_overrides_and_rejects_garbage() {
        // Env manipulation stays inside one test to avoid racing parallel
        // test threads on the same variables.
        env::remove_var("DASHCACHE_PAGE_CAPACITY");
        env::remove_var("DASHCACHE_PAGE_TTL");
        env::remove_var("DASHCACHE_PANEL_CAPACITY");
        env::remove_var("DASHCACHE_SWEEP_INTERVAL");

        let defaults = CacheConfig::from_env().unwrap();
        assert_eq!(defaults.page_capacity, 256);

        env::set_var("DASHCACHE_PAGE_TTL", "120");
        let overridden = CacheConfig::from_env().unwrap();
        assert_eq!(overridden.page_ttl_secs, 120);

        env::set_var("DASHCACHE_PAGE_TTL", "two minutes");
        assert!(matches!(
            CacheConfig::from_env(),
            Err(CacheError::Configuration(_))
        ));

        env::set_var("DASHCACHE_PAGE_TTL", "0");
        assert!(matches!(
            CacheConfig::from_env(),
            Err(CacheError::Configuration(_))
        ));

        env::remove_var("DASHCACHE_PAGE_TTL");
    }
}
