//! Service configuration
//!
//! `from_env` loads `.env` first, then reads the process environment.
//! Values that are missing or fail to parse fall back to the defaults.

/// Configuration for the back-office services
#[derive(Debug, Clone)]
pub struct Config {
    /// Low-stock threshold applied to new variants when none is supplied
    pub default_low_stock_threshold: i64,
    /// Capacity of the product event broadcast channel
    pub event_channel_capacity: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            default_low_stock_threshold: std::env::var("DEFAULT_LOW_STOCK_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            event_channel_capacity: std::env::var("EVENT_CHANNEL_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(64),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_low_stock_threshold: 5,
            event_channel_capacity: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_low_stock_threshold, 5);
        assert_eq!(config.event_channel_capacity, 64);
    }

    #[test]
    fn test_from_env_overrides_and_fallback() {
        unsafe {
            std::env::set_var("DEFAULT_LOW_STOCK_THRESHOLD", "9");
            std::env::set_var("EVENT_CHANNEL_CAPACITY", "128");
        }
        let config = Config::from_env();
        assert_eq!(config.default_low_stock_threshold, 9);
        assert_eq!(config.event_channel_capacity, 128);

        // unparseable values fall back to the defaults
        unsafe {
            std::env::set_var("DEFAULT_LOW_STOCK_THRESHOLD", "not-a-number");
            std::env::remove_var("EVENT_CHANNEL_CAPACITY");
        }
        let config = Config::from_env();
        assert_eq!(config.default_low_stock_threshold, 5);
        assert_eq!(config.event_channel_capacity, 64);

        unsafe {
            std::env::remove_var("DEFAULT_LOW_STOCK_THRESHOLD");
        }
    }
}
