use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

/// Runtime configuration, read from the environment.
#[derive(Clone, Default)]
pub struct Config {
    /// Seconds between two listing scans.
    pub scan_interval: Duration,
    /// Upper bound for a single page load, including the wait for the
    /// listing grid to render.
    pub fetch_timeout: Duration,
    pub price_min: u32,
    pub price_max: u32,
    pub kufar_url: String,
    pub avby_url: String,
    /// Headless browser binary used to render listing pages.
    pub chrome_bin: PathBuf,
    pub db_url: String,
    pub db_path: String,
    pub logs_path: PathBuf,
    pub telegram_token: String,
}

impl Config {
    pub fn new() -> Self {
        Self {
            scan_interval: Duration::from_secs(300),
            fetch_timeout: Duration::from_secs(60),
            price_min: 400,
            price_max: 1100,
            kufar_url: "https://auto.kufar.by/l/cars".to_string(),
            avby_url: "https://cars.av.by/filter".to_string(),
            chrome_bin: PathBuf::from("chromium"),
            db_url: "sqlite://data/carwatch.db".to_string(),
            db_path: "data/carwatch.db".to_string(),
            logs_path: PathBuf::from("logs"),
            telegram_token: String::new(),
        }
    }

    /// Applies the environment on top of the defaults.
    ///
    /// `TELEGRAM_TOKEN` is the only required key.
    pub fn load(&mut self) -> Result<(), AppError> {
        if let Ok(v) = std::env::var("SCAN_INTERVAL") {
            self.scan_interval = Duration::from_secs(Self::parse("SCAN_INTERVAL", &v)?);
        }
        if let Ok(v) = std::env::var("FETCH_TIMEOUT") {
            self.fetch_timeout = Duration::from_secs(Self::parse("FETCH_TIMEOUT", &v)?);
        }
        if let Ok(v) = std::env::var("PRICE_MIN") {
            self.price_min = Self::parse("PRICE_MIN", &v)?;
        }
        if let Ok(v) = std::env::var("PRICE_MAX") {
            self.price_max = Self::parse("PRICE_MAX", &v)?;
        }
        if let Ok(v) = std::env::var("KUFAR_URL") {
            self.kufar_url = v;
        }
        if let Ok(v) = std::env::var("AVBY_URL") {
            self.avby_url = v;
        }
        if let Ok(v) = std::env::var("CHROME_BIN") {
            self.chrome_bin = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("DB_URL") {
            self.db_url = v;
        }
        if let Ok(v) = std::env::var("DB_PATH") {
            self.db_path = v;
        }
        if let Ok(v) = std::env::var("LOGS_PATH") {
            self.logs_path = PathBuf::from(v);
        }
        self.telegram_token =
            std::env::var("TELEGRAM_TOKEN").map_err(|_| AppError::MissingConfig {
                key: "TELEGRAM_TOKEN".to_string(),
            })?;
        Ok(())
    }

    fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, AppError> {
        value.parse::<T>().map_err(|_| AppError::ConfigurationError {
            msg: format!("Invalid value for {key}: \"{value}\""),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.scan_interval, Duration::from_secs(300));
        assert_eq!(config.fetch_timeout, Duration::from_secs(60));
        assert_eq!(config.price_min, 400);
        assert_eq!(config.price_max, 1100);
        assert!(config.telegram_token.is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = Config::parse::<u64>("SCAN_INTERVAL", "soon").unwrap_err();
        assert!(matches!(err, AppError::ConfigurationError { .. }));
    }
}
