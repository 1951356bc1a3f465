//! Kiosk configuration.
//!
//! Read from an optional TOML file; every field has a default so an empty
//! file, or no file at all, yields the stock kiosk.
//!
//! ```toml
//! store_name = "Padoca da Kamila"
//! countdown_secs = 10
//!
//! [currency]
//! symbol = "R$"
//! thousands = "."
//! decimal = ","
//!
//! [log]
//! level = "debug"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{KioskError, Result};
use crate::money::MoneyFormat;
use crate::order::ReceiptFormat;
use crate::screens::Settings;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KioskConfig {
    pub store_name: String,
    pub tagline: String,
    pub countdown_secs: u32,
    pub tick_ms: u64,
    pub sound: bool,
    pub currency: CurrencyConfig,
    pub toast: ToastConfig,
    pub receipt: ReceiptConfig,
    pub log: LogConfig,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            store_name: "Padoca da Kamila".to_string(),
            tagline: "Padaria e Confeitaria".to_string(),
            countdown_secs: 10,
            tick_ms: 1000,
            sound: true,
            currency: CurrencyConfig::default(),
            toast: ToastConfig::default(),
            receipt: ReceiptConfig::default(),
            log: LogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CurrencyConfig {
    pub symbol: String,
    pub thousands: String,
    pub decimal: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: "R$".to_string(),
            thousands: ".".to_string(),
            decimal: ",".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToastConfig {
    pub short_ms: u64,
    pub long_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self { short_ms: 2000, long_ms: 3000 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReceiptConfig {
    pub width: usize,
    pub date_format: String,
    pub farewell: String,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            width: 40,
            date_format: "%d/%m/%Y %H:%M:%S".to_string(),
            farewell: "Thank you for your preference!".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Log file. Logging is off without one, the terminal belongs to the UI.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: Some(PathBuf::from("kiosk.log")),
        }
    }
}

impl KioskConfig {
    /// Load from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| KioskError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text).map_err(|source| KioskError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Parse TOML text. Zero countdown and tick values are raised to 1.
    pub fn parse(text: &str) -> std::result::Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(text)?;
        config.countdown_secs = config.countdown_secs.max(1);
        config.tick_ms = config.tick_ms.max(1);
        Ok(config)
    }

    /// Machine settings for this configuration.
    pub fn settings(&self) -> Result<Settings> {
        let money = MoneyFormat::new(
            &self.currency.symbol,
            &self.currency.thousands,
            &self.currency.decimal,
        )?;
        let receipt = ReceiptFormat {
            store_name: self.store_name.clone(),
            width: self.receipt.width,
            date_format: self.receipt.date_format.clone(),
            farewell: self.receipt.farewell.clone(),
            money: money.clone(),
        };

        Ok(Settings {
            store_name: self.store_name.clone(),
            tagline: self.tagline.clone(),
            money,
            countdown_secs: self.countdown_secs.max(1),
            tick_interval: Duration::from_millis(self.tick_ms.max(1)),
            toast_short: Duration::from_millis(self.toast.short_ms),
            toast_long: Duration::from_millis(self.toast.long_ms),
            receipt,
        })
    }
}
