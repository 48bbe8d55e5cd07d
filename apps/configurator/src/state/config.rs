//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`PCFORGE_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after initialization.

use std::path::PathBuf;

use directories::ProjectDirs;
use pcforge_core::{Money, ShippingPolicy, FREE_SHIPPING_THRESHOLD_CENTS, SHIPPING_FEE_CENTS};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ApiError;

const DATABASE_FILE: &str = "pcforge.db";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Explicit database file. `None` means the platform data directory.
    pub db_path: Option<PathBuf>,

    /// Store name (page titles, CLI banner)
    pub store_name: String,

    /// Shipping is free strictly above this subtotal
    pub free_shipping_threshold_cents: i64,

    /// Flat shipping fee below the threshold
    pub shipping_fee_cents: i64,
}

impl Default for AppConfig {
    /// ## Default Values
    /// - Store: "PCForge"
    /// - Shipping: free above 100.00 €, else 9.99 €
    fn default() -> Self {
        AppConfig {
            db_path: None,
            store_name: "PCForge".to_string(),
            free_shipping_threshold_cents: FREE_SHIPPING_THRESHOLD_CENTS,
            shipping_fee_cents: SHIPPING_FEE_CENTS,
        }
    }
}

impl AppConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `PCFORGE_DB_PATH`: database file
    /// - `PCFORGE_STORE_NAME`: store name
    /// - `PCFORGE_FREE_SHIPPING_THRESHOLD`: euros, e.g. "100" or "149.90"
    /// - `PCFORGE_SHIPPING_FEE`: euros, e.g. "9.99"
    ///
    /// Unparseable amounts are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = AppConfig::default();

        if let Some(path) = lookup("PCFORGE_DB_PATH") {
            config.db_path = Some(PathBuf::from(path));
        }

        if let Some(name) = lookup("PCFORGE_STORE_NAME") {
            config.store_name = name;
        }

        if let Some(cents) = parse_euros(&lookup, "PCFORGE_FREE_SHIPPING_THRESHOLD") {
            config.free_shipping_threshold_cents = cents;
        }

        if let Some(cents) = parse_euros(&lookup, "PCFORGE_SHIPPING_FEE") {
            config.shipping_fee_cents = cents;
        }

        config
    }

    pub fn shipping_policy(&self) -> ShippingPolicy {
        ShippingPolicy {
            free_threshold: Money::from_cents(self.free_shipping_threshold_cents),
            fee: Money::from_cents(self.shipping_fee_cents),
        }
    }

    /// Resolves the database file, creating the data directory if needed.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.pcforge.configurator/pcforge.db`
    /// - **Windows**: `%APPDATA%\pcforge\configurator\data\pcforge.db`
    /// - **Linux**: `~/.local/share/configurator/pcforge.db`
    pub fn database_path(&self) -> Result<PathBuf, ApiError> {
        if let Some(path) = &self.db_path {
            return Ok(path.clone());
        }

        let dirs = ProjectDirs::from("com", "pcforge", "configurator")
            .ok_or_else(|| ApiError::internal("Could not determine app data directory"))?;
        let data_dir = dirs.data_dir();

        std::fs::create_dir_all(data_dir).map_err(|e| {
            ApiError::internal(format!("Could not create {}: {}", data_dir.display(), e))
        })?;

        Ok(data_dir.join(DATABASE_FILE))
    }
}

fn parse_euros(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<i64> {
    let raw = lookup(key)?;
    match raw.parse::<Money>() {
        Ok(amount) if amount.cents() >= 0 => Some(amount.cents()),
        Ok(_) => {
            warn!(key, value = %raw, "Ignoring negative amount");
            None
        }
        Err(e) => {
            warn!(key, value = %raw, error = %e, "Ignoring invalid amount");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_core_shipping_rules() {
        let policy = AppConfig::default().shipping_policy();
        assert_eq!(policy, ShippingPolicy::default());
    }

    #[test]
    fn test_overrides_from_environment() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PCFORGE_DB_PATH", "/tmp/shop.db"),
            ("PCFORGE_STORE_NAME", "Forge Lyon"),
            ("PCFORGE_FREE_SHIPPING_THRESHOLD", "149.90"),
            ("PCFORGE_SHIPPING_FEE", "4,5"),
        ]));

        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/shop.db")));
        assert_eq!(config.store_name, "Forge Lyon");
        assert_eq!(config.free_shipping_threshold_cents, 14990);
        assert_eq!(config.shipping_fee_cents, 450);
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/shop.db"));
    }

    #[test]
    fn test_bad_amounts_keep_defaults() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PCFORGE_FREE_SHIPPING_THRESHOLD", "lots"),
            ("PCFORGE_SHIPPING_FEE", "-2"),
        ]));
        assert_eq!(config.free_shipping_threshold_cents, FREE_SHIPPING_THRESHOLD_CENTS);
        assert_eq!(config.shipping_fee_cents, SHIPPING_FEE_CENTS);
    }
}
