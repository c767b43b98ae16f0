//! Shared configuration for the parking crates.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file (extension resolved by the `config` crate).
const DEFAULT_CONFIG_PATH: &str = "config/parking";
const ENV_CONFIG_PATH: &str = "PARKING_CONFIG";
const ENV_PREFIX: &str = "PARKING";

/// Lot dimensions. Load from TOML or env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotConfig {
    /// Number of regular slots.
    pub capacity: usize,
    /// Number of EV slots.
    pub ev_capacity: usize,
    /// Level tag of the lot.
    pub level: u32,
}

impl Default for LotConfig {
    fn default() -> Self {
        Self {
            capacity: 10,
            ev_capacity: 5,
            level: 1,
        }
    }
}

impl LotConfig {
    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("capacity", defaults.capacity as i64)?
            .set_default("ev_capacity", defaults.ev_capacity as i64)?
            .set_default("level", i64::from(defaults.level))
    }

    /// Load config from file and environment. Precedence: `PARKING__*` env > env `PARKING_CONFIG` path
    /// (or `config/parking`) > defaults. A missing file is not an error.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let built = Self::builder()?
            .add_source(config::File::with_name(&config_path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        built.try_deserialize()
    }

    /// Load config from an explicit file over the defaults. The file must exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        Self::builder()?
            .add_source(config::File::from(path.as_ref()))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    /// Serializes tests that touch process environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_matches_single_level_lot() {
        let config = LotConfig::default();
        assert_eq!((config.capacity, config.ev_capacity, config.level), (10, 5, 1));
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "capacity = 3\nlevel = 2").unwrap();

        let config = LotConfig::load_from(file.path()).unwrap();
        assert_eq!(config.capacity, 3);
        assert_eq!(config.ev_capacity, 5);
        assert_eq!(config.level, 2);
    }

    #[test]
    fn test_load_reads_file_named_by_env() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("lot.toml"), "ev_capacity = 7\n").unwrap();
        std::env::set_var(ENV_CONFIG_PATH, dir.path().join("lot"));

        let config = LotConfig::load().unwrap();
        std::env::remove_var(ENV_CONFIG_PATH);
        assert_eq!(config.ev_capacity, 7);
        assert_eq!(config.capacity, 10);
    }

    #[test]
    fn test_env_overrides_file_and_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("lot.toml"), "capacity = 3\n").unwrap();
        std::env::set_var(ENV_CONFIG_PATH, dir.path().join("lot"));
        std::env::set_var("PARKING__CAPACITY", "20");
        std::env::set_var("PARKING__EV_CAPACITY", "9");

        let config = LotConfig::load();
        std::env::remove_var(ENV_CONFIG_PATH);
        std::env::remove_var("PARKING__CAPACITY");
        std::env::remove_var("PARKING__EV_CAPACITY");

        // `ev_capacity` keeps its single underscore; only `__` nests keys.
        assert_eq!(
            config.unwrap(),
            LotConfig {
                capacity: 20,
                ev_capacity: 9,
                level: 1,
            }
        );
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LotConfig::load_from(dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_load_from_rejects_negative_capacity() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "capacity = -1").unwrap();
        assert!(LotConfig::load_from(file.path()).is_err());
    }
}
