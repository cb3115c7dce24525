//! Configuration file support for Konv.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/konv/config.toml`.

use crate::types::{UnitDefinition, UnitTable};
use crate::units::default_table;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub units: UnitsConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// History retention configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

/// Units preselected when none are given
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_from_unit")]
    pub from: String,

    #[serde(default = "default_to_unit")]
    pub to: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            from: default_from_unit(),
            to: default_to_unit(),
        }
    }
}

/// Unit table override
///
/// When `definitions` is non-empty it replaces the built-in table.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct UnitsConfig {
    #[serde(default)]
    pub definitions: Vec<UnitDefinition>,
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        std::env::var("HOME")
            .map(|home| PathBuf::from(home).join(".local/share"))
            .unwrap_or_else(|_| PathBuf::from("."))
    });
    base.join("konv")
}

fn default_max_entries() -> usize {
    crate::history::DEFAULT_CAPACITY
}

fn default_from_unit() -> String {
    "m".into()
}

fn default_to_unit() -> String {
    "cm".into()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|_| PathBuf::from("."))
        });
        base.join("konv").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// The unit table this configuration selects, validated
    pub fn unit_table(&self) -> Result<Cow<'static, UnitTable>> {
        if self.units.definitions.is_empty() {
            Ok(Cow::Borrowed(default_table()))
        } else {
            let table = UnitTable::new(self.units.definitions.clone())?;
            tracing::info!("Using custom unit table with {} units", table.len());
            Ok(Cow::Owned(table))
        }
    }

    /// Check settings against each other and the unit table
    pub fn validate(&self, table: &UnitTable) -> Result<()> {
        if self.history.max_entries == 0 {
            return Err(Error::Config(
                "history.max_entries must be at least 1".into(),
            ));
        }
        for symbol in [&self.defaults.from, &self.defaults.to] {
            if !table.contains(symbol) {
                return Err(Error::Config(format!(
                    "default unit '{}' is not in the unit table",
                    symbol
                )));
            }
        }
        Ok(())
    }

    pub fn history_path(&self) -> PathBuf {
        self.data.data_dir.join("history.json")
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.data.data_dir.join("preferences.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.history.max_entries, 50);
        assert_eq!(config.defaults.from, "m");
        assert_eq!(config.defaults.to, "cm");
        assert!(config.units.definitions.is_empty());
    }

    #[test]
    fn test_default_config_validates() {
        let config = Config::default();
        let table = config.unit_table().unwrap();
        assert_eq!(table.len(), 9);
        config.validate(&table).unwrap();
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.history.max_entries, parsed.history.max_entries);
        assert_eq!(config.defaults.to, parsed.defaults.to);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[history]
max_entries = 5
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.history.max_entries, 5);
        assert_eq!(config.defaults.from, "m"); // default
    }

    #[test]
    fn test_custom_unit_table() {
        let toml_str = r#"
[defaults]
from = "m"
to = "ft"

[[units.definitions]]
symbol = "m"
label = "Meter (m)"
factor = 1.0

[[units.definitions]]
symbol = "ft"
label = "Foot (ft)"
factor = 0.3048
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        let table = config.unit_table().unwrap();
        assert_eq!(table.symbols().collect::<Vec<_>>(), vec!["m", "ft"]);
        config.validate(&table).unwrap();
    }

    #[test]
    fn test_invalid_custom_table_rejected() {
        let toml_str = r#"
[[units.definitions]]
symbol = "m"
label = "Meter (m)"
factor = -1.0
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(matches!(config.unit_table(), Err(Error::UnitTable(_))));
    }

    #[test]
    fn test_default_unit_missing_from_table() {
        let mut config = Config::default();
        config.defaults.to = "furlong".into();
        let table = config.unit_table().unwrap();
        assert!(matches!(config.validate(&table), Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_history_capacity_rejected() {
        let mut config = Config::default();
        config.history.max_entries = 0;
        assert!(config.validate(default_table()).is_err());
    }

    #[test]
    fn test_save_and_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("konv/config.toml");

        let mut config = Config::default();
        config.history.max_entries = 7;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.history.max_entries, 7);
    }
}
