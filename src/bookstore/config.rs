use crate::error::{BookstoreError, Result};
use crate::model::{DEFAULT_CURRENCY, DEFAULT_UNIT};
use crate::store::SnapshotFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_BASE_NAME: &str = "bookstore_data";

pub const KEYS: [&str; 5] = [
    "base-name",
    "default-format",
    "mirror-formats",
    "currency",
    "unit",
];

/// Configuration for the bookstore, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookstoreConfig {
    /// Snapshot base name; files are `<base_name>.json` and `<base_name>.xml`
    #[serde(default = "default_base_name")]
    pub base_name: String,

    /// Format read at startup and written after every change
    #[serde(default = "default_format")]
    pub default_format: SnapshotFormat,

    /// Also write the other format after every change
    #[serde(default = "default_mirror")]
    pub mirror_formats: bool,

    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_base_name() -> String {
    DEFAULT_BASE_NAME.to_string()
}

fn default_format() -> SnapshotFormat {
    SnapshotFormat::Json
}

fn default_mirror() -> bool {
    true
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

impl Default for BookstoreConfig {
    fn default() -> Self {
        Self {
            base_name: default_base_name(),
            default_format: default_format(),
            mirror_formats: default_mirror(),
            currency: default_currency(),
            unit: default_unit(),
        }
    }
}

impl BookstoreConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        serde_json::from_str(&content).map_err(|e| {
            BookstoreError::Config(format!("{}: {}", config_path.display(), e))
        })
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| BookstoreError::Config(e.to_string()))?;
        fs::write(config_path, content)?;
        Ok(())
    }

    /// Snapshot formats written after a change, default format first.
    pub fn write_formats(&self) -> Vec<SnapshotFormat> {
        let mut formats = vec![self.default_format];
        if self.mirror_formats {
            formats.extend(
                SnapshotFormat::ALL
                    .into_iter()
                    .filter(|f| *f != self.default_format),
            );
        }
        formats
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "base-name" => Some(self.base_name.clone()),
            "default-format" => Some(self.default_format.to_string()),
            "mirror-formats" => Some(self.mirror_formats.to_string()),
            "currency" => Some(self.currency.clone()),
            "unit" => Some(self.unit.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "base-name" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(BookstoreError::Config("base-name cannot be empty".into()));
                }
                self.base_name = value.to_string();
            }
            "default-format" => self.default_format = value.parse()?,
            "mirror-formats" => {
                self.mirror_formats = match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    other => {
                        return Err(BookstoreError::Config(format!(
                            "mirror-formats expects true or false, got '{}'",
                            other
                        )))
                    }
                }
            }
            "currency" => self.currency = value.to_string(),
            "unit" => self.unit = value.to_string(),
            _ => {
                return Err(BookstoreError::Config(format!(
                    "Unknown config key: {}",
                    key
                )))
            }
        }
        Ok(())
    }
}
