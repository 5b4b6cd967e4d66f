use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Fields every config file is expected to carry; used by `config --check`.
pub const KNOWN_FIELDS: [&str; 5] = [
    "data_dir",
    "location_timeout_secs",
    "photo_quality",
    "photo_row_height",
    "master_password",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root of the storage layout (databases + photo directories).
    pub data_dir: String,
    #[serde(default = "default_location_timeout")]
    pub location_timeout_secs: u64,
    #[serde(default = "default_photo_quality")]
    pub photo_quality: u8,
    #[serde(default = "default_photo_row_height")]
    pub photo_row_height: f64,
    /// Optional administrator override accepted for every project.
    /// Absent unless explicitly written into the config file.
    #[serde(default)]
    pub master_password: Option<String>,
}

fn default_location_timeout() -> u64 {
    20
}
fn default_photo_quality() -> u8 {
    70
}
fn default_photo_row_height() -> f64 {
    150.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: Self::default_data_dir().to_string_lossy().to_string(),
            location_timeout_secs: default_location_timeout(),
            photo_quality: default_photo_quality(),
            photo_row_height: default_photo_row_height(),
            master_password: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        let base = if cfg!(target_os = "windows") {
            dirs::config_dir()
        } else {
            dirs::home_dir()
        };
        let base = base.unwrap_or_else(|| PathBuf::from("."));

        if cfg!(target_os = "windows") {
            base.join("rcheckin")
        } else {
            base.join(".rcheckin")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rcheckin.conf")
    }

    /// Default storage root: `<config dir>/data`
    pub fn default_data_dir() -> PathBuf {
        Self::config_dir().join("data")
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)
    }

    /// Return the known fields that the file at `path` does not spell out.
    pub fn missing_fields(path: &Path) -> AppResult<Vec<&'static str>> {
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let value: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;

        let mapping = value
            .as_mapping()
            .ok_or_else(|| AppError::Config("configuration root is not a mapping".into()))?;

        Ok(KNOWN_FIELDS
            .iter()
            .copied()
            .filter(|field| !mapping.contains_key(*field))
            .collect())
    }

    /// `~` expands to the home directory; other relative paths live under
    /// the config directory.
    pub fn resolve_data_dir(dir: &str) -> String {
        let p = expand_tilde(dir);
        if p.is_absolute() {
            p.to_string_lossy().to_string()
        } else {
            Self::config_dir().join(p).to_string_lossy().to_string()
        }
    }

    /// Initialize the configuration file and the storage root.
    ///
    /// In test mode the config file is left untouched and only the
    /// storage directories are created.
    pub fn init_all(custom_data_dir: Option<&str>, is_test: bool) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(dir) = custom_data_dir {
            config.data_dir = Self::resolve_data_dir(dir);
        }

        if !is_test {
            config.save_to(&Self::config_file())?;
        }

        fs::create_dir_all(config.data_path())?;
        Ok(config)
    }
}
