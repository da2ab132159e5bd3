use crate::errors::{AppError, AppResult};
use crate::models::zone::Zone;
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment override for `rest.api_key`.
pub const ENV_API_KEY: &str = "FIELDTRACK_API_KEY";

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/reverse";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Sqlite,
    Rest,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneSource {
    /// `controlled_zones` table
    #[default]
    Store,
    /// `zones.list` below
    Config,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    #[serde(default = "default_geocoder_url")]
    pub url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZonesConfig {
    #[serde(default)]
    pub source: ZoneSource,
    #[serde(default = "default_zone_list")]
    pub list: Vec<Zone>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub rest: RestConfig,
    #[serde(default)]
    pub geocoder: GeocoderConfig,
    #[serde(default)]
    pub zones: ZonesConfig,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_geocoder_url() -> String {
    DEFAULT_GEOCODER_URL.to_string()
}
fn default_user_agent() -> String {
    format!("fieldtrack/{}", env!("CARGO_PKG_VERSION"))
}
fn default_max_concurrency() -> usize {
    4
}
fn default_zone_list() -> Vec<Zone> {
    vec![
        Zone::new("Punto Central - Distrito 1", -17.740728, -63.191753, 0.0002),
        Zone::new("Base Técnica - DM3", -17.789001, -63.155678, 0.0002),
    ]
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            url: default_geocoder_url(),
            user_agent: default_user_agent(),
            max_concurrency: default_max_concurrency(),
            timeout_secs: None,
        }
    }
}

impl Default for ZonesConfig {
    fn default() -> Self {
        Self {
            source: ZoneSource::default(),
            list: default_zone_list(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            database: default_database(),
            rest: RestConfig::default(),
            geocoder: GeocoderConfig::default(),
            zones: ZonesConfig::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".fieldtrack")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("fieldtrack.conf")
    }

    /// Return the full path of the default SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("fieldtrack.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    /// The API key environment variable wins over the file.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path)?;
            Self::from_yaml(&content)?
        } else {
            Config::default()
        };

        if let Ok(key) = std::env::var(ENV_API_KEY)
            && !key.is_empty()
        {
            cfg.rest.api_key = key;
        }

        Ok(cfg)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let mut cfg: Config = serde_yaml::from_str(content)?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.backend == Backend::Rest && self.rest.url.trim().is_empty() {
            return Err(AppError::Config(
                "backend is 'rest' but rest.url is empty".into(),
            ));
        }
        if self.geocoder.max_concurrency == 0 {
            return Err(AppError::Config(
                "geocoder.max_concurrency must be at least 1".into(),
            ));
        }
        if let Some(z) = self.zones.list.iter().find(|z| z.tolerance < 0.0) {
            return Err(AppError::Config(format!(
                "zone '{}' has a negative tolerance",
                z.name
            )));
        }
        Ok(())
    }

    /// Create the config directory and write the configuration file.
    /// In test mode nothing is written.
    pub fn init_all(&self, is_test: bool) -> AppResult<()> {
        if is_test {
            return Ok(());
        }

        fs::create_dir_all(Self::config_dir())?;
        fs::write(Self::config_file(), self.to_yaml()?)?;
        success(format!("Config file: {}", Self::config_file().display()));
        Ok(())
    }
}
