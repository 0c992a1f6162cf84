use crate::content::ContentResolver;
use crate::error::ConfigError;
use crate::expansion::ExpansionPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub navigation: NavigationConfig,
    pub catalog: CatalogConfig,
    pub content: ContentConfig,
    pub session: SessionConfig,
}

/// Navigation tree behaviour
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct NavigationConfig {
    /// Keep several branches of one level open at the same time
    pub multiple_open: bool,
    /// Hide the expand/collapse arrows
    pub hide_arrows: bool,
}

/// Where the catalog and example sources live
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog JSON document
    pub path: PathBuf,
    /// Directory identifiers are relative to
    pub examples_root: PathBuf,
}

/// File extensions used by content resolution
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ContentConfig {
    pub content_extension: String,
    pub auxiliary_extensions: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Item shown when the session starts
    pub initial_selection: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            navigation: NavigationConfig::default(),
            catalog: CatalogConfig::default(),
            content: ContentConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            path: PathBuf::from("src/examples/examples.json"),
            examples_root: PathBuf::from("src/examples"),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        ContentConfig {
            content_extension: ".tsx".to_string(),
            auxiliary_extensions: vec![".css".to_string()],
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            initial_selection: Some("App_default.tsx".to_string()),
        }
    }
}

impl NavigationConfig {
    pub fn policy(&self) -> ExpansionPolicy {
        ExpansionPolicy {
            multiple_open: self.multiple_open,
            hide_arrows: self.hide_arrows,
        }
    }
}

impl ContentConfig {
    pub fn resolver(&self) -> ContentResolver {
        ContentResolver::new(
            self.content_extension.clone(),
            self.auxiliary_extensions.iter().cloned(),
        )
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "snippet-playground")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default location, or return defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_or_default(&path),
            _ => Config::default(),
        }
    }

    /// Load from `path`; a broken file falls back to defaults
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}: {}; using default configuration", path.display(), e);
                Config::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str::<Config>(&contents)?)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Create a default config file if it doesn't exist
    pub fn create_default() -> Result<(), ConfigError> {
        if let Some(path) = Self::config_path() {
            if !path.exists() {
                Config::default().save_to(&path)?;
            }
        }
        Ok(())
    }
}
