use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_heading() -> String {
    "Hello, World!".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Heading shown above the user list
    #[serde(default = "default_heading")]
    pub heading: String,

    /// Show each user's age next to their name
    #[serde(default)]
    pub show_ages: bool,

    /// User records file to load instead of the built-in set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_file: Option<PathBuf>,

    /// Color overrides (hex strings)
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_dim: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            heading: default_heading(),
            show_ages: false,
            users_file: None,
            theme: ThemeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Get the default config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("roster");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the default location, or create a default one
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(AppConfig::default()),
        };

        if !path.exists() {
            let config = AppConfig::default();
            if let Err(e) = config.save_to(&path) {
                tracing::warn!("Could not write default config: {}", e);
            }
            return Ok(config);
        }

        Ok(Self::load_from(&path))
    }

    /// Load config from an explicit path, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(mut config) => {
                    // Relative users_file is relative to the config file, not the cwd
                    if let Some(dir) = path.parent() {
                        config.users_file = config.users_file.map(|p| dir.join(p));
                    }
                    return config;
                }
                Err(e) => tracing::warn!("Failed to parse config {}: {}", path.display(), e),
            },
            Err(e) => tracing::warn!("Failed to read config {}: {}", path.display(), e),
        }

        AppConfig::default()
    }

    /// Save config to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
