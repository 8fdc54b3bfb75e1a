//! Configuration loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `MACROLENS_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./macrolens.toml` or `./.macrolens.toml`
    /// 4. Global: `~/.config/macrolens/config.toml`
    /// 5. Default values
    ///
    /// When no file supplies an API key, `GEMINI_API_KEY` is consulted.
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        for filename in &["macrolens.toml", ".macrolens.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
                break;
            }
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("MACROLENS_").split("__"));

        let mut config: FileConfig = figment.extract().map_err(Box::new)?;

        if config.api_key.is_none() {
            config.api_key = std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());
        }

        Ok(config)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("macrolens").join("config.toml"))
    }
}
