use super::types::{Config, ConfigError};
use crate::debug_println;
use std::fs;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from `path`, or from the default location when `None`
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Config::get_config_path);
        Self::load_or_default(&path)
    }

    /// Read and parse a config file; a missing file is an error
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Read a config file, falling back to defaults when it does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            debug_println!("Loading config from {}", path.display());
            Self::load_from_path(path)?
        } else {
            debug_println!("No config at {}, using defaults", path.display());
            Config::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }
}

impl Config {
    /// `TIERBILL_CURRENCY` replaces the configured currency symbol
    fn apply_env_overrides(&mut self) {
        if let Ok(symbol) = std::env::var("TIERBILL_CURRENCY") {
            if !symbol.is_empty() {
                self.currency_symbol = symbol;
            }
        }
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Get the default config file path (~/.tierbill/config.toml)
    pub fn get_config_path() -> PathBuf {
        if let Some(home) = dirs::home_dir() {
            home.join(".tierbill").join("config.toml")
        } else {
            PathBuf::from(".tierbill/config.toml")
        }
    }

    /// Write the default config to `path` unless one already exists.
    /// Returns whether a file was created.
    pub fn init_at<P: AsRef<Path>>(path: P) -> Result<bool, ConfigError> {
        let path = path.as_ref();

        if path.exists() {
            return Ok(false);
        }

        Config::default().save_to(path)?;
        Ok(true)
    }

    /// Validate configuration
    pub fn check(&self) -> Result<(), ConfigError> {
        self.plan_table()?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Print configuration as TOML
    pub fn print(&self) -> Result<(), ConfigError> {
        println!("{}", self.to_toml()?);
        Ok(())
    }
}
