//! Configuration file handling
//!
//! bx keeps a small TOML config at `~/.config/bx/config.toml` (or under
//! `$BX_CONFIG_DIR` when set). It carries the defaults the CLI falls back
//! to when a flag is not given, most importantly the default AWS profile
//! name. A schema version gates forward compatibility.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    pub schema_version: u32,

    #[serde(default)]
    pub defaults: Defaults,
}

/// Fallback values for CLI behavior
///
/// Each field has its own serde default, so a config file that only sets
/// one of them still loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    /// Profile used when none is given on the command line
    #[serde(default = "Defaults::profile")]
    pub default_profile: String,

    /// Output format: "human" or "json"
    #[serde(default = "Defaults::output")]
    pub output: String,

    /// Color mode: "auto", "always", or "never"
    #[serde(default = "Defaults::color")]
    pub color: String,
}

impl Defaults {
    fn profile() -> String {
        "default".to_string()
    }

    fn output() -> String {
        "human".to_string()
    }

    fn color() -> String {
        "auto".to_string()
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            default_profile: Self::profile(),
            output: Self::output(),
            color: Self::color(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            defaults: Defaults::default(),
        }
    }
}

/// Loads and saves the config file
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Manager for the default config location
    ///
    /// `$BX_CONFIG_DIR` overrides the platform config directory, which
    /// lets tests and scripts isolate their config.
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os("BX_CONFIG_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?
                .join("bx"),
        };
        Ok(Self {
            config_path: config_dir.join("config.toml"),
        })
    }

    /// Manager reading a specific file (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load the config, or defaults when no file exists
    ///
    /// A file written by an older bx is migrated forward; one written by a
    /// newer bx is refused.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&content)?;

        match config.schema_version.cmp(&SCHEMA_VERSION) {
            std::cmp::Ordering::Less => self.migrate(config),
            std::cmp::Ordering::Equal => Ok(config),
            std::cmp::Ordering::Greater => Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade bx.",
                config.schema_version, SCHEMA_VERSION
            ))),
        }
    }

    /// Write the config, creating parent directories as needed
    ///
    /// On Unix the file is chmodded to 0600.
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(config)?;
        std::fs::write(&self.config_path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.config_path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Migrate a config written by an older schema version
    fn migrate(&self, mut config: Config) -> Result<Config> {
        // No migrations yet; stamp the current version.
        config.schema_version = SCHEMA_VERSION;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp_dir.path().join("config.toml"));
        (manager, temp_dir)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
        assert_eq!(config.defaults.default_profile, "default");
        assert_eq!(config.defaults.output, "human");
        assert_eq!(config.defaults.color, "auto");
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let (manager, _temp_dir) = temp_config_manager();
        let config = manager.load().unwrap();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
        assert_eq!(config.defaults.default_profile, "default");
    }

    #[test]
    fn test_save_and_load() {
        let (manager, _temp_dir) = temp_config_manager();

        let mut config = Config::default();
        config.defaults.default_profile = "staging".to_string();

        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded.defaults.default_profile, "staging");
    }

    #[test]
    fn test_schema_version_too_new() {
        let (manager, _temp_dir) = temp_config_manager();

        let content = format!("schema_version = {}\n", SCHEMA_VERSION + 1);
        std::fs::write(manager.config_path(), content).unwrap();

        let err = manager.load().unwrap_err();
        assert!(err.to_string().contains("newer than supported"));
    }

    #[test]
    fn test_partial_defaults_filled_in() {
        let (manager, _temp_dir) = temp_config_manager();

        let content = "schema_version = 1\n\n[defaults]\ndefault_profile = \"prod\"\n";
        std::fs::write(manager.config_path(), content).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.defaults.default_profile, "prod");
        assert_eq!(loaded.defaults.output, "human");
        assert_eq!(loaded.defaults.color, "auto");
    }

    #[cfg(unix)]
    #[test]
    fn test_save_tightens_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (manager, _temp_dir) = temp_config_manager();
        manager.save(&Config::default()).unwrap();

        let mode = std::fs::metadata(manager.config_path())
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
