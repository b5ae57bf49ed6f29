use crate::network::nftables::DEFAULT_PROGRAM;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from locating, reading or interpreting the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid log level {0:?}: expected off, error, warn, info, debug or trace")]
    InvalidLogLevel(String),
}

fn default_nft() -> PathBuf {
    PathBuf::from(DEFAULT_PROGRAM)
}

/// Optional settings read from `config.toml`.
///
/// ```toml
/// nft = "/usr/sbin/nft"
/// log_level = "info"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// nft executable, looked up in PATH unless absolute
    #[serde(default = "default_nft")]
    pub nft: PathBuf,

    /// Log level used when no `-v` flag is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nft: default_nft(),
            log_level: None,
        }
    }
}

impl Config {
    /// Loads the configuration
    ///
    /// An explicitly given path must exist. Without one, the per-user
    /// config file is read if present and defaults are used otherwise.
    ///
    /// # Arguments
    ///
    /// * `explicit` - Path passed with `--config`
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Reads and parses a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolves the effective log level.
    ///
    /// Any `-v` flag wins over the file; with neither, logging is off so
    /// a successful run prints nothing on stderr.
    ///
    /// # Arguments
    ///
    /// * `verbose` - Number of `-v` flags
    pub fn level_filter(&self, verbose: u8) -> Result<LevelFilter, ConfigError> {
        let from_flags = match verbose {
            0 => None,
            1 => Some(LevelFilter::Info),
            2 => Some(LevelFilter::Debug),
            _ => Some(LevelFilter::Trace),
        };
        if let Some(level) = from_flags {
            return Ok(level);
        }

        match &self.log_level {
            Some(name) => name
                .parse::<LevelFilter>()
                .map_err(|_| ConfigError::InvalidLogLevel(name.clone())),
            None => Ok(LevelFilter::Off),
        }
    }
}

/// Gets the path of the per-user configuration file
///
/// # Returns
///
/// * `Some(PathBuf)` - `<config dir>/iplimits/config.toml`
/// * `None` - If the platform has no config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("iplimits").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "iplimits-{}-{}.toml",
            std::process::id(),
            name
        ));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.nft, PathBuf::from("nft"));
        assert_eq!(config.level_filter(0).unwrap(), LevelFilter::Off);
    }

    #[test]
    fn test_parse_full() {
        let config: Config =
            toml::from_str("nft = \"/usr/sbin/nft\"\nlog_level = \"debug\"\n").unwrap();
        assert_eq!(config.nft, PathBuf::from("/usr/sbin/nft"));
        assert_eq!(config.level_filter(0).unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(toml::from_str::<Config>("table = \"mine\"\n").is_err());
    }

    #[test]
    fn test_verbose_overrides_file() {
        let config = Config {
            log_level: Some("error".to_string()),
            ..Config::default()
        };
        assert_eq!(config.level_filter(0).unwrap(), LevelFilter::Error);
        assert_eq!(config.level_filter(1).unwrap(), LevelFilter::Info);
        assert_eq!(config.level_filter(2).unwrap(), LevelFilter::Debug);
        assert_eq!(config.level_filter(7).unwrap(), LevelFilter::Trace);
    }

    #[test]
    fn test_invalid_log_level() {
        let config = Config {
            log_level: Some("loud".to_string()),
            ..Config::default()
        };
        assert!(matches!(
            config.level_filter(0),
            Err(ConfigError::InvalidLogLevel(name)) if name == "loud"
        ));
    }

    #[test]
    fn test_load_explicit_file() {
        let path = scratch_file("explicit", "nft = \"/opt/nft\"\n");
        let config = Config::load(Some(path.as_path())).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.nft, PathBuf::from("/opt/nft"));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let path = std::env::temp_dir().join("iplimits-does-not-exist.toml");
        assert!(matches!(
            Config::load(Some(path.as_path())),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_load_malformed_file() {
        let path = scratch_file("malformed", "nft = [\n");
        let result = Config::load(Some(path.as_path()));
        fs::remove_file(&path).unwrap();

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("failed to parse config file "));
    }
}
