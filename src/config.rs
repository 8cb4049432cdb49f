use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::c4r::Board;
use crate::error::ConfigError;

/// Game configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// When set, log output is written to this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: Board::DEFAULT_WIDTH,
            height: Board::DEFAULT_HEIGHT,
            log_file: None,
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = Self::from_toml(&content)?;
        log::debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_dimensions(self.width, self.height)
    }

    /// Applies command line overrides on top of this config and re-validates the result.
    pub fn with_overrides(
        mut self,
        width: Option<usize>,
        height: Option<usize>,
        log_file: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(width) = width {
            self.width = width;
        }
        if let Some(height) = height {
            self.height = height;
        }
        if log_file.is_some() {
            self.log_file = log_file;
        }
        self.validate()?;
        Ok(self)
    }
}

/// Largest accepted width or height.
pub const MAX_DIMENSION: usize = 256;

/// Board dimensions must both be positive and at most [MAX_DIMENSION].
pub fn validate_dimensions(width: usize, height: usize) -> Result<(), ConfigError> {
    if width == 0 {
        return Err(ConfigError::Validation("width must be > 0".into()));
    }
    if height == 0 {
        return Err(ConfigError::Validation("height must be > 0".into()));
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(ConfigError::Validation(format!(
            "board dimensions {}x{} exceed the maximum of {}",
            width, height, MAX_DIMENSION
        )));
    }
    if width.checked_mul(height).is_none() {
        return Err(ConfigError::Validation("board has too many cells".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_standard_board() {
        let config = GameConfig::default();
        assert_eq!((config.width, config.height), (7, 6));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml("width = 9").unwrap();
        assert_eq!(config.width, 9);
        assert_eq!(config.height, 6);
        assert_eq!(config.log_file, None);

        let config = GameConfig::from_toml("log_file = \"c4.log\"").unwrap();
        assert_eq!(config.log_file, Some(PathBuf::from("c4.log")));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let err = GameConfig::from_toml("height = 0").unwrap_err();
        assert_eq!(err.to_string(), "config validation error: height must be > 0");
        assert!(matches!(
            GameConfig::from_toml("width = 0"),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            GameConfig::from_toml("width = \"wide\""),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        assert!(validate_dimensions(MAX_DIMENSION, MAX_DIMENSION).is_ok());
        assert!(matches!(
            validate_dimensions(usize::MAX, 2),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            validate_dimensions(2, MAX_DIMENSION + 1),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            GameConfig::from_toml("width = 100000"),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn file_values_override_defaults() {
        let path = std::env::temp_dir().join(format!("c4_game_config_{}.toml", std::process::id()));
        std::fs::write(&path, "height = 8\nlog_file = \"game.log\"\n").unwrap();
        let config = GameConfig::load(&path);
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.width, Board::DEFAULT_WIDTH);
        assert_eq!(config.height, 8);
        assert_eq!(config.log_file, Some(PathBuf::from("game.log")));
    }

    #[test]
    fn cli_overrides_win_over_file_values() {
        let file = GameConfig::from_toml("width = 9\nheight = 8").unwrap();

        let config = file
            .clone()
            .with_overrides(Some(5), None, Some(PathBuf::from("cli.log")))
            .unwrap();
        assert_eq!(config.width, 5);
        assert_eq!(config.height, 8);
        assert_eq!(config.log_file, Some(PathBuf::from("cli.log")));

        let untouched = file.clone().with_overrides(None, None, None).unwrap();
        assert_eq!(untouched, file);
    }

    #[test]
    fn overrides_are_validated() {
        let err = GameConfig::default()
            .with_overrides(Some(0), None, None)
            .unwrap_err();
        assert_eq!(err.to_string(), "config validation error: width must be > 0");
        assert!(matches!(
            GameConfig::default().with_overrides(None, Some(usize::MAX), None),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = Path::new("definitely/not/a/real/c4_config.toml");
        assert_eq!(GameConfig::load_or_default(path).unwrap(), GameConfig::default());
        assert!(matches!(
            GameConfig::load(path),
            Err(ConfigError::FileRead { .. })
        ));
    }
}
