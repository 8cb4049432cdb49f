use std::path::PathBuf;

/// Errors raised by the [crate::c4r::Board] itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("column {column} is full")]
    FullColumn { column: usize },

    #[error("column {column} is out of range (width {width})")]
    InvalidColumn { column: usize, width: usize },
}

/// The text form of a board could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to parse board: {0}")]
pub struct ParseBoardError(pub String);

/// Moves and queries rejected by a [crate::game::GameSession].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("column {column} is out of range (width {width})")]
    InvalidColumn { column: usize, width: usize },

    #[error("cell ({row}, {column}) is outside the board")]
    InvalidCell { row: usize, column: usize },

    #[error("the game is already over")]
    GameOver,
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_error_display() {
        let err = BoardError::InvalidColumn {
            column: 9,
            width: 7,
        };
        assert_eq!(err.to_string(), "column 9 is out of range (width 7)");
        assert_eq!(
            BoardError::FullColumn { column: 2 }.to_string(),
            "column 2 is full"
        );
        assert_eq!(
            ParseBoardError("empty board".into()).to_string(),
            "failed to parse board: empty board"
        );
    }

    #[test]
    fn game_error_display() {
        assert_eq!(GameError::GameOver.to_string(), "the game is already over");
        assert_eq!(
            GameError::InvalidCell { row: 6, column: 0 }.to_string(),
            "cell (6, 0) is outside the board"
        );
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::Validation("width must be > 0".to_string());
        assert_eq!(err.to_string(), "config validation error: width must be > 0");
    }
}
