use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{BOARD_COUNT, BoardColor, Color};
use crate::win::WinRule;

/// Tint and owner of one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSetup {
    pub board_color: BoardColor,
    pub home_color: Color,
}

/// Game configuration, loadable from TOML or a JS object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub first_player: Color,
    pub win_rule: WinRule,
    /// Boards 0 and 1 sit on Black's side of the table, 2 and 3 on White's.
    pub boards: [BoardSetup; BOARD_COUNT],
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            first_player: Color::Black,
            win_rule: WinRule::AllBoards,
            boards: [
                BoardSetup {
                    board_color: BoardColor::Dark,
                    home_color: Color::Black,
                },
                BoardSetup {
                    board_color: BoardColor::Light,
                    home_color: Color::Black,
                },
                BoardSetup {
                    board_color: BoardColor::Light,
                    home_color: Color::White,
                },
                BoardSetup {
                    board_color: BoardColor::Dark,
                    home_color: Color::White,
                },
            ],
        }
    }
}

impl GameConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Each color must own exactly one dark and one light home board, so
    /// every passive move leaves an opposite-colored board for the active one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for color in [Color::Black, Color::White] {
            let homes: Vec<BoardColor> = self
                .boards
                .iter()
                .filter(|setup| setup.home_color == color)
                .map(|setup| setup.board_color)
                .collect();
            if homes.len() != 2 {
                return Err(ConfigError::Validation(format!(
                    "{} must own exactly two boards, found {}",
                    color.name(),
                    homes.len()
                )));
            }
            if homes[0] == homes[1] {
                return Err(ConfigError::Validation(format!(
                    "{} must own one dark and one light board",
                    color.name()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.first_player, Color::Black);
        assert_eq!(config.win_rule, WinRule::AllBoards);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = GameConfig::from_toml_str("win_rule = \"AnyBoard\"\n").unwrap();
        assert_eq!(config.win_rule, WinRule::AnyBoard);
        assert_eq!(config.boards, GameConfig::default().boards);
    }

    #[test]
    fn test_full_toml_round_trip() {
        let toml = r#"
first_player = "White"
win_rule = "AllBoards"

[[boards]]
board_color = "Light"
home_color = "Black"

[[boards]]
board_color = "Dark"
home_color = "Black"

[[boards]]
board_color = "Dark"
home_color = "White"

[[boards]]
board_color = "Light"
home_color = "White"
"#;
        let config = GameConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.first_player, Color::White);
        assert_eq!(config.boards[0].board_color, BoardColor::Light);
    }

    #[test]
    fn test_same_colored_home_boards_rejected() {
        let mut config = GameConfig::default();
        config.boards[1].board_color = BoardColor::Dark;
        config.boards[3].board_color = BoardColor::Light;

        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "config validation error: black must own one dark and one light board"
        );
    }

    #[test]
    fn test_unbalanced_ownership_rejected() {
        let mut config = GameConfig::default();
        config.boards[2].home_color = Color::Black;

        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert!(matches!(
            GameConfig::from_toml_str("win_rule = 3"),
            Err(ConfigError::TomlParse(_))
        ));
    }
}
