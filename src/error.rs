use crate::types::{BoardMessage, Color, StoneId};

/// A displacement that is not a legal move shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("move length must be 1 or 2")]
    TooLong,

    #[error("move must be orthogonal or diagonal")]
    KnightShaped,
}

/// A well-shaped move blocked by the stones on its board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("no stone on the source cell")]
    EmptySource,

    #[error("destination is outside the grid")]
    OutOfBounds,

    #[error("path is blocked by a stone of the mover's color")]
    SameColorBlocking,

    #[error("move would push two stones")]
    TwoStonesBlocking,
}

/// Attempt to alter a history record that is no longer the open one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    #[error("history has no record")]
    Empty,

    #[error("last record already has its active move")]
    RecordClosed,

    #[error("last record still awaits its active move")]
    RecordOpen,
}

/// Reasons a submitted move is rejected. State is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("stone {0} is not on any board")]
    UnknownStone(StoneId),

    #[error("stone {0} does not belong to the player on turn")]
    NotYourStone(StoneId),

    #[error("move length must be 1 or 2")]
    TooLong,

    #[error("move must be orthogonal or diagonal")]
    KnightShaped,

    #[error("move is out of bounds")]
    OutOfBounds,

    #[error("path is blocked by a stone of the mover's color")]
    SameColorBlocking,

    #[error("move would push two stones")]
    TwoStonesBlocking,

    #[error("active move must repeat the passive move's direction and length")]
    UnequalToPassiveMove,

    #[error("the passive move cannot push")]
    PassiveCannotPush,

    #[error("the passive move must be played on a home board")]
    NotInHomeArea,

    #[error("the active move must be played on a board of the other color")]
    WrongColor,

    #[error("game is over, {} won", .0.name())]
    GameOver(Color),

    #[error("history rejected the move: {0}")]
    History(#[from] HistoryError),

    #[error("board state is inconsistent: {0}")]
    Inconsistent(&'static str),
}

impl MoveError {
    /// Errors that signal an adapter bug rather than a rule violation.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            MoveError::UnknownStone(_)
                | MoveError::NotYourStone(_)
                | MoveError::History(_)
                | MoveError::Inconsistent(_)
        )
    }

    /// The message shown to the player, `None` for contract violations.
    pub fn message(&self) -> Option<BoardMessage> {
        let message = match self {
            MoveError::TooLong => BoardMessage::MoveTooLong,
            MoveError::KnightShaped => BoardMessage::MoveKnightShaped,
            MoveError::OutOfBounds => BoardMessage::MoveOutOfBounds,
            MoveError::SameColorBlocking => BoardMessage::MoveSameColorBlocking,
            MoveError::TwoStonesBlocking => BoardMessage::MoveTwoStonesBlocking,
            MoveError::UnequalToPassiveMove => BoardMessage::MoveUnequalToPassiveMove,
            MoveError::PassiveCannotPush => BoardMessage::MovePassiveCannotPush,
            MoveError::NotInHomeArea => BoardMessage::MoveNotInHomeArea,
            MoveError::WrongColor => BoardMessage::MoveWrongColor,
            MoveError::GameOver(winner) => BoardMessage::win(*winner),
            MoveError::UnknownStone(_)
            | MoveError::NotYourStone(_)
            | MoveError::History(_)
            | MoveError::Inconsistent(_) => return None,
        };
        Some(message)
    }
}

impl From<GeometryError> for MoveError {
    fn from(err: GeometryError) -> Self {
        match err {
            GeometryError::TooLong => MoveError::TooLong,
            GeometryError::KnightShaped => MoveError::KnightShaped,
        }
    }
}

impl From<PathError> for MoveError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::OutOfBounds => MoveError::OutOfBounds,
            PathError::SameColorBlocking => MoveError::SameColorBlocking,
            PathError::TwoStonesBlocking => MoveError::TwoStonesBlocking,
            PathError::EmptySource => MoveError::Inconsistent("no stone on the source cell"),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_violations_map_to_one_message() {
        assert_eq!(
            MoveError::TwoStonesBlocking.message(),
            Some(BoardMessage::MoveTwoStonesBlocking)
        );
        assert_eq!(
            MoveError::GameOver(Color::Black).message(),
            Some(BoardMessage::WinBlack)
        );
        assert!(!MoveError::WrongColor.is_contract_violation());
    }

    #[test]
    fn contract_violations_have_no_message() {
        for err in [
            MoveError::UnknownStone(40),
            MoveError::NotYourStone(4),
            MoveError::Inconsistent("board state resolved before classification"),
            MoveError::from(PathError::EmptySource),
        ] {
            assert!(err.is_contract_violation());
            assert_eq!(err.message(), None);
        }
    }

    #[test]
    fn board_errors_convert_into_move_errors() {
        assert_eq!(MoveError::from(GeometryError::KnightShaped), MoveError::KnightShaped);
        assert_eq!(
            MoveError::from(PathError::SameColorBlocking),
            MoveError::SameColorBlocking
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            MoveError::GameOver(Color::White).to_string(),
            "game is over, white won"
        );
        let err = ConfigError::Validation("black must own two boards".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: black must own two boards"
        );
    }
}
