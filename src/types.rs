use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

pub const GRID_SIZE: usize = 4;
pub const BOARD_COUNT: usize = 4;

pub type StoneId = u8;
pub type BoardId = usize;

/// Stone (and player) color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }
}

/// Tint of a board, independent of the stones on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardColor {
    Dark,
    Light,
}

/// A cell coordinate. `x` grows eastwards, `y` grows southwards.
///
/// Coordinates submitted by an adapter may lie outside the grid, so both
/// axes are signed; [`Position::is_on_board`] tells whether a cell exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Builds a position from adapter input, saturating far-away values.
    pub fn from_i32(x: i32, y: i32) -> Self {
        Self {
            x: x.clamp(i8::MIN as i32, i8::MAX as i32) as i8,
            y: y.clamp(i8::MIN as i32, i8::MAX as i32) as i8,
        }
    }

    pub fn is_on_board(self) -> bool {
        (0..GRID_SIZE as i8).contains(&self.x) && (0..GRID_SIZE as i8).contains(&self.y)
    }

    /// Row-major cell index, or `None` when off the grid.
    pub fn index(self) -> Option<usize> {
        if self.is_on_board() {
            Some(self.y as usize * GRID_SIZE + self.x as usize)
        } else {
            None
        }
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self::new((index % GRID_SIZE) as i8, (index / GRID_SIZE) as i8)
    }

    /// The position `steps` cells away in `direction`.
    pub fn step(self, direction: Direction, steps: i8) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(
            self.x.saturating_add(dx.saturating_mul(steps)),
            self.y.saturating_add(dy.saturating_mul(steps)),
        )
    }
}

/// Compass direction of a move. North is towards `y = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// Unit step `(dx, dy)`.
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::N => (0, -1),
            Direction::NE => (1, -1),
            Direction::E => (1, 0),
            Direction::SE => (1, 1),
            Direction::S => (0, 1),
            Direction::SW => (-1, 1),
            Direction::W => (-1, 0),
            Direction::NW => (-1, -1),
        }
    }

    /// Direction from the signs of a displacement; `None` for no displacement.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        match (dx.signum(), dy.signum()) {
            (0, -1) => Some(Direction::N),
            (1, -1) => Some(Direction::NE),
            (1, 0) => Some(Direction::E),
            (1, 1) => Some(Direction::SE),
            (0, 1) => Some(Direction::S),
            (-1, 1) => Some(Direction::SW),
            (-1, 0) => Some(Direction::W),
            (-1, -1) => Some(Direction::NW),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::N => "n",
            Direction::NE => "ne",
            Direction::E => "e",
            Direction::SE => "se",
            Direction::S => "s",
            Direction::SW => "sw",
            Direction::W => "w",
            Direction::NW => "nw",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|dir| dir.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown direction: {s:?}"))
    }
}

/// Number of cells a stone travels in one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum MoveLength {
    One,
    Two,
}

impl MoveLength {
    pub fn get(self) -> i8 {
        match self {
            MoveLength::One => 1,
            MoveLength::Two => 2,
        }
    }
}

impl From<MoveLength> for u8 {
    fn from(length: MoveLength) -> u8 {
        length.get() as u8
    }
}

impl TryFrom<u8> for MoveLength {
    type Error = GeometryError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MoveLength::One),
            2 => Ok(MoveLength::Two),
            _ => Err(GeometryError::TooLong),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stone {
    pub id: StoneId,
    pub color: Color,
}

/// One half of a turn as recorded in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardMove {
    pub board_id: BoardId,
    pub direction: Direction,
    pub length: MoveLength,
}

/// A turn: the passive half and, once played, the active half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub color: Color,
    pub passive: BoardMove,
    pub active: Option<BoardMove>,
}

/// The passive move played this turn, awaiting its active counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingPassive {
    pub board_id: BoardId,
    pub direction: Direction,
    pub length: MoveLength,
    pub stone_id: StoneId,
    pub from: Position,
    pub to: Position,
}

impl PendingPassive {
    pub fn board_move(&self) -> BoardMove {
        BoardMove {
            board_id: self.board_id,
            direction: self.direction,
            length: self.length,
        }
    }
}

/// What a board currently accepts. Always derived from the turn, the
/// pending passive move and the winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AllowedMove {
    /// The opening passive move may be played here.
    Passive,
    /// Not a home board of the player on turn.
    NotHomeBoard,
    /// The active move must repeat the passive move's shape.
    MatchRequired {
        direction: Direction,
        length: MoveLength,
    },
    /// Same board color as the passive move's board.
    WrongColor,
    /// The passive move's board; dragging here revises or undoes it.
    ReviseOrUndo,
    GameOver,
}

/// The single message produced for each submitted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardMessage {
    WinBlack,
    WinWhite,
    MoveTooLong,
    MoveOutOfBounds,
    MoveKnightShaped,
    MoveSameColorBlocking,
    MoveTwoStonesBlocking,
    MoveUnequalToPassiveMove,
    MoveClear,
    MovePassiveCannotPush,
    MoveNotInHomeArea,
    MoveWrongColor,
}

impl BoardMessage {
    pub fn win(color: Color) -> BoardMessage {
        match color {
            Color::Black => BoardMessage::WinBlack,
            Color::White => BoardMessage::WinWhite,
        }
    }

    /// Player-facing text. Empty for `MoveClear`.
    pub fn description(self) -> &'static str {
        match self {
            BoardMessage::WinBlack => "black is the winner",
            BoardMessage::WinWhite => "white is the winner",
            BoardMessage::MoveTooLong => "you can only move a stone by a distance of 1 or 2 squares",
            BoardMessage::MoveOutOfBounds => "move is out of bounds",
            BoardMessage::MoveKnightShaped => {
                "you can only move orthogonally or diagonally (no knight moves)"
            }
            BoardMessage::MoveSameColorBlocking => "you can't push stones of your own color",
            BoardMessage::MoveTwoStonesBlocking => "you can't push two stones in a row",
            BoardMessage::MoveUnequalToPassiveMove => {
                "your active move must be the same direction and distance as the passive move"
            }
            BoardMessage::MoveClear => "",
            BoardMessage::MovePassiveCannotPush => {
                "your first move must be passive (can't push a stone)"
            }
            BoardMessage::MoveNotInHomeArea => {
                "your first move must be passive (in your home area)"
            }
            BoardMessage::MoveWrongColor => {
                "you must play on a opposite color board from your first move"
            }
        }
    }
}

/// Latest move of one color on one board, for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LastMove {
    pub from: Position,
    pub to: Position,
    pub pushed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoneView {
    pub id: StoneId,
    pub color: Color,
    pub can_move: bool,
}

/// Public view of one board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub id: BoardId,
    pub board_color: BoardColor,
    pub home_color: Color,
    pub allowed_move: AllowedMove,
    /// Row-major, `GRID_SIZE * GRID_SIZE` cells.
    pub cells: Vec<Option<StoneView>>,
    pub last_move_black: Option<LastMove>,
    pub last_move_white: Option<LastMove>,
}

/// Public game state returned to adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub boards: Vec<BoardSnapshot>,
    pub turn: Color,
    pub winner: Option<Color>,
    pub is_game_over: bool,
    pub pending: Option<BoardMove>,
    pub history: Vec<MoveRecord>,
}

/// Result of one `submit` call.
///
/// Contract:
/// - `message` is `None` only when the call violated the adapter contract
///   (unknown stone, opponent's stone).
/// - `state` always reflects the game after the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    pub message: Option<BoardMessage>,
    pub state: GameSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_from_delta_uses_signs_only() {
        assert_eq!(Direction::from_delta(2, 0), Some(Direction::E));
        assert_eq!(Direction::from_delta(0, -1), Some(Direction::N));
        assert_eq!(Direction::from_delta(-2, 2), Some(Direction::SW));
        assert_eq!(Direction::from_delta(1, -2), Some(Direction::NE));
        assert_eq!(Direction::from_delta(0, 0), None);
    }

    #[test]
    fn every_direction_delta_maps_back_to_itself() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.delta();
            assert_eq!(Direction::from_delta(dx as i32, dy as i32), Some(dir));
        }
    }

    #[test]
    fn direction_parses_compass_letters() {
        assert_eq!("ne".parse::<Direction>(), Ok(Direction::NE));
        assert_eq!("SW".parse::<Direction>(), Ok(Direction::SW));
        assert!("north".parse::<Direction>().is_err());
        assert_eq!(Direction::NW.to_string(), "nw");
    }

    #[test]
    fn position_bounds_and_index() {
        assert_eq!(Position::new(0, 0).index(), Some(0));
        assert_eq!(Position::new(3, 2).index(), Some(11));
        assert_eq!(Position::new(4, 0).index(), None);
        assert_eq!(Position::new(0, -1).index(), None);
        assert_eq!(Position::from_index(11), Position::new(3, 2));
        assert_eq!(Position::from_i32(1000, -1000), Position::new(127, -128));
    }

    #[test]
    fn step_walks_along_direction() {
        let origin = Position::new(1, 1);
        assert_eq!(origin.step(Direction::SE, 2), Position::new(3, 3));
        assert_eq!(origin.step(Direction::N, 2), Position::new(1, -1));
    }

    #[test]
    fn move_length_rejects_other_values() {
        assert_eq!(MoveLength::try_from(2), Ok(MoveLength::Two));
        assert_eq!(MoveLength::try_from(3), Err(GeometryError::TooLong));
        assert_eq!(u8::from(MoveLength::One), 1);
    }

    #[test]
    fn only_move_clear_has_no_description() {
        assert!(BoardMessage::MoveClear.description().is_empty());
        assert_eq!(BoardMessage::win(Color::White), BoardMessage::WinWhite);
        assert!(!BoardMessage::MoveWrongColor.description().is_empty());
    }
}
