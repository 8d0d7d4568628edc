use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::Color;

/// When a color counts as eliminated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinRule {
    /// A color loses once it has no stone left on any board.
    #[default]
    AllBoards,
    /// A color loses once any single board holds none of its stones.
    AnyBoard,
}

/// Returns the winner, if either color is eliminated under `rule`.
///
/// Both colors eliminated at once cannot happen in play, since the mover
/// always keeps the stone it just moved; it is still resolved as a Black
/// win by checking White first.
pub fn check_win(boards: &[Board], rule: WinRule) -> Option<Color> {
    [Color::White, Color::Black]
        .into_iter()
        .find(|&color| is_eliminated(boards, color, rule))
        .map(Color::opponent)
}

fn is_eliminated(boards: &[Board], color: Color, rule: WinRule) -> bool {
    match rule {
        WinRule::AllBoards => boards.iter().all(|board| board.count(color) == 0),
        WinRule::AnyBoard => boards.iter().any(|board| board.count(color) == 0),
    }
}
