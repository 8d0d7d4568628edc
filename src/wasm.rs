use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::game::Game;
use crate::types::{BoardId, BoardMessage, GRID_SIZE, Position, StoneId};

/// Screen rectangle of a rendered board, in pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

/// Maps a pointer position to the cell under it.
///
/// Positions outside the rectangle map to off-grid cells, which the engine
/// rejects as out of bounds. A degenerate rectangle maps everything off-grid.
pub fn cell_from_pointer(x: f64, y: f64, rect: BoardRect) -> Position {
    let width = rect.right - rect.left;
    let height = rect.bottom - rect.top;
    if !(width > 0.0 && height > 0.0) {
        return Position::new(-1, -1);
    }

    let cells = GRID_SIZE as f64;
    let col = (cells * (x - rect.left) / width).floor();
    let row = (cells * (y - rect.top) / height).floor();
    Position::from_i32(col as i32, row as i32)
}

/// JS handle to one game.
#[wasm_bindgen]
pub struct ShobuGame {
    game: Game,
}

#[wasm_bindgen]
impl ShobuGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ShobuGame {
        ShobuGame { game: Game::new() }
    }

    /// Builds a game from a config object; `undefined` or `null` means defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<ShobuGame, JsError> {
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(ShobuGame {
            game: Game::with_config(config)?,
        })
    }

    #[wasm_bindgen(js_name = fromToml)]
    pub fn from_toml(source: &str) -> Result<ShobuGame, JsError> {
        let config = GameConfig::from_toml_str(source)?;
        Ok(ShobuGame {
            game: Game::with_config(config)?,
        })
    }

    /// Drops `stone_id` on cell `(x, y)` and returns `{ message, state }`.
    ///
    /// Debug builds throw when the adapter drags a stone it should not have
    /// let the player grab; release builds report `message: null`.
    #[wasm_bindgen(js_name = submitMove)]
    pub fn submit_move(&mut self, stone_id: StoneId, x: i32, y: i32) -> Result<JsValue, JsError> {
        let report = self.game.submit(stone_id, Position::from_i32(x, y));
        if report.message.is_none() && cfg!(debug_assertions) {
            return Err(JsError::new(&format!(
                "stone {stone_id} is unknown or not movable by {}",
                self.game.turn().name()
            )));
        }
        to_js(&report)
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.game.snapshot())
    }

    #[wasm_bindgen(js_name = allowedMoves)]
    pub fn allowed_moves(&self) -> Result<JsValue, JsError> {
        to_js(&self.game.allowed_moves())
    }

    #[wasm_bindgen(js_name = canMove)]
    pub fn can_move(&self, stone_id: StoneId) -> bool {
        self.game.can_move(stone_id)
    }

    /// Message to show when a stone on `board_id` is grabbed, or `null`.
    #[wasm_bindgen(js_name = grabMessage)]
    pub fn grab_message(&self, board_id: BoardId) -> Result<JsValue, JsError> {
        to_js(&self.game.grab_message(board_id))
    }

    pub fn restart(&mut self) {
        self.game.restart();
    }

    #[wasm_bindgen(js_name = toString)]
    pub fn render(&self) -> String {
        self.game.to_string()
    }
}

impl Default for ShobuGame {
    fn default() -> Self {
        Self::new()
    }
}

/// Player-facing text for a message name such as `"MoveWrongColor"`.
#[wasm_bindgen(js_name = describeMessage)]
pub fn describe_message(message: JsValue) -> Result<String, JsError> {
    let message: BoardMessage = serde_wasm_bindgen::from_value(message)?;
    Ok(message.description().to_string())
}

/// Returns `[x, y]` of the cell under the pointer.
#[wasm_bindgen(js_name = pointerToCell)]
pub fn pointer_to_cell(x: f64, y: f64, left: f64, top: f64, right: f64, bottom: f64) -> Vec<i32> {
    let cell = cell_from_pointer(
        x,
        y,
        BoardRect {
            left,
            top,
            right,
            bottom,
        },
    );
    vec![cell.x as i32, cell.y as i32]
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(value.serialize(&serializer)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: BoardRect = BoardRect {
        left: 100.0,
        top: 50.0,
        right: 300.0,
        bottom: 250.0,
    };

    #[test]
    fn pointer_inside_board_maps_to_cell() {
        assert_eq!(cell_from_pointer(100.0, 50.0, RECT), Position::new(0, 0));
        assert_eq!(cell_from_pointer(151.0, 50.0, RECT), Position::new(1, 0));
        assert_eq!(cell_from_pointer(299.9, 249.9, RECT), Position::new(3, 3));
        assert_eq!(cell_from_pointer(210.0, 120.0, RECT), Position::new(2, 1));
    }

    #[test]
    fn pointer_outside_board_maps_off_grid() {
        let west = cell_from_pointer(99.0, 60.0, RECT);
        assert_eq!(west, Position::new(-1, 0));
        assert!(!west.is_on_board());
        assert_eq!(cell_from_pointer(300.0, 60.0, RECT), Position::new(4, 0));
        assert!(!cell_from_pointer(150.0, 1e12, RECT).is_on_board());
    }

    #[test]
    fn degenerate_rect_maps_off_grid() {
        let flat = BoardRect {
            bottom: RECT.top,
            ..RECT
        };
        assert!(!cell_from_pointer(150.0, 50.0, flat).is_on_board());
    }

    #[test]
    fn pointer_to_cell_returns_pair() {
        assert_eq!(pointer_to_cell(260.0, 200.0, 100.0, 50.0, 300.0, 250.0), vec![3, 3]);
    }
}
