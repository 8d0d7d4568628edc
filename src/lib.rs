//! Rules engine for Shobu: two players, four 4x4 boards, and turns made of a
//! passive move on a home board followed by a matching active move that may
//! push an opponent's stone.
//!
//! - [`board`]: one board, with move shapes, path checks and pushes
//! - [`game`]: turn coordination across the four boards
//! - [`history`]: the record of played turns
//! - [`win`]: elimination check
//! - [`config`]: starting player, board layout and win rule
//! - [`wasm`]: JS bindings for a browser front end

use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod history;
pub mod types;
pub mod wasm;
pub mod win;

pub use config::GameConfig;
pub use error::{ConfigError, MoveError};
pub use game::{Game, Outcome};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
