use std::fmt;

use tracing::{debug, error, info, instrument};

use crate::board::{Board, MovePath, Push, classify};
use crate::config::GameConfig;
use crate::error::{ConfigError, MoveError};
use crate::history::History;
use crate::types::{
    AllowedMove, BOARD_COUNT, BoardId, BoardMessage, BoardMove, BoardSnapshot, Color, GRID_SIZE,
    GameSnapshot, LastMove, MoveReport, PendingPassive, Position, Stone, StoneId, StoneView,
};
use crate::win::check_win;

/// An accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A passive move was played, or the pending one replaced.
    Passive { step: BoardMove, revised: bool },
    /// The pending passive move was taken back.
    Undone { board_id: BoardId },
    /// The turn was completed and passed to the opponent.
    Active { step: BoardMove, push: Option<Push> },
    /// The move ended the game.
    Won { winner: Color, push: Option<Push> },
}

impl Outcome {
    pub fn message(&self) -> BoardMessage {
        match self {
            Outcome::Won { winner, .. } => BoardMessage::win(*winner),
            _ => BoardMessage::MoveClear,
        }
    }
}

/// The four boards, whose turn it is and the turn in progress.
///
/// All mutation goes through [`Game::submit_move`], which computes the new
/// position on a copy of the touched board and commits it only once every
/// check has passed.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    boards: [Board; BOARD_COUNT],
    turn: Color,
    pending: Option<PendingPassive>,
    history: History,
    winner: Option<Color>,
    last_moves: [[Option<LastMove>; 2]; BOARD_COUNT],
}

impl Game {
    /// Creates a game with the standard layout, Black to move.
    pub fn new() -> Self {
        Self::build(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GameConfig) -> Self {
        let boards = std::array::from_fn(|id| {
            let setup = config.boards[id];
            Board::standard(id, setup.board_color, setup.home_color)
        });

        Self {
            turn: config.first_player,
            config,
            boards,
            pending: None,
            history: History::new(),
            winner: None,
            last_moves: [[None; 2]; BOARD_COUNT],
        }
    }

    /// Resets to the starting position, keeping the configuration.
    pub fn restart(&mut self) {
        *self = Self::build(self.config.clone());
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn pending(&self) -> Option<&PendingPassive> {
        self.pending.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn boards(&self) -> &[Board; BOARD_COUNT] {
        &self.boards
    }

    pub fn board(&self, board_id: BoardId) -> Option<&Board> {
        self.boards.get(board_id)
    }

    /// What `board_id` currently accepts; `None` for an unknown board.
    pub fn allowed_move(&self, board_id: BoardId) -> Option<AllowedMove> {
        self.board(board_id).map(|board| self.derive_allowed(board))
    }

    pub fn allowed_moves(&self) -> [AllowedMove; BOARD_COUNT] {
        std::array::from_fn(|id| self.derive_allowed(&self.boards[id]))
    }

    /// Whether the adapter should let the player drag this stone.
    pub fn can_move(&self, stone_id: StoneId) -> bool {
        self.locate(stone_id).is_some_and(|(board_id, _, stone)| {
            stone.color == self.turn && accepts_drags(self.derive_allowed(&self.boards[board_id]))
        })
    }

    /// Message to show when the player grabs a stone on `board_id`, if the
    /// board is locked for them.
    pub fn grab_message(&self, board_id: BoardId) -> Option<BoardMessage> {
        match self.allowed_move(board_id)? {
            AllowedMove::NotHomeBoard => Some(BoardMessage::MoveNotInHomeArea),
            AllowedMove::WrongColor => Some(BoardMessage::MoveWrongColor),
            _ => None,
        }
    }

    /// Plays a move and reports exactly one message with the resulting state.
    pub fn submit(&mut self, stone_id: StoneId, target: Position) -> MoveReport {
        let message = match self.submit_move(stone_id, target) {
            Ok(outcome) => Some(outcome.message()),
            Err(err) if err.is_contract_violation() => {
                error!(%err, stone_id, "move violates the adapter contract");
                None
            }
            Err(err) => {
                debug!(%err, stone_id, "move rejected");
                err.message()
            }
        };

        MoveReport {
            message,
            state: self.snapshot(),
        }
    }

    /// Drags `stone_id` to `target`.
    ///
    /// On the board holding the pending passive move, a drag back to the
    /// passive move's source undoes it and any other drag replaces it.
    #[instrument(skip(self))]
    pub fn submit_move(&mut self, stone_id: StoneId, target: Position) -> Result<Outcome, MoveError> {
        if let Some(winner) = self.winner {
            return Err(MoveError::GameOver(winner));
        }

        let (board_id, _, stone) = self
            .locate(stone_id)
            .ok_or(MoveError::UnknownStone(stone_id))?;
        if stone.color != self.turn {
            return Err(MoveError::NotYourStone(stone_id));
        }

        let mut board = self.boards[board_id];
        let mut allowed = self.derive_allowed(&board);
        let mut revising = false;

        if allowed == AllowedMove::ReviseOrUndo {
            let Some(pending) = self.pending else {
                return Err(MoveError::Inconsistent("revisable board without a pending move"));
            };
            board.relocate(pending.to, pending.from);
            if target == pending.from {
                return self.undo(board, pending);
            }
            allowed = AllowedMove::Passive;
            revising = true;
        }

        let from = board
            .find(stone_id)
            .ok_or(MoveError::UnknownStone(stone_id))?;
        let (direction, length) = classify(from, target)?;
        if !target.is_on_board() {
            return Err(MoveError::OutOfBounds);
        }
        let path = MovePath::new(from, direction, length);

        match allowed {
            AllowedMove::Passive => self.play_passive(board, stone_id, path, revising),
            AllowedMove::NotHomeBoard => Err(MoveError::NotInHomeArea),
            AllowedMove::MatchRequired {
                direction: required_direction,
                length: required_length,
            } => {
                if (direction, length) != (required_direction, required_length) {
                    return Err(MoveError::UnequalToPassiveMove);
                }
                self.play_active(board, path)
            }
            AllowedMove::WrongColor => Err(MoveError::WrongColor),
            AllowedMove::ReviseOrUndo | AllowedMove::GameOver => Err(MoveError::Inconsistent(
                "board state resolved before classification",
            )),
        }
    }

    fn play_passive(
        &mut self,
        mut board: Board,
        stone_id: StoneId,
        path: MovePath,
        revising: bool,
    ) -> Result<Outcome, MoveError> {
        board.check_path(&path)?;
        if board.would_push(&path) {
            return Err(MoveError::PassiveCannotPush);
        }
        board.apply(&path)?;

        let board_id = board.id();
        let step = BoardMove {
            board_id,
            direction: path.direction,
            length: path.length,
        };
        if revising {
            self.history.revise_passive(step)?;
        } else {
            self.history.open(self.turn, step)?;
        }

        self.boards[board_id] = board;
        self.pending = Some(PendingPassive {
            board_id,
            direction: path.direction,
            length: path.length,
            stone_id,
            from: path.from,
            to: path.to,
        });
        self.last_moves[board_id][self.turn.index()] = Some(LastMove {
            from: path.from,
            to: path.to,
            pushed: false,
        });
        debug!(
            board_id,
            direction = %path.direction,
            length = path.length.get(),
            revising,
            "passive move played"
        );

        if let Some(outcome) = self.detect_win(None) {
            return Ok(outcome);
        }
        Ok(Outcome::Passive {
            step,
            revised: revising,
        })
    }

    fn play_active(&mut self, mut board: Board, path: MovePath) -> Result<Outcome, MoveError> {
        board.check_path(&path)?;
        let push = board.apply(&path)?;

        let board_id = board.id();
        let step = BoardMove {
            board_id,
            direction: path.direction,
            length: path.length,
        };
        self.history.close(step)?;

        let mover = self.turn;
        self.boards[board_id] = board;
        self.last_moves[board_id][mover.index()] = Some(LastMove {
            from: path.from,
            to: path.to,
            pushed: push.is_some(),
        });
        self.pending = None;
        self.turn = mover.opponent();
        for moves in self.last_moves.iter_mut() {
            moves[self.turn.index()] = None;
        }
        debug!(
            board_id,
            pushed = push.is_some(),
            captured = push.is_some_and(|p| p.is_capture()),
            "active move played, turn passes to {}",
            self.turn.name()
        );

        if let Some(outcome) = self.detect_win(push) {
            return Ok(outcome);
        }
        Ok(Outcome::Active { step, push })
    }

    fn undo(&mut self, board: Board, pending: PendingPassive) -> Result<Outcome, MoveError> {
        self.history.drop_passive()?;

        self.boards[pending.board_id] = board;
        self.pending = None;
        self.last_moves[pending.board_id][self.turn.index()] = None;
        debug!(board_id = pending.board_id, "passive move undone");

        Ok(Outcome::Undone {
            board_id: pending.board_id,
        })
    }

    fn detect_win(&mut self, push: Option<Push>) -> Option<Outcome> {
        let winner = check_win(&self.boards, self.config.win_rule)?;
        self.winner = Some(winner);
        self.pending = None;
        info!(winner = winner.name(), "game decided");
        Some(Outcome::Won { winner, push })
    }

    fn derive_allowed(&self, board: &Board) -> AllowedMove {
        if self.winner.is_some() {
            return AllowedMove::GameOver;
        }

        match self.pending {
            None if board.home_color() == self.turn => AllowedMove::Passive,
            None => AllowedMove::NotHomeBoard,
            Some(pending) if pending.board_id == board.id() => AllowedMove::ReviseOrUndo,
            Some(pending) if self.boards[pending.board_id].board_color() == board.board_color() => {
                AllowedMove::WrongColor
            }
            Some(pending) => AllowedMove::MatchRequired {
                direction: pending.direction,
                length: pending.length,
            },
        }
    }

    fn locate(&self, stone_id: StoneId) -> Option<(BoardId, Position, Stone)> {
        self.boards.iter().find_map(|board| {
            let pos = board.find(stone_id)?;
            board.get(pos).map(|stone| (board.id(), pos, stone))
        })
    }

    /// Immutable view of the whole game for adapters.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            boards: self
                .boards
                .iter()
                .map(|board| self.board_snapshot(board))
                .collect(),
            turn: self.turn,
            winner: self.winner,
            is_game_over: self.is_game_over(),
            pending: self.pending.map(|pending| pending.board_move()),
            history: self.history.records().to_vec(),
        }
    }

    fn board_snapshot(&self, board: &Board) -> BoardSnapshot {
        let allowed_move = self.derive_allowed(board);
        let movable = accepts_drags(allowed_move);
        let cells = (0..GRID_SIZE * GRID_SIZE)
            .map(|idx| {
                board.get(Position::from_index(idx)).map(|stone| StoneView {
                    id: stone.id,
                    color: stone.color,
                    can_move: movable && stone.color == self.turn,
                })
            })
            .collect();
        let last_moves = self.last_moves[board.id()];

        BoardSnapshot {
            id: board.id(),
            board_color: board.board_color(),
            home_color: board.home_color(),
            allowed_move,
            cells,
            last_move_black: last_moves[Color::Black.index()],
            last_move_white: last_moves[Color::White.index()],
        }
    }

    #[cfg(test)]
    fn set_boards_for_test(&mut self, boards: [Board; BOARD_COUNT], turn: Color) {
        self.boards = boards;
        self.turn = turn;
        self.pending = None;
        self.history = History::new();
        self.winner = None;
        self.last_moves = [[None; 2]; BOARD_COUNT];
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints the boards as a 2x2 layout, boards 0 and 1 on top.
impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pair in self.boards.chunks(2) {
            for y in 0..GRID_SIZE as i8 {
                let rows: Vec<String> = pair
                    .iter()
                    .map(|board| {
                        (0..GRID_SIZE as i8)
                            .map(|x| match board.get(Position::new(x, y)) {
                                Some(stone) if stone.color == Color::Black => "B",
                                Some(_) => "W",
                                None => ".",
                            })
                            .collect::<Vec<_>>()
                            .join(" ")
                    })
                    .collect();
                writeln!(f, "{}", rows.join("    "))?;
            }
            writeln!(f)?;
        }

        match self.winner {
            Some(winner) => write!(f, "{} is the winner", winner.name()),
            None => write!(f, "{}'s turn", self.turn.name()),
        }
    }
}

fn accepts_drags(allowed: AllowedMove) -> bool {
    matches!(
        allowed,
        AllowedMove::Passive | AllowedMove::MatchRequired { .. } | AllowedMove::ReviseOrUndo
    )
}
