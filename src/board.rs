use crate::error::{GeometryError, PathError};
use crate::types::{BoardColor, BoardId, Color, Direction, GRID_SIZE, MoveLength, Position, Stone, StoneId};

const NUM_CELLS: usize = GRID_SIZE * GRID_SIZE;
const STONES_PER_BOARD: u8 = 8;

/// Cells touched by a move, computed from its source, direction and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePath {
    pub from: Position,
    pub to: Position,
    /// Midpoint of a length-2 move.
    pub between: Option<Position>,
    /// One step past `to`, if that cell is on the grid.
    pub beyond: Option<Position>,
    pub direction: Direction,
    pub length: MoveLength,
}

impl MovePath {
    pub fn new(from: Position, direction: Direction, length: MoveLength) -> Self {
        let to = from.step(direction, length.get());
        let between = match length {
            MoveLength::One => None,
            MoveLength::Two => Some(from.step(direction, 1)),
        };
        let beyond = Some(to.step(direction, 1)).filter(|pos| pos.is_on_board());

        Self {
            from,
            to,
            between,
            beyond,
            direction,
            length,
        }
    }
}

/// An opponent stone displaced by a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Push {
    pub stone: Stone,
    pub from: Position,
    /// `None` when the stone was pushed off the grid and destroyed.
    pub to: Option<Position>,
}

impl Push {
    pub fn is_capture(&self) -> bool {
        self.to.is_none()
    }
}

/// Classifies a displacement as a legal move shape.
///
/// The length is the Chebyshev distance and is checked before the shape, so
/// `(3, 1)` is too long while `(2, 1)` is knight-shaped.
pub fn classify(from: Position, to: Position) -> Result<(Direction, MoveLength), GeometryError> {
    let dx = to.x as i32 - from.x as i32;
    let dy = to.y as i32 - from.y as i32;
    let length = dx.abs().max(dy.abs());

    let length = match length {
        1 => MoveLength::One,
        2 => MoveLength::Two,
        _ => return Err(GeometryError::TooLong),
    };
    let reach = length.get() as i32;
    if !(dx == 0 || dx.abs() == reach) || !(dy == 0 || dy.abs() == reach) {
        return Err(GeometryError::KnightShaped);
    }

    Direction::from_delta(dx, dy)
        .map(|direction| (direction, length))
        .ok_or(GeometryError::TooLong)
}

/// One 4x4 board and the stones on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    id: BoardId,
    board_color: BoardColor,
    home_color: Color,
    cells: [Option<Stone>; NUM_CELLS],
}

impl Board {
    /// Creates a board with no stones.
    pub fn empty(id: BoardId, board_color: BoardColor, home_color: Color) -> Self {
        Self {
            id,
            board_color,
            home_color,
            cells: [None; NUM_CELLS],
        }
    }

    /// Creates the starting position: black stones on column 0, white stones
    /// on column 3. Board `id` numbers its black stones `8 * id + y` and its
    /// white stones `8 * id + 4 + y`.
    pub fn standard(id: BoardId, board_color: BoardColor, home_color: Color) -> Self {
        let mut board = Self::empty(id, board_color, home_color);
        let first_id = id as u8 * STONES_PER_BOARD;
        for y in 0..GRID_SIZE as u8 {
            board.put(
                Position::new(0, y as i8),
                Stone {
                    id: first_id + y,
                    color: Color::Black,
                },
            );
            board.put(
                Position::new(GRID_SIZE as i8 - 1, y as i8),
                Stone {
                    id: first_id + GRID_SIZE as u8 + y,
                    color: Color::White,
                },
            );
        }
        board
    }

    pub fn id(&self) -> BoardId {
        self.id
    }

    pub fn board_color(&self) -> BoardColor {
        self.board_color
    }

    pub fn home_color(&self) -> Color {
        self.home_color
    }

    /// Returns the stone on `pos`, `None` for an empty or off-grid cell.
    pub fn get(&self, pos: Position) -> Option<Stone> {
        pos.index().and_then(|idx| self.cells[idx])
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// Locates a stone by id.
    pub fn find(&self, stone_id: StoneId) -> Option<Position> {
        self.cells
            .iter()
            .position(|cell| cell.is_some_and(|stone| stone.id == stone_id))
            .map(Position::from_index)
    }

    /// Iterates over the stones on the board with their positions.
    pub fn stones(&self) -> impl Iterator<Item = (Position, Stone)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| cell.map(|stone| (Position::from_index(idx), stone)))
    }

    pub fn count(&self, color: Color) -> usize {
        self.stones().filter(|(_, stone)| stone.color == color).count()
    }

    /// Checks a move against the stones on this board.
    pub fn check_path(&self, path: &MovePath) -> Result<(), PathError> {
        let mover = self.get(path.from).ok_or(PathError::EmptySource)?;
        if !path.to.is_on_board() {
            return Err(PathError::OutOfBounds);
        }

        let own = |pos: Option<Position>| {
            pos.and_then(|pos| self.get(pos))
                .is_some_and(|stone| stone.color == mover.color)
        };
        let occupied = |pos: Option<Position>| pos.is_some_and(|pos| self.is_occupied(pos));

        match path.length {
            MoveLength::One => {
                if own(Some(path.to)) {
                    return Err(PathError::SameColorBlocking);
                }
                if occupied(Some(path.to)) && occupied(path.beyond) {
                    return Err(PathError::TwoStonesBlocking);
                }
            }
            MoveLength::Two => {
                if own(Some(path.to)) || own(path.between) {
                    return Err(PathError::SameColorBlocking);
                }
                let displaced = [path.between, Some(path.to), path.beyond]
                    .into_iter()
                    .filter(|&pos| occupied(pos))
                    .count();
                if displaced > 1 {
                    return Err(PathError::TwoStonesBlocking);
                }
            }
        }

        Ok(())
    }

    /// Whether the move would displace a stone.
    pub fn would_push(&self, path: &MovePath) -> bool {
        self.is_occupied(path.to) || path.between.is_some_and(|pos| self.is_occupied(pos))
    }

    /// Plays a checked move and returns the pushed stone, if any.
    ///
    /// A stone on `between` or `to` moves to `beyond`, or is destroyed when
    /// `beyond` is off the grid.
    pub fn apply(&mut self, path: &MovePath) -> Result<Option<Push>, PathError> {
        if !path.to.is_on_board() {
            return Err(PathError::OutOfBounds);
        }
        let mover = self.take(path.from).ok_or(PathError::EmptySource)?;

        let mut push = None;
        for cell in [path.between, Some(path.to)].into_iter().flatten() {
            if let Some(stone) = self.take(cell) {
                if let Some(beyond) = path.beyond {
                    self.put(beyond, stone);
                }
                push = Some(Push {
                    stone,
                    from: cell,
                    to: path.beyond,
                });
            }
        }

        self.put(path.to, mover);
        Ok(push)
    }

    /// Moves whatever stone is on `from` to `to` without any rule checks.
    pub(crate) fn relocate(&mut self, from: Position, to: Position) {
        if let Some(stone) = self.take(from) {
            self.put(to, stone);
        }
    }

    pub(crate) fn put(&mut self, pos: Position, stone: Stone) {
        if let Some(idx) = pos.index() {
            self.cells[idx] = Some(stone);
        }
    }

    fn take(&mut self, pos: Position) -> Option<Stone> {
        pos.index().and_then(|idx| self.cells[idx].take())
    }
}
