//! Well module - the play-field grid and its active-piece lifecycle logic
//!
//! The well owns a 22x10 grid of squares (rows 0-1 are the hidden spawn
//! buffer), the per-row lists of stacked blocks, the current piece, the
//! ghost projection and the gravity/lock-delay timers. Every collision-
//! checked transition of the current piece runs here: a move, rotation or
//! drop succeeds only if all four candidate squares are in bounds and
//! unfilled, and on failure the grid is left untouched.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::core::bus::{EventBus, Listener};
use crate::core::messages::{BlockView, GhostView, Message};
use crate::core::tetrad::{Block, Tetrad};
use crate::types::{
    Colour, Coord, MoveDirection, RotateDirection, TetradState, DROP_TIMER_TICKS,
    LOCK_TIMER_TICKS, WELL_COLUMNS, WELL_ROWS,
};

/// Blocks a single row can hold.
const ROW_CAPACITY: usize = WELL_COLUMNS as usize;

/// One addressable grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Square {
    row: i8,
    column: i8,
    filled: bool,
}

impl Square {
    pub fn row(&self) -> i8 {
        self.row
    }

    pub fn column(&self) -> i8 {
        self.column
    }

    pub fn coordinates(&self) -> Coord {
        (self.row, self.column)
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }
}

/// Non-interactive projection showing where the current piece would land.
/// Mirrors the current piece's columns and rotation; its rows come from the
/// well's drop simulation. Never locked, never part of the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ghost {
    squares: [Option<Coord>; 4],
}

impl Ghost {
    fn new() -> Self {
        Self { squares: [None; 4] }
    }

    pub fn squares(&self) -> [Option<Coord>; 4] {
        self.squares
    }

    fn set_square(&mut self, index: usize, square: Option<Coord>) {
        self.squares[index] = square;
    }

    pub fn view(&self) -> GhostView {
        GhostView {
            colour: Colour::Grey,
            squares: self.squares,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WellState {
    Preparing,
    Built,
}

/// The play-field.
pub struct Well {
    state: WellState,
    squares: Vec<Square>,
    stacked: Vec<ArrayVec<Block, ROW_CAPACITY>>,
    current: Option<Tetrad>,
    ghost: Option<Ghost>,
    drop_timer: u32,
    lock_timer: u32,
}

impl Well {
    pub fn new() -> Self {
        Self {
            state: WellState::Preparing,
            squares: Vec::new(),
            stacked: Vec::new(),
            current: None,
            ghost: None,
            drop_timer: DROP_TIMER_TICKS,
            lock_timer: LOCK_TIMER_TICKS,
        }
    }

    /// Allocate the grid and the per-row stack lists, create the ghost and
    /// transition to Built.
    pub fn build(&mut self, bus: &mut EventBus) {
        let rows = WELL_ROWS as usize;
        let columns = WELL_COLUMNS as usize;

        self.squares = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for column in 0..columns {
                self.squares.push(Square {
                    row: row as i8,
                    column: column as i8,
                    filled: false,
                });
            }
        }
        self.stacked = (0..rows).map(|_| ArrayVec::new()).collect();

        let ghost = Ghost::new();
        bus.post(Message::GhostAdded {
            ghost: ghost.view(),
        });
        self.ghost = Some(ghost);

        self.state = WellState::Built;
        bus.post(Message::WellBuilt);
    }

    pub fn state(&self) -> WellState {
        self.state
    }

    pub fn current_tetrad(&self) -> Option<&Tetrad> {
        self.current.as_ref()
    }

    /// Remove and return the current piece (hold path).
    pub fn take_current_tetrad(&mut self) -> Option<Tetrad> {
        self.current.take()
    }

    pub fn ghost(&self) -> Option<&Ghost> {
        self.ghost.as_ref()
    }

    pub fn drop_timer(&self) -> u32 {
        self.drop_timer
    }

    pub fn lock_timer(&self) -> u32 {
        self.lock_timer
    }

    /// Bounds-checked lookup into the grid.
    pub fn get_square(&self, row: i8, column: i8) -> Option<&Square> {
        if !Self::in_bounds(row, column) {
            return None;
        }
        self.squares.get(Self::index_of(row, column))
    }

    /// Stacked blocks of one row, empty for out-of-range rows.
    pub fn stacked_blocks(&self, row: i8) -> &[Block] {
        if row < 0 {
            return &[];
        }
        self.stacked
            .get(row as usize)
            .map_or(&[], |blocks| blocks.as_slice())
    }

    /// Insert a block directly into the stack at an unfilled square. This is
    /// a board-setup seam; gameplay locking goes through the lock path.
    pub fn place_stacked_block(&mut self, row: i8, column: i8, mut block: Block) -> bool {
        if self.state != WellState::Built
            || !Self::in_bounds(row, column)
            || self.square_filled(row, column)
        {
            return false;
        }
        block.set_square(Some((row, column)));
        self.squares[Self::index_of(row, column)].filled = true;
        self.stacked[row as usize].push(block);
        true
    }

    /// Bind a piece's blocks to its spawn squares, make it the current
    /// piece and project the ghost.
    pub fn add_tetrad(&mut self, mut tetrad: Tetrad, bus: &mut EventBus) {
        for i in 0..4 {
            let coord = tetrad.initial_coordinates(i);
            tetrad.set_block_square(i, Some(coord));
        }
        tetrad.set_state(TetradState::Active);
        self.current = Some(tetrad);
        self.update_ghost(bus);
    }

    /// Move the current piece one square. All four candidate squares must
    /// be in bounds and unfilled; on failure nothing changes.
    pub fn move_current(&mut self, direction: MoveDirection, bus: &mut EventBus) -> bool {
        let Some(current) = self.current.as_ref() else {
            return false;
        };

        let mut next = [(0i8, 0i8); 4];
        for (i, slot) in next.iter_mut().enumerate() {
            let Some((mut row, mut column)) = current.block_coordinates(i) else {
                return false;
            };
            match direction {
                MoveDirection::Left => column -= 1,
                MoveDirection::Right => column += 1,
                MoveDirection::Down => row += 1,
            }
            if !Self::in_bounds(row, column) || self.square_filled(row, column) {
                debug!(?direction, "cannot move tetrad");
                return false;
            }
            *slot = (row, column);
        }

        let Some(current) = self.current.as_mut() else {
            return false;
        };
        for (i, square) in next.into_iter().enumerate() {
            current.set_block_square(i, Some(square));
        }
        current.set_state(TetradState::Active);
        bus.post(Message::TetradMoved {
            tetrad: current.view(),
        });

        if direction != MoveDirection::Down {
            self.update_ghost(bus);
        }
        true
    }

    /// Rotate the current piece via its shape's delta table at the current
    /// rotation state. Same all-or-nothing collision rule as moves.
    pub fn rotate_current(&mut self, direction: RotateDirection, bus: &mut EventBus) -> bool {
        let Some(current) = self.current.as_ref() else {
            return false;
        };

        let mut next = [(0i8, 0i8); 4];
        for (i, slot) in next.iter_mut().enumerate() {
            let Some((row, column)) = current.rotated_coordinates(i, direction) else {
                return false;
            };
            if !Self::in_bounds(row, column) || self.square_filled(row, column) {
                debug!(?direction, "cannot rotate tetrad");
                return false;
            }
            *slot = (row, column);
        }

        let Some(current) = self.current.as_mut() else {
            return false;
        };
        for (i, square) in next.into_iter().enumerate() {
            current.set_block_square(i, Some(square));
        }
        current.change_rotation_state(direction);
        current.set_state(TetradState::Active);
        bus.post(Message::TetradRotated {
            tetrad: current.view(),
        });

        self.update_ghost(bus);
        true
    }

    /// One gravity step. On failure the piece transitions to Dropped and
    /// the lock-delay grace period begins; squares are untouched.
    pub fn drop_current(&mut self, bus: &mut EventBus) -> bool {
        let Some(current) = self.current.as_ref() else {
            return false;
        };

        let mut next = [(0i8, 0i8); 4];
        let mut can_drop = true;
        for (i, slot) in next.iter_mut().enumerate() {
            let Some((row, column)) = current.block_coordinates(i) else {
                return false;
            };
            let row = row + 1;
            if !Self::in_bounds(row, column) || self.square_filled(row, column) {
                can_drop = false;
                break;
            }
            *slot = (row, column);
        }

        let Some(current) = self.current.as_mut() else {
            return false;
        };
        if can_drop {
            for (i, square) in next.into_iter().enumerate() {
                current.set_block_square(i, Some(square));
            }
            bus.post(Message::TetradDropped {
                tetrad: current.view(),
            });
        } else {
            current.set_state(TetradState::Dropped);
            debug!("cannot drop tetrad");
        }
        can_drop
    }

    /// Hard drop: snap the current piece onto the ghost's squares.
    pub fn sonic_drop_current(&mut self, bus: &mut EventBus) {
        let squares = match self.ghost.as_ref() {
            Some(ghost) => ghost.squares(),
            None => return,
        };
        let Some(current) = self.current.as_mut() else {
            return;
        };
        for (i, square) in squares.into_iter().enumerate() {
            current.set_block_square(i, square);
        }
        bus.post(Message::SonicDropped {
            tetrad: current.view(),
        });
    }

    /// Fix the current piece into the stack, clear any completed rows and
    /// shift the rows above down. Up to four rows can clear from one lock.
    pub fn lock_current(&mut self, bus: &mut EventBus) -> bool {
        let mut cleared_rows: ArrayVec<i8, 4> = ArrayVec::new();
        let locked_view;
        {
            let Some(current) = self.current.as_mut() else {
                return false;
            };
            for i in 0..4 {
                let block = *current.block(i);
                let Some((row, column)) = block.square() else {
                    return false;
                };
                self.squares[Self::index_of(row, column)].filled = true;
                self.stacked[row as usize].push(block);
                if self.stacked[row as usize].len() == ROW_CAPACITY && !cleared_rows.contains(&row)
                {
                    cleared_rows.push(row);
                }
            }
            current.set_state(TetradState::Locked);
            locked_view = current.view();
        }

        if !cleared_rows.is_empty() {
            let mut cleared_blocks: Vec<BlockView> = Vec::new();
            let mut moved_blocks: Vec<BlockView> = Vec::new();
            let top = cleared_rows.iter().copied().max().unwrap_or(0);

            // Walk from the highest affected row to the top of the well,
            // carrying the count of rows cleared at or below each point.
            let mut rows_to_shift: i8 = 0;
            for row in (0..=top).rev() {
                if cleared_rows.contains(&row) {
                    let drained = std::mem::take(&mut self.stacked[row as usize]);
                    for block in drained {
                        if let Some((r, c)) = block.square() {
                            self.squares[Self::index_of(r, c)].filled = false;
                        }
                        cleared_blocks.push(block.view());
                    }
                    rows_to_shift += 1;
                } else if rows_to_shift > 0 {
                    let source = std::mem::take(&mut self.stacked[row as usize]);
                    let mut shifted: ArrayVec<Block, ROW_CAPACITY> = ArrayVec::new();
                    for mut block in source {
                        if let Some((r, c)) = block.square() {
                            self.squares[Self::index_of(r, c)].filled = false;
                            let new_row = r + rows_to_shift;
                            self.squares[Self::index_of(new_row, c)].filled = true;
                            block.set_square(Some((new_row, c)));
                        }
                        moved_blocks.push(block.view());
                        shifted.push(block);
                    }
                    self.stacked[(row + rows_to_shift) as usize] = shifted;
                }
            }

            bus.post(Message::StackUpdate {
                cleared: cleared_blocks,
                moved: moved_blocks,
            });
        }

        debug!("tetrad locked");
        bus.post(Message::TetradLocked {
            tetrad: locked_view,
        });
        true
    }

    /// Recompute the ghost by repeated one-row drop checks and announce the
    /// new projection.
    pub fn update_ghost(&mut self, bus: &mut EventBus) {
        let Some(cells) = self.projected_ghost_cells() else {
            return;
        };
        let Some(ghost) = self.ghost.as_mut() else {
            return;
        };
        for (i, cell) in cells.into_iter().enumerate() {
            ghost.set_square(i, cell);
        }
        bus.post(Message::GhostUpdated {
            ghost: ghost.view(),
        });
    }

    /// Landing squares for the current piece: the maximum downward offset
    /// at which all four blocks are still in bounds and unfilled.
    fn projected_ghost_cells(&self) -> Option<[Option<Coord>; 4]> {
        let current = self.current.as_ref()?;

        let mut cells = [None; 4];
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = current.block(i).square();
        }

        let mut rows_down: i8 = 1;
        'project: loop {
            let mut candidates = [(0i8, 0i8); 4];
            for (i, slot) in candidates.iter_mut().enumerate() {
                let Some((row, column)) = current.block(i).square() else {
                    break 'project;
                };
                let row = row + rows_down;
                if !Self::in_bounds(row, column) || self.square_filled(row, column) {
                    break 'project;
                }
                *slot = (row, column);
            }
            for (i, candidate) in candidates.into_iter().enumerate() {
                cells[i] = Some(candidate);
            }
            rows_down += 1;
        }

        Some(cells)
    }

    fn square_filled(&self, row: i8, column: i8) -> bool {
        if !Self::in_bounds(row, column) {
            return false;
        }
        self.squares
            .get(Self::index_of(row, column))
            .is_some_and(|square| square.filled)
    }

    fn in_bounds(row: i8, column: i8) -> bool {
        (0..WELL_ROWS as i8).contains(&row) && (0..WELL_COLUMNS as i8).contains(&column)
    }

    fn index_of(row: i8, column: i8) -> usize {
        row as usize * WELL_COLUMNS as usize + column as usize
    }
}

impl Default for Well {
    fn default() -> Self {
        Self::new()
    }
}

impl Listener for Well {
    fn receive(&mut self, message: &Message, bus: &mut EventBus) {
        let Some(state) = self.current.as_ref().map(Tetrad::state) else {
            return;
        };

        match message {
            Message::TetradMoveRequest(direction) => {
                if matches!(state, TetradState::Active | TetradState::Dropped)
                    && self.move_current(*direction, bus)
                {
                    // Successful move renews the lock-delay grace period.
                    self.lock_timer = LOCK_TIMER_TICKS;
                }
                // Pressing down on a grounded piece accelerates the lock.
                let after = self.current.as_ref().map(Tetrad::state);
                if after == Some(TetradState::Dropped) && *direction == MoveDirection::Down {
                    self.lock_timer = 1;
                }
            }
            Message::TetradRotateRequest(direction) => {
                if matches!(state, TetradState::Active | TetradState::Dropped)
                    && self.rotate_current(*direction, bus)
                {
                    self.lock_timer = LOCK_TIMER_TICKS;
                }
            }
            Message::SonicDropRequest => {
                if state == TetradState::Active {
                    self.sonic_drop_current(bus);
                }
            }
            Message::Tick => match state {
                TetradState::Active => {
                    self.drop_timer -= 1;
                    if self.drop_timer == 0 {
                        self.drop_current(bus);
                        self.drop_timer = DROP_TIMER_TICKS;
                    }
                }
                TetradState::Dropped => {
                    self.lock_timer -= 1;
                    if self.lock_timer == 0 {
                        self.lock_current(bus);
                        self.lock_timer = LOCK_TIMER_TICKS;
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }
}
