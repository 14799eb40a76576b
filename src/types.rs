//! Shared types and tunables for the simulation core.
//! This module contains pure data types with no external dependencies.

/// Well dimensions. Rows 0-1 are a hidden buffer above the visible field,
/// used for piece spawn and rotation overflow.
pub const WELL_ROWS: u8 = 22;
pub const WELL_COLUMNS: u8 = 10;
pub const HIDDEN_ROWS: u8 = 2;

/// Gravity interval: one automatic downward step every this many ticks.
pub const DROP_TIMER_TICKS: u32 = 20;
/// Lock-delay grace period in ticks for a grounded piece.
pub const LOCK_TIMER_TICKS: u32 = 10;
/// Length of the upcoming-piece queue.
pub const NEXT_TETRAD_COUNT: usize = 3;
/// Offset applied to spawn coordinates to place a piece in the preview frame.
pub const PREVIEW_OFFSET: Delta = (-2, -3);

/// Grid coordinate as (row, column). Row 0 is the top, column 0 the left edge.
pub type Coord = (i8, i8);
/// Relative (row, column) displacement.
pub type Delta = (i8, i8);

/// Stable identity of a single block, assigned at piece creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(pub u32);

/// The seven tetrad shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    O,
    I,
    T,
    S,
    Z,
    L,
    J,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::O,
        ShapeKind::I,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::L,
        ShapeKind::J,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::O => "o",
            ShapeKind::I => "i",
            ShapeKind::T => "t",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
            ShapeKind::L => "l",
            ShapeKind::J => "j",
        }
    }
}

/// Colour tag carried by pieces for the view collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colour {
    Yellow,
    Red,
    Cyan,
    Green,
    Magenta,
    Orange,
    Blue,
    Grey,
}

/// Lateral / downward movement of the current piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
    Down,
}

/// Rotation sense of the current piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateDirection {
    Cw,
    Ccw,
}

/// Piece lifecycle. Transitions are monotonic except that a Dropped piece
/// returns to Active on any successful move or rotation; Locked is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TetradState {
    Inactive,
    Active,
    Dropped,
    Locked,
}

/// Top-level session state. No gameplay transition reaches Paused; the
/// variant exists because the pause-request message does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Preparing,
    Running,
    Paused,
}
