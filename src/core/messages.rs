//! Messages module - the tagged-union message set routed by the event bus
//!
//! Every message is an immutable record. Payloads are snapshots
//! ([`TetradView`], [`GhostView`], [`BlockView`]) taken at post time, so a
//! subscriber never observes later mutation of the live piece it was told
//! about.

use crate::types::{
    BlockId, Colour, Coord, MoveDirection, RotateDirection, ShapeKind, TetradState,
};

/// Snapshot of a single block: its stable identity and the square it
/// occupied when the message was posted (None for an unbound block).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockView {
    pub id: BlockId,
    pub square: Option<Coord>,
}

/// Snapshot of a piece and its four blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TetradView {
    pub kind: ShapeKind,
    pub colour: Colour,
    pub state: TetradState,
    pub rotation_state: u8,
    pub blocks: [BlockView; 4],
}

/// Snapshot of the ghost projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GhostView {
    pub colour: Colour,
    pub squares: [Option<Coord>; 4],
}

/// All message kinds consumed or produced by the core and its view/input
/// collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// External logical time unit; posting it drains the queue.
    Tick,
    /// Shutdown signal, consumed by the external ticking source.
    Quit,
    GameStartRequest,
    /// Received but deliberately not acted on: no transition into Paused is
    /// defined by the gameplay logic.
    GamePauseRequest,
    GameStarted {
        players: usize,
    },
    /// The initial queue of upcoming pieces, posted once at start.
    TetradsCreated {
        tetrads: Vec<TetradView>,
    },
    /// The well finished allocating its grid.
    WellBuilt,
    TetradMoveRequest(MoveDirection),
    TetradRotateRequest(RotateDirection),
    TetradMoved {
        tetrad: TetradView,
    },
    TetradRotated {
        tetrad: TetradView,
    },
    /// A new current piece was bound to the well; carries the refreshed
    /// upcoming queue.
    TetradAdded {
        current: TetradView,
        next: Vec<TetradView>,
    },
    /// One successful gravity step.
    TetradDropped {
        tetrad: TetradView,
    },
    SonicDropRequest,
    SonicDropped {
        tetrad: TetradView,
    },
    GhostAdded {
        ghost: GhostView,
    },
    GhostUpdated {
        ghost: GhostView,
    },
    /// The current piece was fixed into the stack; triggers the next spawn.
    TetradLocked {
        tetrad: TetradView,
    },
    /// Result of a line clear: blocks removed and blocks shifted down.
    StackUpdate {
        cleared: Vec<BlockView>,
        moved: Vec<BlockView>,
    },
    TetradSwapRequest,
    TetradHeld {
        held: TetradView,
    },
    TetradSwapped {
        current: TetradView,
        held: TetradView,
    },
}
