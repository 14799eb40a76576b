//! Tetrad module - blocks, pieces and the piece factory
//!
//! A tetrad is four blocks plus a shape descriptor, a rotation state and a
//! lifecycle state. A block owns at most one square reference at a time;
//! its coordinates are always read through that square.

use tracing::warn;

use crate::core::messages::{BlockView, TetradView};
use crate::core::rng::SimpleRng;
use crate::core::shapes::ShapeDescriptor;
use crate::types::{BlockId, Colour, Coord, RotateDirection, ShapeKind, TetradState};

/// One movable unit. Occupies at most one square of the well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    id: BlockId,
    square: Option<Coord>,
}

impl Block {
    pub fn new(id: BlockId) -> Self {
        Self { id, square: None }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    /// The square this block occupies, if any.
    pub fn square(&self) -> Option<Coord> {
        self.square
    }

    pub fn set_square(&mut self, square: Option<Coord>) {
        self.square = square;
    }

    /// Coordinates read through the occupied square. `None` is a sentinel
    /// for an unbound block; it indicates a caller-side bug when the block
    /// belongs to an Active or Dropped piece.
    pub fn coordinates(&self) -> Option<Coord> {
        if self.square.is_none() {
            warn!(block = self.id.0, "block has no coordinates");
        }
        self.square
    }

    pub fn view(&self) -> BlockView {
        BlockView {
            id: self.id,
            square: self.square,
        }
    }
}

/// A falling piece: exactly four blocks, one shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tetrad {
    kind: ShapeKind,
    blocks: [Block; 4],
    state: TetradState,
    rotation_state: u8,
}

impl Tetrad {
    /// Create an Inactive piece whose blocks take the four ids starting at
    /// `first_block_id`. Use [`TetradFactory`] rather than calling this
    /// directly.
    pub fn new(kind: ShapeKind, first_block_id: u32) -> Self {
        let blocks = [
            Block::new(BlockId(first_block_id)),
            Block::new(BlockId(first_block_id + 1)),
            Block::new(BlockId(first_block_id + 2)),
            Block::new(BlockId(first_block_id + 3)),
        ];
        Self {
            kind,
            blocks,
            state: TetradState::Inactive,
            rotation_state: 0,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn descriptor(&self) -> &'static ShapeDescriptor {
        self.kind.descriptor()
    }

    pub fn colour(&self) -> Colour {
        self.descriptor().colour
    }

    pub fn state(&self) -> TetradState {
        self.state
    }

    pub fn set_state(&mut self, state: TetradState) {
        self.state = state;
    }

    pub fn rotation_state(&self) -> u8 {
        self.rotation_state
    }

    pub fn block(&self, block_index: usize) -> &Block {
        &self.blocks[block_index]
    }

    pub fn blocks(&self) -> &[Block; 4] {
        &self.blocks
    }

    /// Spawn coordinates of one block.
    pub fn initial_coordinates(&self, block_index: usize) -> Coord {
        self.descriptor().initial_coordinates(block_index)
    }

    /// Spawn coordinates shifted into the fixed preview frame, used to
    /// render upcoming and held pieces.
    pub fn preview_coordinates(&self, block_index: usize) -> Coord {
        self.descriptor().preview_coordinates(block_index)
    }

    /// Live coordinates of one block, or the unbound sentinel.
    pub fn block_coordinates(&self, block_index: usize) -> Option<Coord> {
        self.blocks[block_index].coordinates()
    }

    /// Candidate coordinates for one block after applying the rotation-delta
    /// table at the current rotation state.
    pub fn rotated_coordinates(
        &self,
        block_index: usize,
        direction: RotateDirection,
    ) -> Option<Coord> {
        let (row, column) = self.block_coordinates(block_index)?;
        let (dr, dc) = self
            .descriptor()
            .delta(self.rotation_state, direction, block_index);
        Some((row + dr, column + dc))
    }

    pub fn set_block_square(&mut self, block_index: usize, square: Option<Coord>) {
        self.blocks[block_index].set_square(square);
    }

    /// Unbind all four blocks. Used when the piece moves into the hold slot.
    pub fn clear_block_squares(&mut self) {
        for block in &mut self.blocks {
            block.set_square(None);
        }
    }

    pub fn reset_rotation_state(&mut self) {
        self.rotation_state = 0;
    }

    /// Advance the rotation state modulo this shape's period.
    pub fn change_rotation_state(&mut self, direction: RotateDirection) {
        self.rotation_state = self.descriptor().advance(self.rotation_state, direction);
    }

    pub fn view(&self) -> TetradView {
        TetradView {
            kind: self.kind,
            colour: self.colour(),
            state: self.state,
            rotation_state: self.rotation_state,
            blocks: [
                self.blocks[0].view(),
                self.blocks[1].view(),
                self.blocks[2].view(),
                self.blocks[3].view(),
            ],
        }
    }
}

/// Piece factory with an injectable random source. Seeding the RNG makes
/// the whole piece sequence reproducible; `of_kind` skips the draw entirely
/// for tests that need a specific shape.
#[derive(Debug)]
pub struct TetradFactory {
    rng: SimpleRng,
    next_block_id: u32,
}

impl TetradFactory {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            next_block_id: 0,
        }
    }

    /// Uniform random choice among the seven shapes.
    pub fn random(&mut self) -> Tetrad {
        let index = self.rng.next_range(ShapeKind::ALL.len() as u32) as usize;
        self.of_kind(ShapeKind::ALL[index])
    }

    /// Deterministic draw of a specific shape.
    pub fn of_kind(&mut self, kind: ShapeKind) -> Tetrad {
        let tetrad = Tetrad::new(kind, self.next_block_id);
        self.next_block_id += 4;
        tetrad
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tetrad_is_inactive_and_unbound() {
        let tetrad = Tetrad::new(ShapeKind::T, 0);
        assert_eq!(tetrad.state(), TetradState::Inactive);
        assert_eq!(tetrad.rotation_state(), 0);
        for i in 0..4 {
            assert_eq!(tetrad.block(i).square(), None);
        }
    }

    #[test]
    fn test_unbound_block_coordinates_sentinel() {
        let block = Block::new(BlockId(9));
        assert_eq!(block.coordinates(), None);
    }

    #[test]
    fn test_factory_assigns_distinct_block_ids() {
        let mut factory = TetradFactory::new(1);
        let a = factory.of_kind(ShapeKind::I);
        let b = factory.of_kind(ShapeKind::O);

        let mut ids: Vec<u32> = a
            .blocks()
            .iter()
            .chain(b.blocks().iter())
            .map(|block| block.id().0)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_factory_random_is_seed_deterministic() {
        let mut f1 = TetradFactory::new(42);
        let mut f2 = TetradFactory::new(42);
        for _ in 0..20 {
            assert_eq!(f1.random().kind(), f2.random().kind());
        }
    }

    #[test]
    fn test_preview_coordinates_offset() {
        let tetrad = Tetrad::new(ShapeKind::J, 0);
        for i in 0..4 {
            let (row, column) = tetrad.initial_coordinates(i);
            assert_eq!(tetrad.preview_coordinates(i), (row - 2, column - 3));
        }
    }

    #[test]
    fn test_rotation_state_wraps_by_period() {
        let mut o = Tetrad::new(ShapeKind::O, 0);
        for _ in 0..4 {
            o.change_rotation_state(RotateDirection::Cw);
        }
        assert_eq!(o.rotation_state(), 0);

        let mut i = Tetrad::new(ShapeKind::I, 4);
        i.change_rotation_state(RotateDirection::Cw);
        assert_eq!(i.rotation_state(), 1);
        i.change_rotation_state(RotateDirection::Cw);
        assert_eq!(i.rotation_state(), 0);
        i.change_rotation_state(RotateDirection::Ccw);
        assert_eq!(i.rotation_state(), 1);
    }
}
