//! Shapes module - data-only shape descriptors and rotation-delta tables
//!
//! Each of the seven shapes is described by its colour, four spawn
//! coordinates in the buffer region, and a clockwise rotation-delta table
//! indexed by rotation state. Rotation is an incremental per-block
//! displacement relative to the block's current coordinates, not a
//! recomputation from a canonical pose, so the deltas for a full cycle sum
//! to zero per block and repeated rotation cannot drift.
//!
//! Counter-clockwise deltas are not stored: the CCW step out of state `s`
//! must undo the CW step into `s`, so `ccw[s] = -cw[(s + R - 1) % R]`.

use crate::types::{Colour, Coord, Delta, RotateDirection, ShapeKind, PREVIEW_OFFSET};

/// Static description of one shape: everything a piece needs that is not
/// per-instance state.
#[derive(Debug)]
pub struct ShapeDescriptor {
    pub kind: ShapeKind,
    pub colour: Colour,
    /// Initial block coordinates in the spawn buffer region.
    pub spawn: [Coord; 4],
    /// Rotation period: 4 for the asymmetric shapes, 2 for I/S/Z.
    pub period: u8,
    /// Clockwise deltas, indexed by [rotation_state][block_index].
    cw: &'static [[Delta; 4]],
}

impl ShapeDescriptor {
    /// Spawn coordinates of one block.
    pub fn initial_coordinates(&self, block_index: usize) -> Coord {
        self.spawn[block_index]
    }

    /// Spawn coordinates shifted into the fixed preview frame.
    pub fn preview_coordinates(&self, block_index: usize) -> Coord {
        let (row, column) = self.spawn[block_index];
        (row + PREVIEW_OFFSET.0, column + PREVIEW_OFFSET.1)
    }

    /// Relative displacement for one block when rotating out of
    /// `rotation_state` in the given direction.
    pub fn delta(
        &self,
        rotation_state: u8,
        direction: RotateDirection,
        block_index: usize,
    ) -> Delta {
        match direction {
            RotateDirection::Cw => self.cw[rotation_state as usize][block_index],
            RotateDirection::Ccw => {
                let prev = (rotation_state + self.period - 1) % self.period;
                let (dr, dc) = self.cw[prev as usize][block_index];
                (-dr, -dc)
            }
        }
    }

    /// Next rotation state, modulo this shape's period.
    pub fn advance(&self, rotation_state: u8, direction: RotateDirection) -> u8 {
        match direction {
            RotateDirection::Cw => (rotation_state + 1) % self.period,
            RotateDirection::Ccw => (rotation_state + self.period - 1) % self.period,
        }
    }
}

impl ShapeKind {
    /// Look up the static descriptor for this shape.
    pub fn descriptor(self) -> &'static ShapeDescriptor {
        match self {
            ShapeKind::O => &O_SHAPE,
            ShapeKind::I => &I_SHAPE,
            ShapeKind::T => &T_SHAPE,
            ShapeKind::S => &S_SHAPE,
            ShapeKind::Z => &Z_SHAPE,
            ShapeKind::L => &L_SHAPE,
            ShapeKind::J => &J_SHAPE,
        }
    }
}

// Block indices: |0|1|
//                |3|2|   rotates about its centre
static O_SHAPE: ShapeDescriptor = ShapeDescriptor {
    kind: ShapeKind::O,
    colour: Colour::Yellow,
    spawn: [(2, 4), (2, 5), (3, 5), (3, 4)],
    period: 4,
    cw: &[
        [(0, 1), (1, 0), (0, -1), (-1, 0)],
        [(1, 0), (0, -1), (-1, 0), (0, 1)],
        [(0, -1), (-1, 0), (0, 1), (1, 0)],
        [(-1, 0), (0, 1), (1, 0), (0, -1)],
    ],
};

// Block indices: |0|1|2|3|   rotates about block 2, two states
static I_SHAPE: ShapeDescriptor = ShapeDescriptor {
    kind: ShapeKind::I,
    colour: Colour::Red,
    spawn: [(2, 3), (2, 4), (2, 5), (2, 6)],
    period: 2,
    cw: &[
        [(-2, 2), (-1, 1), (0, 0), (1, -1)],
        [(2, -2), (1, -1), (0, 0), (-1, 1)],
    ],
};

// Block indices: |0|1|2|
//                  |3|     rotates about block 1
static T_SHAPE: ShapeDescriptor = ShapeDescriptor {
    kind: ShapeKind::T,
    colour: Colour::Cyan,
    spawn: [(2, 3), (2, 4), (2, 5), (3, 4)],
    period: 4,
    cw: &[
        [(-1, 1), (0, 0), (1, -1), (-1, -1)],
        [(1, 1), (0, 0), (-1, -1), (-1, 1)],
        [(1, -1), (0, 0), (-1, 1), (1, 1)],
        [(-1, -1), (0, 0), (1, 1), (1, -1)],
    ],
};

// Block indices:   |0|1|
//                |2|3|     rotates about block 0, two states
static S_SHAPE: ShapeDescriptor = ShapeDescriptor {
    kind: ShapeKind::S,
    colour: Colour::Magenta,
    spawn: [(2, 4), (2, 5), (3, 3), (3, 4)],
    period: 2,
    cw: &[
        [(0, 0), (-1, -1), (0, 2), (-1, 1)],
        [(0, 0), (1, 1), (0, -2), (1, -1)],
    ],
};

// Block indices: |0|1|
//                  |2|3|   rotates about block 2, two states
static Z_SHAPE: ShapeDescriptor = ShapeDescriptor {
    kind: ShapeKind::Z,
    colour: Colour::Green,
    spawn: [(2, 3), (2, 4), (3, 4), (3, 5)],
    period: 2,
    cw: &[
        [(0, 2), (1, 1), (0, 0), (1, -1)],
        [(0, -2), (-1, -1), (0, 0), (-1, 1)],
    ],
};

// Block indices: |0|1|2|
//                |3|       rotates about block 1
static L_SHAPE: ShapeDescriptor = ShapeDescriptor {
    kind: ShapeKind::L,
    colour: Colour::Orange,
    spawn: [(2, 3), (2, 4), (2, 5), (3, 3)],
    period: 4,
    cw: &[
        [(-1, 1), (0, 0), (1, -1), (-2, 0)],
        [(1, 1), (0, 0), (-1, -1), (0, 2)],
        [(1, -1), (0, 0), (-1, 1), (2, 0)],
        [(-1, -1), (0, 0), (1, 1), (0, -2)],
    ],
};

// Block indices: |0|1|2|
//                    |3|   rotates about block 1
static J_SHAPE: ShapeDescriptor = ShapeDescriptor {
    kind: ShapeKind::J,
    colour: Colour::Blue,
    spawn: [(2, 3), (2, 4), (2, 5), (3, 5)],
    period: 4,
    cw: &[
        [(-1, 1), (0, 0), (1, -1), (0, -2)],
        [(1, 1), (0, 0), (-1, -1), (-2, 0)],
        [(1, -1), (0, 0), (-1, 1), (0, 2)],
        [(-1, -1), (0, 0), (1, 1), (2, 0)],
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_deltas_sum_to_zero() {
        // A full CW cycle must return every block to where it started.
        for kind in ShapeKind::ALL {
            let desc = kind.descriptor();
            for block in 0..4 {
                let mut sum = (0i8, 0i8);
                for state in 0..desc.period {
                    let (dr, dc) = desc.delta(state, RotateDirection::Cw, block);
                    sum = (sum.0 + dr, sum.1 + dc);
                }
                assert_eq!(sum, (0, 0), "{:?} block {} drifts", kind, block);
            }
        }
    }

    #[test]
    fn test_ccw_mirrors_cw() {
        // A CW step followed by a CCW step cancels exactly.
        for kind in ShapeKind::ALL {
            let desc = kind.descriptor();
            for state in 0..desc.period {
                let next = desc.advance(state, RotateDirection::Cw);
                for block in 0..4 {
                    let (dr, dc) = desc.delta(state, RotateDirection::Cw, block);
                    let (br, bc) = desc.delta(next, RotateDirection::Ccw, block);
                    assert_eq!((dr + br, dc + bc), (0, 0));
                }
            }
        }
    }

    #[test]
    fn test_periods() {
        assert_eq!(ShapeKind::O.descriptor().period, 4);
        assert_eq!(ShapeKind::T.descriptor().period, 4);
        assert_eq!(ShapeKind::L.descriptor().period, 4);
        assert_eq!(ShapeKind::J.descriptor().period, 4);
        assert_eq!(ShapeKind::I.descriptor().period, 2);
        assert_eq!(ShapeKind::S.descriptor().period, 2);
        assert_eq!(ShapeKind::Z.descriptor().period, 2);
    }

    #[test]
    fn test_spawn_in_buffer_region() {
        for kind in ShapeKind::ALL {
            let desc = kind.descriptor();
            for block in 0..4 {
                let (row, column) = desc.initial_coordinates(block);
                assert!((2..4).contains(&row), "{:?} spawns outside rows 2-3", kind);
                assert!((3..7).contains(&column));
            }
        }
    }
}
