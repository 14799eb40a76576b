//! Tetra simulation core.
//!
//! A deterministic, tick-driven falling-block state machine: piece spawning,
//! movement, rotation, gravity and lock-delay timers, line clearing, a hold
//! slot and a ghost projection, all sequenced through a single-threaded
//! reentrant event bus. Rendering, input mapping and process bootstrap are
//! external collaborators that consume and produce the same message set.

pub mod core;
pub mod types;
