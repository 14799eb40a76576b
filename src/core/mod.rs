//! Core module - the complete simulation: bus, messages, shapes, pieces,
//! well, player and session. No UI, networking or I/O dependencies.

pub mod bus;
pub mod game;
pub mod messages;
pub mod player;
pub mod rng;
pub mod shapes;
pub mod tetrad;
pub mod well;

pub use bus::{EventBus, Listener, ListenerId};
pub use game::Game;
pub use messages::{BlockView, GhostView, Message, TetradView};
pub use player::Player;
pub use rng::SimpleRng;
pub use shapes::ShapeDescriptor;
pub use tetrad::{Block, Tetrad, TetradFactory};
pub use well::{Ghost, Square, Well, WellState};
