//! Game module - the top-level session state machine
//!
//! Preparing until a start request arrives, then Running. Paused exists in
//! the state space and a pause-request message exists on the bus, but no
//! gameplay transition reaches it, so the request is received and dropped.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::info;

use crate::core::bus::{EventBus, Listener};
use crate::core::messages::Message;
use crate::core::player::Player;
use crate::core::tetrad::TetradFactory;
use crate::core::well::Well;
use crate::types::SessionState;

pub struct Game {
    state: SessionState,
    players: Vec<Rc<RefCell<Player>>>,
}

impl Game {
    pub fn new(players: Vec<Rc<RefCell<Player>>>) -> Self {
        Self {
            state: SessionState::Preparing,
            players,
        }
    }

    /// Build a single-player session and register the well, the player and
    /// the game itself on the bus. The seed drives the whole piece sequence.
    pub fn attach(bus: &mut EventBus, seed: u32) -> Rc<RefCell<Game>> {
        let well = Rc::new(RefCell::new(Well::new()));
        bus.register(well.clone());

        let player = Rc::new(RefCell::new(Player::new(
            well,
            TetradFactory::new(seed),
        )));
        bus.register(player.clone());

        let game = Rc::new(RefCell::new(Game::new(vec![player])));
        bus.register(game.clone());
        game
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn players(&self) -> &[Rc<RefCell<Player>>] {
        &self.players
    }

    /// Start every player and transition to Running.
    pub fn start(&mut self, bus: &mut EventBus) {
        for player in &self.players {
            player.borrow_mut().start(bus);
        }
        self.state = SessionState::Running;

        info!("game started");
        bus.post(Message::GameStarted {
            players: self.players.len(),
        });
    }
}

impl Listener for Game {
    fn receive(&mut self, message: &Message, bus: &mut EventBus) {
        match message {
            Message::GameStartRequest => {
                if self.state == SessionState::Preparing {
                    self.start(bus);
                }
            }
            Message::GamePauseRequest => {
                // No transition into Paused is defined; see module docs.
            }
            _ => {}
        }
    }
}
