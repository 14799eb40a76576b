//! Player module - the upcoming-piece queue and the hold slot
//!
//! A player owns one well, a 3-slot FIFO of upcoming pieces and a single
//! hold slot, and drives spawning: every lock (and the game start) pops the
//! queue's front into the well and draws one fresh random piece to the
//! back, so the queue always holds exactly three pieces after a completed
//! spawn cycle.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::core::bus::{EventBus, Listener};
use crate::core::messages::Message;
use crate::core::tetrad::{Tetrad, TetradFactory};
use crate::core::well::Well;
use crate::types::{TetradState, NEXT_TETRAD_COUNT};

pub struct Player {
    well: Rc<RefCell<Well>>,
    factory: TetradFactory,
    next_tetrads: VecDeque<Tetrad>,
    hold_tetrad: Option<Tetrad>,
}

impl Player {
    pub fn new(well: Rc<RefCell<Well>>, factory: TetradFactory) -> Self {
        Self {
            well,
            factory,
            next_tetrads: VecDeque::with_capacity(NEXT_TETRAD_COUNT),
            hold_tetrad: None,
        }
    }

    pub fn well(&self) -> &Rc<RefCell<Well>> {
        &self.well
    }

    pub fn next_tetrads(&self) -> impl Iterator<Item = &Tetrad> {
        self.next_tetrads.iter()
    }

    pub fn hold_tetrad(&self) -> Option<&Tetrad> {
        self.hold_tetrad.as_ref()
    }

    /// Fill the queue with three fresh random pieces and build the well.
    pub fn start(&mut self, bus: &mut EventBus) {
        for _ in 0..NEXT_TETRAD_COUNT {
            self.next_tetrads.push_back(self.factory.random());
        }
        bus.post(Message::TetradsCreated {
            tetrads: self.next_tetrads.iter().map(Tetrad::view).collect(),
        });

        self.well.borrow_mut().build(bus);
    }

    /// Pop the queue's front into the well as the new current piece and
    /// replenish the back with one fresh random piece.
    pub fn add_tetrad(&mut self, bus: &mut EventBus) {
        let Some(tetrad) = self.next_tetrads.pop_front() else {
            return;
        };
        self.well.borrow_mut().add_tetrad(tetrad, bus);
        self.next_tetrads.push_back(self.factory.random());

        let current = self.well.borrow().current_tetrad().map(Tetrad::view);
        if let Some(current) = current {
            bus.post(Message::TetradAdded {
                current,
                next: self.next_tetrads.iter().map(Tetrad::view).collect(),
            });
        }
    }

    /// Move the current piece into the hold slot. With an empty hold a new
    /// current piece comes from the queue; with an occupied hold the held
    /// piece becomes current directly and the queue is untouched. The piece
    /// going into hold is unbound from its squares, its rotation reset, and
    /// set Inactive.
    pub fn swap_tetrad(&mut self, bus: &mut EventBus) {
        match self.hold_tetrad.take() {
            None => {
                let Some(mut held) = self.well.borrow_mut().take_current_tetrad() else {
                    return;
                };
                held.clear_block_squares();
                held.reset_rotation_state();
                held.set_state(TetradState::Inactive);
                let held_view = held.view();
                self.hold_tetrad = Some(held);

                self.add_tetrad(bus);
                bus.post(Message::TetradHeld { held: held_view });
            }
            Some(previous) => {
                let Some(mut held) = self.well.borrow_mut().take_current_tetrad() else {
                    self.hold_tetrad = Some(previous);
                    return;
                };
                held.clear_block_squares();
                held.reset_rotation_state();
                held.set_state(TetradState::Inactive);
                let held_view = held.view();
                self.hold_tetrad = Some(held);

                self.well.borrow_mut().add_tetrad(previous, bus);
                let current = self.well.borrow().current_tetrad().map(Tetrad::view);
                if let Some(current) = current {
                    bus.post(Message::TetradSwapped {
                        current,
                        held: held_view,
                    });
                }
            }
        }
    }
}

impl Listener for Player {
    fn receive(&mut self, message: &Message, bus: &mut EventBus) {
        match message {
            Message::GameStarted { .. } | Message::TetradLocked { .. } => {
                self.add_tetrad(bus);
            }
            Message::TetradSwapRequest => {
                let locked = self
                    .well
                    .borrow()
                    .current_tetrad()
                    .map_or(true, |tetrad| tetrad.state() == TetradState::Locked);
                if !locked {
                    self.swap_tetrad(bus);
                }
            }
            _ => {}
        }
    }
}
