//! Core engine types: seats, actions, configuration, protocol modes, state.
//!
//! Everything here is plain data plus bookkeeping. The rules that move
//! between states live in `rules`.

pub mod seat;
pub mod action;
pub mod config;
pub mod mode;
pub mod state;
mod display;

pub use seat::{Seat, SeatMap};
pub use action::{Action, ActionKind, ActionRecord, ActionSet};
pub use config::{GameConfig, JokerPrecedence, MAX_SEATS, MIN_SEATS};
pub use mode::{Candidacy, Circuit, Coalition, Election, ImpeachChain, Mode, ModeKind};
pub use state::{GameState, Hand};
