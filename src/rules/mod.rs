//! Game rules: the legal-action oracle and the action state machine.
//!
//! - `engine`: `RulesEngine` trait, `ParliamentRules`, `GameResult`
//! - `legal`: which actions each mode offers
//! - `ordering`: which card beats which
//! - `plurality`: Parliament suit pluralities
//! - `transition`, `impeach`, `election`, `endgame`: one module per protocol

pub mod engine;
pub mod legal;
pub mod ordering;
pub mod plurality;

mod election;
mod endgame;
mod impeach;
mod transition;

pub use engine::{GameResult, ParliamentRules, RulesEngine};
pub use legal::{legal_actions, mode_actions};
pub use ordering::{beats, can_impeach_pm};
pub use plurality::{plurality, suit_counts, tied_pluralities};
