//! # parliament-engine
//!
//! A rules engine for the card game Parliament, tracking one game from a
//! single seat's point of view.
//!
//! ## Design Principles
//!
//! 1. **Imperfect Information**: The observer's hand is known exactly.
//!    Every other unseen card sits in one face-down pool shared by the
//!    draw pile and the other hands; hand sizes are always exact.
//!
//! 2. **Validate, Then Commit**: A rejected action leaves the state
//!    untouched. Actions are applied to a duplicate that replaces the
//!    state only on success.
//!
//! 3. **Typed Protocols**: Each open sub-protocol (impeachment chain,
//!    election, endgame coalition) is a `Mode` variant carrying its own
//!    data.
//!
//! ## Architecture
//!
//! - **Packed Cards**: A `CardStack` is one `u64`: 52 membership bits
//!   plus a joker count. Jokers are interchangeable and only counted.
//!
//! - **Persistent History**: Accepted actions are recorded in an
//!   `im::Vector`, so duplicating a state for speculative play is cheap.
//!
//! ## Modules
//!
//! - `cards`: Card identifiers, the stack algebra, two-character notation
//! - `core`: Seats, actions, configuration, modes, game state
//! - `rules`: Legal-action oracle and the action state machine
//! - `error`: Error types
//!
//! ## Example
//!
//! ```
//! use parliament_engine::{parse_card, Action, ActionKind, GameState, ParliamentRules, RulesEngine, Seat};
//!
//! let rules = ParliamentRules::new();
//! let mut game = GameState::init(2, 3, Seat(1), parse_card("3h").unwrap()).unwrap();
//!
//! rules.apply_action(&mut game, &Action::new(ActionKind::Draw)).unwrap();
//! assert_eq!(game.turn(), Seat(1));
//! assert!(rules.is_legal(&game, ActionKind::SelfDraw));
//! ```

pub mod cards;
pub mod core;
pub mod error;
pub mod rules;

// Re-export commonly used types
pub use crate::cards::{card_symbol, parse_card, Card, CardStack, Rank, Suit, SuitSet};

pub use crate::core::{
    Action, ActionKind, ActionRecord, ActionSet,
    GameConfig, JokerPrecedence,
    GameState, Hand, Mode, ModeKind,
    Seat, SeatMap,
};

pub use crate::error::{ActionError, CardError, ConfigError, EngineError, InvariantViolation, StackError};

pub use crate::rules::{GameResult, ParliamentRules, RulesEngine};
