//! Error types.
//!
//! Rejections are expected and recoverable: a failed `apply_action` leaves
//! the game state untouched. `EngineError::ResourceExhausted` is the only
//! hard failure and means no usable state was produced.

use std::collections::TryReserveError;

use thiserror::Error;

use crate::cards::{Card, CardStack};
use crate::core::{ActionKind, ModeKind, Seat};

/// Card identifier and notation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("card identifier {0} is out of range")]
    OutOfRange(i32),
    #[error("rank value {0} is out of range")]
    RankOutOfRange(u8),
    #[error("card symbol must be two characters, got {0:?}")]
    SymbolLength(String),
    #[error("unknown rank character {0:?}")]
    UnknownRank(char),
    #[error("unknown suit character {0:?}")]
    UnknownSuit(char),
}

/// Card-collection algebra errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("stack does not contain the requested cards")]
    NotContained,
    #[error("card {0} is already in the stack")]
    DuplicateCard(Card),
    #[error("joker count would exceed {max}")]
    JokerOverflow { max: u32 },
}

/// Invalid game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("seat count must be between {min} and {max}, got {got}")]
    SeatCount { got: u8, min: u8, max: u8 },
    #[error("observer {observer} does not sit at a table of {seat_count}")]
    ObserverOutOfRange { observer: Seat, seat_count: u8 },
    #[error("{got} jokers cannot be tracked, at most {max}")]
    TooManyJokers { got: u32, max: u32 },
    #[error("maximum hand size must be positive")]
    ZeroHandSize,
    #[error("the observer cannot start with a joker when none are in play")]
    FirstCardUnavailable,
}

/// Construction and duplication failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("allocation failed while {context}")]
    ResourceExhausted {
        context: &'static str,
        #[source]
        source: TryReserveError,
    },
}

impl EngineError {
    pub(crate) fn exhausted(context: &'static str) -> impl FnOnce(TryReserveError) -> Self {
        move |source| EngineError::ResourceExhausted { context, source }
    }
}

/// Why an action was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("{action:?} is not legal in {mode:?} mode")]
    WrongMode { action: ActionKind, mode: ModeKind },
    #[error("{action:?} needs {expected} card argument(s), got {got}")]
    MissingArguments { action: ActionKind, expected: usize, got: usize },
    #[error("card {0} was given twice")]
    DuplicateArgument(Card),
    #[error("{seat} cannot supply {cards}")]
    NotInHand { seat: Seat, cards: CardStack },
    #[error("{0} is not in Parliament")]
    NotInParliament(Card),
    #[error("{0} is not in the Cabinet")]
    NotInCabinet(Card),
    #[error("{0} is not among the face-down cards")]
    NotFaceDown(Card),
    #[error("there is no Prime Minister")]
    NoPrimeMinister,
    #[error("{0} is not the Prime Minister")]
    NotPrimeMinister(Seat),
    #[error("Parliament is full")]
    ParliamentFull,
    #[error("the draw pile is empty")]
    DrawPileEmpty,
    #[error("the observer must name the card they draw")]
    HiddenObserverDraw,
    #[error("only the observer's draws are revealed")]
    RevealedOpponentDraw,
    #[error("{challenger} does not beat {target}")]
    Outranked { challenger: Card, target: Card },
    #[error("{0} is not of the required suit")]
    WrongSuit(Card),
    #[error("the cards must share a suit")]
    MixedSuits,
    #[error("the cards must share a rank")]
    MixedRanks,
    #[error("a joker cannot be played as {0}")]
    JokerNotAllowed(&'static str),
    #[error("no played card stands against Parliament's plurality")]
    NoPluralityCard,
    #[error("{0} has already answered this election")]
    AlreadyAnswered(Seat),
    #[error(transparent)]
    Stack(#[from] StackError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// A bookkeeping invariant that does not hold, reported by
/// `GameState::audit`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("card {0} is in more than one location")]
    DuplicatedCard(Card),
    #[error("card {0} is in no location")]
    MissingCard(Card),
    #[error("{found} jokers are accounted for, expected {expected}")]
    JokerCount { found: u32, expected: u32 },
    #[error("{seat} holds {size} cards but {known} are known")]
    KnownExceedsHand { seat: Seat, size: u32, known: u32 },
    #[error("the observer holds {size} cards but {known} are known")]
    ObserverHandUnknown { size: u32, known: u32 },
    #[error("face-down pool has {found} cards, expected {expected}")]
    FaceDownSize { found: u32, expected: u32 },
    #[error("{found} cards are accounted for, expected {expected}")]
    CardCount { found: u32, expected: u32 },
}
