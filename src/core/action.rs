//! Action representation: an action kind plus up to three card arguments.
//!
//! The argument order is fixed per kind:
//! - `SelfDraw(card)`, `Discard(card)`, `AppointMp(card)`, `ImpeachPm(card)`
//! - `ImpeachMp(mp, challenger)`, `CabinetReshuffle(cabinet_card, mp)`
//! - `CallElection(candidate, calling, calling)`, same for `ContestElection`
//! - `VoteNoConfidence(a, b, c)`
//! - `AppointPm(cabinet_card)`, `AppointBackupPm(cabinet_card)`
//! - `BlockImpeach(card)`, `Reimpeach(card)`
//! - `EndgameTryFormation(card)`, `EndgameBlockCoalition(card)`,
//!   `EndgameCounterBlockCoalition(card)`
//!
//! Every other kind takes no arguments. Missing arguments are rejected;
//! surplus arguments are ignored.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::seat::Seat;
use crate::cards::Card;
use crate::error::ActionError;

/// The kind of an action. The discriminant is the bit index in `ActionSet`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum ActionKind {
    /// Another seat draws a face-down card.
    Draw = 0,
    /// The observer draws and names the card.
    SelfDraw,
    Discard,
    AppointMp,
    CallElection,
    ImpeachMp,
    ImpeachPm,
    VoteNoConfidence,
    CabinetReshuffle,
    /// The PM swaps the PM card for a Cabinet card.
    AppointPm,
    BlockImpeach,
    Reimpeach,
    NoBlockImpeach,
    NoReimpeach,
    ContestElection,
    NoContestElection,
    AppointBackupPm,
    EndgamePmFirst,
    EndgamePmLast,
    EndgameTryFormation,
    EndgamePassFormation,
    EndgameBlockCoalition,
    EndgameCounterBlockCoalition,
    EndgameNoBlockCoalition,
    EndgameNoCounterBlockCoalition,
}

impl ActionKind {
    /// Every action kind in discriminant order.
    pub const ALL: [ActionKind; 25] = [
        ActionKind::Draw,
        ActionKind::SelfDraw,
        ActionKind::Discard,
        ActionKind::AppointMp,
        ActionKind::CallElection,
        ActionKind::ImpeachMp,
        ActionKind::ImpeachPm,
        ActionKind::VoteNoConfidence,
        ActionKind::CabinetReshuffle,
        ActionKind::AppointPm,
        ActionKind::BlockImpeach,
        ActionKind::Reimpeach,
        ActionKind::NoBlockImpeach,
        ActionKind::NoReimpeach,
        ActionKind::ContestElection,
        ActionKind::NoContestElection,
        ActionKind::AppointBackupPm,
        ActionKind::EndgamePmFirst,
        ActionKind::EndgamePmLast,
        ActionKind::EndgameTryFormation,
        ActionKind::EndgamePassFormation,
        ActionKind::EndgameBlockCoalition,
        ActionKind::EndgameCounterBlockCoalition,
        ActionKind::EndgameNoBlockCoalition,
        ActionKind::EndgameNoCounterBlockCoalition,
    ];

    /// Number of card arguments this kind reads.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            ActionKind::CallElection | ActionKind::ContestElection | ActionKind::VoteNoConfidence => 3,
            ActionKind::ImpeachMp | ActionKind::CabinetReshuffle => 2,
            ActionKind::SelfDraw
            | ActionKind::Discard
            | ActionKind::AppointMp
            | ActionKind::ImpeachPm
            | ActionKind::AppointPm
            | ActionKind::BlockImpeach
            | ActionKind::Reimpeach
            | ActionKind::AppointBackupPm
            | ActionKind::EndgameTryFormation
            | ActionKind::EndgameBlockCoalition
            | ActionKind::EndgameCounterBlockCoalition => 1,
            _ => 0,
        }
    }

    /// Get the bit index used by `ActionSet`.
    #[must_use]
    pub const fn index(self) -> u32 {
        self as u32
    }
}

/// A set of action kinds, packed into a bitmask.
///
/// ```
/// use parliament_engine::core::{ActionKind, ActionSet};
///
/// let set = ActionSet::of(&[ActionKind::Discard, ActionKind::Draw]);
/// assert!(set.contains(ActionKind::Draw));
/// assert!(!set.contains(ActionKind::AppointMp));
/// assert_eq!(set.bits(), 0b101);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionSet(u32);

impl ActionSet {
    pub const EMPTY: ActionSet = ActionSet(0);

    /// A set of the given kinds.
    #[must_use]
    pub const fn of(kinds: &[ActionKind]) -> Self {
        let mut bits = 0u32;
        let mut i = 0;
        while i < kinds.len() {
            bits |= 1 << kinds[i] as u32;
            i += 1;
        }
        Self(bits)
    }

    /// Get the raw bitmask; bit `i` is set for the kind with discriminant `i`.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    pub fn insert(&mut self, kind: ActionKind) {
        self.0 |= 1 << kind.index();
    }

    #[must_use]
    pub const fn contains(self, kind: ActionKind) -> bool {
        self.0 & (1 << kind as u32) != 0
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the kinds in discriminant order.
    pub fn iter(self) -> impl Iterator<Item = ActionKind> {
        ActionKind::ALL.into_iter().filter(move |&k| self.contains(k))
    }
}

/// A complete action.
///
/// ```
/// use parliament_engine::cards::parse_card;
/// use parliament_engine::core::{Action, ActionKind};
///
/// let draw = Action::new(ActionKind::Draw);
/// assert!(draw.is_no_arg());
///
/// let impeach = Action::with_cards(
///     ActionKind::ImpeachMp,
///     &[parse_card("3h").unwrap(), parse_card("4d").unwrap()],
/// );
/// assert_eq!(impeach.card_count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,

    /// Card arguments in the kind's fixed order.
    pub cards: SmallVec<[Card; 3]>,
}

impl Action {
    /// Create an action with no arguments.
    #[must_use]
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            cards: SmallVec::new(),
        }
    }

    /// Create an action with the given card arguments.
    #[must_use]
    pub fn with_cards(kind: ActionKind, cards: &[Card]) -> Self {
        Self {
            kind,
            cards: SmallVec::from_slice(cards),
        }
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_no_arg(&self) -> bool {
        self.cards.is_empty()
    }

    /// The first `N` card arguments.
    pub fn args<const N: usize>(&self) -> Result<[Card; N], ActionError> {
        if self.cards.len() < N {
            return Err(ActionError::MissingArguments {
                action: self.kind,
                expected: N,
                got: self.cards.len(),
            });
        }
        let mut out = [Card::JOKER; N];
        out.copy_from_slice(&self.cards[..N]);
        Ok(out)
    }
}

/// An accepted action, recorded in the game's history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The seat whose turn it was.
    pub seat: Seat,

    pub action: Action,

    /// Position in the history, starting at 0.
    pub sequence: u32,
}
