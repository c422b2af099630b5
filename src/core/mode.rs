//! Protocol modes.
//!
//! `NORMAL` is the quiescent mode. Every other mode is an open
//! sub-protocol waiting for a forced answer, and carries the data that
//! sub-protocol needs. Data for one protocol cannot be read under another.
//!
//! ## Response cycles
//!
//! Impeachment chains and coalition contests poll every seat starting at
//! seat 0. Each overtaking card restarts the cycle at seat 0; the cycle
//! resolves once the turn would wrap back to seat 0 with nobody answering.
//! Elections instead poll each seat after the caller once, ending at the
//! caller.

use std::collections::TryReserveError;

use serde::{Deserialize, Serialize};

use super::seat::{Seat, SeatMap};
use crate::cards::{Card, CardStack, SuitSet};
use crate::rules::GameResult;

/// Mode labels, without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeKind {
    Normal,
    DiscardAfterDraw,
    BlockImpeach,
    Reimpeach,
    Election,
    BackupPm,
    PmChooseOrder,
    Endgame,
    BlockCoalition,
    CounterBlockCoalition,
    GameOver,
}

/// An MP impeachment waiting on blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImpeachChain {
    /// The MP under challenge. It stays in Parliament until the chain resolves.
    pub impeached: Card,

    /// The card currently standing against the MP.
    pub card_to_beat: Card,

    /// Who moves once the chain resolves.
    pub resume: Seat,
}

/// One seat's stake in an election.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidacy {
    /// The card that becomes PM card on a win.
    pub candidate: Card,

    /// All three staked cards, candidate included.
    pub calling: CardStack,

    /// The part of `calling` taken from the Cabinet (incumbent PM only).
    pub from_cabinet: CardStack,
}

impl Candidacy {
    /// The staked cards that came from the hand.
    #[must_use]
    pub fn from_hand(&self) -> CardStack {
        self.calling.difference(self.from_cabinet)
    }
}

/// An open election.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Election {
    pub caller: Seat,

    /// Per-seat candidacy; `None` for seats that declined or have not answered.
    pub candidacies: SeatMap<Option<Candidacy>>,
}

impl Election {
    pub(crate) fn try_clone(&self) -> Result<Self, TryReserveError> {
        Ok(Self {
            caller: self.caller,
            candidacies: self.candidacies.try_clone()?,
        })
    }

    /// Every staked card.
    #[must_use]
    pub fn staked(&self) -> CardStack {
        // Stakes are disjoint and never hold jokers, so a bitwise union is exact.
        self.candidacies
            .values()
            .flatten()
            .fold(CardStack::EMPTY, |acc, c| {
                CardStack::from_bits(acc.bits() | c.calling.bits())
            })
    }
}

/// The endgame circuit: every seat gets one chance to form a government.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Circuit {
    /// First seat of the circuit.
    pub start: Seat,

    /// Set when the PM chose to act last; that seat is moved to the end.
    pub deferred_pm: Option<Seat>,

    /// How many seats have already had their chance.
    pub position: u8,
}

impl Circuit {
    /// The seat at `position` in circuit order.
    ///
    /// ```
    /// use parliament_engine::core::{Circuit, Seat};
    ///
    /// let circuit = Circuit { start: Seat(1), deferred_pm: Some(Seat(2)), position: 0 };
    /// let order: Vec<_> = (0..4).map(|p| circuit.seat_at(p, 4)).collect();
    /// assert_eq!(order, vec![Seat(1), Seat(3), Seat(0), Seat(2)]);
    /// ```
    #[must_use]
    pub fn seat_at(&self, position: u8, seat_count: u8) -> Seat {
        let ring = (0..seat_count).map(|i| Seat((self.start.0 + i) % seat_count));
        match self.deferred_pm {
            Some(pm) if position + 1 >= seat_count => pm,
            Some(pm) => ring
                .filter(|&s| s != pm)
                .nth(position as usize)
                .unwrap_or(pm),
            None => Seat((self.start.0 + position) % seat_count),
        }
    }

    /// The seat whose chance it currently is.
    #[must_use]
    pub fn current(&self, seat_count: u8) -> Seat {
        self.seat_at(self.position, seat_count)
    }

    /// Whether every seat has had its chance.
    #[must_use]
    pub fn is_complete(&self, seat_count: u8) -> bool {
        self.position >= seat_count
    }
}

/// A formation attempt being contested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coalition {
    /// The circuit to continue if the attempt fails.
    pub circuit: Circuit,

    pub proposer: Seat,

    /// The proposed PM card.
    pub proposal: Card,

    /// The proposer is the PM and put forward the sitting PM card.
    pub reconfirm: bool,

    /// The proposal's suit plus every suit that counter-blocked.
    pub suits: SuitSet,

    /// The most recent card played in the contest.
    pub card_to_beat: Card,

    /// Every card played into the contest, the proposal included unless
    /// it was reconfirmed.
    pub pot: CardStack,
}

/// The current protocol mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// The seat to move drew past the hand-size cap and must discard.
    DiscardAfterDraw,
    BlockImpeach(ImpeachChain),
    Reimpeach(ImpeachChain),
    Election(Election),
    /// The deposed PM picks a Cabinet card as the new PM card.
    BackupPm { resume: Seat },
    /// The PM decides whether to open or close the endgame circuit.
    PmChooseOrder { after_drawer: Seat },
    Endgame(Circuit),
    BlockCoalition(Coalition),
    CounterBlockCoalition(Coalition),
    GameOver(GameResult),
}

impl Mode {
    #[must_use]
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Normal => ModeKind::Normal,
            Mode::DiscardAfterDraw => ModeKind::DiscardAfterDraw,
            Mode::BlockImpeach(_) => ModeKind::BlockImpeach,
            Mode::Reimpeach(_) => ModeKind::Reimpeach,
            Mode::Election(_) => ModeKind::Election,
            Mode::BackupPm { .. } => ModeKind::BackupPm,
            Mode::PmChooseOrder { .. } => ModeKind::PmChooseOrder,
            Mode::Endgame(_) => ModeKind::Endgame,
            Mode::BlockCoalition(_) => ModeKind::BlockCoalition,
            Mode::CounterBlockCoalition(_) => ModeKind::CounterBlockCoalition,
            Mode::GameOver(_) => ModeKind::GameOver,
        }
    }

    /// Cards held by the open sub-protocol rather than any pile.
    #[must_use]
    pub fn pending_cards(&self) -> CardStack {
        match self {
            Mode::BlockImpeach(chain) | Mode::Reimpeach(chain) => CardStack::card(chain.card_to_beat),
            Mode::Election(election) => election.staked(),
            Mode::BlockCoalition(coalition) | Mode::CounterBlockCoalition(coalition) => coalition.pot,
            _ => CardStack::EMPTY,
        }
    }

    pub(crate) fn try_clone(&self) -> Result<Self, TryReserveError> {
        match self {
            Mode::Election(election) => Ok(Mode::Election(election.try_clone()?)),
            other => Ok(other.clone()),
        }
    }
}
