//! Rules engine trait and the Parliament implementation.
//!
//! The engine owns no state: callers hold `GameState` values and pass them
//! in, so any number of games (or speculative copies of one) can share a
//! single engine.
//!
//! ## Atomicity
//!
//! `apply_action` either applies the whole action or leaves the state
//! exactly as it was. The action is first checked against the current
//! mode, then applied to a duplicate that replaces the state only on
//! success.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Action, ActionKind, ActionRecord, ActionSet, GameState, Mode, Seat};
use crate::error::ActionError;

use super::{election, endgame, impeach, legal, transition};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// A seat formed a government.
    Winner(Seat),
    /// The endgame ran out of cards with no government formed.
    Draw,
}

impl GameResult {
    /// Check if a seat won.
    #[must_use]
    pub fn is_winner(&self, seat: Seat) -> bool {
        matches!(self, GameResult::Winner(s) if *s == seat)
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: advisory; hidden hands get the benefit of the doubt
/// - `apply_action`: must leave the state untouched when it fails
/// - `is_terminal`: `None` while the game continues
pub trait RulesEngine {
    /// Action kinds the seat to act may currently attempt.
    fn legal_actions(&self, state: &GameState) -> ActionSet;

    /// Apply an action for the seat to act.
    fn apply_action(&self, state: &mut GameState, action: &Action) -> Result<(), ActionError>;

    /// Check if the game is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Whether `kind` is currently legal.
    fn is_legal(&self, state: &GameState, kind: ActionKind) -> bool {
        self.legal_actions(state).contains(kind)
    }
}

/// The rules of Parliament.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParliamentRules;

impl ParliamentRules {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RulesEngine for ParliamentRules {
    fn legal_actions(&self, state: &GameState) -> ActionSet {
        legal::legal_actions(state)
    }

    fn apply_action(&self, state: &mut GameState, action: &Action) -> Result<(), ActionError> {
        let seat = state.turn();
        let result = stage(state, action);
        match &result {
            Ok(()) => debug!(%seat, action = ?action.kind, cards = ?action.cards, mode = ?state.mode().kind(), "action applied"),
            Err(error) => debug!(%seat, action = ?action.kind, cards = ?action.cards, %error, "action rejected"),
        }
        result
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        match state.mode() {
            Mode::GameOver(result) => Some(*result),
            _ => None,
        }
    }
}

fn stage(state: &mut GameState, action: &Action) -> Result<(), ActionError> {
    let mode = state.mode().kind();
    if !legal::mode_actions(mode).contains(action.kind) {
        return Err(ActionError::WrongMode {
            action: action.kind,
            mode,
        });
    }

    let mut next = state.duplicate()?;
    let record = ActionRecord {
        seat: next.turn,
        action: action.clone(),
        sequence: next.history.len() as u32,
    };
    dispatch(&mut next, action)?;
    next.history.push_back(record);
    *state = next;
    Ok(())
}

fn dispatch(state: &mut GameState, action: &Action) -> Result<(), ActionError> {
    use ActionKind as K;

    match action.kind {
        K::Draw => transition::draw(state),
        K::SelfDraw => transition::self_draw(state, action.args::<1>()?[0]),
        K::Discard => transition::discard(state, action.args::<1>()?[0]),
        K::AppointMp => transition::appoint_mp(state, action.args::<1>()?[0]),
        K::CallElection => election::call_election(state, action.args::<3>()?),
        K::ImpeachMp => {
            let [mp, challenger] = action.args::<2>()?;
            impeach::impeach_mp(state, mp, challenger)
        }
        K::ImpeachPm => transition::impeach_pm(state, action.args::<1>()?[0]),
        K::VoteNoConfidence => transition::vote_no_confidence(state, action.args::<3>()?),
        K::CabinetReshuffle => {
            let [cabinet_card, mp] = action.args::<2>()?;
            transition::cabinet_reshuffle(state, cabinet_card, mp)
        }
        K::AppointPm => transition::appoint_pm(state, action.args::<1>()?[0]),
        K::BlockImpeach | K::Reimpeach => impeach::overtake(state, action.args::<1>()?[0], action.kind),
        K::NoBlockImpeach | K::NoReimpeach => impeach::decline(state, action.kind),
        K::ContestElection => election::contest(state, action.args::<3>()?),
        K::NoContestElection => election::decline(state),
        K::AppointBackupPm => transition::appoint_backup_pm(state, action.args::<1>()?[0]),
        K::EndgamePmFirst => endgame::choose_order(state, false, action.kind),
        K::EndgamePmLast => endgame::choose_order(state, true, action.kind),
        K::EndgameTryFormation => endgame::try_formation(state, action.args::<1>()?[0]),
        K::EndgamePassFormation => endgame::pass_formation(state),
        K::EndgameBlockCoalition => endgame::block(state, action.args::<1>()?[0]),
        K::EndgameCounterBlockCoalition => endgame::counter_block(state, action.args::<1>()?[0]),
        K::EndgameNoBlockCoalition | K::EndgameNoCounterBlockCoalition => endgame::decline(state, action.kind),
    }
}
