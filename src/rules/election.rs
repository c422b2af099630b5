//! Elections.
//!
//! A caller stakes three cards of one suit, the first being the candidate
//! for PM card. Every other seat, starting after the caller, may contest
//! with a stake of its own or decline. When the poll returns to the caller:
//!
//! - the highest candidate wins outright
//! - tied candidates are separated by Parliament's strict plurality suit
//! - otherwise the election is cancelled and every stake goes back
//!
//! Losers discard their stakes. An incumbent PM who wins keeps the Cabinet
//! and adds the stake and the old PM card to it; any other winner replaces
//! the government, whose PM card and Cabinet are discarded.

use tracing::{info, trace};

use crate::cards::{Card, CardStack};
use crate::core::{ActionKind, Candidacy, Election, GameState, Mode, Seat, SeatMap};
use crate::error::{ActionError, EngineError};

use super::plurality::plurality;
use super::transition::collect_trio;

/// Validate and stake `cards` for `seat`. Hand cards are taken first; the
/// incumbent PM may also stake Cabinet cards.
fn stake(state: &mut GameState, seat: Seat, cards: [Card; 3]) -> Result<Candidacy, ActionError> {
    let calling = collect_trio(cards, "an election card")?;
    if cards.iter().any(|c| c.suit() != cards[0].suit()) {
        return Err(ActionError::MixedSuits);
    }

    let from_cabinet = if state.is_pm(seat) {
        state.cabinet.intersection(calling)
    } else {
        CardStack::EMPTY
    };
    let from_hand = calling.difference(from_cabinet);

    state.take_from_hand(seat, from_hand)?;
    state.cabinet.remove(from_cabinet)?;
    trace!(%seat, candidate = %cards[0], %calling, "stake placed");

    Ok(Candidacy {
        candidate: cards[0],
        calling,
        from_cabinet,
    })
}

pub(super) fn call_election(state: &mut GameState, cards: [Card; 3]) -> Result<(), ActionError> {
    let caller = state.turn;
    let candidacies = SeatMap::try_new(state.config.seat_count, |_| None)
        .map_err(EngineError::exhausted("opening an election"))?;
    let candidacy = stake(state, caller, cards)?;

    let mut election = Election { caller, candidacies };
    election.candidacies[caller] = Some(candidacy);
    state.mode = Mode::Election(election);
    state.turn = caller.next(state.config.seat_count);
    Ok(())
}

fn open_election(state: &mut GameState, action: ActionKind) -> Result<&mut Election, ActionError> {
    match &mut state.mode {
        Mode::Election(election) => Ok(election),
        other => Err(ActionError::WrongMode {
            action,
            mode: other.kind(),
        }),
    }
}

pub(super) fn contest(state: &mut GameState, cards: [Card; 3]) -> Result<(), ActionError> {
    let seat = state.turn;
    let election = open_election(state, ActionKind::ContestElection)?;
    if seat == election.caller || election.candidacies[seat].is_some() {
        return Err(ActionError::AlreadyAnswered(seat));
    }

    let candidacy = stake(state, seat, cards)?;
    open_election(state, ActionKind::ContestElection)?.candidacies[seat] = Some(candidacy);
    next_respondent(state)
}

pub(super) fn decline(state: &mut GameState) -> Result<(), ActionError> {
    let seat = state.turn;
    open_election(state, ActionKind::NoContestElection)?.candidacies[seat] = None;
    next_respondent(state)
}

fn next_respondent(state: &mut GameState) -> Result<(), ActionError> {
    let next = state.turn.next(state.config.seat_count);
    let caller = open_election(state, ActionKind::NoContestElection)?.caller;
    if next != caller {
        state.turn = next;
        return Ok(());
    }
    match std::mem::replace(&mut state.mode, Mode::Normal) {
        Mode::Election(election) => resolve(state, election),
        other => {
            state.mode = other;
            Ok(())
        }
    }
}

/// The seat whose candidate wins, or `None` for a cancelled election.
fn winner(state: &GameState, election: &Election) -> Option<Seat> {
    let standing = || election.candidacies.iter().filter_map(|(s, c)| c.map(|c| (s, c)));
    let top = standing().map(|(_, c)| c.candidate.rank()).max()?;
    let mut tied = standing().filter(|(_, c)| c.candidate.rank() == top);

    let first = tied.next()?;
    if tied.next().is_none() {
        return Some(first.0);
    }
    let suit = plurality(state.parliament)?;
    standing()
        .filter(|(_, c)| c.candidate.rank() == top)
        .find(|(_, c)| c.candidate.suit() == Some(suit))
        .map(|(seat, _)| seat)
}

fn resolve(state: &mut GameState, election: Election) -> Result<(), ActionError> {
    state.turn = election.caller.next(state.config.seat_count);

    let Some(winner) = winner(state, &election) else {
        for (seat, candidacy) in election.candidacies.iter() {
            if let Some(c) = candidacy {
                state.give_to_hand(seat, c.from_hand())?;
                state.cabinet.insert(c.from_cabinet)?;
            }
        }
        info!(caller = %election.caller, "election cancelled");
        return Ok(());
    };

    let mut won = None;
    for (seat, candidacy) in election.candidacies.iter() {
        match candidacy {
            Some(c) if seat == winner => won = Some(*c),
            Some(c) => state.discard.insert(c.calling)?,
            None => {}
        }
    }
    let Some(won) = won else {
        return Ok(());
    };

    let cabinet = won.calling.difference(CardStack::card(won.candidate));
    let old_pm_card = state.pm_slot();
    if state.is_pm(winner) {
        state.cabinet.insert(cabinet)?;
        state.cabinet.insert(old_pm_card)?;
    } else {
        state.discard.insert(old_pm_card)?;
        state.discard.insert(state.cabinet)?;
        state.cabinet = cabinet;
        state.pm_seat = Some(winner);
    }
    state.pm_card = Some(won.candidate);
    info!(%winner, pm_card = %won.candidate, cabinet = %state.cabinet, "election decided");
    Ok(())
}
