//! NORMAL-mode transitions: drawing, discarding, appointments, PM
//! impeachment, no-confidence votes and the PM's Cabinet moves.
//!
//! Every handler validates before it writes. The engine also stages each
//! action on a duplicate, so a handler that fails halfway cannot leak a
//! partial update.

use tracing::{info, trace};

use crate::cards::{Card, CardStack, SuitSet};
use crate::core::{ActionKind, GameState, Mode, Seat};
use crate::error::ActionError;

use super::endgame;
use super::ordering::can_impeach_pm;
use super::plurality::tied_pluralities;

// === Shared helpers ===

/// Collect three played cards that must be distinct unique cards.
pub(super) fn collect_trio(cards: [Card; 3], role: &'static str) -> Result<CardStack, ActionError> {
    let mut stack = CardStack::EMPTY;
    for card in cards {
        if card.is_joker() {
            return Err(ActionError::JokerNotAllowed(role));
        }
        if stack.contains_card(card) {
            return Err(ActionError::DuplicateArgument(card));
        }
        stack.insert(CardStack::card(card))?;
    }
    Ok(stack)
}

/// Move one card from `seat`'s hand to the Discard pile.
pub(super) fn discard_from_hand(state: &mut GameState, seat: Seat, card: Card) -> Result<(), ActionError> {
    let cards = CardStack::card(card);
    state.take_from_hand(seat, cards)?;
    state.discard.insert(cards)?;
    trace!(%seat, %card, "discarded");
    Ok(())
}

/// The seat to act must be the PM with a PM card in place.
fn require_pm(state: &GameState) -> Result<Card, ActionError> {
    match (state.pm_seat, state.pm_card) {
        (Some(pm), Some(card)) if pm == state.turn => Ok(card),
        (Some(_), Some(_)) => Err(ActionError::NotPrimeMinister(state.turn)),
        _ => Err(ActionError::NoPrimeMinister),
    }
}

/// Whether `card` belongs to a tied-plurality suit and no MP of that suit
/// outranks it.
pub(crate) fn stands_against_plurality(state: &GameState, card: Card, tied: SuitSet) -> bool {
    let Some(suit) = card.suit() else {
        return false;
    };
    tied.contains(suit)
        && state
            .parliament
            .highest_of_suit(suit)
            .map_or(true, |mp| !mp.outranks(card))
}

// === Drawing ===

pub(super) fn draw(state: &mut GameState) -> Result<(), ActionError> {
    let seat = state.turn;
    if state.is_observer(seat) {
        return Err(ActionError::HiddenObserverDraw);
    }
    state.draw_hidden(seat)?;
    trace!(%seat, pile = state.draw_pile, "drew face down");
    after_draw(state)
}

pub(super) fn self_draw(state: &mut GameState, card: Card) -> Result<(), ActionError> {
    if !state.is_observer(state.turn) {
        return Err(ActionError::RevealedOpponentDraw);
    }
    state.draw_revealed(card)?;
    trace!(%card, pile = state.draw_pile, "observer drew");
    after_draw(state)
}

fn after_draw(state: &mut GameState) -> Result<(), ActionError> {
    if state.hand_size(state.turn) > state.config.max_hand_size {
        state.mode = Mode::DiscardAfterDraw;
        return Ok(());
    }
    finish_draw(state)
}

/// Pass the turn on, or open the endgame if that was the last card.
fn finish_draw(state: &mut GameState) -> Result<(), ActionError> {
    if state.draw_pile == 0 {
        let drawer = state.turn;
        return endgame::begin(state, drawer);
    }
    state.advance_turn();
    Ok(())
}

// === Hand to table ===

pub(super) fn discard(state: &mut GameState, card: Card) -> Result<(), ActionError> {
    let seat = state.turn;
    discard_from_hand(state, seat, card)?;
    if state.mode == Mode::DiscardAfterDraw {
        state.mode = Mode::Normal;
        return finish_draw(state);
    }
    state.advance_turn();
    Ok(())
}

pub(super) fn appoint_mp(state: &mut GameState, card: Card) -> Result<(), ActionError> {
    if state.parliament.size() >= state.config.parliament_capacity() {
        return Err(ActionError::ParliamentFull);
    }
    let cards = CardStack::card(card);
    state.take_from_hand(state.turn, cards)?;
    state.parliament.insert(cards)?;
    trace!(seat = %state.turn, %card, "appointed MP");
    state.advance_turn();
    Ok(())
}

// === Against the PM ===

pub(super) fn impeach_pm(state: &mut GameState, card: Card) -> Result<(), ActionError> {
    let (Some(pm), Some(pm_card)) = (state.pm_seat, state.pm_card) else {
        return Err(ActionError::NoPrimeMinister);
    };
    if !can_impeach_pm(card, pm_card, state.config.joker_precedence) {
        return Err(ActionError::Outranked {
            challenger: card,
            target: pm_card,
        });
    }

    let impeacher = state.turn;
    discard_from_hand(state, impeacher, card)?;
    state.discard.insert(CardStack::card(pm_card))?;
    state.pm_card = None;
    info!(%impeacher, %pm_card, cabinet = state.cabinet.size(), "PM impeached");

    match state.cabinet.size() {
        0 => {
            state.pm_seat = None;
            state.advance_turn();
        }
        1 => {
            state.pm_card = state.cabinet.first();
            state.cabinet = CardStack::EMPTY;
            state.advance_turn();
        }
        _ => {
            state.mode = Mode::BackupPm {
                resume: impeacher.next(state.config.seat_count),
            };
            state.turn = pm;
        }
    }
    Ok(())
}

pub(super) fn appoint_backup_pm(state: &mut GameState, card: Card) -> Result<(), ActionError> {
    let Mode::BackupPm { resume } = state.mode else {
        return Err(ActionError::WrongMode {
            action: ActionKind::AppointBackupPm,
            mode: state.mode.kind(),
        });
    };
    if !state.cabinet.contains_card(card) {
        return Err(ActionError::NotInCabinet(card));
    }
    state.cabinet.remove(CardStack::card(card))?;
    state.pm_card = Some(card);
    state.mode = Mode::Normal;
    state.turn = resume;
    trace!(%card, "backup PM appointed");
    Ok(())
}

pub(super) fn vote_no_confidence(state: &mut GameState, cards: [Card; 3]) -> Result<(), ActionError> {
    let Some(pm_card) = state.pm_card else {
        return Err(ActionError::NoPrimeMinister);
    };
    let played = collect_trio(cards, "a no-confidence vote")?;
    if cards.iter().any(|c| c.rank() != cards[0].rank()) {
        return Err(ActionError::MixedRanks);
    }
    let tied = tied_pluralities(state.parliament);
    if !cards.iter().any(|&c| stands_against_plurality(state, c, tied)) {
        return Err(ActionError::NoPluralityCard);
    }

    state.take_from_hand(state.turn, played)?;
    state.discard.insert(played)?;
    state.discard.insert(CardStack::card(pm_card))?;
    state.discard.insert(state.cabinet)?;
    info!(seat = %state.turn, %played, %pm_card, cabinet = %state.cabinet, "government toppled");
    state.cabinet = CardStack::EMPTY;
    state.pm_card = None;
    state.pm_seat = None;
    state.advance_turn();
    Ok(())
}

// === PM's own moves ===

pub(super) fn cabinet_reshuffle(state: &mut GameState, cabinet_card: Card, mp: Card) -> Result<(), ActionError> {
    require_pm(state)?;
    if !state.cabinet.contains_card(cabinet_card) {
        return Err(ActionError::NotInCabinet(cabinet_card));
    }
    if !state.parliament.contains_card(mp) {
        return Err(ActionError::NotInParliament(mp));
    }
    let (from_cabinet, from_parliament) = (CardStack::card(cabinet_card), CardStack::card(mp));
    state.cabinet.remove(from_cabinet)?;
    state.parliament.remove(from_parliament)?;
    state.cabinet.insert(from_parliament)?;
    state.parliament.insert(from_cabinet)?;
    trace!(%cabinet_card, %mp, "cabinet reshuffled");
    state.advance_turn();
    Ok(())
}

pub(super) fn appoint_pm(state: &mut GameState, cabinet_card: Card) -> Result<(), ActionError> {
    let old = require_pm(state)?;
    if !state.cabinet.contains_card(cabinet_card) {
        return Err(ActionError::NotInCabinet(cabinet_card));
    }
    state.cabinet.remove(CardStack::card(cabinet_card))?;
    state.cabinet.insert(CardStack::card(old))?;
    state.pm_card = Some(cabinet_card);
    trace!(%old, new = %cabinet_card, "PM card replaced");
    state.advance_turn();
    Ok(())
}
