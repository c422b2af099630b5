//! The endgame.
//!
//! ## Setup
//!
//! Drawing the last card folds the Cabinet into the PM's hand. With a PM
//! sitting, the PM picks whether to open or close the circuit; without one
//! the circuit starts at the seat after the drawer.
//!
//! ## Circuit
//!
//! Each seat in turn may propose a PM card (or, as PM, reconfirm the
//! sitting one) or pass. A proposal is backed by every MP of the
//! coalition's suits, plus one if the proposer is already PM. Enough
//! backing forms a government immediately and ends the game. Otherwise
//! the table contests it, seat 0 first: a block follows the proposal's
//! suit and beats the standing card; a counter-block beats the block with
//! any suited card and brings its suit into the coalition. Each answer
//! restarts the poll. When a poll passes unanswered, the proposal stands
//! if no block is left standing and its backing has grown enough, and
//! fails otherwise.
//!
//! A circuit that ends without a government reshuffles the Discard pile
//! into a new draw pile and play resumes normally.

use tracing::{info, trace};

use crate::cards::{Card, CardStack, SuitSet};
use crate::core::{ActionKind, Circuit, Coalition, GameState, Mode, Seat};
use crate::error::ActionError;

use super::engine::GameResult;
use super::ordering::beats;

/// Enter the endgame after `drawer` took the last card.
pub(super) fn begin(state: &mut GameState, drawer: Seat) -> Result<(), ActionError> {
    let after_drawer = drawer.next(state.config.seat_count);
    match state.pm_seat {
        Some(pm) => {
            let cabinet = state.cabinet;
            state.give_to_hand(pm, cabinet)?;
            state.cabinet = CardStack::EMPTY;
            info!(%pm, folded = %cabinet, "endgame: PM chooses the order");
            state.mode = Mode::PmChooseOrder { after_drawer };
            state.turn = pm;
        }
        None => {
            info!(start = %after_drawer, "endgame: no PM");
            enter_circuit(
                state,
                Circuit {
                    start: after_drawer,
                    deferred_pm: None,
                    position: 0,
                },
            );
        }
    }
    Ok(())
}

/// The PM opens (`last == false`) or closes the circuit.
pub(super) fn choose_order(state: &mut GameState, last: bool, action: ActionKind) -> Result<(), ActionError> {
    let Mode::PmChooseOrder { after_drawer } = state.mode else {
        return Err(ActionError::WrongMode {
            action,
            mode: state.mode.kind(),
        });
    };
    let pm = state.pm_seat.ok_or(ActionError::NoPrimeMinister)?;
    let circuit = if last {
        Circuit {
            start: after_drawer,
            deferred_pm: Some(pm),
            position: 0,
        }
    } else {
        Circuit {
            start: pm,
            deferred_pm: None,
            position: 0,
        }
    };
    enter_circuit(state, circuit);
    Ok(())
}

fn enter_circuit(state: &mut GameState, circuit: Circuit) {
    state.turn = circuit.current(state.config.seat_count);
    state.mode = Mode::Endgame(circuit);
}

fn current_circuit(state: &GameState, action: ActionKind) -> Result<Circuit, ActionError> {
    match state.mode {
        Mode::Endgame(circuit) => Ok(circuit),
        ref other => Err(ActionError::WrongMode {
            action,
            mode: other.kind(),
        }),
    }
}

fn current_coalition(state: &GameState, action: ActionKind) -> Result<Coalition, ActionError> {
    match state.mode {
        Mode::BlockCoalition(coalition) | Mode::CounterBlockCoalition(coalition) => Ok(coalition),
        ref other => Err(ActionError::WrongMode {
            action,
            mode: other.kind(),
        }),
    }
}

/// MPs of the coalition's suits, plus one for a proposer who is already PM.
fn support(state: &GameState, coalition: &Coalition) -> u32 {
    let mps: u32 = coalition
        .suits
        .iter()
        .map(|suit| state.parliament.count_suit(suit))
        .sum();
    mps + u32::from(state.is_pm(coalition.proposer))
}

pub(super) fn try_formation(state: &mut GameState, card: Card) -> Result<(), ActionError> {
    let circuit = current_circuit(state, ActionKind::EndgameTryFormation)?;
    let Some(suit) = card.suit() else {
        return Err(ActionError::JokerNotAllowed("a coalition proposal"));
    };

    let proposer = state.turn;
    let reconfirm = state.is_pm(proposer) && state.pm_card == Some(card);
    let pot = if reconfirm {
        CardStack::EMPTY
    } else {
        let played = CardStack::card(card);
        state.take_from_hand(proposer, played)?;
        played
    };
    trace!(%proposer, %card, reconfirm, "formation proposed");

    let coalition = Coalition {
        circuit,
        proposer,
        proposal: card,
        reconfirm,
        suits: SuitSet::single(suit),
        card_to_beat: card,
        pot,
    };
    if support(state, &coalition) >= state.config.majority() {
        return form_government(state, coalition);
    }
    state.mode = Mode::BlockCoalition(coalition);
    state.turn = Seat::FIRST;
    Ok(())
}

pub(super) fn pass_formation(state: &mut GameState) -> Result<(), ActionError> {
    let circuit = current_circuit(state, ActionKind::EndgamePassFormation)?;
    advance_circuit(state, circuit)
}

pub(super) fn block(state: &mut GameState, card: Card) -> Result<(), ActionError> {
    let mut coalition = current_coalition(state, ActionKind::EndgameBlockCoalition)?;
    let required = coalition.proposal.suit();
    if let Some(suit) = required {
        if !card.fits_suit(suit) {
            return Err(ActionError::WrongSuit(card));
        }
    }
    if !beats(card, coalition.card_to_beat, required, state.config.joker_precedence) {
        return Err(ActionError::Outranked {
            challenger: card,
            target: coalition.card_to_beat,
        });
    }

    raise(state, &mut coalition, card)?;
    state.mode = Mode::CounterBlockCoalition(coalition);
    Ok(())
}

pub(super) fn counter_block(state: &mut GameState, card: Card) -> Result<(), ActionError> {
    let mut coalition = current_coalition(state, ActionKind::EndgameCounterBlockCoalition)?;
    let Some(suit) = card.suit() else {
        return Err(ActionError::JokerNotAllowed("a counter-block"));
    };
    if !beats(card, coalition.card_to_beat, None, state.config.joker_precedence) {
        return Err(ActionError::Outranked {
            challenger: card,
            target: coalition.card_to_beat,
        });
    }

    raise(state, &mut coalition, card)?;
    coalition.suits.insert(suit);
    state.mode = Mode::BlockCoalition(coalition);
    Ok(())
}

/// Put `card` into the pot as the new card to beat and restart the poll.
fn raise(state: &mut GameState, coalition: &mut Coalition, card: Card) -> Result<(), ActionError> {
    let seat = state.turn;
    let played = CardStack::card(card);
    state.take_from_hand(seat, played)?;
    coalition.pot.insert(played)?;
    coalition.card_to_beat = card;
    state.turn = Seat::FIRST;
    trace!(%seat, %card, "coalition contested");
    Ok(())
}

/// Pass on answering. After the last seat passes, the proposal is settled.
pub(super) fn decline(state: &mut GameState, action: ActionKind) -> Result<(), ActionError> {
    let coalition = current_coalition(state, action)?;
    let next = state.turn.next(state.config.seat_count);
    if next != Seat::FIRST {
        state.turn = next;
        return Ok(());
    }

    let block_standing = matches!(state.mode, Mode::CounterBlockCoalition(_));
    if !block_standing && support(state, &coalition) >= state.config.majority() {
        return form_government(state, coalition);
    }

    state.discard.insert(coalition.pot)?;
    info!(
        proposer = %coalition.proposer,
        proposal = %coalition.proposal,
        block_standing,
        "formation failed"
    );
    advance_circuit(state, coalition.circuit)
}

fn form_government(state: &mut GameState, coalition: Coalition) -> Result<(), ActionError> {
    let proposal = CardStack::card(coalition.proposal);
    if coalition.reconfirm {
        state.discard.insert(coalition.pot)?;
    } else {
        let old_pm_card = state.pm_slot();
        state.discard.insert(old_pm_card)?;
        state.discard.insert(coalition.pot.difference(proposal))?;
        state.pm_card = Some(coalition.proposal);
    }
    state.pm_seat = Some(coalition.proposer);
    state.mode = Mode::GameOver(GameResult::Winner(coalition.proposer));
    info!(
        winner = %coalition.proposer,
        pm_card = %coalition.proposal,
        suits = coalition.suits.len(),
        "government formed"
    );
    Ok(())
}

fn advance_circuit(state: &mut GameState, mut circuit: Circuit) -> Result<(), ActionError> {
    circuit.position += 1;
    if !circuit.is_complete(state.config.seat_count) {
        enter_circuit(state, circuit);
        return Ok(());
    }

    if state.discard.is_empty() {
        info!("endgame circuit over with nothing left to draw");
        state.mode = Mode::GameOver(GameResult::Draw);
        return Ok(());
    }
    let reshuffled = state.discard;
    state.face_down.insert(reshuffled)?;
    state.draw_pile = reshuffled.size();
    state.discard = CardStack::EMPTY;
    state.mode = Mode::Normal;
    state.turn = circuit.seat_at(0, state.config.seat_count);
    info!(draw_pile = state.draw_pile, turn = %state.turn, "discard reshuffled into a new draw pile");
    Ok(())
}
