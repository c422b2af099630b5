//! Human-readable state printout.

use std::fmt;

use super::mode::Mode;
use super::state::GameState;
use crate::rules::GameResult;

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Normal => f.write_str("normal"),
            Mode::DiscardAfterDraw => f.write_str("discard after draw"),
            Mode::BlockImpeach(chain) | Mode::Reimpeach(chain) => {
                let label = if matches!(self, Mode::BlockImpeach(_)) {
                    "block impeachment"
                } else {
                    "reimpeach"
                };
                write!(
                    f,
                    "{label} of {} (card to beat {}, then {})",
                    chain.impeached, chain.card_to_beat, chain.resume
                )
            }
            Mode::Election(election) => {
                write!(f, "election called by {}", election.caller)?;
                for (seat, candidacy) in election.candidacies.iter() {
                    if let Some(c) = candidacy {
                        write!(f, "; {seat} stands {} with {}", c.candidate, c.calling)?;
                    }
                }
                Ok(())
            }
            Mode::BackupPm { resume } => write!(f, "backup PM (then {resume})"),
            Mode::PmChooseOrder { .. } => f.write_str("PM chooses endgame order"),
            Mode::Endgame(circuit) => write!(f, "endgame, chance {} of the circuit", circuit.position + 1),
            Mode::BlockCoalition(c) | Mode::CounterBlockCoalition(c) => {
                let label = if matches!(self, Mode::BlockCoalition(_)) {
                    "block coalition"
                } else {
                    "counter-block coalition"
                };
                write!(
                    f,
                    "{label}: {} proposes {} (card to beat {}, pot {})",
                    c.proposer, c.proposal, c.card_to_beat, c.pot
                )
            }
            Mode::GameOver(GameResult::Winner(seat)) => write!(f, "game over, {seat} wins"),
            Mode::GameOver(GameResult::Draw) => f.write_str("game over, nobody formed a government"),
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Parliament: {}", self.parliament)?;
        writeln!(f, "Discard: {}", self.discard)?;

        f.write_str("Hand sizes:")?;
        for (seat, hand) in self.hands.iter() {
            write!(f, " {}={}", seat.0, hand.size)?;
        }
        writeln!(f)?;

        match (self.pm_seat, self.pm_card) {
            (Some(seat), Some(card)) => writeln!(f, "PM: {seat} holding {card}")?,
            (Some(seat), None) => writeln!(f, "PM: {seat} choosing a new PM card")?,
            _ => writeln!(f, "PM: none")?,
        }
        writeln!(f, "Cabinet: {}", self.cabinet)?;
        writeln!(f, "Mode: {}", self.mode)?;
        writeln!(f, "Turn: {}", self.turn)?;
        writeln!(f, "Draw pile: {}", self.draw_pile)?;
        write!(f, "Observer ({}) hand: {}", self.config.observer, self.observer_hand())
    }
}
