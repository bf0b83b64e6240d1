//! Wizard: record picks step by step and move between steps.

use crate::logic::reconcile::reconcile;
use crate::models::{
    PairingError, Phase, ProtocolState, Roster, Session, Slot, Stage, Step, ATTACKERS_PER_ROUND,
};

/// Record one pick for the current step. Any picks of later steps are dropped.
pub fn select(session: &mut Session, slot: Slot) -> Result<(), PairingError> {
    let Phase::InProgress(step) = session.protocol.phase else {
        return Err(PairingError::InvalidState);
    };
    if slot.stage() != step.stage() {
        return Err(PairingError::InvalidState);
    }
    let available = session
        .protocol
        .available(step, &session.players, &session.opponents);
    let picks = session.protocol.round(step.round());

    match &slot {
        Slot::Defender(name) => check_name(name, &session.players, &available.players)?,
        Slot::OpponentDefender(name) => check_name(name, &session.opponents, &available.opponents)?,
        Slot::Attackers(names) => check_list(names, &session.players, &available.players)?,
        Slot::OpponentAttackers(names) => {
            check_list(names, &session.opponents, &available.opponents)?
        }
        Slot::AttackerChoice(name) => {
            if !picks.opponent_attackers.contains(name) {
                return Err(PairingError::NotOffered(name.clone()));
            }
        }
        Slot::OpponentAttackerChoice(name) => {
            if !picks.attackers.contains(name) {
                return Err(PairingError::NotOffered(name.clone()));
            }
        }
    }

    log::debug!("step {}: recorded {:?}", step.number(), slot);
    let picks = session.protocol.round_mut(step.round());
    match slot {
        Slot::Defender(name) => picks.defender = Some(name),
        Slot::OpponentDefender(name) => picks.opponent_defender = Some(name),
        Slot::Attackers(names) => picks.attackers = names,
        Slot::OpponentAttackers(names) => picks.opponent_attackers = names,
        Slot::AttackerChoice(name) => picks.attacker_choice = Some(name),
        Slot::OpponentAttackerChoice(name) => picks.opponent_attacker_choice = Some(name),
    }
    session.protocol.clear_after(step);
    session.final_pairing = None;
    Ok(())
}

fn check_name(name: &str, roster: &Roster, pool: &[String]) -> Result<(), PairingError> {
    if !roster.contains(name) {
        return Err(PairingError::UnknownIdentifier(name.to_string()));
    }
    if !pool.iter().any(|n| n == name) {
        return Err(PairingError::UnavailableSelection(name.to_string()));
    }
    Ok(())
}

/// Up to two distinct available names.
fn check_list(names: &[String], roster: &Roster, pool: &[String]) -> Result<(), PairingError> {
    if names.len() > ATTACKERS_PER_ROUND {
        return Err(PairingError::TooManyAttackers);
    }
    for (i, name) in names.iter().enumerate() {
        check_name(name, roster, pool)?;
        if names[..i].contains(name) {
            return Err(PairingError::UnavailableSelection(name.clone()));
        }
    }
    Ok(())
}

/// Whether `step` has every pick it can have. Small rosters need fewer attackers.
pub fn step_complete(session: &Session, step: Step) -> bool {
    let available = session
        .protocol
        .available(step, &session.players, &session.opponents);
    let picks = session.protocol.round(step.round());
    let filled = |slot: &Option<String>, pool: &[String]| slot.is_some() || pool.is_empty();
    match step.stage() {
        Stage::Defenders => {
            filled(&picks.defender, &available.players)
                && filled(&picks.opponent_defender, &available.opponents)
        }
        Stage::Attackers => {
            picks.attackers.len() == available.players.len().min(ATTACKERS_PER_ROUND)
                && picks.opponent_attackers.len() == available.opponents.len().min(ATTACKERS_PER_ROUND)
        }
        Stage::Choices => {
            (picks.attacker_choice.is_some() || picks.opponent_attackers.is_empty())
                && (picks.opponent_attacker_choice.is_some() || picks.attackers.is_empty())
        }
    }
}

/// Go to the next step. Leaving the last step computes the final pairing.
pub fn advance(session: &mut Session) -> Result<(), PairingError> {
    let next = match session.protocol.phase {
        Phase::Setup => {
            if session.players.is_empty() || session.opponents.is_empty() {
                return Err(PairingError::IncompleteSelection);
            }
            Phase::InProgress(Step::FirstDefender)
        }
        Phase::InProgress(step) => {
            if !step_complete(session, step) {
                return Err(PairingError::IncompleteSelection);
            }
            step.next().map_or(Phase::Completed, Phase::InProgress)
        }
        Phase::Completed => return Err(PairingError::InvalidState),
    };

    if next == Phase::Completed {
        let pairs = reconcile(
            &session.protocol,
            &session.players,
            &session.opponents,
            &session.ratings,
        );
        log::info!(
            "Pairing complete: {} pairs, total rating {}",
            pairs.len(),
            crate::models::total_rating(&pairs)
        );
        session.final_pairing = Some(pairs);
    }
    session.protocol.phase = next;
    Ok(())
}

/// Go back one step. Picks are kept; leaving the result page drops the final pairing.
pub fn back(session: &mut Session) -> Result<(), PairingError> {
    session.protocol.phase = match session.protocol.phase {
        Phase::Setup => return Err(PairingError::InvalidState),
        Phase::InProgress(step) => step.prev().map_or(Phase::Setup, Phase::InProgress),
        Phase::Completed => {
            session.final_pairing = None;
            Phase::InProgress(Step::SecondAttackerChoice)
        }
    };
    Ok(())
}

/// Clear all picks and the final pairing; rosters and ratings stay.
pub fn reset(session: &mut Session) {
    session.protocol = ProtocolState::default();
    session.final_pairing = None;
    log::info!("Pairing protocol reset");
}
