//! How the manual pairing scores against what the solver would have done.

use crate::logic::reconcile::reconcile;
use crate::logic::solvers::optimize;
use crate::models::{total_rating, Pair, PairingError, Phase, Session};
use serde::Serialize;

/// Rating totals of three pairings of the same session.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Comparison {
    /// The picks as recorded.
    pub manual: u32,
    /// The picks as recorded, with the configured solver filling in whoever is unpaired.
    pub hybrid: u32,
    /// The configured solver over both full rosters.
    pub optimal: u32,
}

fn manual_pairing(session: &Session) -> Vec<Pair> {
    match session.final_pairing() {
        Some(pairs) => pairs.to_vec(),
        None => reconcile(
            session.protocol(),
            session.players(),
            session.opponents(),
            session.ratings(),
        ),
    }
}

/// Recorded pairs plus a solver pass over the players and opponents they leave out.
pub fn hybrid_pairing(session: &Session) -> Vec<Pair> {
    let mut pairs = manual_pairing(session);
    let players: Vec<String> = session
        .players()
        .iter()
        .filter(|p| !pairs.iter().any(|pair| &pair.player == *p))
        .cloned()
        .collect();
    let opponents: Vec<String> = session
        .opponents()
        .iter()
        .filter(|o| !pairs.iter().any(|pair| &pair.opponent == *o))
        .cloned()
        .collect();
    pairs.extend(optimize(&players, &opponents, session.ratings(), session.method));
    pairs
}

/// Classified solver pairing over both full rosters.
pub fn optimal_pairing(session: &Session) -> Vec<Pair> {
    optimize(
        session.players().names(),
        session.opponents().names(),
        session.ratings(),
        session.method,
    )
}

pub fn compare(session: &Session) -> Comparison {
    Comparison {
        manual: total_rating(&manual_pairing(session)),
        hybrid: total_rating(&hybrid_pairing(session)),
        optimal: total_rating(&optimal_pairing(session)),
    }
}

/// Replace the completed session's final pairing with the solver's.
pub fn apply_optimal(session: &mut Session) -> Result<(), PairingError> {
    if session.phase() != Phase::Completed {
        return Err(PairingError::InvalidState);
    }
    let pairs = optimal_pairing(session);
    log::info!("Applied solver pairing, total rating {}", total_rating(&pairs));
    session.final_pairing = Some(pairs);
    Ok(())
}
