//! Manual reconciliation: turn the recorded picks into the final pairing.

use crate::models::{Pair, ProtocolState, RatingStore, Role, Roster, RoundPicks};

/// Build the final pairs from the human's picks only.
///
/// Per round, our defender meets the attacker we accepted and the attacker they accepted
/// meets their defender. Whoever is left on each side is paired up once at the end.
/// Missing picks just leave their pair out.
pub fn reconcile(
    protocol: &ProtocolState,
    players: &Roster,
    opponents: &Roster,
    ratings: &RatingStore,
) -> Vec<Pair> {
    let rounds = [&protocol.first, &protocol.second];
    let mut pairs: Vec<Pair> = Vec::new();

    for picks in rounds {
        if let (Some(p), Some(o)) = (&picks.defender, &picks.attacker_choice) {
            pairs.push(make_pair(p, o, Role::Defender, ratings));
        }
    }
    for picks in rounds {
        if let Some(pair) = attacker_pair(picks, ratings) {
            pairs.push(pair);
        }
    }

    let leftover_player = players
        .iter()
        .find(|p| !pairs.iter().any(|pair| &pair.player == *p));
    let leftover_opponent = opponents
        .iter()
        .find(|o| !pairs.iter().any(|pair| &pair.opponent == *o));
    if let (Some(p), Some(o)) = (leftover_player, leftover_opponent) {
        let pair = make_pair(p, o, Role::Remaining, ratings);
        pairs.push(pair);
    }
    pairs
}

fn attacker_pair(picks: &RoundPicks, ratings: &RatingStore) -> Option<Pair> {
    let player = picks.opponent_attacker_choice.as_ref()?;
    let opponent = picks.opponent_defender.as_ref()?;
    Some(make_pair(player, opponent, Role::Attacker, ratings))
}

fn make_pair(player: &str, opponent: &str, role: Role, ratings: &RatingStore) -> Pair {
    Pair::new(player, opponent, ratings.value(player, opponent)).with_role(role)
}
