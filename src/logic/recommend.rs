//! Recommendations for the six protocol steps. Never recorded; recomputed on every request.

use crate::logic::solvers::optimize;
use crate::models::{Available, RatingStore, Role, RoundPicks, Session, Stage, Step, ATTACKERS_PER_ROUND};
use serde::Serialize;

/// Suggested pick for one step.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Our player to put up as defender.
    Defender(Option<String>),
    /// Our players to offer against their defender.
    Attackers(Vec<String>),
    /// Which of their offered attackers to accept against our defender.
    AttackerChoice(Option<String>),
}

/// Suggest a pick for `step`: the configured solver's answer when it has one, the
/// rating heuristic otherwise.
pub fn recommend(session: &Session, step: Step) -> Recommendation {
    match recommend_from_solver(session, step) {
        Some(r) => {
            log::debug!("step {}: solver recommends {:?}", step.number(), r);
            r
        }
        None => {
            let r = recommend_fallback(session, step);
            log::debug!("step {}: solver had no answer, heuristic recommends {:?}", step.number(), r);
            r
        }
    }
}

/// Solver tier: solve and classify the still-open sub-problem, then read the step's answer
/// off the roles. `None` when the classified pairs say nothing about this step.
pub fn recommend_from_solver(session: &Session, step: Step) -> Option<Recommendation> {
    let available = session.protocol().available(step, session.players(), session.opponents());
    let picks = session.protocol().round(step.round());
    let ratings = session.ratings();
    match step.stage() {
        Stage::Defenders => optimize(&available.players, &available.opponents, ratings, session.method)
            .into_iter()
            .find(|p| p.role == Some(Role::Defender))
            .map(|p| Recommendation::Defender(Some(p.player))),
        Stage::Attackers => {
            let attackers: Vec<String> =
                optimize(&available.players, &available.opponents, ratings, session.method)
                    .into_iter()
                    .filter(|p| p.role == Some(Role::Attacker))
                    .take(ATTACKERS_PER_ROUND)
                    .map(|p| p.player)
                    .collect();
            (!attackers.is_empty()).then_some(Recommendation::Attackers(attackers))
        }
        Stage::Choices => {
            let defender = picks.defender.as_ref()?;
            if picks.opponent_attackers.is_empty() {
                return None;
            }
            let (players, opponents) = choice_subproblem(&available, picks);
            optimize(&players, &opponents, ratings, session.method)
                .into_iter()
                .find(|p| &p.player == defender && picks.opponent_attackers.contains(&p.opponent))
                .map(|p| Recommendation::AttackerChoice(Some(p.opponent)))
        }
    }
}

/// Heuristic tier, usable on its own.
///
/// * defenders: best mean rating against the available opponents;
/// * attackers: the two available players rated highest against their defender;
/// * choice: the offered attacker our defender rates highest.
pub fn recommend_fallback(session: &Session, step: Step) -> Recommendation {
    let available = session.protocol().available(step, session.players(), session.opponents());
    let picks = session.protocol().round(step.round());
    let ratings = session.ratings();
    match step.stage() {
        Stage::Defenders => Recommendation::Defender(best_defender(&available, ratings)),
        Stage::Attackers => {
            let attackers = match &picks.opponent_defender {
                Some(defender) => best_attackers(defender, &available.players, ratings),
                None => Vec::new(),
            };
            Recommendation::Attackers(attackers)
        }
        Stage::Choices => {
            let choice = picks.defender.as_ref().and_then(|defender| {
                first_max_by_key(&picks.opponent_attackers, |o| ratings.value(defender, o)).cloned()
            });
            Recommendation::AttackerChoice(choice)
        }
    }
}

/// Our defender and their offered attackers go back into the pool for the choice step.
fn choice_subproblem(available: &Available, picks: &RoundPicks) -> (Vec<String>, Vec<String>) {
    let mut players = available.players.clone();
    if let Some(defender) = &picks.defender {
        if !players.contains(defender) {
            players.push(defender.clone());
        }
    }
    let mut opponents = available.opponents.clone();
    for o in &picks.opponent_attackers {
        if !opponents.contains(o) {
            opponents.push(o.clone());
        }
    }
    (players, opponents)
}

fn best_defender(available: &Available, ratings: &RatingStore) -> Option<String> {
    if available.opponents.is_empty() {
        return available.players.first().cloned();
    }
    let mut best: Option<(&String, f64)> = None;
    for player in &available.players {
        let mean = ratings.mean(player, &available.opponents).unwrap_or(0.0);
        if best.map_or(true, |(_, m)| mean > m) {
            best = Some((player, mean));
        }
    }
    best.map(|(p, _)| p.clone())
}

fn best_attackers(defender: &str, players: &[String], ratings: &RatingStore) -> Vec<String> {
    let mut ranked: Vec<&String> = players.iter().collect();
    ranked.sort_by(|a, b| ratings.value(b, defender).cmp(&ratings.value(a, defender)));
    ranked
        .into_iter()
        .take(ATTACKERS_PER_ROUND)
        .cloned()
        .collect()
}

/// Like `Iterator::max_by_key`, but the first maximum wins.
fn first_max_by_key<T, K: Ord>(items: &[T], key: impl Fn(&T) -> K) -> Option<&T> {
    let mut best: Option<(&T, K)> = None;
    for item in items {
        let k = key(item);
        if best.as_ref().map_or(true, |(_, b)| k > *b) {
            best = Some((item, k));
        }
    }
    best.map(|(item, _)| item)
}
