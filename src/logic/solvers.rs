//! Assignment solvers: pick one opponent per player maximizing the summed rating.

use crate::logic::hungarian::min_cost_assignment;
use crate::logic::roles::classify;
use crate::models::{total_rating, Method, Pair, RatingStore, MAX_RATING};
use serde::Serialize;

/// Exhaustive search hands over to the optimal solver when either side is larger than this.
pub const EXHAUSTIVE_LIMIT: usize = 5;

/// Cost of a pair is `COST_CEILING - rating`, so every cost is positive.
pub const COST_CEILING: i64 = MAX_RATING as i64 + 1;

/// Result of one solver run.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Solution {
    /// Method the caller asked for.
    pub requested: Method,
    /// Method that actually ran (differs when exhaustive search was too large).
    pub used: Method,
    pub pairs: Vec<Pair>,
    pub total: u32,
}

/// Raw pairs (no roles) for the given players and opponents.
pub fn solve(players: &[String], opponents: &[String], ratings: &RatingStore, method: Method) -> Vec<Pair> {
    solve_detailed(players, opponents, ratings, method).pairs
}

/// Solve and report which algorithm ran. Empty input on either side yields no pairs.
pub fn solve_detailed(
    players: &[String],
    opponents: &[String],
    ratings: &RatingStore,
    method: Method,
) -> Solution {
    let used = match method {
        Method::Full if players.len().max(opponents.len()) > EXHAUSTIVE_LIMIT => {
            log::debug!(
                "{} players against {} opponents exceed exhaustive limit of {}, using optimal matching",
                players.len(),
                opponents.len(),
                EXHAUSTIVE_LIMIT
            );
            Method::Optimal
        }
        m => m,
    };
    let pairs = if players.is_empty() || opponents.is_empty() {
        Vec::new()
    } else {
        match used {
            Method::Greedy => greedy(players, opponents, ratings),
            Method::Full => exhaustive(players, opponents, ratings),
            Method::Optimal => optimal(players, opponents, ratings),
        }
    };
    let total = total_rating(&pairs);
    Solution {
        requested: method,
        used,
        pairs,
        total,
    }
}

/// Solve, then attach tournament roles: the finished recommendation.
pub fn optimize(players: &[String], opponents: &[String], ratings: &RatingStore, method: Method) -> Vec<Pair> {
    classify(&solve(players, opponents, ratings, method))
}

/// Take pairs from highest rating down, skipping any whose player or opponent is taken.
/// Equal ratings keep player-major, opponent-minor order.
fn greedy(players: &[String], opponents: &[String], ratings: &RatingStore) -> Vec<Pair> {
    let mut candidates: Vec<Pair> = players
        .iter()
        .flat_map(|p| opponents.iter().map(move |o| Pair::new(p.clone(), o.clone(), ratings.value(p, o))))
        .collect();
    candidates.sort_by(|a, b| b.rating.cmp(&a.rating));

    let mut used_players: Vec<&str> = Vec::new();
    let mut used_opponents: Vec<&str> = Vec::new();
    let mut chosen = Vec::new();
    for pair in &candidates {
        if used_players.contains(&pair.player.as_str()) || used_opponents.contains(&pair.opponent.as_str()) {
            continue;
        }
        used_players.push(&pair.player);
        used_opponents.push(&pair.opponent);
        chosen.push(pair.clone());
    }
    chosen
}

/// Try every ordering of the larger side against the smaller one; the first best total wins.
fn exhaustive(players: &[String], opponents: &[String], ratings: &RatingStore) -> Vec<Pair> {
    // Rows are the smaller side so every row gets a partner.
    let transposed = players.len() > opponents.len();
    let (rows, cols) = if transposed {
        (opponents, players)
    } else {
        (players, opponents)
    };
    let weights: Vec<Vec<u32>> = rows
        .iter()
        .map(|r| {
            cols.iter()
                .map(|c| {
                    let (p, o) = if transposed { (c, r) } else { (r, c) };
                    u32::from(ratings.value(p, o))
                })
                .collect()
        })
        .collect();

    let mut search = PermutationSearch {
        weights: &weights,
        used: vec![false; cols.len()],
        current: Vec::with_capacity(rows.len()),
        best: None,
    };
    search.visit(0, 0);
    let Some((_, best)) = search.best else {
        return Vec::new();
    };

    let mut pairs: Vec<(usize, Pair)> = best
        .iter()
        .enumerate()
        .map(|(r, &c)| {
            let (p, o, player_idx) = if transposed {
                (&cols[c], &rows[r], c)
            } else {
                (&rows[r], &cols[c], r)
            };
            (player_idx, Pair::new(p.clone(), o.clone(), ratings.value(p, o)))
        })
        .collect();
    pairs.sort_by_key(|(idx, _)| *idx);
    pairs.into_iter().map(|(_, pair)| pair).collect()
}

/// Depth-first walk over partial permutations in lexicographic order.
struct PermutationSearch<'a> {
    weights: &'a [Vec<u32>],
    used: Vec<bool>,
    current: Vec<usize>,
    best: Option<(u32, Vec<usize>)>,
}

impl PermutationSearch<'_> {
    fn visit(&mut self, row: usize, score: u32) {
        if row == self.weights.len() {
            if self.best.as_ref().map_or(true, |(best, _)| score > *best) {
                self.best = Some((score, self.current.clone()));
            }
            return;
        }
        for col in 0..self.used.len() {
            if self.used[col] {
                continue;
            }
            self.used[col] = true;
            self.current.push(col);
            self.visit(row + 1, score + self.weights[row][col]);
            self.current.pop();
            self.used[col] = false;
        }
    }
}

/// Minimum-cost assignment on `COST_CEILING - rating`.
fn optimal(players: &[String], opponents: &[String], ratings: &RatingStore) -> Vec<Pair> {
    let cost: Vec<Vec<i64>> = players
        .iter()
        .map(|p| {
            opponents
                .iter()
                .map(|o| COST_CEILING - i64::from(ratings.value(p, o)))
                .collect()
        })
        .collect();
    min_cost_assignment(&cost)
        .into_iter()
        .map(|(i, j)| {
            let (p, o) = (&players[i], &opponents[j]);
            Pair::new(p.clone(), o.clone(), ratings.value(p, o))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Roster;

    fn names(prefix: &str, n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("{prefix}{i}")).collect()
    }

    #[test]
    fn exhaustive_tie_keeps_first_permutation() {
        let players = names("P", 3);
        let opponents = names("O", 3);
        let ratings = RatingStore::for_rosters(
            &Roster::from_names(players.clone()).unwrap(),
            &Roster::from_names(opponents.clone()).unwrap(),
        );
        let pairs = exhaustive(&players, &opponents, &ratings);
        let assigned: Vec<_> = pairs.iter().map(|p| p.opponent.as_str()).collect();
        assert_eq!(assigned, ["O1", "O2", "O3"]);
    }

    #[test]
    fn full_over_limit_reports_optimal() {
        let players = names("P", 6);
        let opponents = names("O", 6);
        let ratings = RatingStore::for_rosters(
            &Roster::from_names(players.clone()).unwrap(),
            &Roster::from_names(opponents.clone()).unwrap(),
        );
        let solution = solve_detailed(&players, &opponents, &ratings, Method::Full);
        assert_eq!(solution.requested, Method::Full);
        assert_eq!(solution.used, Method::Optimal);
        assert_eq!(solution.pairs.len(), 6);
        assert_eq!(solution.total, 18);
    }
}
