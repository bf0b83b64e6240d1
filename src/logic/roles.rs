//! Role classifier: split solver pairs into defenders, attackers and the rest.

use crate::models::{Pair, Role};
use std::collections::HashSet;

pub const DEFENDER_COUNT: usize = 2;
pub const ATTACKER_COUNT: usize = 4;

/// Attach roles to `pairs`. Output order is defenders, attackers, remaining; a pair whose
/// player or opponent is already taken by an earlier role is dropped.
///
/// 1. Players are ranked by mean rating over their pairs (first appearance wins ties);
///    the top two each defend with their best pair.
/// 2. Of the pairs left free, the four highest ratings attack.
/// 3. Everything still free remains, in input order.
pub fn classify(pairs: &[Pair]) -> Vec<Pair> {
    let mut taken = Taken::default();
    let mut result = Vec::with_capacity(pairs.len());

    for pair in best_defenders(pairs, &mut taken) {
        result.push(pair.clone().with_role(Role::Defender));
    }

    let mut free: Vec<&Pair> = pairs.iter().filter(|p| taken.is_free(p)).collect();
    free.sort_by(|a, b| b.rating.cmp(&a.rating));
    let mut attackers = 0;
    for pair in free {
        if attackers == ATTACKER_COUNT {
            break;
        }
        if taken.claim(pair) {
            result.push(pair.clone().with_role(Role::Attacker));
            attackers += 1;
        }
    }

    for pair in pairs {
        if taken.claim(pair) {
            result.push(pair.clone().with_role(Role::Remaining));
        }
    }
    result
}

#[derive(Default)]
struct Taken<'a> {
    players: HashSet<&'a str>,
    opponents: HashSet<&'a str>,
}

impl<'a> Taken<'a> {
    fn is_free(&self, pair: &Pair) -> bool {
        !self.players.contains(pair.player.as_str()) && !self.opponents.contains(pair.opponent.as_str())
    }

    /// Mark both sides of `pair` as used; false if either already was.
    fn claim(&mut self, pair: &'a Pair) -> bool {
        if !self.is_free(pair) {
            return false;
        }
        self.players.insert(&pair.player);
        self.opponents.insert(&pair.opponent);
        true
    }
}

struct PlayerScore<'a> {
    player: &'a str,
    mean: f64,
    pairs: Vec<&'a Pair>,
}

fn best_defenders<'a>(pairs: &'a [Pair], taken: &mut Taken<'a>) -> Vec<&'a Pair> {
    let mut scores: Vec<PlayerScore<'a>> = Vec::new();
    for pair in pairs {
        match scores.iter_mut().find(|s| s.player == pair.player) {
            Some(s) => s.pairs.push(pair),
            None => scores.push(PlayerScore {
                player: &pair.player,
                mean: 0.0,
                pairs: vec![pair],
            }),
        }
    }
    for s in &mut scores {
        let sum: u32 = s.pairs.iter().map(|p| u32::from(p.rating)).sum();
        s.mean = f64::from(sum) / s.pairs.len() as f64;
    }
    scores.sort_by(|a, b| b.mean.total_cmp(&a.mean));

    let mut defenders = Vec::with_capacity(DEFENDER_COUNT);
    for s in &scores {
        if defenders.len() == DEFENDER_COUNT {
            break;
        }
        // Best pair whose opponent is still free; first one on equal ratings.
        let best = s
            .pairs
            .iter()
            .filter(|p| taken.is_free(p))
            .fold(None::<&'a Pair>, |best, &p| match best {
                Some(b) if b.rating >= p.rating => Some(b),
                _ => Some(p),
            });
        if let Some(pair) = best {
            taken.claim(pair);
            defenders.push(pair);
        }
    }
    defenders
}
