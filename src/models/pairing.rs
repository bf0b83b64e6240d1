//! Pair, Role and solver Method.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Tournament role of a matched pair.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Defender,
    Attacker,
    Remaining,
}

/// One matchup: our player against one opponent.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pair {
    pub player: String,
    pub opponent: String,
    pub rating: u8,
    /// None for raw solver output, before classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl Pair {
    pub fn new(player: impl Into<String>, opponent: impl Into<String>, rating: u8) -> Self {
        Self {
            player: player.into(),
            opponent: opponent.into(),
            rating,
            role: None,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }
}

/// Sum of ratings over a pairing.
pub fn total_rating(pairs: &[Pair]) -> u32 {
    pairs.iter().map(|p| u32::from(p.rating)).sum()
}

/// True if no player and no opponent appears twice.
pub fn is_valid_matching(pairs: &[Pair]) -> bool {
    let mut players = HashSet::new();
    let mut opponents = HashSet::new();
    pairs
        .iter()
        .all(|p| players.insert(p.player.as_str()) && opponents.insert(p.opponent.as_str()))
}

/// Assignment algorithm used to build recommendations.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Highest ratings first; fast, not always optimal.
    Greedy,
    /// Try every permutation; hands over to `Optimal` above five players.
    Full,
    /// Minimum-cost assignment (Kuhn–Munkres).
    #[default]
    Optimal,
}
