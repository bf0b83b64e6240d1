//! RatingStore: how well each of our players is expected to do against each opponent.

use crate::models::roster::Roster;
use crate::models::session::PairingError;
use serde::Serialize;
use std::collections::HashMap;

/// Lowest allowed rating ("bad matchup").
pub const MIN_RATING: u8 = 1;
/// Highest allowed rating ("great matchup").
pub const MAX_RATING: u8 = 5;
/// Rating given to every new (player, opponent) pair.
pub const DEFAULT_RATING: u8 = 3;

/// A compatibility rating, always within `MIN_RATING..=MAX_RATING`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: i64) -> Result<Self, PairingError> {
        if (i64::from(MIN_RATING)..=i64::from(MAX_RATING)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(PairingError::InvalidRating(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(DEFAULT_RATING)
    }
}

/// Ratings keyed by player, then opponent. Kept fully populated for the rosters
/// it was built from: every structural edit goes through the methods below.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RatingStore {
    ratings: HashMap<String, HashMap<String, Rating>>,
}

impl RatingStore {
    /// Every pair of the two rosters at the default rating.
    pub fn for_rosters(players: &Roster, opponents: &Roster) -> Self {
        let ratings = players
            .iter()
            .map(|p| {
                let row = opponents
                    .iter()
                    .map(|o| (o.clone(), Rating::default()))
                    .collect();
                (p.clone(), row)
            })
            .collect();
        Self { ratings }
    }

    pub fn get(&self, player: &str, opponent: &str) -> Option<Rating> {
        self.ratings.get(player)?.get(opponent).copied()
    }

    /// Rating as a plain number; pairs outside the store count as 0.
    pub fn value(&self, player: &str, opponent: &str) -> u8 {
        self.get(player, opponent).map_or(0, Rating::value)
    }

    /// Overwrite an existing pair. Out-of-range values and unknown pairs leave the store untouched.
    pub fn set(&mut self, player: &str, opponent: &str, value: i64) -> Result<(), PairingError> {
        let rating = Rating::new(value)?;
        let row = self
            .ratings
            .get_mut(player)
            .ok_or_else(|| PairingError::UnknownIdentifier(player.to_string()))?;
        let slot = row
            .get_mut(opponent)
            .ok_or_else(|| PairingError::UnknownIdentifier(opponent.to_string()))?;
        *slot = rating;
        Ok(())
    }

    pub fn add_player(&mut self, player: &str, opponents: &Roster) {
        let row = opponents
            .iter()
            .map(|o| (o.clone(), Rating::default()))
            .collect();
        self.ratings.insert(player.to_string(), row);
    }

    pub fn add_opponent(&mut self, opponent: &str) {
        for row in self.ratings.values_mut() {
            row.insert(opponent.to_string(), Rating::default());
        }
    }

    pub fn remove_player(&mut self, player: &str) {
        self.ratings.remove(player);
    }

    pub fn remove_opponent(&mut self, opponent: &str) {
        for row in self.ratings.values_mut() {
            row.remove(opponent);
        }
    }

    /// Move a player's whole row to a new key.
    pub fn rename_player(&mut self, old: &str, new: &str) {
        if let Some(row) = self.ratings.remove(old) {
            self.ratings.insert(new.to_string(), row);
        }
    }

    /// Move an opponent's column to a new key in every row.
    pub fn rename_opponent(&mut self, old: &str, new: &str) {
        for row in self.ratings.values_mut() {
            if let Some(r) = row.remove(old) {
                row.insert(new.to_string(), r);
            }
        }
    }

    /// Mean rating of `player` against `opponents`; `None` when there are no opponents.
    pub fn mean(&self, player: &str, opponents: &[String]) -> Option<f64> {
        if opponents.is_empty() {
            return None;
        }
        let sum: u32 = opponents
            .iter()
            .map(|o| u32::from(self.value(player, o)))
            .sum();
        Some(f64::from(sum) / opponents.len() as f64)
    }
}
