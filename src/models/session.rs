//! Session: everything one pairing round works on, plus PairingError.

use crate::models::pairing::{Method, Pair};
use crate::models::protocol::{Phase, ProtocolState};
use crate::models::ratings::RatingStore;
use crate::models::roster::{Roster, Side};
use serde::Serialize;

/// Errors that can occur while editing a session or recording picks.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PairingError {
    /// Rating outside 1..=5.
    InvalidRating(i64),
    /// Another entry on the same side already has this name (case-insensitive).
    DuplicateIdentifier(String),
    /// Name is not on the roster it was looked up in.
    UnknownIdentifier(String),
    /// Names must contain something besides whitespace.
    EmptyName,
    /// Session is not in a phase that allows this action.
    InvalidState,
    /// The current step is missing picks.
    IncompleteSelection,
    /// Name is already placed by an earlier step (or listed twice).
    UnavailableSelection(String),
    /// More than two attackers offered.
    TooManyAttackers,
    /// Chosen attacker was not among those offered.
    NotOffered(String),
    /// Step numbers run from 1 to 6.
    InvalidStep(u8),
}

impl std::fmt::Display for PairingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PairingError::InvalidRating(v) => write!(f, "Rating must be between 1 and 5 (got {})", v),
            PairingError::DuplicateIdentifier(name) => {
                write!(f, "A player named \"{}\" already exists", name)
            }
            PairingError::UnknownIdentifier(name) => write!(f, "Unknown player \"{}\"", name),
            PairingError::EmptyName => write!(f, "Name must not be empty"),
            PairingError::InvalidState => write!(f, "Invalid state for this action"),
            PairingError::IncompleteSelection => write!(f, "Finish the picks of this step first"),
            PairingError::UnavailableSelection(name) => {
                write!(f, "\"{}\" is already placed in an earlier step", name)
            }
            PairingError::TooManyAttackers => write!(f, "Select at most 2 attackers"),
            PairingError::NotOffered(name) => write!(f, "\"{}\" was not offered as an attacker", name),
            PairingError::InvalidStep(n) => write!(f, "No step {} (steps are 1 to 6)", n),
        }
    }
}

impl std::error::Error for PairingError {}

/// One pairing session: both rosters, the ratings between them, and the picks made so far.
#[derive(Clone, Debug, Serialize)]
pub struct Session {
    pub team_name: String,
    pub opponent_team_name: String,
    /// Solver behind recommendations.
    pub method: Method,
    pub(crate) players: Roster,
    pub(crate) opponents: Roster,
    pub(crate) ratings: RatingStore,
    pub(crate) protocol: ProtocolState,
    /// Set when the protocol completes; cleared on reset or when picks change.
    pub(crate) final_pairing: Option<Vec<Pair>>,
}

/// Players per side in a fresh session.
const DEFAULT_ROSTER_SIZE: usize = 5;

impl Default for Session {
    /// Five generic players a side, every rating 3, exhaustive search.
    fn default() -> Self {
        let mut session = Self::with_rosters(
            Roster::numbered("Player", DEFAULT_ROSTER_SIZE),
            Roster::numbered("Opponent", DEFAULT_ROSTER_SIZE),
        );
        session.method = Method::Full;
        session
    }
}

impl Session {
    /// Empty session in Setup with default team names.
    pub fn new() -> Self {
        Self {
            team_name: "Our team".to_string(),
            opponent_team_name: "Opponents".to_string(),
            method: Method::default(),
            players: Roster::new(),
            opponents: Roster::new(),
            ratings: RatingStore::default(),
            protocol: ProtocolState::default(),
            final_pairing: None,
        }
    }

    /// Session with the given rosters, all ratings at the default.
    pub fn with_rosters(players: Roster, opponents: Roster) -> Self {
        let ratings = RatingStore::for_rosters(&players, &opponents);
        Self {
            players,
            opponents,
            ratings,
            ..Self::new()
        }
    }

    pub fn players(&self) -> &Roster {
        &self.players
    }

    pub fn opponents(&self) -> &Roster {
        &self.opponents
    }

    pub fn roster(&self, side: Side) -> &Roster {
        match side {
            Side::Team => &self.players,
            Side::Opponents => &self.opponents,
        }
    }

    pub fn ratings(&self) -> &RatingStore {
        &self.ratings
    }

    pub fn protocol(&self) -> &ProtocolState {
        &self.protocol
    }

    pub fn phase(&self) -> Phase {
        self.protocol.phase
    }

    pub fn final_pairing(&self) -> Option<&[Pair]> {
        self.final_pairing.as_deref()
    }

    fn require_setup(&self) -> Result<(), PairingError> {
        if self.protocol.phase != Phase::Setup {
            return Err(PairingError::InvalidState);
        }
        Ok(())
    }

    /// Add one of our players (Setup only). Ratings against every opponent start at the default.
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<(), PairingError> {
        self.require_setup()?;
        let name = self.players.add(name)?;
        self.ratings.add_player(&name, &self.opponents);
        Ok(())
    }

    /// Add an opponent (Setup only). Every player's row gains a default rating.
    pub fn add_opponent(&mut self, name: impl Into<String>) -> Result<(), PairingError> {
        self.require_setup()?;
        let name = self.opponents.add(name)?;
        self.ratings.add_opponent(&name);
        Ok(())
    }

    /// Remove one of our players (Setup only).
    pub fn remove_player(&mut self, name: &str) -> Result<(), PairingError> {
        self.require_setup()?;
        self.players.remove(name)?;
        self.ratings.remove_player(name);
        Ok(())
    }

    /// Remove an opponent (Setup only).
    pub fn remove_opponent(&mut self, name: &str) -> Result<(), PairingError> {
        self.require_setup()?;
        self.opponents.remove(name)?;
        self.ratings.remove_opponent(name);
        Ok(())
    }

    /// Set one rating (Setup only). Invalid values leave the store unchanged.
    pub fn set_rating(&mut self, player: &str, opponent: &str, value: i64) -> Result<(), PairingError> {
        self.require_setup()?;
        self.ratings.set(player, opponent, value)
    }

    /// Rename both teams. Blank names keep the current value.
    pub fn set_team_names(&mut self, team_name: &str, opponent_team_name: &str) {
        if !team_name.trim().is_empty() {
            self.team_name = team_name.trim().to_string();
        }
        if !opponent_team_name.trim().is_empty() {
            self.opponent_team_name = opponent_team_name.trim().to_string();
        }
    }

    /// Choose the solver used for recommendations (any phase).
    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::protocol::Step;

    #[test]
    fn default_session_is_five_a_side() {
        let s = Session::default();
        assert_eq!(s.players().len(), 5);
        assert_eq!(s.opponents().len(), 5);
        assert_eq!(s.method, Method::Full);
        assert_eq!(s.ratings().value("Player 1", "Opponent 5"), 3);
        assert_eq!(s.players().names()[4], "Player 5");
        assert_eq!(s.opponents().names()[0], "Opponent 1");
        assert_eq!(s.team_name, "Our team");
        assert_eq!(s.phase(), Phase::Setup);
    }

    #[test]
    fn roster_edits_only_in_setup() {
        let mut s = Session::default();
        s.protocol.phase = Phase::InProgress(Step::FirstDefender);
        assert_eq!(s.add_player("Extra"), Err(PairingError::InvalidState));
        assert_eq!(s.set_rating("Player 1", "Opponent 1", 4), Err(PairingError::InvalidState));
        assert_eq!(s.players().len(), 5);
    }

    #[test]
    fn removing_opponent_drops_column() {
        let mut s = Session::default();
        s.remove_opponent("Opponent 2").unwrap();
        assert!(s.ratings().get("Player 1", "Opponent 2").is_none());
        assert_eq!(
            s.remove_opponent("Opponent 2"),
            Err(PairingError::UnknownIdentifier("Opponent 2".to_string()))
        );
    }
}
