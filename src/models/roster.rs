//! Roster: the ordered set of names on one side of the table.

use crate::models::session::PairingError;
use serde::{Deserialize, Serialize};

/// Which team a name belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Our own players.
    Team,
    /// The opposing team.
    Opponents,
}

/// Unique names in display order. Names are compared case-insensitively when
/// checking for duplicates, exactly otherwise.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from names, rejecting empty or duplicate names.
    pub fn from_names<I, S>(names: I) -> Result<Self, PairingError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roster = Self::new();
        for name in names {
            roster.add(name)?;
        }
        Ok(roster)
    }

    /// `"{prefix} 1"` up to `"{prefix} {count}"`, distinct by construction.
    pub fn numbered(prefix: &str, count: usize) -> Self {
        Self {
            names: (1..=count).map(|i| format!("{prefix} {i}")).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.names.iter()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Whether `name` clashes with an entry other than `except`.
    fn clashes(&self, name: &str, except: Option<&str>) -> bool {
        self.names
            .iter()
            .filter(|n| Some(n.as_str()) != except)
            .any(|n| n.eq_ignore_ascii_case(name))
    }

    /// Append a name (trimmed). Returns the stored form.
    pub fn add(&mut self, name: impl Into<String>) -> Result<String, PairingError> {
        let name = clean_name(name.into())?;
        if self.clashes(&name, None) {
            return Err(PairingError::DuplicateIdentifier(name));
        }
        self.names.push(name.clone());
        Ok(name)
    }

    pub fn remove(&mut self, name: &str) -> Result<(), PairingError> {
        let idx = self
            .names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| PairingError::UnknownIdentifier(name.to_string()))?;
        self.names.remove(idx);
        Ok(())
    }

    /// Replace `old` with `new` in place, keeping its position. Returns the stored form of `new`.
    pub fn rename(&mut self, old: &str, new: impl Into<String>) -> Result<String, PairingError> {
        let new = clean_name(new.into())?;
        let idx = self
            .names
            .iter()
            .position(|n| n == old)
            .ok_or_else(|| PairingError::UnknownIdentifier(old.to_string()))?;
        if self.clashes(&new, Some(old)) {
            return Err(PairingError::DuplicateIdentifier(new));
        }
        self.names[idx] = new.clone();
        Ok(new)
    }
}

fn clean_name(name: String) -> Result<String, PairingError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PairingError::EmptyName);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_case_insensitive() {
        let mut roster = Roster::from_names(["Anna", "Boris"]).unwrap();
        assert_eq!(
            roster.add(" anna "),
            Err(PairingError::DuplicateIdentifier("anna".to_string()))
        );
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn rename_keeps_position_and_allows_case_change() {
        let mut roster = Roster::from_names(["Anna", "Boris", "Clara"]).unwrap();
        roster.rename("Boris", "BORIS").unwrap();
        assert_eq!(roster.names(), ["Anna", "BORIS", "Clara"]);
        assert!(matches!(
            roster.rename("Anna", "clara"),
            Err(PairingError::DuplicateIdentifier(_))
        ));
        assert_eq!(roster.rename("Anna", "   "), Err(PairingError::EmptyName));
        assert_eq!(roster.names(), ["Anna", "BORIS", "Clara"]);
    }

    #[test]
    fn numbered_roster_matches_validated_build() {
        let roster = Roster::numbered("Player", 3);
        assert_eq!(roster.names(), ["Player 1", "Player 2", "Player 3"]);
        assert_eq!(Roster::from_names(roster.names().to_vec()), Ok(roster));
        assert!(Roster::numbered("Player", 0).is_empty());
    }
}
