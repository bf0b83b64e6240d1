//! Renaming a player or opponent everywhere it is referenced.

use crate::models::{PairingError, ProtocolState, RatingStore, Roster, Session, Side};

/// Roster, ratings and protocol after a rename.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Renamed {
    pub roster: Roster,
    pub ratings: RatingStore,
    pub protocol: ProtocolState,
    /// The new name as stored (trimmed).
    pub name: String,
}

/// Rename `old` to `new` on `side`, returning updated copies. The inputs are never touched,
/// so a rejected rename (duplicate, empty or unknown name) leaves no trace.
pub fn apply_rename(
    side: Side,
    old: &str,
    new: &str,
    roster: &Roster,
    ratings: &RatingStore,
    protocol: &ProtocolState,
) -> Result<Renamed, PairingError> {
    let mut roster = roster.clone();
    let name = roster.rename(old, new)?;

    let mut ratings = ratings.clone();
    match side {
        Side::Team => ratings.rename_player(old, &name),
        Side::Opponents => ratings.rename_opponent(old, &name),
    }
    let mut protocol = protocol.clone();
    protocol.rename(side, old, &name);

    Ok(Renamed {
        roster,
        ratings,
        protocol,
        name,
    })
}

/// Rename inside a session (any phase). The final pairing, if any, follows the new name.
pub fn rename(session: &mut Session, side: Side, old: &str, new: &str) -> Result<(), PairingError> {
    let renamed = apply_rename(
        side,
        old,
        new,
        session.roster(side),
        &session.ratings,
        &session.protocol,
    )?;
    log::info!("Renamed {:?} \"{}\" to \"{}\"", side, old, renamed.name);

    if let Some(pairs) = &mut session.final_pairing {
        for pair in pairs.iter_mut() {
            let field = match side {
                Side::Team => &mut pair.player,
                Side::Opponents => &mut pair.opponent,
            };
            if field == old {
                *field = renamed.name.clone();
            }
        }
    }
    match side {
        Side::Team => session.players = renamed.roster,
        Side::Opponents => session.opponents = renamed.roster,
    }
    session.ratings = renamed.ratings;
    session.protocol = renamed.protocol;
    Ok(())
}
