//! Data structures for a pairing session: rosters, ratings, pairs and protocol state.

mod pairing;
mod protocol;
mod ratings;
mod roster;
mod session;

pub use pairing::{is_valid_matching, total_rating, Method, Pair, Role};
pub use protocol::{
    Available, Phase, ProtocolState, Round, RoundPicks, Slot, Stage, Step, ATTACKERS_PER_ROUND,
};
pub use ratings::{Rating, RatingStore, DEFAULT_RATING, MAX_RATING, MIN_RATING};
pub use roster::{Roster, Side};
pub use session::{PairingError, Session};
