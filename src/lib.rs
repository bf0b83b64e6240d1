//! Team pairing optimizer: library with models and pairing logic.

pub mod logic;
pub mod models;

pub use logic::{
    advance, apply_optimal, apply_rename, back, classify, compare, hybrid_pairing,
    min_cost_assignment, optimal_pairing, optimize, recommend, recommend_fallback,
    recommend_from_solver, reconcile, rename, reset, select, solve, solve_detailed,
    step_complete, Comparison, Recommendation, Renamed, Solution, ATTACKER_COUNT, COST_CEILING,
    DEFENDER_COUNT, EXHAUSTIVE_LIMIT,
};
pub use models::{
    is_valid_matching, total_rating, Available, Method, Pair, PairingError, Phase, ProtocolState,
    Rating, RatingStore, Role, Roster, Round, RoundPicks, Session, Side, Slot, Stage, Step,
    ATTACKERS_PER_ROUND, DEFAULT_RATING, MAX_RATING, MIN_RATING,
};
