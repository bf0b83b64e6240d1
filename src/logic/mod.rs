//! Pairing logic: solvers, role classification, recommendations and the pick protocol.

mod comparison;
mod hungarian;
mod recommend;
mod reconcile;
mod rename;
mod roles;
mod solvers;
mod wizard;

pub use comparison::{apply_optimal, compare, hybrid_pairing, optimal_pairing, Comparison};
pub use hungarian::min_cost_assignment;
pub use recommend::{recommend, recommend_fallback, recommend_from_solver, Recommendation};
pub use reconcile::reconcile;
pub use rename::{apply_rename, rename, Renamed};
pub use roles::{classify, ATTACKER_COUNT, DEFENDER_COUNT};
pub use solvers::{optimize, solve, solve_detailed, Solution, COST_CEILING, EXHAUSTIVE_LIMIT};
pub use wizard::{advance, back, reset, select, step_complete};
