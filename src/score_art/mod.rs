pub mod catalog;
pub mod loader;
pub mod ranking;
pub mod solver;
pub mod types;

pub use self::catalog::build_catalogs;
pub use self::ranking::{rank_solutions, ScoredSolution};
pub use self::solver::solve_gap;
pub use self::types::{
    Bracket, Catalogs, Combination, EnvyDetail, EnvyItem, ItemKind, ItemRef, LookupTable,
    MySekaiDetail, MySekaiItem, PointItem, PowerRequirement,
};
