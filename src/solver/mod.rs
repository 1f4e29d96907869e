//! Mastermind solving algorithms
//!
//! The driver, the solution space it narrows, the guess strategies and the
//! strategy tree shared between games.

mod engine;
mod error;
pub mod minimax;
mod space;
pub mod strategy;
mod tree;

pub use engine::{GameRecord, Move, Solver};
pub use error::SolveError;
pub use space::SolutionSpace;
pub use strategy::{FirstCandidate, MinimaxStrategy, RandomCandidate, Strategy, StrategyType};
pub use tree::StrategyNode;
