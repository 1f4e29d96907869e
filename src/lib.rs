//! Mastermind Solver
//!
//! Plays Mastermind with any pin and color count using Knuth's minimax algorithm,
//! reusing a strategy tree across games. For the classic 4-pin, 6-color game every
//! secret is found in at most 5 turns, 4.4761 on average.
//!
//! # Quick Start
//!
//! ```rust
//! use mastermind_solver::config::GameConfig;
//! use mastermind_solver::core::Score;
//! use mastermind_solver::solver::Solver;
//!
//! let config = GameConfig::classic();
//! let solver = Solver::from_config(config.clone()).unwrap();
//!
//! let secret = config.parse_codeword("3632").unwrap();
//! let record = solver.solve(&secret).unwrap();
//! assert_eq!(record.turns(), 5);
//! assert_eq!(record.moves[0].score, Score::new(1, 0));
//! ```

// Core domain types
pub mod core;

// Game configuration
pub mod config;

// Scoring and score caches
pub mod scoring;

// Solving algorithms
pub mod solver;

// Scoring regression vectors
pub mod vectors;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
