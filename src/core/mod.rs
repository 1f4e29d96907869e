//! Core domain types for Mastermind
//!
//! This module contains the fundamental domain types with zero external dependencies.
//! All types here are pure, testable, and have clear mathematical properties.

mod codeword;
mod score;

pub use codeword::{Codeword, CodewordError, MAX_COLOR, MAX_PINS};
pub use score::Score;
