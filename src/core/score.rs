//! Mastermind feedback score calculation and representation
//!
//! A score is the pair (exact, misplaced):
//! - exact = pins with the right color in the right position
//! - misplaced = further colors present in both codewords but at different positions,
//!   each color occurrence consumed at most once
//!
//! The pair is packed into a single byte as `exact << 4 | misplaced`. Both halves
//! are at most 15, and since `exact + misplaced <= 15` the value `0xFF` is never a
//! real score.

use super::Codeword;
use std::fmt;

/// Feedback score for a guess against a secret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Score(u8);

impl Score {
    /// Create a score from its exact and misplaced counts
    ///
    /// # Panics
    /// Panics in debug mode if either count exceeds 15
    #[inline]
    #[must_use]
    pub const fn new(exact: u8, misplaced: u8) -> Self {
        debug_assert!(exact <= 15 && misplaced <= 15, "Score halves must fit a nibble");
        Self((exact << 4) | misplaced)
    }

    /// Rebuild a score from its packed byte
    #[inline]
    #[must_use]
    pub const fn from_value(value: u8) -> Self {
        Self(value)
    }

    /// The packed byte (`exact << 4 | misplaced`)
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Pins with the right color in the right position
    #[inline]
    #[must_use]
    pub const fn exact(self) -> u8 {
        self.0 >> 4
    }

    /// Colors present in both codewords but at different positions
    #[inline]
    #[must_use]
    pub const fn misplaced(self) -> u8 {
        self.0 & 0xF
    }

    /// The winning score `(pin_count, 0)`
    #[inline]
    #[must_use]
    pub const fn winning(pin_count: u8) -> Self {
        Self::new(pin_count, 0)
    }

    /// Check if this is the winning score for a game with `pin_count` pins
    #[inline]
    #[must_use]
    pub const fn is_winning(self, pin_count: u8) -> bool {
        self.0 == Self::winning(pin_count).0
    }

    /// Calculate the score of `guess` played against `secret`
    ///
    /// Counting with exclusion:
    /// 1. First pass: count exact matches; every other secret pin adds its color to
    ///    a pool of unused colors
    /// 2. Second pass: every non-exact guess pin claims its color from the pool if
    ///    one is left, counting a misplaced hit
    ///
    /// The pool is sixteen 4-bit counters packed into a `u64`. A color can occur at
    /// most 15 times in a codeword, so the counters never overflow.
    ///
    /// # Examples
    /// ```
    /// use mastermind_solver::core::{Codeword, Score};
    ///
    /// let secret: Codeword = "6684".parse().unwrap();
    /// let guess: Codeword = "4589".parse().unwrap();
    /// assert_eq!(Score::calculate(&secret, &guess), Score::new(1, 1));
    /// ```
    #[must_use]
    pub fn calculate(secret: &Codeword, guess: &Codeword) -> Self {
        debug_assert_eq!(secret.pin_count(), guess.pin_count());

        let mut exact = 0u8;
        let mut unused = 0u64;

        // First pass: exact matches, pool the secret's remaining colors
        for (s, g) in secret.pins().zip(guess.pins()) {
            if s == g {
                exact += 1;
            } else {
                unused += 1 << (u32::from(s) * 4);
            }
        }

        // Second pass: claim pooled colors for the guess's remaining pins
        let mut misplaced = 0u8;
        for (s, g) in secret.pins().zip(guess.pins()) {
            let shift = u32::from(g) * 4;
            if s != g && (unused >> shift) & 0xF > 0 {
                misplaced += 1;
                unused -= 1 << shift;
            }
        }

        Self::new(exact, misplaced)
    }

    /// Number of distinct scores reachable with `pin_count` pins
    ///
    /// Every `(exact, misplaced)` with `exact + misplaced <= pin_count` except
    /// `(pin_count - 1, 1)`: a single wrong pin can't hold a misplaced color.
    #[must_use]
    pub const fn possible_count(pin_count: u8) -> usize {
        let p = pin_count as usize;
        (p + 1) * (p + 2) / 2 - 1
    }

    /// All reachable scores for `pin_count` pins, in ascending order
    pub fn all(pin_count: u8) -> impl Iterator<Item = Self> {
        (0..=pin_count).flat_map(move |exact| {
            (0..=pin_count - exact)
                .filter(move |&misplaced| !(exact + 1 == pin_count && misplaced == 1))
                .map(move |misplaced| Self::new(exact, misplaced))
        })
    }
}

impl fmt::Display for Score {
    /// Two hex digits, exact then misplaced: `20`, `11`, `40`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}", self.0)
    }
}
