//! Mastermind codeword representation
//!
//! A codeword is a fixed-length sequence of colors packed as 4-bit nibbles into a
//! single `u64`, so pin `i` lives in bits `4i..4i+4`. Colors are the values 1-15;
//! the value 0 is representable only so that published regression vectors such as
//! `0000` can be expressed.

use std::fmt;
use std::str::FromStr;

/// Maximum number of pins in a codeword (15 nibbles fit in a `u64`)
pub const MAX_PINS: u8 = 15;

/// Largest color value a pin can hold
pub const MAX_COLOR: u8 = 15;

/// An immutable Mastermind codeword
///
/// Carries an optional ordinal: the codeword's canonical key within a particular
/// codeword universe, used to index score caches. Equality and hashing only consider
/// the pins.
#[derive(Debug, Clone, Copy)]
pub struct Codeword {
    pins: u64,
    pin_count: u8,
    ordinal: Option<u32>,
}

/// Error type for invalid codewords
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodewordError {
    InvalidLength(usize),
    InvalidDigit(char),
    InvalidColor(u8),
    ColorOutOfRange { color: u8, color_count: u8 },
    PinCountMismatch { expected: u8, actual: u8 },
}

impl fmt::Display for CodewordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => {
                write!(f, "Codeword must have 1-{MAX_PINS} pins, got {len}")
            }
            Self::InvalidDigit(ch) => {
                write!(f, "Codeword contains invalid digit '{ch}' (expected 0-9, a-f)")
            }
            Self::InvalidColor(color) => {
                write!(f, "Pin color {color} exceeds the maximum of {MAX_COLOR}")
            }
            Self::ColorOutOfRange { color, color_count } => {
                write!(f, "Pin color {color} is outside the game's colors 1-{color_count}")
            }
            Self::PinCountMismatch { expected, actual } => {
                write!(f, "Codeword has {actual} pins, game uses {expected}")
            }
        }
    }
}

impl std::error::Error for CodewordError {}

impl Codeword {
    /// Create a codeword from individual pin colors
    ///
    /// # Errors
    /// Returns `CodewordError` if there are no pins, more than [`MAX_PINS`] pins,
    /// or a color above [`MAX_COLOR`].
    ///
    /// # Examples
    /// ```
    /// use mastermind_solver::core::Codeword;
    ///
    /// let code = Codeword::from_pins(&[1, 1, 2, 2]).unwrap();
    /// assert_eq!(code.to_string(), "1122");
    /// ```
    pub fn from_pins(colors: &[u8]) -> Result<Self, CodewordError> {
        if colors.is_empty() || colors.len() > usize::from(MAX_PINS) {
            return Err(CodewordError::InvalidLength(colors.len()));
        }

        let mut pins = 0u64;
        for (i, &color) in colors.iter().enumerate() {
            if color > MAX_COLOR {
                return Err(CodewordError::InvalidColor(color));
            }
            pins |= u64::from(color) << (i * 4);
        }

        Ok(Self {
            pins,
            pin_count: colors.len() as u8,
            ordinal: None,
        })
    }

    /// Build the codeword with the given ordinal in a `color_count`-color universe
    ///
    /// The ordinal is read as a base-`color_count` number whose most significant
    /// digit is the first pin; each digit is offset by one since colors start at 1.
    #[must_use]
    pub fn from_ordinal(ordinal: u32, pin_count: u8, color_count: u8) -> Self {
        debug_assert!((1..=MAX_PINS).contains(&pin_count));
        debug_assert!((1..=MAX_COLOR).contains(&color_count));

        let base = u32::from(color_count);
        let mut rest = ordinal;
        let mut pins = 0u64;
        for i in (0..usize::from(pin_count)).rev() {
            let color = rest % base + 1;
            pins |= u64::from(color) << (i * 4);
            rest /= base;
        }

        Self {
            pins,
            pin_count,
            ordinal: Some(ordinal),
        }
    }

    /// Number of pins
    #[inline]
    #[must_use]
    pub const fn pin_count(&self) -> u8 {
        self.pin_count
    }

    /// Color at a given pin position
    ///
    /// # Panics
    /// Panics in debug mode if `position >= pin_count`
    #[inline]
    #[must_use]
    pub const fn pin(&self, position: usize) -> u8 {
        debug_assert!(position < self.pin_count as usize);
        ((self.pins >> (position * 4)) & 0xF) as u8
    }

    /// Iterate the pin colors in order
    pub fn pins(&self) -> impl Iterator<Item = u8> + '_ {
        (0..usize::from(self.pin_count)).map(|i| self.pin(i))
    }

    /// Raw packed nibbles
    #[inline]
    #[must_use]
    pub const fn packed(&self) -> u64 {
        self.pins
    }

    /// Canonical key within the universe this codeword was resolved against
    #[inline]
    #[must_use]
    pub const fn ordinal(&self) -> Option<u32> {
        self.ordinal
    }

    /// Compute the canonical key for a `color_count`-color universe
    ///
    /// Returns `None` if any pin falls outside `1..=color_count`.
    #[must_use]
    pub fn key(&self, color_count: u8) -> Option<u32> {
        let base = u32::from(color_count);
        self.pins().try_fold(0u32, |acc, color| {
            if !(1..=color_count).contains(&color) {
                return None;
            }
            acc.checked_mul(base)?.checked_add(u32::from(color) - 1)
        })
    }

    /// Copy of this codeword carrying the given ordinal
    #[must_use]
    pub(crate) const fn with_ordinal(self, ordinal: u32) -> Self {
        Self {
            ordinal: Some(ordinal),
            ..self
        }
    }
}

impl PartialEq for Codeword {
    fn eq(&self, other: &Self) -> bool {
        self.pins == other.pins && self.pin_count == other.pin_count
    }
}

impl Eq for Codeword {}

impl std::hash::Hash for Codeword {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.pins.hash(state);
        self.pin_count.hash(state);
    }
}

impl FromStr for Codeword {
    type Err = CodewordError;

    /// Parse one hex digit per pin, e.g. `"6684"` or `"a3f1"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let colors = s
            .trim()
            .chars()
            .map(|ch| {
                ch.to_digit(16)
                    .map(|d| d as u8)
                    .ok_or(CodewordError::InvalidDigit(ch))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        Self::from_pins(&colors)
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for color in self.pins() {
            let ch = char::from_digit(u32::from(color), 16).unwrap_or('?');
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}
