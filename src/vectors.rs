//! Scoring regression vectors
//!
//! A vector is one line `secret,guess,exact,misplaced`. Files start with a header
//! row and hold the published reference cases followed by every ordered pair of a
//! universe, so any scoring implementation can be checked against them.

use crate::config::GameConfig;
use crate::core::{Codeword, Score};
use crate::scoring::Scorer;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Header row of a vector file
pub const HEADER: &str = "Secret,Guess,Correct Digit and Location,Correct Digit Wrong Location";

/// Reference cases published by Miyoshi for secret `6684`, including colors
/// outside the usual six
pub const REFERENCE_VECTORS: [&str; 14] = [
    "6684,0000,0,0",
    "6684,6666,2,0",
    "6684,0123,0,0",
    "6684,4567,0,2",
    "6684,4589,1,1",
    "6684,6700,1,0",
    "6684,0798,0,1",
    "6684,6484,3,0",
    "6684,6480,2,1",
    "6684,6884,3,0",
    "6684,6684,4,0",
    "6684,8468,0,3",
    "6684,8866,0,3",
    "6684,8466,0,4",
];

/// One expected score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestVector {
    pub secret: Codeword,
    pub guess: Codeword,
    pub expected: Score,
}

/// Error type for reading or checking vectors
#[derive(Debug)]
pub enum VectorError {
    Io(io::Error),
    Parse { line: usize, reason: String },
    Mismatch { vector: TestVector, actual: Score },
    NotCommutative { a: Codeword, b: Codeword },
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Parse { line, reason } => write!(f, "Line {line}: {reason}"),
            Self::Mismatch { vector, actual } => write!(
                f,
                "{} vs {} expected {}, got {actual}",
                vector.secret, vector.guess, vector.expected
            ),
            Self::NotCommutative { a, b } => {
                write!(f, "Scoring {a} against {b} differs from {b} against {a}")
            }
        }
    }
}

impl std::error::Error for VectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for VectorError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl TestVector {
    #[must_use]
    pub const fn new(secret: Codeword, guess: Codeword, expected: Score) -> Self {
        Self {
            secret,
            guess,
            expected,
        }
    }

    /// Parse one `secret,guess,exact,misplaced` line
    ///
    /// # Errors
    /// Returns `VectorError::Parse` tagged with `line` if the text is malformed.
    pub fn parse_line(text: &str, line: usize) -> Result<Self, VectorError> {
        let parse_err = |reason: String| VectorError::Parse { line, reason };

        let fields: Vec<&str> = text.split(',').map(str::trim).collect();
        let [secret, guess, exact, misplaced] = fields.as_slice() else {
            return Err(parse_err(format!("expected 4 fields, got {}", fields.len())));
        };

        let secret: Codeword = secret
            .parse()
            .map_err(|e| parse_err(format!("secret: {e}")))?;
        let guess: Codeword = guess.parse().map_err(|e| parse_err(format!("guess: {e}")))?;
        if secret.pin_count() != guess.pin_count() {
            return Err(parse_err(format!(
                "{secret} and {guess} have different pin counts"
            )));
        }

        let count = |field: &str, name: &str| -> Result<u8, VectorError> {
            field
                .parse::<u8>()
                .ok()
                .filter(|&n| n <= secret.pin_count())
                .ok_or_else(|| parse_err(format!("bad {name} count '{field}'")))
        };
        let expected = Score::new(count(*exact, "exact")?, count(*misplaced, "misplaced")?);

        Ok(Self::new(secret, guess, expected))
    }
}

impl FromStr for TestVector {
    type Err = VectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_line(s, 1)
    }
}

impl fmt::Display for TestVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.secret,
            self.guess,
            self.expected.exact(),
            self.expected.misplaced()
        )
    }
}

/// The reference cases as vectors
#[must_use]
pub fn reference_vectors() -> Vec<TestVector> {
    REFERENCE_VECTORS
        .iter()
        .filter_map(|line| line.parse().ok())
        .collect()
}

/// Read vectors, one per line
///
/// Blank lines are ignored. The first non-blank line is skipped when it is the
/// [`HEADER`] row; any other line must be a vector.
///
/// # Errors
/// Returns `VectorError` on a read failure or a malformed line.
///
/// # Examples
/// ```
/// use mastermind_solver::vectors::parse_vectors;
///
/// let text = "Secret,Guess,Correct Digit and Location,Correct Digit Wrong Location\n6684,4589,1,1\n";
/// let vectors = parse_vectors(text.as_bytes()).unwrap();
/// assert_eq!(vectors.len(), 1);
/// assert_eq!(vectors[0].expected.to_string(), "11");
/// ```
pub fn parse_vectors<R: BufRead>(reader: R) -> Result<Vec<TestVector>, VectorError> {
    let mut vectors = Vec::new();
    let mut seen_first = false;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        if !seen_first {
            seen_first = true;
            if text.eq_ignore_ascii_case(HEADER) {
                continue;
            }
        }

        vectors.push(TestVector::parse_line(text, index + 1)?);
    }

    Ok(vectors)
}

/// Build the vectors for a universe
///
/// Reference cases first when asked for, then every `(secret, guess)` pair in
/// ordinal order, scored by the reference counting scorer. Pairs are scored as the
/// iterator is consumed, so only the universe itself is held in memory.
pub fn generate(
    config: &GameConfig,
    include_reference: bool,
) -> impl Iterator<Item = TestVector> + use<> {
    let universe = config.all_codewords();
    let reference = if include_reference {
        reference_vectors()
    } else {
        Vec::new()
    };

    let size = universe.len();
    let pairs = (0..size * size).map(move |index| {
        let secret = universe[index / size];
        let guess = universe[index % size];
        TestVector::new(secret, guess, Score::calculate(&secret, &guess))
    });

    reference.into_iter().chain(pairs)
}

/// Write vectors with the standard header, returning how many were written
///
/// # Errors
/// Returns any I/O error from the writer.
pub fn write_vectors<W, I>(mut writer: W, vectors: I) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = TestVector>,
{
    writeln!(writer, "{HEADER}")?;
    let mut written = 0;
    for vector in vectors {
        writeln!(writer, "{vector}")?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// A failed vector and the score actually produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Failure {
    pub vector: TestVector,
    pub actual: Score,
}

/// Outcome of checking a scorer against vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VerifyReport {
    pub total: usize,
    pub failed: usize,
    pub first_failure: Option<Failure>,
}

impl VerifyReport {
    #[must_use]
    pub const fn passed(&self) -> usize {
        self.total - self.failed
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Percentage of vectors passed, 100 for an empty run
    #[must_use]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.passed() as f64 / self.total as f64 * 100.0
        }
    }
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "passed {:.2}%", self.pass_rate())?;
        if let Some(failure) = &self.first_failure {
            write!(
                f,
                ", first failure: {} vs {} expected {}, got {}",
                failure.vector.secret, failure.vector.guess, failure.vector.expected, failure.actual
            )?;
        }
        Ok(())
    }
}

/// Check every vector against the scorer
#[must_use]
pub fn verify(scorer: &Scorer, vectors: &[TestVector]) -> VerifyReport {
    let mut report = VerifyReport {
        total: vectors.len(),
        ..VerifyReport::default()
    };

    for vector in vectors {
        let actual = scorer.score(&vector.secret, &vector.guess);
        if actual != vector.expected {
            report.failed += 1;
            report.first_failure.get_or_insert(Failure {
                vector: *vector,
                actual,
            });
        }
    }

    report
}

/// Check the scorer against the reference cases, in both directions
///
/// # Errors
/// Returns `VectorError::Mismatch` on the first wrong score, or
/// `VectorError::NotCommutative` if swapping secret and guess changes the score.
pub fn self_test(scorer: &Scorer) -> Result<(), VectorError> {
    for vector in reference_vectors() {
        let actual = scorer.score(&vector.secret, &vector.guess);
        if actual != vector.expected {
            return Err(VectorError::Mismatch { vector, actual });
        }
        if scorer.score(&vector.guess, &vector.secret) != actual {
            return Err(VectorError::NotCommutative {
                a: vector.secret,
                b: vector.guess,
            });
        }
    }
    Ok(())
}
