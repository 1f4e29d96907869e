//! Regression vector commands
//!
//! Write the vectors for a game to a file, or check a scorer against a file.

use crate::config::GameConfig;
use crate::scoring::Scorer;
use crate::vectors::{self, TestVector, VerifyReport};
use anyhow::Context;
use log::info;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Default file name for a game's vectors
#[must_use]
pub fn vector_file_name(config: &GameConfig) -> String {
    format!(
        "mastermind_{}p{}c.txt",
        config.pin_count(),
        config.color_count()
    )
}

/// Write every vector of the game to `path`, returning how many were written
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn generate_file(
    config: &GameConfig,
    path: &Path,
    include_reference: bool,
) -> anyhow::Result<usize> {
    info!("Writing tests to {}", path.display());
    if include_reference {
        info!("Including Miyoshi's test cases");
    }

    let file = File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
    let written = vectors::write_vectors(
        BufWriter::new(file),
        vectors::generate(config, include_reference),
    )
    .with_context(|| format!("Cannot write {}", path.display()))?;

    Ok(written)
}

/// Check `scorer` against the vectors in `path`
///
/// Codewords that belong to the game are resolved first so they go through the
/// scorer's cache; the rest are scored directly.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds a malformed line.
pub fn verify_file(config: &GameConfig, scorer: &Scorer, path: &Path) -> anyhow::Result<VerifyReport> {
    info!("Running tests from file {}", path.display());

    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let parsed = vectors::parse_vectors(BufReader::new(file))
        .with_context(|| format!("Cannot read {}", path.display()))?;

    let resolved: Vec<TestVector> = parsed
        .into_iter()
        .map(|v| {
            TestVector::new(
                config.resolve(&v.secret).unwrap_or(v.secret),
                config.resolve(&v.guess).unwrap_or(v.guess),
                v.expected,
            )
        })
        .collect();

    Ok(vectors::verify(scorer, &resolved))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("{}_{name}", std::process::id()))
    }

    #[test]
    fn generate_then_verify() {
        let config = GameConfig::new(3, 3).unwrap();
        let path = temp_path("vectors_3p3c.txt");

        let written = generate_file(&config, &path, true).unwrap();
        assert_eq!(written, 14 + 27 * 27);

        let scorer = Scorer::new(&config);
        let report = verify_file(&config, &scorer, &path).unwrap();
        assert_eq!(report.total, written);
        assert!(report.is_success());
        assert!(scorer.cached_entries() > 0);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn verify_missing_file_fails() {
        let config = GameConfig::classic();
        let scorer = Scorer::new(&config);
        assert!(verify_file(&config, &scorer, &temp_path("does_not_exist.txt")).is_err());
    }

    #[test]
    fn default_file_name() {
        assert_eq!(vector_file_name(&GameConfig::classic()), "mastermind_4p6c.txt");
    }
}
