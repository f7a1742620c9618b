//! Dictionary of candidate passwords.
//!
//! The catalog is loaded once at startup and shared read-only by every
//! session. Length filtering and random sampling are free functions so the
//! round builder can run them over already-normalized word lists.

use crate::error::{GameError, Result};
use log::info;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Immutable, ordered word list.
#[derive(Debug, Clone, Default)]
pub struct WordCatalog {
    words: Vec<String>,
}

impl WordCatalog {
    /// Loads one word per line from `path`.
    ///
    /// Surrounding whitespace is trimmed and blank lines are skipped. An
    /// unreadable file is a [`GameError::Load`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let load_error = |source| GameError::Load {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(load_error)?;
        let catalog = Self::from_reader(BufReader::new(file)).map_err(load_error)?;

        info!("Loaded {} words from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Reads a catalog from any buffered source.
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut words = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                words.push(trimmed.to_string());
            }
        }
        Ok(Self { words })
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words
                .into_iter()
                .map(Into::into)
                .map(|w: String| w.trim().to_string())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of case-insensitively distinct words usable as `length`-character
    /// passwords.
    pub fn distinct_of_length(&self, length: usize) -> usize {
        let mut seen = HashSet::new();
        filter_by_length(&self.words, length)
            .into_iter()
            .map(|w| w.to_uppercase())
            .filter(|w| w.chars().count() == length)
            .filter(|w| seen.insert(w.clone()))
            .count()
    }
}

/// Every word whose character count is exactly `length`, in original order.
pub fn filter_by_length<S: AsRef<str>>(words: &[S], length: usize) -> Vec<String> {
    words
        .iter()
        .map(AsRef::as_ref)
        .filter(|w| w.chars().count() == length)
        .map(str::to_string)
        .collect()
}

/// Draws `count` distinct words uniformly at random without replacement.
///
/// Repeated entries in `words` count once. Asking for more words than are
/// distinctly available fails with [`GameError::InsufficientCandidates`].
pub fn sample_distinct<S, R>(words: &[S], count: usize, rng: &mut R) -> Result<Vec<String>>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let mut seen = HashSet::new();
    let mut pool: Vec<String> = words
        .iter()
        .map(AsRef::as_ref)
        .filter(|w| seen.insert(*w))
        .map(str::to_string)
        .collect();

    if count > pool.len() {
        return Err(GameError::InsufficientCandidates {
            length: words.first().map_or(0, |w| w.as_ref().chars().count()),
            required: count,
            available: pool.len(),
        });
    }

    pool.shuffle(rng);
    pool.truncate(count);
    Ok(pool)
}
