//! Round construction.
//!
//! A round is a fixed list of same-length uppercase candidates, one of which is
//! secretly correct, plus the number of guesses allowed. The remaining-attempt
//! counter is owned by the session loop, not by the round.

use crate::catalog::{filter_by_length, sample_distinct};
use crate::config::GameConfig;
use crate::error::{GameError, Result};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use shared::{word_length, JUNK_CHARACTERS};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    attempts: u32,
    candidates: Vec<String>,
    correct_word: String,
}

impl Round {
    /// Builds a round from explicit parts, enforcing its invariants: at least
    /// one attempt, distinct uppercase candidates of a single length, and a
    /// correct word drawn from them.
    pub fn new(attempts: u32, candidates: Vec<String>, correct_word: String) -> Result<Self> {
        if attempts == 0 {
            return Err(GameError::Config("a round needs at least one attempt".to_string()));
        }
        let Some(first) = candidates.first() else {
            return Err(GameError::Config("a round needs candidates".to_string()));
        };

        let length = word_length(first);
        let mut seen = HashSet::new();
        for candidate in &candidates {
            if word_length(candidate) != length {
                return Err(GameError::Config(format!(
                    "candidate {candidate} is not {length} characters long"
                )));
            }
            if *candidate != candidate.to_uppercase() {
                return Err(GameError::Config(format!(
                    "candidate {candidate} is not uppercase"
                )));
            }
            if !seen.insert(candidate.as_str()) {
                return Err(GameError::Config(format!(
                    "candidate {candidate} appears twice"
                )));
            }
        }
        if !seen.contains(correct_word.as_str()) {
            return Err(GameError::Config(format!(
                "correct word {correct_word} is not a candidate"
            )));
        }

        Ok(Self {
            attempts,
            candidates,
            correct_word,
        })
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Candidates in display order.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn correct_word(&self) -> &str {
        &self.correct_word
    }

    pub fn word_length(&self) -> usize {
        word_length(&self.correct_word)
    }

    pub fn is_correct(&self, normalized_guess: &str) -> bool {
        self.correct_word == normalized_guess
    }
}

/// Draws a fresh round from `words`.
///
/// Words are filtered to `word_length`, uppercased, and collapsed when they
/// only differed by case before `candidate_count` of them are sampled. The
/// correct word is then picked uniformly among the candidates.
pub fn build_round<S, R>(
    attempts: u32,
    word_length: usize,
    candidate_count: usize,
    words: &[S],
    rng: &mut R,
) -> Result<Round>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    // Uppercasing can change the character count of some scripts.
    let normalized: Vec<String> = filter_by_length(words, word_length)
        .into_iter()
        .map(|w| w.to_uppercase())
        .filter(|w| shared::word_length(w) == word_length)
        .collect();

    let candidates =
        sample_distinct(&normalized, candidate_count, &mut *rng).map_err(|err| match err {
            GameError::InsufficientCandidates {
                required,
                available,
                ..
            } => GameError::InsufficientCandidates {
                length: word_length,
                required,
                available,
            },
            other => other,
        })?;

    let correct_word = candidates
        .choose(rng)
        .cloned()
        .ok_or_else(|| GameError::Config("candidate count must be at least 1".to_string()))?;

    debug!(
        "Built round: {} candidates of length {}, correct word {}",
        candidates.len(),
        word_length,
        correct_word
    );

    Round::new(attempts, candidates, correct_word)
}

/// Builds a round with the session-wide parameters.
pub fn build_from_config<S, R>(config: &GameConfig, words: &[S], rng: &mut R) -> Result<Round>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    build_round(
        config.attempts_per_round,
        config.password_length,
        config.candidate_count,
        words,
        rng,
    )
}

/// Surrounds `word` with `width` junk characters, split at a random point
/// between prefix and suffix.
pub fn decorate<R: Rng + ?Sized>(word: &str, width: usize, rng: &mut R) -> String {
    if width == 0 {
        return word.to_string();
    }

    let prefix_len = rng.gen_range(0..width);
    let prefix = junk(prefix_len, &mut *rng);
    let suffix = junk(width - prefix_len, &mut *rng);
    format!("{prefix}{word}{suffix}")
}

fn junk<R: Rng + ?Sized>(count: usize, rng: &mut R) -> String {
    let alphabet: Vec<char> = JUNK_CHARACTERS.chars().collect();
    (0..count)
        .filter_map(|_| alphabet.choose(&mut *rng).copied())
        .collect()
}
