//! Game and server parameters.
//!
//! The defaults reproduce the classic terminal: four attempts at one of ten
//! seven-letter passwords, served on port 2160.

use crate::error::{GameError, Result};
use shared::{
    DEFAULT_ATTEMPTS_PER_ROUND, DEFAULT_CANDIDATE_COUNT, DEFAULT_DECORATION_WIDTH,
    DEFAULT_PASSWORD_LENGTH, DEFAULT_PORT,
};
use std::path::PathBuf;
use std::time::Duration;

/// Per-round parameters, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub attempts_per_round: u32,
    pub password_length: usize,
    pub candidate_count: usize,
    /// Junk characters drawn around each displayed candidate; 0 shows bare words.
    pub decoration_width: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            attempts_per_round: DEFAULT_ATTEMPTS_PER_ROUND,
            password_length: DEFAULT_PASSWORD_LENGTH,
            candidate_count: DEFAULT_CANDIDATE_COUNT,
            decoration_width: DEFAULT_DECORATION_WIDTH,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.attempts_per_round == 0 {
            return Err(GameError::Config(
                "attempts per round must be at least 1".to_string(),
            ));
        }
        if self.password_length == 0 {
            return Err(GameError::Config(
                "password length must be at least 1".to_string(),
            ));
        }
        if self.candidate_count == 0 {
            return Err(GameError::Config(
                "candidate count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Listener-level parameters.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub dictionary: PathBuf,
    /// Deadline for each read and write on a client connection.
    /// `None` waits forever.
    pub idle_timeout: Option<Duration>,
    /// Seed for the process-wide generator; OS entropy when absent.
    pub seed: Option<u64>,
    pub game: GameConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            dictionary: PathBuf::from("dict.txt"),
            idle_timeout: Some(Duration::from_secs(300)),
            seed: None,
            game: GameConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Maps a seconds count from the command line to an optional deadline.
pub fn timeout_from_secs(secs: u64) -> Option<Duration> {
    if secs == 0 {
        None
    } else {
        Some(Duration::from_secs(secs))
    }
}
