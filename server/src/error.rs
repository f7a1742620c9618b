//! Error types for catalog loading, round construction and client transport.

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failures on a single client connection. Always fatal to that session only.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("client closed the connection")]
    Disconnected,
    #[error("no activity within {0:?}")]
    TimedOut(Duration),
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("failed to load dictionary {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(
        "need {required} distinct words of length {length}, only {available} available"
    )]
    InsufficientCandidates {
        length: usize,
        required: usize,
        available: usize,
    },
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl GameError {
    /// Transport failures end a session quietly; everything else is a bug or
    /// a misconfiguration worth shouting about.
    pub fn is_transport(&self) -> bool {
        matches!(self, GameError::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
