//! # TERMALINK Server Library
//!
//! This library implements a terminal-themed password guessing game served over
//! raw TCP. A player connects, is shown a list of candidate passwords and has a
//! limited number of attempts to find the correct one. Wrong guesses are
//! answered with the number of letters in the right position.
//!
//! ## Core Responsibilities
//!
//! ### Round Construction
//! Every round draws a fresh set of same-length candidates from the dictionary,
//! uppercases them and secretly marks one as correct. Sampling is bounded: a
//! dictionary without enough distinct words of the configured length is
//! reported as an error instead of being retried forever.
//!
//! ### Session State Machine
//! Each connection runs its own session, which walks through building a round,
//! taking guesses, reporting the score and asking whether to play again. The
//! player's score accumulates across rounds and is discarded when the
//! connection ends.
//!
//! ### Isolation
//! Sessions share nothing mutable. The dictionary is loaded once and shared
//! read-only; every session owns its random generator, transport and score. A
//! failing connection only ever ends its own session.
//!
//! ## Module Organization
//!
//! ### Catalog Module (`catalog`)
//! - Dictionary loading with whitespace trimming
//! - Length filtering and distinct random sampling
//!
//! ### Round Module (`round`)
//! - The `Round` value and its invariants
//! - Round building from the catalog and candidate decoration
//!
//! ### Session Module (`session`)
//! - Per-connection game loop and player score
//!
//! ### Transport Module (`transport`)
//! - Line-oriented reads and writes with per-operation deadlines
//!
//! ### Network Module (`network`)
//! - TCP accept loop spawning one task per connection
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use server::catalog::WordCatalog;
//! use server::config::GameConfig;
//! use server::network::Server;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let catalog = Arc::new(WordCatalog::load("dict.txt")?);
//!
//!     let server = Server::bind(
//!         "0.0.0.0:2160",
//!         catalog,
//!         GameConfig::default(),
//!         Some(Duration::from_secs(300)),
//!         StdRng::from_entropy(),
//!     )
//!     .await?;
//!
//!     // Accepts players until the process is stopped.
//!     server.run().await
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod network;
pub mod round;
pub mod session;
pub mod transport;
