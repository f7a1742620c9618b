//! # TERMALINK Client Library
//!
//! A minimal terminal for the TERMALINK password game. The server does all of
//! the game logic and formatting, so the client only relays text: lines typed
//! by the player go to the server, and everything the server writes is copied
//! to the terminal unchanged.
//!
//! ## Module Organization
//!
//! ### Network Module (`network`)
//! - TCP connection to the game server
//! - Bidirectional relay between the connection and a local terminal
//! - Detection of the server's farewell so the session summary can be logged
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::network::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::connect("127.0.0.1:2160").await?;
//!     client.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! The session ends when the server closes the connection, either after the
//! player declines another round or because the connection went idle.

pub mod network;
