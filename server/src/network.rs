//! TCP listener handing each accepted connection to its own game session

use crate::catalog::WordCatalog;
use crate::config::GameConfig;
use crate::session::GameSession;
use crate::transport::Transport;
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Accepts players and runs one independent session task per connection.
///
/// The server owns the process-wide random generator. Each session gets its
/// own generator seeded from it, so sessions never share mutable state.
pub struct Server {
    listener: TcpListener,
    catalog: Arc<WordCatalog>,
    game: GameConfig,
    idle_timeout: Option<Duration>,
    rng: StdRng,
}

impl Server {
    pub async fn bind(
        addr: &str,
        catalog: Arc<WordCatalog>,
        game: GameConfig,
        idle_timeout: Option<Duration>,
        rng: StdRng,
    ) -> Result<Self, BoxError> {
        game.validate()?;
        let listener = TcpListener::bind(addr).await?;
        info!("Server listening on {}", listener.local_addr()?);

        Ok(Server {
            listener,
            catalog,
            game,
            idle_timeout,
            rng,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept loop. Runs until the process is stopped; accept and session
    /// start failures are logged and skipped.
    pub async fn run(mut self) -> Result<(), BoxError> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    if let Err(e) = self.spawn_session(stream, addr) {
                        error!("Failed to start session for {}: {}", addr, e);
                    }
                }
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                }
            }
        }
    }

    fn spawn_session(&mut self, stream: TcpStream, addr: SocketAddr) -> Result<(), BoxError> {
        info!("Client connected from {}", addr);

        if let Err(e) = stream.set_nodelay(true) {
            warn!("Failed to set TCP_NODELAY for {}: {}", addr, e);
        }

        let rng = StdRng::from_rng(&mut self.rng)?;
        let session = GameSession::new(
            Transport::new(stream, self.idle_timeout),
            Arc::clone(&self.catalog),
            self.game.clone(),
            rng,
        );

        tokio::spawn(async move {
            match session.run().await {
                Ok(player) => {
                    info!(
                        "Client {} finished after {} round(s) with score {}",
                        addr, player.rounds_played, player.score
                    );
                }
                Err(e) if e.is_transport() => {
                    info!("Client {} disconnected: {}", addr, e);
                }
                Err(e) => {
                    error!("Session for {} aborted: {}", addr, e);
                }
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn test_catalog() -> Arc<WordCatalog> {
        Arc::new(WordCatalog::from_words(["carpool", "ballboy", "primark"]))
    }

    fn test_config() -> GameConfig {
        GameConfig {
            attempts_per_round: 1,
            password_length: 7,
            candidate_count: 3,
            decoration_width: 0,
        }
    }

    #[tokio::test]
    async fn test_bind_rejects_invalid_config() {
        let config = GameConfig {
            candidate_count: 0,
            ..test_config()
        };
        let result = Server::bind(
            "127.0.0.1:0",
            test_catalog(),
            config,
            None,
            StdRng::seed_from_u64(1),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let server = Server::bind(
            "127.0.0.1:0",
            test_catalog(),
            test_config(),
            Some(Duration::from_secs(5)),
            StdRng::seed_from_u64(1),
        )
        .await
        .unwrap();
        let addr = server.local_addr().unwrap();
        tokio::spawn(server.run());

        let mut first = TcpStream::connect(addr).await.unwrap();
        let mut second = TcpStream::connect(addr).await.unwrap();

        // The first player walks away mid-round; the second plays on.
        first.shutdown().await.unwrap();
        drop(first);

        second.write_all(b"nothing\nn\n").await.unwrap();
        let mut output = String::new();
        second.read_to_string(&mut output).await.unwrap();

        assert!(output.contains("ENTRY DENIED. 0/7 CORRECT."));
        assert!(output.contains("THANKS FOR PLAYING!"));
        assert!(output.ends_with("SCORE:0\n\n"));
    }

    #[tokio::test]
    async fn test_aborted_sessions_keep_listener_running() {
        // Too few words for the configured round, so every session aborts.
        let server = Server::bind(
            "127.0.0.1:0",
            Arc::new(WordCatalog::from_words(["carpool"])),
            test_config(),
            Some(Duration::from_secs(5)),
            StdRng::seed_from_u64(1),
        )
        .await
        .unwrap();
        let addr = server.local_addr().unwrap();
        let listener = tokio::spawn(server.run());

        for _ in 0..3 {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            let mut output = String::new();
            tokio::time::timeout(Duration::from_secs(5), stream.read_to_string(&mut output))
                .await
                .unwrap()
                .unwrap();
            assert!(output.is_empty());
        }
        assert!(!listener.is_finished());
    }
}
