//! Line-oriented text channel to one remote player.
//!
//! Wraps any async byte stream (a `TcpStream` in production, an in-memory
//! duplex in tests) and bounds every read and write by the idle deadline.

use crate::error::TransportError;
use shared::MAX_LINE_BYTES;
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::io::{
    AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader, ReadHalf,
    WriteHalf,
};
use tokio::time::timeout;

pub struct Transport<S> {
    reader: BufReader<ReadHalf<S>>,
    writer: WriteHalf<S>,
    idle_timeout: Option<Duration>,
}

impl<S> Transport<S>
where
    S: AsyncRead + AsyncWrite,
{
    pub fn new(stream: S, idle_timeout: Option<Duration>) -> Self {
        let (read_half, write_half) = tokio::io::split(stream);
        Self {
            reader: BufReader::new(read_half),
            writer: write_half,
            idle_timeout,
        }
    }

    /// Writes `text` verbatim and flushes it to the peer.
    pub async fn send(&mut self, text: &str) -> Result<(), TransportError> {
        let limit = self.idle_timeout;
        let writer = &mut self.writer;
        with_deadline(limit, async move {
            writer.write_all(text.as_bytes()).await?;
            writer.flush().await
        })
        .await
    }

    /// Reads one line, at most [`MAX_LINE_BYTES`] long, including its
    /// terminator. End of stream is reported as [`TransportError::Disconnected`].
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD rather than
    /// failing, so garbled input reaches the game as an ordinary wrong guess.
    pub async fn read_line(&mut self) -> Result<String, TransportError> {
        let limit = self.idle_timeout;
        let mut bytes = Vec::new();
        let read = with_deadline(
            limit,
            (&mut self.reader)
                .take(MAX_LINE_BYTES)
                .read_until(b'\n', &mut bytes),
        )
        .await?;

        if read == 0 {
            return Err(TransportError::Disconnected);
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Best-effort close of the write side.
    pub async fn shutdown(&mut self) {
        let _ = self.writer.shutdown().await;
    }
}

async fn with_deadline<F, T>(limit: Option<Duration>, operation: F) -> Result<T, TransportError>
where
    F: Future<Output = io::Result<T>>,
{
    match limit {
        Some(limit) => match timeout(limit, operation).await {
            Ok(result) => result.map_err(TransportError::from),
            Err(_) => Err(TransportError::TimedOut(limit)),
        },
        None => operation.await.map_err(TransportError::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::duplex;
    use tokio_test::io::Builder;

    #[tokio::test]
    async fn test_read_line_and_send() {
        let mock = Builder::new()
            .read(b"carpool\r\n")
            .write(b"ENTER PASSWORD: ")
            .build();
        let mut transport = Transport::new(mock, None);

        assert_eq!(transport.read_line().await.unwrap(), "carpool\r\n");
        transport.send("ENTER PASSWORD: ").await.unwrap();
    }

    #[tokio::test]
    async fn test_read_line_end_of_stream() {
        let mock = Builder::new().build();
        let mut transport = Transport::new(mock, None);

        assert!(matches!(
            transport.read_line().await,
            Err(TransportError::Disconnected)
        ));
    }

    #[tokio::test]
    async fn test_read_line_partial_line_before_close() {
        let mock = Builder::new().read(b"y").build();
        let mut transport = Transport::new(mock, None);

        assert_eq!(transport.read_line().await.unwrap(), "y");
        assert!(matches!(
            transport.read_line().await,
            Err(TransportError::Disconnected)
        ));
    }

    #[tokio::test]
    async fn test_read_line_caps_length() {
        let (mut client, server) = duplex(4096);
        let mut transport = Transport::new(server, None);

        let long_line = format!("{}\n", "A".repeat(600));
        client.write_all(long_line.as_bytes()).await.unwrap();

        let first = transport.read_line().await.unwrap();
        assert_eq!(first.len(), MAX_LINE_BYTES as usize);

        let rest = transport.read_line().await.unwrap();
        assert_eq!(rest.len(), 600 + 1 - MAX_LINE_BYTES as usize);
    }

    #[tokio::test]
    async fn test_read_line_times_out() {
        let (_client, server) = duplex(64);
        let mut transport = Transport::new(server, Some(Duration::from_millis(50)));

        match transport.read_line().await {
            Err(TransportError::TimedOut(limit)) => {
                assert_eq!(limit, Duration::from_millis(50));
            }
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_read_line_replaces_invalid_utf8() {
        let mock = Builder::new()
            .read(b"caf\xe9\n")
            .read(b"carpool\n")
            .build();
        let mut transport = Transport::new(mock, None);

        assert_eq!(transport.read_line().await.unwrap(), "caf\u{FFFD}\n");
        assert_eq!(transport.read_line().await.unwrap(), "carpool\n");
    }

    #[tokio::test]
    async fn test_read_line_cap_splitting_multibyte_character() {
        let (mut client, server) = duplex(4096);
        let mut transport = Transport::new(server, None);

        // The two-byte "é" straddles the cap.
        let line = format!("{}é\n", "A".repeat(MAX_LINE_BYTES as usize - 1));
        client.write_all(line.as_bytes()).await.unwrap();

        let first = transport.read_line().await.unwrap();
        assert!(first.ends_with('\u{FFFD}'));
        assert_eq!(transport.read_line().await.unwrap(), "\u{FFFD}\n");
    }
}
