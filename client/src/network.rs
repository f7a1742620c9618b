use log::{debug, info};
use shared::FAREWELL;
use std::io;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tokio::net::TcpStream;

/// Totals for one relayed session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStats {
    pub bytes_received: u64,
    pub lines_sent: u32,
    /// The server said goodbye rather than just dropping the connection.
    pub farewell_seen: bool,
}

pub struct Client {
    stream: TcpStream,
}

impl Client {
    pub async fn connect(server_addr: &str) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Connecting to {}", server_addr);
        let stream = TcpStream::connect(server_addr).await?;
        info!("Connected from {}", stream.local_addr()?);
        Ok(Client { stream })
    }

    /// Relays the terminal until the server hangs up.
    pub async fn run(self) -> Result<RelayStats, Box<dyn std::error::Error>> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();

        let stats = relay(self.stream, stdin, stdout).await?;
        if stats.farewell_seen {
            info!("Session finished ({} guesses and answers sent)", stats.lines_sent);
        } else {
            info!("Server closed the connection");
        }
        Ok(stats)
    }
}

/// Copies server output to `output` and `input` lines to the server.
///
/// When `input` runs dry the write side of the connection is shut down, but
/// server output keeps flowing until the server closes its end.
pub async fn relay<S, I, O>(stream: S, input: I, mut output: O) -> io::Result<RelayStats>
where
    S: AsyncRead + AsyncWrite,
    I: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
{
    let (mut server_reader, mut server_writer) = tokio::io::split(stream);
    let mut lines = input.lines();
    let mut input_open = true;
    let mut buffer = [0u8; 1024];
    let mut tail: Vec<u8> = Vec::new();
    let mut stats = RelayStats::default();

    loop {
        tokio::select! {
            read = server_reader.read(&mut buffer) => {
                let n = read?;
                if n == 0 {
                    break;
                }
                output.write_all(&buffer[..n]).await?;
                output.flush().await?;
                stats.bytes_received += n as u64;

                // Keep enough history to spot the farewell across chunk boundaries.
                tail.extend_from_slice(&buffer[..n]);
                if contains_farewell(&tail) {
                    stats.farewell_seen = true;
                }
                let keep = FAREWELL.len();
                if tail.len() > keep {
                    tail.drain(..tail.len() - keep);
                }
            }
            line = lines.next_line(), if input_open => {
                match line? {
                    Some(line) => {
                        server_writer.write_all(line.as_bytes()).await?;
                        server_writer.write_all(b"\n").await?;
                        server_writer.flush().await?;
                        stats.lines_sent += 1;
                    }
                    None => {
                        debug!("Input closed, half-closing connection");
                        input_open = false;
                        server_writer.shutdown().await?;
                    }
                }
            }
        }
    }

    Ok(stats)
}

fn contains_farewell(bytes: &[u8]) -> bool {
    bytes
        .windows(FAREWELL.len())
        .any(|window| window == FAREWELL.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tokio::io::duplex;

    #[test]
    fn test_contains_farewell() {
        assert!(contains_farewell(b"\nTHANKS FOR PLAYING!\nSCORE:1"));
        assert!(!contains_farewell(b"THANKS FOR"));
        assert!(!contains_farewell(b""));
    }

    #[tokio::test]
    async fn test_relay_forwards_both_directions() {
        let (client_end, server_end) = duplex(1024);

        let fake_server = tokio::spawn(async move {
            let mut server = BufReader::new(server_end);
            server.get_mut().write_all(b"ENTER PASSWORD: ").await.unwrap();

            let mut line = String::new();
            server.read_line(&mut line).await.unwrap();
            assert_eq!(line, "carpool\n");

            server
                .get_mut()
                .write_all(b"ACCESS GRANTED.\n\nTHANKS FOR PLAYING!\nSCORE:1\n\n")
                .await
                .unwrap();
        });

        let input = Cursor::new(b"carpool\n".to_vec());
        let mut output = Vec::new();
        let stats = relay(client_end, input, &mut output).await.unwrap();
        fake_server.await.unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("ENTER PASSWORD: "));
        assert!(text.ends_with("SCORE:1\n\n"));
        assert_eq!(stats.lines_sent, 1);
        assert!(stats.farewell_seen);
        assert_eq!(stats.bytes_received, text.len() as u64);
    }

    #[tokio::test]
    async fn test_relay_farewell_split_across_reads() {
        let (client_end, mut server_end) = duplex(1024);

        let fake_server = tokio::spawn(async move {
            server_end.write_all(b"\nTHANKS FOR ").await.unwrap();
            server_end.flush().await.unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            server_end.write_all(b"PLAYING!\n").await.unwrap();
        });

        let input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        let stats = relay(client_end, input, &mut output).await.unwrap();
        fake_server.await.unwrap();

        assert!(stats.farewell_seen);
        assert_eq!(stats.lines_sent, 0);
    }

    #[tokio::test]
    async fn test_relay_without_farewell() {
        let (client_end, server_end) = duplex(64);
        drop(server_end);

        let input = Cursor::new(b"y\n".to_vec());
        let mut output = Vec::new();
        let result = relay(client_end, input, &mut output).await;

        // Either the line raced the hang-up or it didn't; the farewell is never seen.
        if let Ok(stats) = result {
            assert!(!stats.farewell_seen);
        }
        assert!(output.is_empty());
    }
}
