use clap::Parser;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use server::catalog::WordCatalog;
use server::config::{timeout_from_secs, GameConfig, ServerConfig};
use server::error::GameError;
use server::network::{BoxError, Server};
use shared::{
    DEFAULT_ATTEMPTS_PER_ROUND, DEFAULT_CANDIDATE_COUNT, DEFAULT_DECORATION_WIDTH,
    DEFAULT_PASSWORD_LENGTH, DEFAULT_PORT,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Dictionary file, one word per line
    #[arg(short, long, default_value = "dict.txt")]
    dictionary: PathBuf,

    /// Guesses allowed per round
    #[arg(short, long, default_value_t = DEFAULT_ATTEMPTS_PER_ROUND)]
    attempts: u32,

    /// Password length in characters
    #[arg(short, long, default_value_t = DEFAULT_PASSWORD_LENGTH)]
    length: usize,

    /// Candidates shown per round
    #[arg(short, long, default_value_t = DEFAULT_CANDIDATE_COUNT)]
    candidates: usize,

    /// Junk characters around each displayed candidate (0 to disable)
    #[arg(long, default_value_t = DEFAULT_DECORATION_WIDTH)]
    decoration: usize,

    /// Seconds a client may stay silent before being dropped (0 to disable)
    #[arg(short, long, default_value = "300")]
    timeout: u64,

    /// Seed for the random generator
    #[arg(short, long)]
    seed: Option<u64>,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        ServerConfig {
            host: args.host,
            port: args.port,
            dictionary: args.dictionary,
            idle_timeout: timeout_from_secs(args.timeout),
            seed: args.seed,
            game: GameConfig {
                attempts_per_round: args.attempts,
                password_length: args.length,
                candidate_count: args.candidates,
                decoration_width: args.decoration,
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let config = ServerConfig::from(Args::parse());
    config.game.validate()?;

    let catalog = WordCatalog::load(&config.dictionary)?;
    if catalog.is_empty() {
        return Err(GameError::Config(format!(
            "dictionary {} contains no words",
            config.dictionary.display()
        ))
        .into());
    }
    let available = catalog.distinct_of_length(config.game.password_length);
    if available < config.game.candidate_count {
        return Err(GameError::InsufficientCandidates {
            length: config.game.password_length,
            required: config.game.candidate_count,
            available,
        }
        .into());
    }

    let rng = match config.seed {
        Some(seed) => {
            info!("Using random seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    info!(
        "{} attempts per round, {} candidates of length {}",
        config.game.attempts_per_round, config.game.candidate_count, config.game.password_length
    );

    let server = Server::bind(
        &config.address(),
        Arc::new(catalog),
        config.game,
        config.idle_timeout,
        rng,
    )
    .await?;

    tokio::select! {
        result = server.run() => {
            if let Err(e) = result {
                error!("Server stopped: {}", e);
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
