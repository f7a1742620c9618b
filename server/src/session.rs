//! Per-connection game loop.
//!
//! A session plays rounds with one player until they decline to continue or
//! the connection fails. The flow is an explicit state machine:
//!
//! ```text
//! AwaitingRound -> InRound -> RoundResolved -> AwaitingReplayDecision
//!       ^                                             |
//!       +---------------------- "Y" ------------------+-- otherwise --> Ended
//! ```
//!
//! Any transport failure ends the session immediately without further output.
//! The score only changes after a correct guess has been read in full.

use crate::catalog::WordCatalog;
use crate::config::GameConfig;
use crate::error::Result;
use crate::round::{build_from_config, decorate, Round};
use crate::transport::Transport;
use log::debug;
use rand::Rng;
use shared::{
    access_granted_line, attempts_left_line, entry_denied_line, farewell_line, is_valid_guess,
    normalize_input, password_prompt, positional_matches, round_footer, round_header, score_line,
    REPLAY_ACCEPT, REPLAY_PROMPT,
};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};

/// Cumulative result of one connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerState {
    pub score: u32,
    pub rounds_played: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Won,
    Lost,
}

#[derive(Debug)]
enum SessionState {
    AwaitingRound,
    InRound(Round),
    RoundResolved(RoundOutcome),
    AwaitingReplayDecision,
    Ended,
}

pub struct GameSession<S, R> {
    transport: Transport<S>,
    catalog: Arc<WordCatalog>,
    config: GameConfig,
    rng: R,
    player: PlayerState,
}

impl<S, R> GameSession<S, R>
where
    S: AsyncRead + AsyncWrite,
    R: Rng,
{
    pub fn new(
        transport: Transport<S>,
        catalog: Arc<WordCatalog>,
        config: GameConfig,
        rng: R,
    ) -> Self {
        Self {
            transport,
            catalog,
            config,
            rng,
            player: PlayerState::default(),
        }
    }

    pub fn player(&self) -> PlayerState {
        self.player
    }

    /// Plays rounds until the player stops and returns their final state.
    ///
    /// Round construction and transport failures end the session with an
    /// error; the connection is dropped with it.
    pub async fn run(mut self) -> Result<PlayerState> {
        let mut state = SessionState::AwaitingRound;

        loop {
            state = match state {
                SessionState::AwaitingRound => {
                    let round =
                        build_from_config(&self.config, self.catalog.words(), &mut self.rng)?;
                    SessionState::InRound(round)
                }
                SessionState::InRound(round) => {
                    let outcome = self.play_round(&round).await?;
                    SessionState::RoundResolved(outcome)
                }
                SessionState::RoundResolved(outcome) => {
                    debug!(
                        "Round {} {:?}, score {}",
                        self.player.rounds_played, outcome, self.player.score
                    );
                    self.transport.send(&score_line(self.player.score)).await?;
                    SessionState::AwaitingReplayDecision
                }
                SessionState::AwaitingReplayDecision => {
                    if self.wants_replay().await? {
                        SessionState::AwaitingRound
                    } else {
                        self.transport.send(&farewell_line()).await?;
                        self.transport.send(&score_line(self.player.score)).await?;
                        SessionState::Ended
                    }
                }
                SessionState::Ended => break,
            };
        }

        self.transport.shutdown().await;
        Ok(self.player)
    }

    /// Shows `round` to the player and takes guesses until they find the
    /// password or run out of attempts.
    pub async fn play_round(&mut self, round: &Round) -> Result<RoundOutcome> {
        self.player.rounds_played += 1;

        self.transport.send(&round_header()).await?;
        for candidate in round.candidates() {
            let shown = decorate(candidate, self.config.decoration_width, &mut self.rng);
            self.transport.send(&format!("{shown}\n")).await?;
        }
        self.transport.send(&round_footer()).await?;

        let length = round.word_length();
        let mut remaining = round.attempts();

        while remaining > 0 {
            self.transport.send(&attempts_left_line(remaining)).await?;
            self.transport.send(&password_prompt()).await?;

            let guess = normalize_input(&self.transport.read_line().await?);
            debug!("Guess {:?} with {} attempt(s) left", guess, remaining);

            if !is_valid_guess(&guess, round.candidates()) {
                self.transport.send(&entry_denied_line(0, length)).await?;
            } else if round.is_correct(&guess) {
                self.player.score += 1;
                self.transport.send(&access_granted_line()).await?;
                return Ok(RoundOutcome::Won);
            } else {
                let matches = positional_matches(&guess, round.correct_word());
                self.transport
                    .send(&entry_denied_line(matches, length))
                    .await?;
            }

            remaining -= 1;
        }

        Ok(RoundOutcome::Lost)
    }

    async fn wants_replay(&mut self) -> Result<bool> {
        self.transport.send(REPLAY_PROMPT).await?;
        let answer = normalize_input(&self.transport.read_line().await?);
        Ok(answer == REPLAY_ACCEPT)
    }
}
