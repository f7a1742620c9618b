//! Protocol text and scoring rules shared by the TERMALINK server and client.
//!
//! Everything sent over the wire is plain text. The literals below are the
//! exact byte sequences the server writes, so a client can recognise prompts
//! and the end of a session without any structured framing.

pub const DEFAULT_PORT: u16 = 2160;
pub const DEFAULT_ATTEMPTS_PER_ROUND: u32 = 4;
pub const DEFAULT_PASSWORD_LENGTH: usize = 7;
pub const DEFAULT_CANDIDATE_COUNT: usize = 10;
pub const DEFAULT_DECORATION_WIDTH: usize = 10;

/// Maximum number of bytes consumed by a single line read.
pub const MAX_LINE_BYTES: u64 = 512;

pub const DIVIDER: &str = "----------------------------------------";
pub const TITLE: &str = "ROBCO INDUSTRIES (TM) TERMALINK PROTOCOL";
pub const INSTRUCTION: &str = "ENTER PASSWORD NOW";
pub const PASSWORD_PROMPT: &str = "ENTER PASSWORD: ";
pub const ACCESS_GRANTED: &str = "ACCESS GRANTED.";
pub const ENTRY_DENIED: &str = "ENTRY DENIED.";
pub const REPLAY_PROMPT: &str = "PLAY AGAIN? (Y/N): ";
pub const FAREWELL: &str = "THANKS FOR PLAYING!";
pub const REPLAY_ACCEPT: &str = "Y";

/// Characters used to pad displayed candidates.
pub const JUNK_CHARACTERS: &str = ";()[]*&^$.-=<>+#_!?@'/|";

/// Round banner written before the candidate list.
pub fn round_header() -> String {
    format!("\n{DIVIDER}\n\n{TITLE}\n\n{INSTRUCTION}\n\n")
}

/// Divider written after the candidate list.
pub fn round_footer() -> String {
    format!("\n{DIVIDER}\n")
}

pub fn attempts_left_line(remaining: u32) -> String {
    format!("\n{remaining} ATTEMPT(S) LEFT")
}

pub fn password_prompt() -> String {
    format!("\n{PASSWORD_PROMPT}")
}

pub fn access_granted_line() -> String {
    format!("{ACCESS_GRANTED}\n")
}

pub fn entry_denied_line(matches: usize, length: usize) -> String {
    format!("{ENTRY_DENIED} {matches}/{length} CORRECT.\n")
}

pub fn score_line(score: u32) -> String {
    format!("\nSCORE:{score}\n\n")
}

pub fn farewell_line() -> String {
    format!("\n{FAREWELL}")
}

/// Trims surrounding whitespace and uppercases, the canonical form of any
/// line read from a player.
pub fn normalize_input(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Returns true if `guess` names one of the displayed candidates.
///
/// Both sides are compared in normalized form, so case and surrounding
/// whitespace do not matter. The empty string is never a valid guess.
pub fn is_valid_guess<S: AsRef<str>>(guess: &str, candidates: &[S]) -> bool {
    let guess = normalize_input(guess);
    if guess.is_empty() {
        return false;
    }
    candidates
        .iter()
        .any(|candidate| normalize_input(candidate.as_ref()) == guess)
}

/// Counts the character positions at which `a` and `b` agree.
///
/// Callers must pass words of equal length. Candidates within a round always
/// share one length, so this only compares as far as the shorter word reaches.
pub fn positional_matches(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).filter(|(x, y)| x == y).count()
}

/// Length used in the `<matches>/<length>` feedback.
pub fn word_length(word: &str) -> usize {
    word.chars().count()
}
