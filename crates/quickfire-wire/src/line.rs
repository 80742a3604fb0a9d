//! Typed line messages for the quiz protocol
//!
//! Parsing is prefix-based and total: a line that matches no known
//! prefix parses to `None` and the caller drops it. Nothing is ever
//! reported back on the wire for a malformed line.

/// Round-start request prefix (participant -> coordinator)
pub const START_PREFIX: &str = "START_c";
/// Answer submission prefix (participant -> coordinator)
pub const ANSWER_PREFIX: &str = "ANSWER_c ";
/// New question prefix (coordinator -> participant)
pub const QUESTION_PREFIX: &str = "QUESTION_s ";
/// Winner-only award prefix (coordinator -> participant)
pub const CORRECT_PREFIX: &str = "CORRECT_s ";
/// Reveal prefix, sent to all participants (coordinator -> participant)
pub const REVEAL_PREFIX: &str = "ANSWER_s ";
/// Rejection prefix, sent to the rejected submitter only
pub const WRONG_PREFIX: &str = "WRONG_s";

/// Inbound message, participant to coordinator
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientLine {
    /// Request a round start
    Start,
    /// Submit an answer
    Answer(String),
}

impl ClientLine {
    /// Parse one inbound line. Unrecognized lines are `None`.
    pub fn parse(line: &str) -> Option<ClientLine> {
        if let Some(text) = line.strip_prefix(ANSWER_PREFIX) {
            return Some(ClientLine::Answer(text.to_string()));
        }
        if line.starts_with(START_PREFIX) {
            return Some(ClientLine::Start);
        }
        None
    }

    /// Encode to a wire line, without the trailing newline.
    pub fn encode(&self) -> String {
        match self {
            ClientLine::Start => START_PREFIX.to_string(),
            ClientLine::Answer(text) => format!("{}{}", ANSWER_PREFIX, text),
        }
    }
}

/// Outbound message, coordinator to participant
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServerLine {
    /// A new question is live
    Question(String),
    /// Points awarded; sent only to the winning participant
    Correct(u32),
    /// The revealed correct answer; sent to every participant
    Reveal(String),
    /// Rejection; sent only to the rejected submitter
    Wrong,
}

impl ServerLine {
    /// Parse one outbound line (used by clients and tests).
    pub fn parse(line: &str) -> Option<ServerLine> {
        if let Some(text) = line.strip_prefix(QUESTION_PREFIX) {
            return Some(ServerLine::Question(text.to_string()));
        }
        if let Some(points) = line.strip_prefix(CORRECT_PREFIX) {
            return points.trim().parse().ok().map(ServerLine::Correct);
        }
        if let Some(text) = line.strip_prefix(REVEAL_PREFIX) {
            return Some(ServerLine::Reveal(text.to_string()));
        }
        if line.starts_with(WRONG_PREFIX) {
            return Some(ServerLine::Wrong);
        }
        None
    }

    /// Encode to a wire line, without the trailing newline.
    pub fn encode(&self) -> String {
        match self {
            ServerLine::Question(text) => format!("{}{}", QUESTION_PREFIX, text),
            ServerLine::Correct(points) => format!("{}{}", CORRECT_PREFIX, points),
            ServerLine::Reveal(text) => format!("{}{}", REVEAL_PREFIX, text),
            ServerLine::Wrong => WRONG_PREFIX.to_string(),
        }
    }
}
