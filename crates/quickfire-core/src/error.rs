//! Error types for the quiz server

use thiserror::Error;

/// Core quiz errors
#[derive(Error, Debug)]
pub enum QuizError {
    // Configuration errors - fatal at startup
    #[error("Question bank is empty")]
    EmptyBank,

    #[error("Corpus mismatch: {questions} questions but {answers} answers")]
    CorpusMismatch { questions: usize, answers: usize },

    #[error("Failed to read corpus: {0}")]
    Corpus(String),

    // Transport errors - local to one participant
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Connection closed")]
    ConnectionClosed,
}

/// Result type for quiz operations
pub type QuizResult<T> = Result<T, QuizError>;
