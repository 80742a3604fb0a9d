//! Quickfire wire protocol - newline-delimited UTF-8 text lines
//!
//! One TCP connection per participant, one message per line:
//! - inbound: `START_c`, `ANSWER_c <text>`
//! - outbound: `QUESTION_s <text>`, `CORRECT_s <points>`, `ANSWER_s <text>`, `WRONG_s`

pub mod line;

pub use line::*;
