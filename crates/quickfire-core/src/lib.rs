//! Quickfire Core - Fundamental types and round logic
//!
//! This crate defines the pieces shared by the whole quiz server:
//! - Identifiers (ParticipantId)
//! - Configuration (QuizConfig)
//! - The question bank and its no-repeat selection policy
//! - The shared round record and its two compare-and-swap entry points

pub mod id;
pub mod config;
pub mod bank;
pub mod round;
pub mod error;

pub use id::*;
pub use config::*;
pub use bank::*;
pub use round::*;
pub use error::*;
