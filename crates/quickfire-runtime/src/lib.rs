//! Quickfire Runtime - the live quiz server
//!
//! This crate assembles the pieces into a running game:
//! - Participant registry with snapshot-iterate broadcast
//! - Round coordinator (question fan-out, first-correct arbitration,
//!   cooldown, round limit)
//! - Per-connection handler and the accept loop

pub mod registry;
pub mod coordinator;
pub mod handler;
pub mod server;

pub use registry::*;
pub use coordinator::*;
pub use handler::*;
pub use server::*;
