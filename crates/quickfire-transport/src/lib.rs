//! Quickfire Transport Layer - TCP with newline framing
//!
//! This crate provides:
//! - TCP listening and connecting
//! - Line-framed read/write halves
//! - A background writer loop per connection

pub mod tcp;

pub use tcp::*;
