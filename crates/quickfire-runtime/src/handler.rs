//! Per-connection handler - one read loop per participant
//!
//! The loop blocks for inbound lines and feeds them to the coordinator.
//! Clean close and transport error leave through the same exit, so
//! deregistration runs exactly once either way, and a failure on this
//! connection never touches other participants or the live round.

use std::net::SocketAddr;
use std::sync::Arc;

use quickfire_transport::LineReader;

use crate::{Coordinator, Participant};

/// Run one participant's read loop to completion, then deregister.
pub async fn run_connection(
    coordinator: Arc<Coordinator>,
    participant: Arc<Participant>,
    mut reader: LineReader,
    addr: SocketAddr,
) {
    loop {
        match reader.next_line().await {
            Ok(Some(line)) => coordinator.handle_line(&participant, &line),
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(participant = %participant.id(), %addr, "read failed: {}", e);
                break;
            }
        }
    }

    coordinator.registry().remove(participant.id());
    tracing::info!(
        participant = %participant.id(),
        %addr,
        score = participant.score(),
        "participant disconnected"
    );
}
