//! Participant registry - who is connected right now
//!
//! The registry is shared between the coordinator (broadcasts) and every
//! connection handler (add self on connect, remove self on disconnect).
//! Broadcasts iterate a snapshot taken under the read lock, so a
//! participant disconnecting mid-broadcast can neither crash the
//! broadcast nor deadlock the coordinator.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use quickfire_core::ParticipantId;
use quickfire_transport::OutboundSender;
use quickfire_wire::ServerLine;

/// One connected participant
pub struct Participant {
    id: ParticipantId,
    outbound: OutboundSender,
    /// The round's answer as of the moment the question was sent to this
    /// participant; echoed back in the reveal, cleared when the round
    /// resolves. `None` outside a round or for mid-round joiners.
    assigned_answer: Mutex<Option<String>>,
    /// Running score tally; the wire still carries the fixed per-round award
    score: AtomicU32,
}

impl Participant {
    pub fn new(id: ParticipantId, outbound: OutboundSender) -> Self {
        Participant {
            id,
            outbound,
            assigned_answer: Mutex::new(None),
            score: AtomicU32::new(0),
        }
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    /// Queue one message for this participant. A closed queue means the
    /// connection is going away; its own read loop handles the cleanup,
    /// so the error is dropped here.
    pub fn send(&self, line: ServerLine) {
        let _ = self.outbound.send(line);
    }

    pub fn assign_answer(&self, answer: Option<String>) {
        *self.assigned_answer.lock() = answer;
    }

    pub fn assigned_answer(&self) -> Option<String> {
        self.assigned_answer.lock().clone()
    }

    /// Add to the running tally, returning the new total
    pub fn add_points(&self, points: u32) -> u32 {
        self.score.fetch_add(points, Ordering::Relaxed) + points
    }

    pub fn score(&self) -> u32 {
        self.score.load(Ordering::Relaxed)
    }
}

/// Registry of live participants
#[derive(Default)]
pub struct Registry {
    participants: RwLock<Vec<Arc<Participant>>>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    pub fn add(&self, participant: Arc<Participant>) {
        self.participants.write().push(participant);
    }

    /// Remove by id; a no-op if the participant is already gone
    pub fn remove(&self, id: ParticipantId) -> bool {
        let mut participants = self.participants.write();
        let before = participants.len();
        participants.retain(|p| p.id() != id);
        participants.len() != before
    }

    /// Snapshot of the current membership for iteration
    pub fn snapshot(&self) -> Vec<Arc<Participant>> {
        self.participants.read().clone()
    }

    pub fn len(&self) -> usize {
        self.participants.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.read().is_empty()
    }
}
