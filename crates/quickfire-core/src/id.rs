//! Identity types for the quiz server
//!
//! Participants are identified by a 64-bit id handed out at accept time;
//! the id never travels on the wire, it only keys the registry and logs.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Participant identity - unique for the lifetime of the process
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ParticipantId(pub u64);

impl ParticipantId {
    #[inline]
    pub fn new(id: u64) -> Self {
        ParticipantId(id)
    }
}

impl fmt::Debug for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Participant({})", self.0)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Process-wide allocator for participant ids
#[derive(Debug, Default)]
pub struct ParticipantIdAllocator {
    next: AtomicU64,
}

impl ParticipantIdAllocator {
    pub fn new() -> Self {
        ParticipantIdAllocator::default()
    }

    pub fn allocate(&self) -> ParticipantId {
        ParticipantId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}
