//! Server assembly - accept loop and participant wiring

use std::net::SocketAddr;
use std::sync::Arc;

use quickfire_core::{ParticipantIdAllocator, QuestionBank, QuizConfig, QuizResult};
use quickfire_transport::{start_writer_loop, Listener};

use crate::{handler, Coordinator, Participant};

/// The assembled quiz server
pub struct QuizServer {
    listener: Listener,
    coordinator: Arc<Coordinator>,
    ids: ParticipantIdAllocator,
}

impl QuizServer {
    /// Bind the listener; the bank has already been validated at load.
    pub async fn bind(addr: SocketAddr, bank: QuestionBank, config: QuizConfig) -> QuizResult<Self> {
        let listener = Listener::bind(addr).await?;
        tracing::info!(addr = %listener.local_addr(), questions = bank.len(), "quiz server listening");

        Ok(QuizServer {
            listener,
            coordinator: Arc::new(Coordinator::new(bank, config)),
            ids: ParticipantIdAllocator::new(),
        })
    }

    /// Local address, useful when bound to port 0
    pub fn local_addr(&self) -> SocketAddr {
        self.listener.local_addr()
    }

    pub fn coordinator(&self) -> &Arc<Coordinator> {
        &self.coordinator
    }

    /// Accept connections forever, one handler task per participant.
    pub async fn run(self) -> QuizResult<()> {
        loop {
            let (reader, writer, addr) = self.listener.accept().await?;
            let id = self.ids.allocate();

            let outbound = start_writer_loop(writer);
            let participant = Arc::new(Participant::new(id, outbound));
            self.coordinator.registry().add(Arc::clone(&participant));
            tracing::info!(participant = %id, %addr, "participant connected");

            tokio::spawn(handler::run_connection(
                Arc::clone(&self.coordinator),
                participant,
                reader,
                addr,
            ));
        }
    }
}
