//! Round coordinator - lifecycle, arbitration fan-out, cooldown
//!
//! All inbound traffic funnels through `handle_line`, one call per line
//! per participant read loop. The arbitration itself lives in
//! `SharedRound`; this module turns its verdicts into messages: the
//! winner alone gets `CORRECT_s`, everyone gets the reveal, and after
//! the cooldown the next question goes out without any client asking.

use std::sync::Arc;

use quickfire_core::{QuestionBank, QuizConfig, SharedRound, Verdict};
use quickfire_wire::{ClientLine, ServerLine};

use crate::{Participant, Registry};

/// Owns the round state and drives the game
pub struct Coordinator {
    bank: QuestionBank,
    round: SharedRound,
    registry: Registry,
    config: QuizConfig,
}

impl Coordinator {
    pub fn new(bank: QuestionBank, config: QuizConfig) -> Self {
        Coordinator {
            round: SharedRound::new(&config),
            registry: Registry::new(),
            bank,
            config,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn round(&self) -> &SharedRound {
        &self.round
    }

    /// Dispatch one inbound line from a participant's read loop.
    /// Unrecognized lines are dropped without a wire response.
    pub fn handle_line(self: &Arc<Self>, participant: &Arc<Participant>, raw: &str) {
        match ClientLine::parse(raw) {
            Some(ClientLine::Start) => self.start_round(),
            Some(ClientLine::Answer(text)) => self.submit(participant, &text),
            None => {
                tracing::debug!(participant = %participant.id(), line = raw, "ignoring unrecognized line");
            }
        }
    }

    /// Open the next round, if one may start. Stamps every registered
    /// participant's assigned answer before broadcasting the question,
    /// both over the same snapshot. No-op while a question is live or
    /// after the round limit.
    pub fn start_round(self: &Arc<Self>) {
        let Some(entry) = self.round.try_start_round(&self.bank) else {
            return;
        };

        tracing::info!(
            round = self.round.rounds_started(),
            question = %entry.text,
            "round started"
        );

        for participant in self.registry.snapshot() {
            participant.assign_answer(Some(entry.answer.clone()));
            participant.send(ServerLine::Question(entry.text.clone()));
        }
    }

    /// Judge one submission. The losing side of the race is a plain
    /// wrong answer; only the winner advances the game.
    pub fn submit(self: &Arc<Self>, participant: &Arc<Participant>, text: &str) {
        match self.round.try_submit(text) {
            Verdict::Wrong => participant.send(ServerLine::Wrong),
            Verdict::Winner { answer } => self.resolve_round(participant, &answer),
        }
    }

    /// The winning submission's side effects: award, reveal to all,
    /// clear assignments, schedule the next round.
    fn resolve_round(self: &Arc<Self>, winner: &Arc<Participant>, answer: &str) {
        let points = QuizConfig::POINTS_PER_ROUND;
        let total = winner.add_points(points);
        winner.send(ServerLine::Correct(points));

        tracing::info!(
            winner = %winner.id(),
            round = self.round.rounds_started(),
            score = total,
            "round won"
        );

        let snapshot = self.registry.snapshot();
        for participant in &snapshot {
            // Echo the answer assigned when the question went out; a
            // participant that joined mid-round falls back to the
            // winning answer.
            let reveal = participant
                .assigned_answer()
                .unwrap_or_else(|| answer.to_string());
            participant.send(ServerLine::Reveal(reveal));
        }
        for participant in &snapshot {
            participant.assign_answer(None);
        }

        if self.round.is_game_over() {
            tracing::info!("round limit reached, no further questions");
            return;
        }

        // Cooldown runs on its own task holding no lock, so other
        // participants' read loops keep draining during the pause. The
        // round sits in its cooldown phase for the duration: the reveal
        // queued above reaches every participant before any start
        // request can be honored again.
        let coordinator = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(coordinator.config.cooldown).await;
            coordinator.round.end_cooldown();
            coordinator.start_round();
        });
    }
}
