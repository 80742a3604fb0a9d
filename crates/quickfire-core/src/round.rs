//! Round state - the single live-question record and its arbitration
//!
//! The whole round record lives behind one mutex; every transition
//! decides and moves inside one critical section, so two participants
//! racing the same correct answer can never both win: whichever
//! submission takes the lock first closes the round, and every later
//! submission sees it closed. The winner lands in `Cooldown`, not
//! `Idle`, so a start request racing the resolution cannot open the
//! next round before the reveal fan-out is done and the pause is over.

use std::collections::HashSet;

use parking_lot::Mutex;
use rand::Rng;

use crate::{QuestionBank, QuestionEntry, QuizConfig};

/// Where the round machine currently is
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundPhase {
    /// No question outstanding; a start request will be honored
    Idle,
    /// A question is outstanding; `answer` is the accepted text
    Live { answer: String },
    /// A round just resolved: the reveal fan-out and the fixed pause
    /// happen in this phase, and start requests are not honored until
    /// `end_cooldown` moves back to `Idle`
    Cooldown,
    /// The configured number of rounds has resolved
    GameOver,
}

/// Outcome of one answer submission
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// This submission won the round; carries the accepted answer text
    /// for the reveal broadcast
    Winner { answer: String },
    /// Wrong text, or right text that lost the race / arrived late
    Wrong,
}

impl Verdict {
    pub fn is_winner(&self) -> bool {
        matches!(self, Verdict::Winner { .. })
    }
}

#[derive(Debug)]
struct RoundInner {
    phase: RoundPhase,
    /// Indices already asked in the current no-repeat cycle
    used: HashSet<usize>,
    /// Questions issued so far this game
    rounds_started: u32,
}

/// Shared round record - owned by the coordinator, hit concurrently by
/// every participant's read loop
#[derive(Debug)]
pub struct SharedRound {
    inner: Mutex<RoundInner>,
    total_rounds: u32,
}

impl SharedRound {
    pub fn new(config: &QuizConfig) -> Self {
        SharedRound {
            inner: Mutex::new(RoundInner {
                phase: RoundPhase::Idle,
                used: HashSet::new(),
                rounds_started: 0,
            }),
            total_rounds: config.total_rounds,
        }
    }

    /// Try to open a new round.
    ///
    /// Honored only while idle and under the round limit; concurrent
    /// start requests while a question is live are no-ops. On success
    /// the selected entry is returned for broadcast and its answer is
    /// already installed as the live one.
    pub fn try_start_round(&self, bank: &QuestionBank) -> Option<QuestionEntry> {
        let mut inner = self.inner.lock();

        if inner.phase != RoundPhase::Idle {
            return None;
        }
        if inner.rounds_started >= self.total_rounds {
            inner.phase = RoundPhase::GameOver;
            return None;
        }

        let index = Self::pick_unused(&mut inner.used, bank.len());
        let entry = bank
            .get(index)
            .expect("selection index within bank bounds")
            .clone();

        inner.phase = RoundPhase::Live {
            answer: entry.answer.clone(),
        };
        inner.rounds_started += 1;

        Some(entry)
    }

    /// Judge one answer submission.
    ///
    /// The text check and the live-phase check share the critical
    /// section: at most one submission per round can observe `Live` with
    /// matching text, and that submission also closes the round before
    /// releasing the lock. Everyone else gets `Wrong`, including correct
    /// text that arrived after the winner.
    pub fn try_submit(&self, text: &str) -> Verdict {
        let mut inner = self.inner.lock();

        let answer = match &inner.phase {
            RoundPhase::Live { answer } if answers_match(text, answer) => answer.clone(),
            _ => return Verdict::Wrong,
        };

        inner.phase = if inner.rounds_started >= self.total_rounds {
            RoundPhase::GameOver
        } else {
            RoundPhase::Cooldown
        };
        Verdict::Winner { answer }
    }

    /// End the between-rounds pause, making start requests honorable
    /// again. Returns false outside `Cooldown`, so a stray call (or a
    /// game that ended meanwhile) changes nothing.
    pub fn end_cooldown(&self) -> bool {
        let mut inner = self.inner.lock();
        if inner.phase != RoundPhase::Cooldown {
            return false;
        }
        inner.phase = RoundPhase::Idle;
        true
    }

    /// Is a question currently outstanding?
    pub fn is_live(&self) -> bool {
        matches!(self.inner.lock().phase, RoundPhase::Live { .. })
    }

    /// Has the game run out of rounds?
    pub fn is_game_over(&self) -> bool {
        self.inner.lock().phase == RoundPhase::GameOver
    }

    /// Questions issued so far
    pub fn rounds_started(&self) -> u32 {
        self.inner.lock().rounds_started
    }

    /// Draw a uniformly random unused index, resetting the no-repeat
    /// cycle once every index has been asked. Rejection sampling, as the
    /// bank is small and the retry loop terminates almost surely.
    fn pick_unused(used: &mut HashSet<usize>, bank_len: usize) -> usize {
        debug_assert!(bank_len > 0);

        if used.len() == bank_len {
            used.clear();
        }

        let mut rng = rand::thread_rng();
        loop {
            let index = rng.gen_range(0..bank_len);
            if used.insert(index) {
                return index;
            }
        }
    }
}

/// Case-insensitive answer comparison
fn answers_match(submitted: &str, accepted: &str) -> bool {
    submitted.to_lowercase() == accepted.to_lowercase()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;

    use super::*;

    fn bank_of(n: usize) -> QuestionBank {
        let entries = (0..n)
            .map(|i| QuestionEntry::new(format!("q{}", i), format!("a{}", i)))
            .collect();
        QuestionBank::new(entries).unwrap()
    }

    fn config(total_rounds: u32) -> QuizConfig {
        QuizConfig {
            total_rounds,
            ..Default::default()
        }
    }

    #[test]
    fn test_start_is_idempotent_while_live() {
        let bank = bank_of(3);
        let round = SharedRound::new(&config(5));

        assert!(round.try_start_round(&bank).is_some());
        assert!(round.try_start_round(&bank).is_none());
        assert_eq!(round.rounds_started(), 1);
    }

    #[test]
    fn test_submit_while_idle_is_wrong() {
        let round = SharedRound::new(&config(5));
        assert_eq!(round.try_submit("anything"), Verdict::Wrong);
    }

    #[test]
    fn test_case_insensitive_match() {
        let bank = QuestionBank::new(vec![QuestionEntry::new("capital?", "Paris")]).unwrap();
        let round = SharedRound::new(&config(5));

        round.try_start_round(&bank).unwrap();
        assert_eq!(
            round.try_submit("pArIs"),
            Verdict::Winner {
                answer: "Paris".to_string()
            }
        );
    }

    #[test]
    fn test_second_correct_submission_is_wrong() {
        let bank = bank_of(1);
        let round = SharedRound::new(&config(5));

        let entry = round.try_start_round(&bank).unwrap();
        assert!(round.try_submit(&entry.answer).is_winner());
        // Round already closed; textually correct no longer counts
        assert_eq!(round.try_submit(&entry.answer), Verdict::Wrong);
    }

    #[test]
    fn test_wrong_text_leaves_round_live() {
        let bank = bank_of(1);
        let round = SharedRound::new(&config(5));

        round.try_start_round(&bank).unwrap();
        assert_eq!(round.try_submit("nope"), Verdict::Wrong);
        assert!(round.is_live());
    }

    #[test]
    fn test_round_limit_reached() {
        let bank = bank_of(2);
        let round = SharedRound::new(&config(5));

        for _ in 0..5 {
            let entry = round.try_start_round(&bank).unwrap();
            assert!(round.try_submit(&entry.answer).is_winner());
            round.end_cooldown();
        }

        assert!(round.is_game_over());
        assert!(round.try_start_round(&bank).is_none());
        assert_eq!(round.rounds_started(), 5);
    }

    #[test]
    fn test_start_during_cooldown_is_ignored() {
        let bank = bank_of(2);
        let round = SharedRound::new(&config(5));

        let entry = round.try_start_round(&bank).unwrap();
        assert!(round.try_submit(&entry.answer).is_winner());

        // Resolved but still cooling down: starts are not honored
        assert!(round.try_start_round(&bank).is_none());
        assert_eq!(round.rounds_started(), 1);

        assert!(round.end_cooldown());
        assert!(round.try_start_round(&bank).is_some());
    }

    #[test]
    fn test_end_cooldown_only_from_cooldown() {
        let bank = bank_of(1);
        let round = SharedRound::new(&config(5));

        assert!(!round.end_cooldown()); // idle
        round.try_start_round(&bank).unwrap();
        assert!(!round.end_cooldown()); // live
        assert!(round.is_live());
    }

    #[test]
    fn test_no_repeat_until_exhaustion() {
        let bank = bank_of(4);
        let round = SharedRound::new(&config(100));

        // First cycle: all four questions, no repeats
        let mut seen = HashSet::new();
        for _ in 0..4 {
            let entry = round.try_start_round(&bank).unwrap();
            assert!(seen.insert(entry.text.clone()), "repeat within cycle");
            round.try_submit(&entry.answer);
            round.end_cooldown();
        }

        // Exhausted: the used-set resets and the next draw succeeds
        assert!(round.try_start_round(&bank).is_some());
    }

    #[test]
    fn test_concurrent_correct_submissions_single_winner() {
        let bank = bank_of(1);
        let round = Arc::new(SharedRound::new(&config(5)));
        let entry = round.try_start_round(&bank).unwrap();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let round = Arc::clone(&round);
                let answer = entry.answer.clone();
                std::thread::spawn(move || round.try_submit(&answer))
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|v| v.is_winner())
            .count();

        assert_eq!(winners, 1);
    }

    proptest! {
        /// Within any no-repeat cycle every index comes up exactly once,
        /// for any bank size and any number of full cycles.
        #[test]
        fn prop_selection_cycles_cover_bank(bank_len in 1usize..12, cycles in 1u32..4) {
            let bank = bank_of(bank_len);
            let round = SharedRound::new(&config(u32::MAX));

            for _ in 0..cycles {
                let mut seen = HashSet::new();
                for _ in 0..bank_len {
                    let entry = round.try_start_round(&bank).unwrap();
                    prop_assert!(seen.insert(entry.text.clone()));
                    prop_assert!(round.try_submit(&entry.answer).is_winner());
                    prop_assert!(round.end_cooldown());
                }
            }
        }

        /// However many racers submit the correct answer, exactly one wins.
        #[test]
        fn prop_single_winner_per_round(racers in 1usize..32) {
            let bank = bank_of(1);
            let round = Arc::new(SharedRound::new(&config(u32::MAX)));
            let entry = round.try_start_round(&bank).unwrap();

            let handles: Vec<_> = (0..racers)
                .map(|_| {
                    let round = Arc::clone(&round);
                    let answer = entry.answer.clone();
                    std::thread::spawn(move || round.try_submit(&answer))
                })
                .collect();

            let winners = handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|v| v.is_winner())
                .count();

            prop_assert_eq!(winners, 1);
        }
    }
}
