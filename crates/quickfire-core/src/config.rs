//! Quiz configuration

use std::time::Duration;

/// Quiz configuration
#[derive(Clone, Debug)]
pub struct QuizConfig {
    /// Total number of rounds per game
    pub total_rounds: u32,
    /// Pause between a round resolving and the next question going out
    pub cooldown: Duration,
}

impl Default for QuizConfig {
    fn default() -> Self {
        QuizConfig {
            total_rounds: 5,
            cooldown: Duration::from_secs(3),
        }
    }
}

impl QuizConfig {
    /// Points awarded to the winning submission of a round
    pub const POINTS_PER_ROUND: u32 = 1;
}
