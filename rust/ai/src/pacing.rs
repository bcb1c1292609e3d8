//! Presentation pacing for automated seats.
//!
//! The engine itself never sleeps. A front end that wants opponents to
//! appear to think drives them one turn at a time through [`Autoplayer`]
//! and waits out the returned delay before rendering the next state.

use std::time::Duration;

use holdem_engine::engine::{Engine, TurnReport};
use holdem_engine::errors::GameError;
use rand::{Rng, RngCore};

use crate::AIOpponent;

/// Uniform "thinking" time, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinkDelay {
    pub min: Duration,
    pub max: Duration,
}

impl Default for ThinkDelay {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(1000),
            max: Duration::from_millis(2000),
        }
    }
}

impl ThinkDelay {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    pub fn sample(&self, rng: &mut dyn RngCore) -> Duration {
        if self.min >= self.max {
            return self.min;
        }
        rng.random_range(self.min..=self.max)
    }
}

/// One automated turn together with how long to pause before showing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacedTurn {
    pub report: TurnReport,
    pub delay: Duration,
}

/// Drives automated seats one turn per call.
pub struct Autoplayer {
    ai: Box<dyn AIOpponent>,
    delay: Option<ThinkDelay>,
}

impl Autoplayer {
    pub fn new(ai: Box<dyn AIOpponent>) -> Self {
        Self {
            ai,
            delay: Some(ThinkDelay::default()),
        }
    }

    /// No pauses; for tests and simulations.
    pub fn instant(ai: Box<dyn AIOpponent>) -> Self {
        Self { ai, delay: None }
    }

    pub fn with_delay(mut self, delay: ThinkDelay) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn policy(&self) -> &dyn AIOpponent {
        self.ai.as_ref()
    }

    /// Plays the pending automated turn, if any. The delay is drawn from the
    /// engine's RNG before the decision so a seeded session stays
    /// reproducible with or without pacing.
    pub fn step(&self, engine: &mut Engine) -> Result<Option<PacedTurn>, GameError> {
        let mut delay = Duration::ZERO;
        let report = engine.play_automated_turn(|view, rng| {
            if let Some(think) = self.delay {
                delay = think.sample(rng);
            }
            self.ai.get_action(view, rng)
        })?;
        Ok(report.map(|report| {
            tracing::debug!(
                player_id = report.player_id,
                policy = self.ai.name(),
                delay_ms = delay.as_millis() as u64,
                "automated turn"
            );
            PacedTurn { report, delay }
        }))
    }
}
