//! Visual flicker scheduler
//!
//! Two states: idle (phase 0, counting toward the next burst) and decaying
//! (phase falling from 1 to 0). Presentation-only; never touches collision.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flicker {
    /// Intensity in [0, 1]
    pub phase: f32,
    /// Idle time accumulated toward the next burst (ms)
    pub elapsed_ms: f32,
    /// Idle time required before the next burst (ms)
    pub next_delay_ms: f32,
}

pub fn random_delay(rng: &mut Pcg32, tuning: &Tuning) -> f32 {
    let (lo, hi) = (tuning.flicker_interval_min_ms, tuning.flicker_interval_max_ms);
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

impl Flicker {
    pub fn new(rng: &mut Pcg32, tuning: &Tuning) -> Self {
        Self {
            phase: 0.0,
            elapsed_ms: 0.0,
            next_delay_ms: random_delay(rng, tuning),
        }
    }

    /// Advance by `elapsed_ms`. Returns true on the tick a new burst starts.
    pub fn update(&mut self, elapsed_ms: f32, rng: &mut Pcg32, tuning: &Tuning) -> bool {
        if self.phase > 0.0 {
            self.phase = (self.phase - elapsed_ms / tuning.flicker_duration_ms).max(0.0);
            return false;
        }

        self.elapsed_ms += elapsed_ms;
        if self.elapsed_ms >= self.next_delay_ms {
            self.phase = 1.0;
            self.elapsed_ms = 0.0;
            self.next_delay_ms = random_delay(rng, tuning);
            return true;
        }
        false
    }

    /// Cut any burst in progress (on death)
    pub fn stop(&mut self) {
        self.phase = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.phase > 0.0
    }
}
