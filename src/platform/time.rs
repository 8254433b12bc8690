//! Host frame timing

use crate::sanitize_elapsed;

/// Converts host frame timestamps into elapsed milliseconds per tick
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed time since the previous frame, clamped for the simulation.
    /// The first frame after creation or `reset` reports zero.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let elapsed = match self.last_ms {
            Some(last) => (now_ms - last) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        sanitize_elapsed(elapsed)
    }

    /// Forget the last timestamp (e.g. after the page was hidden)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
