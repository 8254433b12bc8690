//! Data-driven game balance
//!
//! Every gameplay number that is not playfield geometry lives here, so a
//! host can ship alternate balance as JSON without rebuilding.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::DOT_R;
use crate::sim::Difficulty;

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Velocity gained per normalized frame of held input
    pub accel: f32,
    /// Velocity retained per normalized frame
    pub friction: f32,
    pub max_vel: f32,

    /// Difficulty curve
    pub difficulty: Difficulty,

    // === Scoring ===
    pub max_combo_multi: u32,
    pub points_per_level: u64,
    /// Distance from the gap edge that still counts as a near miss
    pub near_margin: f32,

    // === Ghost power-up ===
    pub ghost_min_level: u32,
    pub ghost_spawn_chance: f64,
    pub ghost_radius: f32,
    /// Scrolled distance per pool level (ghost eligibility)
    pub level_distance: f32,

    // === Flicker ===
    pub flicker_start_score: u64,
    pub flicker_interval_min_ms: f32,
    pub flicker_interval_max_ms: f32,
    pub flicker_duration_ms: f32,

    // === Death ===
    pub death_particles: usize,
    pub show_result_ms: f32,
    pub show_retry_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            accel: 0.6,
            friction: 0.82,
            max_vel: 7.0,

            difficulty: Difficulty::default(),

            max_combo_multi: 10,
            points_per_level: 100,
            near_margin: 6.0,

            ghost_min_level: 5,
            ghost_spawn_chance: 0.08,
            ghost_radius: 12.0,
            level_distance: 2000.0,

            flicker_start_score: 150,
            flicker_interval_min_ms: 3000.0,
            flicker_interval_max_ms: 8000.0,
            flicker_duration_ms: 180.0,

            death_particles: 24,
            show_result_ms: 350.0,
            show_retry_ms: 1000.0,
        }
    }
}

/// Rejected balance file
#[derive(Debug)]
pub enum TuningError {
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "tuning parse error: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

fn invalid(field: &'static str, reason: &'static str) -> TuningError {
    TuningError::Invalid { field, reason }
}

impl Tuning {
    /// Parse and validate a JSON balance file. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let d = &self.difficulty;
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(invalid("friction", "must be in (0, 1]"));
        }
        if !(self.accel >= 0.0 && self.max_vel > 0.0) {
            return Err(invalid("max_vel", "accel must be >= 0 and max_vel > 0"));
        }
        if !(d.gap_min > 2.0 * DOT_R) {
            return Err(invalid("difficulty.gap_min", "must leave room for a dot"));
        }
        if d.gap_initial < d.gap_min {
            return Err(invalid("difficulty.gap_initial", "must be >= gap_min"));
        }
        if !(d.spacing_min > 0.0) || d.spacing_initial < d.spacing_min {
            return Err(invalid("difficulty.spacing_min", "must be > 0 and <= spacing_initial"));
        }
        if d.gap_shrink < 0.0 || d.spacing_shrink < 0.0 || d.speed_growth < 0.0 {
            return Err(invalid("difficulty", "growth and shrink rates must be >= 0"));
        }
        if !(d.speed_initial > 0.0) {
            return Err(invalid("difficulty.speed_initial", "must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.ghost_spawn_chance) {
            return Err(invalid("ghost_spawn_chance", "must be in [0, 1]"));
        }
        if !(self.level_distance > 0.0) {
            return Err(invalid("level_distance", "must be > 0"));
        }
        if self.points_per_level == 0 {
            return Err(invalid("points_per_level", "must be > 0"));
        }
        if self.max_combo_multi == 0 {
            return Err(invalid("max_combo_multi", "must be > 0"));
        }
        if !(self.flicker_interval_min_ms >= 0.0)
            || self.flicker_interval_max_ms < self.flicker_interval_min_ms
        {
            return Err(invalid("flicker_interval_max_ms", "must be >= flicker_interval_min_ms"));
        }
        if !(self.flicker_duration_ms > 0.0) {
            return Err(invalid("flicker_duration_ms", "must be > 0"));
        }
        if self.show_retry_ms < self.show_result_ms {
            return Err(invalid("show_retry_ms", "must be >= show_result_ms"));
        }
        Ok(())
    }
}
