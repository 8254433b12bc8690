//! Dual - two dots, one mind
//!
//! A two-lane reflex arcade game: one directional input steers two linked
//! dots in mirrored opposite directions through scrolling gated walls.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, scoring, death)
//! - `platform`: Input reduction and frame timing
//! - `persistence`: Best score / best level storage
//! - `session`: Host-facing driver tying the simulation to input and storage
//! - `tuning`: Data-driven game balance

pub mod autopilot;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use highscores::Bests;
pub use session::Session;
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Playfield geometry constants
pub mod consts {
    /// Playfield dimensions
    pub const W: f32 = 400.0;
    pub const H: f32 = 640.0;
    pub const HALF: f32 = W / 2.0;

    /// Dots sit on a fixed row near the bottom
    pub const DOT_R: f32 = 9.0;
    pub const DOT_Y: f32 = H - 130.0;
    /// Extra inset between a dot and its lane edges
    pub const LANE_PAD: f32 = 2.0;
    pub const TRAIL_LEN: usize = 10;

    /// Wall thickness (vertical extent of an obstacle row)
    pub const WALL_H: f32 = 14.0;
    /// Minimum distance between a gap and the outer lane edge
    pub const WALL_PAD: f32 = 8.0;

    /// Milliseconds in one normalized frame (60 Hz)
    pub const FRAME_MS: f32 = 16.667;
    /// Longest elapsed time a single tick will integrate
    pub const MAX_ELAPSED_MS: f32 = 100.0;
}

use consts::*;

/// One of the two halves of the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Lane {
    Left,
    Right,
}

impl Lane {
    /// Lane containing horizontal position `x`
    #[inline]
    pub fn of_x(x: f32) -> Self {
        if x < HALF { Lane::Left } else { Lane::Right }
    }

    /// Horizontal bounds a dot centre may occupy in this lane
    #[inline]
    pub fn dot_bounds(self) -> (f32, f32) {
        match self {
            Lane::Left => (DOT_R + LANE_PAD, HALF - DOT_R - LANE_PAD),
            Lane::Right => (HALF + DOT_R + LANE_PAD, W - DOT_R - LANE_PAD),
        }
    }

    /// Valid range for a gap centre of width `gap` in this lane
    #[inline]
    pub fn gap_center_bounds(self, gap: f32) -> (f32, f32) {
        let m = gap / 2.0 + WALL_PAD;
        match self {
            Lane::Left => (m, HALF - m),
            Lane::Right => (HALF + m, W - m),
        }
    }
}

/// Convert elapsed milliseconds to the normalized timestep used by physics.
///
/// Negative and non-finite inputs clamp to zero; long stalls clamp to
/// `MAX_ELAPSED_MS`.
#[inline]
pub fn normalized_dt(elapsed_ms: f32) -> f32 {
    sanitize_elapsed(elapsed_ms) / FRAME_MS
}

#[inline]
pub fn sanitize_elapsed(elapsed_ms: f32) -> f32 {
    if elapsed_ms.is_finite() {
        elapsed_ms.clamp(0.0, MAX_ELAPSED_MS)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_of_x() {
        assert_eq!(Lane::of_x(0.0), Lane::Left);
        assert_eq!(Lane::of_x(HALF - 0.01), Lane::Left);
        assert_eq!(Lane::of_x(HALF), Lane::Right);
        assert_eq!(Lane::of_x(W), Lane::Right);
    }

    #[test]
    fn test_dot_bounds_mirror() {
        let (l0, l1) = Lane::Left.dot_bounds();
        let (r0, r1) = Lane::Right.dot_bounds();
        assert!((W - l1 - r0).abs() < 1e-4);
        assert!((W - l0 - r1).abs() < 1e-4);
        assert!(l0 >= DOT_R);
        assert!(l1 <= HALF - DOT_R);
    }

    #[test]
    fn test_normalized_dt_clamps() {
        assert_eq!(normalized_dt(-5.0), 0.0);
        assert_eq!(normalized_dt(f32::NAN), 0.0);
        assert!((normalized_dt(FRAME_MS) - 1.0).abs() < 1e-6);
        assert!((normalized_dt(10_000.0) - MAX_ELAPSED_MS / FRAME_MS).abs() < 1e-4);
    }
}
