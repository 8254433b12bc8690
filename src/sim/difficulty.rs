//! Difficulty curve
//!
//! Pure functions of cumulative scrolled distance. Everything scales with
//! `sqrt(distance)` so difficulty climbs fast early and flattens later,
//! with hard floors on gap and spacing so a run never becomes impossible.

use serde::{Deserialize, Serialize};

use crate::consts::DOT_R;

/// Share of the free gap width the lanes may drift apart by
const OFFSET_GAP_SHARE: f32 = 0.7;
/// Lateral offset available at distance zero
const OFFSET_BASE: f32 = 3.0;

/// Difficulty curve parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Difficulty {
    pub gap_initial: f32,
    pub gap_min: f32,
    pub gap_shrink: f32,
    pub spacing_initial: f32,
    pub spacing_min: f32,
    pub spacing_shrink: f32,
    pub speed_initial: f32,
    pub speed_growth: f32,
    pub offset_growth: f32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            gap_initial: 72.0,
            gap_min: 36.0,
            gap_shrink: 0.13,
            spacing_initial: 210.0,
            spacing_min: 115.0,
            spacing_shrink: 0.34,
            speed_initial: 1.8,
            speed_growth: 0.012,
            offset_growth: 0.15,
        }
    }
}

#[inline]
fn root(distance: f32) -> f32 {
    distance.max(0.0).sqrt()
}

impl Difficulty {
    /// Gap width for rows spawned at this distance
    pub fn gap(&self, distance: f32) -> f32 {
        (self.gap_initial - root(distance) * self.gap_shrink).max(self.gap_min)
    }

    /// Vertical distance between consecutive rows
    pub fn spacing(&self, distance: f32) -> f32 {
        (self.spacing_initial - root(distance) * self.spacing_shrink).max(self.spacing_min)
    }

    /// Scroll speed in pixels per normalized frame
    pub fn speed(&self, distance: f32) -> f32 {
        self.speed_initial + root(distance) * self.speed_growth
    }

    /// How far the right gap may stray from the mirror of the left gap
    pub fn max_lateral_offset(&self, distance: f32) -> f32 {
        let room = (self.gap(distance) - 2.0 * DOT_R) * OFFSET_GAP_SHARE;
        room.min(OFFSET_BASE + root(distance) * self.offset_growth)
    }
}
