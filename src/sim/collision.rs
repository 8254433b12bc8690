//! Collision tests between dots and obstacle rows
//!
//! Everything is one-dimensional along x, except the pickup test which uses
//! the true distance to the pickup centre.

use crate::consts::*;

/// Half-height of the vertical window in which a row can touch the dots
pub const BAND_HALF: f32 = WALL_H / 2.0 + DOT_R;

/// Row overlaps the dots' fixed y-row
#[inline]
pub fn in_collision_band(row_y: f32) -> bool {
    row_y > DOT_Y - BAND_HALF && row_y < DOT_Y + BAND_HALF
}

/// Row has moved fully below the dots
#[inline]
pub fn below_collision_band(row_y: f32) -> bool {
    row_y > DOT_Y + BAND_HALF
}

/// A dot hits the wall unless its span fits inside the gap (edges inclusive)
#[inline]
pub fn dot_hits_wall(dot_x: f32, dot_r: f32, gap_center: f32, gap_w: f32) -> bool {
    let half = gap_w / 2.0;
    !(dot_x - dot_r >= gap_center - half && dot_x + dot_r <= gap_center + half)
}

/// Dot is within `margin` of touching either gap edge
#[inline]
pub fn is_near_miss(dot_x: f32, dot_r: f32, gap_center: f32, gap_w: f32, margin: f32) -> bool {
    (dot_x - gap_center).abs() > gap_w / 2.0 - dot_r - margin
}

/// Dot at `(dot_x, DOT_Y)` overlaps a pickup of `radius` at `(x, y)`
#[inline]
pub fn touches_pickup(dot_x: f32, dot_r: f32, x: f32, y: f32, radius: f32) -> bool {
    let dx = dot_x - x;
    let dy = DOT_Y - y;
    let reach = radius + dot_r;
    dx * dx + dy * dy < reach * reach
}
