//! Demo/attract-mode steering
//!
//! Because one input moves the dots in opposite directions, their summed
//! position never changes. The best a player can do is split the error:
//! aim the left dot at its gap minus half the right lane's jitter.

use crate::Lane;
use crate::consts::*;
use crate::platform::input::Direction;
use crate::sim::collision::BAND_HALF;
use crate::sim::{GamePhase, GameState, Obstacle, TickInput};

/// Error (px) inside which the autopilot stops pushing
const DEADBAND: f32 = 0.75;

/// Lowest row the dots still have to get through
fn next_row(state: &GameState) -> Option<&Obstacle> {
    state
        .pool
        .items
        .iter()
        .filter(|o| !o.passed && o.y <= DOT_Y + BAND_HALF)
        .max_by(|a, b| a.y.total_cmp(&b.y))
}

/// Steering toward the next row's gaps
pub fn steer(state: &GameState) -> Direction {
    if state.phase != GamePhase::Alive {
        return Direction::Idle;
    }
    let Some(row) = next_row(state) else {
        return Direction::Idle;
    };

    let left_err = row.gap_center(Lane::Left) - state.left.x;
    let right_err = row.gap_center(Lane::Right) - state.right.x;
    // +1 moves the left dot right and the right dot left
    let want = (left_err - right_err) / 2.0;

    // Distance the dots will coast with no further input
    let friction = state.tuning.friction;
    let coast = if friction < 1.0 {
        state.left.vx * friction / (1.0 - friction)
    } else {
        0.0
    };
    let err = want - coast;

    if err > DEADBAND {
        Direction::Right
    } else if err < -DEADBAND {
        Direction::Left
    } else {
        Direction::Idle
    }
}

/// Full tick input for attract mode: steer while alive, restart when allowed
pub fn autopilot_input(state: &GameState) -> TickInput {
    TickInput {
        direction: steer(state),
        any_input: state.phase == GamePhase::Dead,
    }
}
