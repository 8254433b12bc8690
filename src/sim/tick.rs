//! Per-frame simulation step
//!
//! Advances the run by the host's elapsed frame time. Physics is scaled by
//! the normalized timestep so the game plays the same at any frame rate.

use super::collision::{
    BAND_HALF, below_collision_band, dot_hits_wall, in_collision_band, is_near_miss,
    touches_pickup,
};
use super::death::DeathSequence;
use super::state::*;
use crate::Lane;
use crate::consts::*;
use crate::platform::input::Direction;
use crate::sanitize_elapsed;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Resolved steering direction
    pub direction: Direction,
    /// Any key or pointer is active (restart gate)
    pub any_input: bool,
}

/// Advance the game by `elapsed_ms` and return the events it raised.
///
/// Long frames are integrated as several substeps, none longer than one
/// normalized frame and none scrolling a row further than half the
/// collision band, so walls cannot skip past the dots.
pub fn tick(state: &mut GameState, input: &TickInput, elapsed_ms: f32) -> Vec<GameEvent> {
    let mut remaining = sanitize_elapsed(elapsed_ms);
    let run = state.run;

    loop {
        let step_ms = remaining.min(max_substep_ms(state));
        let dt = step_ms / FRAME_MS;
        match state.phase {
            GamePhase::Alive => tick_alive(state, input.direction, step_ms, dt),
            GamePhase::Dying | GamePhase::Dead => tick_dying(state, input, step_ms, dt),
        }
        remaining -= step_ms;
        // A restart begins the new run on the next host frame
        if remaining <= 0.0 || state.run != run {
            break;
        }
    }

    state.drain_events()
}

/// Floor on the substep length so absurd speeds still terminate
const MIN_SUBSTEP_MS: f32 = 0.5;

/// Longest substep the current scroll speed allows
fn max_substep_ms(state: &GameState) -> f32 {
    let speed = state.tuning.difficulty.speed(state.distance);
    if speed > BAND_HALF {
        (FRAME_MS * BAND_HALF / speed).max(MIN_SUBSTEP_MS)
    } else {
        FRAME_MS
    }
}

fn tick_alive(state: &mut GameState, direction: Direction, elapsed_ms: f32, dt: f32) {
    state.time_ticks += 1;

    // Mirrored control: one input pushes the dots in opposite directions
    let dv = direction.as_f32() * state.tuning.accel * dt;
    state.left.accelerate(dv);
    state.right.accelerate(-dv);
    state.left.integrate(Lane::Left, dt, &state.tuning);
    state.right.integrate(Lane::Right, dt, &state.tuning);

    state.left_trail.push(state.left.x);
    state.right_trail.push(state.right.x);

    state.speed = state.tuning.difficulty.speed(state.distance);
    let scroll = state.speed * dt;
    state.distance += scroll;
    state.pool.scroll(scroll, state.distance, &state.tuning);

    if let Some(lane) = evaluate_rows(state) {
        die(state, lane);
        return;
    }

    update_level(state);

    if state.score >= state.tuning.flicker_start_score
        && state.flicker.update(elapsed_ms, &mut state.fx_rng, &state.tuning)
        && state.score > FLICKER_SHAKE_SCORE
    {
        state.shake = state.shake.max(SHAKE_FLICKER);
    }

    decay_shake(state, SHAKE_DECAY_ALIVE, dt);
}

/// Collision, near-miss, pickup and scoring for every live row.
/// Returns the lane that hit a wall, if any.
fn evaluate_rows(state: &mut GameState) -> Option<Lane> {
    let GameState {
        tuning,
        pool,
        left,
        right,
        ghost_active,
        combo,
        max_combo,
        score,
        hi_score,
        new_best,
        shake,
        events,
        ..
    } = state;
    let dot_x = |lane: Lane| match lane {
        Lane::Left => left.x,
        Lane::Right => right.x,
    };

    for o in &mut pool.items {
        let in_band = in_collision_band(o.y);

        if in_band && !o.phased {
            for lane in [Lane::Left, Lane::Right] {
                if !dot_hits_wall(dot_x(lane), DOT_R, o.gap_center(lane), o.gap_w) {
                    continue;
                }
                if *ghost_active {
                    *ghost_active = false;
                    o.phased = true;
                    events.push(GameEvent::GhostConsumed { lane });
                    log::debug!("Ghost absorbed {lane:?} wall at y={}", o.y);
                    break;
                }
                return Some(lane);
            }
        }

        if in_band && !o.phased && !o.near_flagged {
            let near = [Lane::Left, Lane::Right].into_iter().any(|lane| {
                is_near_miss(dot_x(lane), DOT_R, o.gap_center(lane), o.gap_w, tuning.near_margin)
            });
            if near {
                o.near_flagged = true;
                *shake += SHAKE_NEAR_MISS;
                events.push(GameEvent::NearMiss);
            }
        }

        let row_y = o.y;
        if let Some(ghost) = o.uncollected_ghost_mut() {
            if touches_pickup(dot_x(ghost.lane), DOT_R, ghost.x, row_y, tuning.ghost_radius) {
                ghost.collected = true;
                *ghost_active = true;
                events.push(GameEvent::GhostPickup { lane: ghost.lane });
                log::debug!("Ghost collected in {:?} lane", ghost.lane);
            }
        }

        if !o.passed && below_collision_band(o.y) {
            o.passed = true;
            *combo += 1;
            *max_combo = (*max_combo).max(*combo);
            *score += u64::from((*combo).min(tuning.max_combo_multi));
            events.push(GameEvent::Pass {
                score: *score,
                combo: *combo,
            });

            if *score > *hi_score && !*new_best {
                *new_best = true;
                events.push(GameEvent::NewBest { score: *score });
            }
        }
    }

    None
}

fn update_level(state: &mut GameState) {
    let level = (state.score / state.tuning.points_per_level) as u32;
    if level > state.level {
        state.level = level;
        state.shake += SHAKE_LEVEL_UP;
        let theme = theme_for_level(level);
        log::info!("Level {} reached ({})", level + 1, theme.name);
        state.events.push(GameEvent::LevelUp {
            level,
            theme: theme.name,
        });
    }
}

/// Enter the dying phase after `lane`'s dot hit a wall
fn die(state: &mut GameState, lane: Lane) {
    state.phase = GamePhase::Dying;
    state.combo = 0;
    state.flicker.stop();
    state.shake += SHAKE_DEATH;
    log::info!(
        "Died on {lane:?} wall: score {} (max combo {}, level {})",
        state.score,
        state.max_combo,
        state.level + 1
    );
    state.events.push(GameEvent::Death {
        lane,
        score: state.score,
    });

    if state.score > state.hi_score {
        state.hi_score = state.score;
        log::info!("New best score {}", state.score);
        state.events.push(GameEvent::BestScore { score: state.score });
    }
    let reached = state.level + 1;
    if reached > state.hi_level {
        state.hi_level = reached;
        state.events.push(GameEvent::BestLevel { level: reached });
    }

    let origin = state.dot_position(lane);
    state.death = Some(DeathSequence::start(
        lane,
        origin,
        state.tuning.death_particles,
        &mut state.fx_rng,
    ));
}

fn tick_dying(state: &mut GameState, input: &TickInput, elapsed_ms: f32, dt: f32) {
    decay_shake(state, SHAKE_DECAY_DYING, dt);

    if let Some(death) = state.death.as_mut() {
        death.update(elapsed_ms, dt, &state.tuning, &mut state.events);
        if death.accepts_restart() {
            state.phase = GamePhase::Dead;
        }
    }

    if state.phase == GamePhase::Dead && input.any_input {
        state.restart();
    }
}

fn decay_shake(state: &mut GameState, decay: f32, dt: f32) {
    state.shake *= decay.powf(dt);
    if state.shake < 0.01 {
        state.shake = 0.0;
    }
}
