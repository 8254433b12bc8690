//! Post-death sequence: particle burst and timed result/retry cues

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::GameEvent;
use crate::Lane;
use crate::tuning::Tuning;

/// Particle velocity kept per normalized frame
pub const PARTICLE_DRAG: f32 = 0.97;
/// Life lost per normalized frame
pub const PARTICLE_FADE: f32 = 0.012;
pub const PARTICLE_SPEED_MIN: f32 = 1.0;
pub const PARTICLE_SPEED_MAX: f32 = 6.0;

/// A burst fragment (visual only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeathParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1 at spawn, dropped at 0
    pub life: f32,
    /// Colour follows the lane of the dot that died
    pub lane: Lane,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeathSequence {
    /// Lane whose dot hit the wall
    pub side: Lane,
    /// Time since death (ms)
    pub timer_ms: f32,
    pub particles: Vec<DeathParticle>,
    result_shown: bool,
    retry_shown: bool,
}

impl DeathSequence {
    /// Burst `count` particles radially from `origin`
    pub fn start(side: Lane, origin: Vec2, count: usize, rng: &mut Pcg32) -> Self {
        let particles = (0..count)
            .map(|_| {
                let angle = rng.random_range(0.0..std::f32::consts::TAU);
                let speed = rng.random_range(PARTICLE_SPEED_MIN..PARTICLE_SPEED_MAX);
                DeathParticle {
                    pos: origin,
                    vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                    life: 1.0,
                    lane: side,
                }
            })
            .collect();

        Self {
            side,
            timer_ms: 0.0,
            particles,
            result_shown: false,
            retry_shown: false,
        }
    }

    /// Advance particles and timers, raising each cue once
    pub fn update(
        &mut self,
        elapsed_ms: f32,
        dt: f32,
        tuning: &Tuning,
        events: &mut Vec<GameEvent>,
    ) {
        self.timer_ms += elapsed_ms;

        let drag = PARTICLE_DRAG.powf(dt);
        for p in &mut self.particles {
            p.pos += p.vel * dt;
            p.vel *= drag;
            p.life -= PARTICLE_FADE * dt;
        }
        self.particles.retain(|p| p.life > 0.0);

        if !self.result_shown && self.timer_ms > tuning.show_result_ms {
            self.result_shown = true;
            events.push(GameEvent::ShowResult);
        }
        if !self.retry_shown && self.timer_ms > tuning.show_retry_ms {
            self.retry_shown = true;
            events.push(GameEvent::ShowRetry);
        }
    }

    /// Restart input is honoured only once the retry prompt is up
    pub fn accepts_restart(&self) -> bool {
        self.retry_shown
    }

    pub fn result_shown(&self) -> bool {
        self.result_shown
    }

    /// Dark overlay fade-in
    pub fn overlay_alpha(&self) -> f32 {
        (self.timer_ms / 600.0).min(0.65)
    }

    /// Fade for the dot that survived
    pub fn survivor_fade(&self) -> f32 {
        (1.0 - self.timer_ms / 2000.0).max(0.3)
    }
}
