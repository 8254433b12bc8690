//! Game state and core simulation types
//!
//! One `GameState` per session. Restart rebuilds everything except the
//! best-known score and level.

use std::collections::VecDeque;

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::death::{DeathParticle, DeathSequence};
use super::flicker::Flicker;
use super::obstacle::{Obstacle, ObstaclePool};
use crate::Lane;
use crate::consts::*;
use crate::highscores::Bests;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Pool rows are seeded starting this far above the dots
pub const SEED_OFFSET: f32 = 250.0;
/// PCG stream for cosmetic randomness (flicker, particles)
const FX_STREAM: u64 = 0xF11C;

/// Shake impulses
pub const SHAKE_NEAR_MISS: f32 = 3.0;
pub const SHAKE_LEVEL_UP: f32 = 6.0;
pub const SHAKE_DEATH: f32 = 10.0;
pub const SHAKE_FLICKER: f32 = 2.0;
/// Flicker bursts also shake once the score passes this
pub const FLICKER_SHAKE_SCORE: u64 = 400;
/// Shake kept per normalized frame
pub const SHAKE_DECAY_ALIVE: f32 = 0.85;
pub const SHAKE_DECAY_DYING: f32 = 0.92;

/// Direction hints are gone by this score
pub const HINT_FADE_SCORE: f32 = 50.0;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Dots are moving and walls are scoring
    Alive,
    /// Wall hit: physics frozen, burst playing
    Dying,
    /// Retry prompt is up; any input restarts
    Dead,
}

/// Discrete one-shot events for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Pass { score: u64, combo: u32 },
    NearMiss,
    GhostPickup { lane: Lane },
    /// Active ghost absorbed a wall hit
    GhostConsumed { lane: Lane },
    LevelUp { level: u32, theme: &'static str },
    /// First time this run the score beats the best known
    NewBest { score: u64 },
    Death { lane: Lane, score: u64 },
    /// Candidate values for the storage collaborator
    BestScore { score: u64 },
    BestLevel { level: u32 },
    ShowResult,
    ShowRetry,
    Restart { run: u32 },
}

/// A lane's colour scheme, advanced every level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub name: &'static str,
    pub bg: u32,
    pub grid: u32,
    pub wall: u32,
    pub edge: u32,
    pub divider: u32,
}

const fn theme(
    name: &'static str,
    bg: u32,
    grid: u32,
    wall: u32,
    edge: u32,
    divider: u32,
) -> Theme {
    Theme {
        name,
        bg,
        grid,
        wall,
        edge,
        divider,
    }
}

pub const THEMES: [Theme; 10] = [
    theme("void", 0x05050a, 0x08081a, 0x151528, 0x2a2a4a, 0x0e0e1c),
    theme("abyss", 0x050a12, 0x081a2a, 0x102040, 0x1a3a6a, 0x0a1828),
    theme("inferno", 0x0f0505, 0x1a0808, 0x281515, 0x4a2a2a, 0x1c0e0e),
    theme("toxic", 0x050a05, 0x081a08, 0x152815, 0x2a4a2a, 0x0e1c0e),
    theme("plasma", 0x0a050f, 0x140a1a, 0x201530, 0x3a2a5a, 0x140e1c),
    theme("solar", 0x0f0a05, 0x1a1408, 0x282015, 0x4a3a2a, 0x1c180e),
    theme("frost", 0x050a0f, 0x081420, 0x152035, 0x2a3a5a, 0x0e141c),
    theme("blood", 0x0a0308, 0x18061a, 0x280a20, 0x4a1a3a, 0x1c0818),
    theme("neon", 0x030a0f, 0x061828, 0x0a2540, 0x1a4a6a, 0x081420),
    theme("ember", 0x0f0803, 0x1a1206, 0x28200a, 0x4a381a, 0x1c1408),
];

/// Themes cycle once every level has been seen
pub fn theme_for_level(level: u32) -> &'static Theme {
    &THEMES[level as usize % THEMES.len()]
}

/// One of the two player dots
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dot {
    pub x: f32,
    pub vx: f32,
}

impl Dot {
    /// Resting position: middle of the lane
    pub fn centered(lane: Lane) -> Self {
        let x = match lane {
            Lane::Left => HALF / 2.0,
            Lane::Right => HALF + HALF / 2.0,
        };
        Self { x, vx: 0.0 }
    }

    pub fn accelerate(&mut self, delta_v: f32) {
        self.vx += delta_v;
    }

    /// Friction, velocity cap, integration and lane clamp for one step
    pub fn integrate(&mut self, lane: Lane, dt: f32, tuning: &Tuning) {
        self.vx *= tuning.friction.powf(dt);
        self.vx = self.vx.clamp(-tuning.max_vel, tuning.max_vel);
        self.x += self.vx * dt;
        let (lo, hi) = lane.dot_bounds();
        self.x = self.x.clamp(lo, hi);
    }
}

/// Fixed-length x history for trail rendering
#[derive(Debug, Clone, Default)]
pub struct Trail(VecDeque<f32>);

impl Trail {
    pub fn push(&mut self, x: f32) {
        self.0.push_back(x);
        while self.0.len() > TRAIL_LEN {
            self.0.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Oldest first
    pub fn to_vec(&self) -> Vec<f32> {
        self.0.iter().copied().collect()
    }
}

/// Seed for the `run`-th run of a session
pub fn run_seed(seed: u64, run: u32) -> u64 {
    seed.wrapping_add((run as u64).wrapping_mul(2654435761))
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed; each run derives its own from it
    pub seed: u64,
    /// Runs started this session (0-based)
    pub run: u32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,

    pub left: Dot,
    pub right: Dot,
    pub left_trail: Trail,
    pub right_trail: Trail,

    /// Cumulative scrolled distance
    pub distance: f32,
    pub speed: f32,
    pub pool: ObstaclePool,

    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    /// Theme level index, `score / points_per_level`
    pub level: u32,
    pub ghost_active: bool,
    pub flicker: Flicker,
    pub shake: f32,

    /// Best known score and 1-based level, carried across runs
    pub hi_score: u64,
    pub hi_level: u32,
    /// `NewBest` already raised this run
    pub new_best: bool,

    pub death: Option<DeathSequence>,

    pub(crate) fx_rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, tuning: Tuning, bests: Bests) -> Self {
        if let Err(err) = tuning.validate() {
            log::warn!("Running with invalid tuning: {err}");
        }
        Self::for_run(seed, 0, tuning, bests)
    }

    fn for_run(seed: u64, run: u32, tuning: Tuning, bests: Bests) -> Self {
        let run_seed = run_seed(seed, run);
        let mut fx_rng = Pcg32::new(run_seed, FX_STREAM);
        let flicker = Flicker::new(&mut fx_rng, &tuning);
        let mut pool = ObstaclePool::new(run_seed);
        pool.seed(DOT_Y - SEED_OFFSET, 0.0, &tuning);
        log::info!("Run {run} started (seed {run_seed:#x}, best {})", bests.score);

        Self {
            seed,
            run,
            phase: GamePhase::Alive,
            time_ticks: 0,
            left: Dot::centered(Lane::Left),
            right: Dot::centered(Lane::Right),
            left_trail: Trail::default(),
            right_trail: Trail::default(),
            distance: 0.0,
            speed: tuning.difficulty.speed(0.0),
            pool,
            score: 0,
            combo: 0,
            max_combo: 0,
            level: 0,
            ghost_active: false,
            flicker,
            shake: 0.0,
            hi_score: bests.score,
            hi_level: bests.level,
            new_best: false,
            death: None,
            fx_rng,
            events: Vec::new(),
            tuning,
        }
    }

    /// Tear down the run and start a fresh one, keeping the bests
    pub fn restart(&mut self) {
        let run = self.run + 1;
        let events = std::mem::take(&mut self.events);
        *self = Self::for_run(self.seed, run, self.tuning.clone(), self.bests());
        self.events = events;
        self.events.push(GameEvent::Restart { run });
    }

    pub fn bests(&self) -> Bests {
        Bests {
            score: self.hi_score,
            level: self.hi_level,
        }
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn dot(&self, lane: Lane) -> &Dot {
        match lane {
            Lane::Left => &self.left,
            Lane::Right => &self.right,
        }
    }

    /// Score multiplier for the next pass
    pub fn multiplier(&self) -> u32 {
        self.combo.min(self.tuning.max_combo_multi)
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self, settings: &Settings) -> Snapshot {
        let (left_trail, right_trail) = if settings.trails {
            (self.left_trail.to_vec(), self.right_trail.to_vec())
        } else {
            (Vec::new(), Vec::new())
        };
        let death = self.death.as_ref();
        Snapshot {
            tick: self.time_ticks,
            run: self.run,
            phase: self.phase,
            dot_y: DOT_Y,
            left_x: self.left.x,
            right_x: self.right.x,
            left_trail,
            right_trail,
            obstacles: self.pool.items.clone(),
            distance: self.distance,
            speed: self.speed,
            score: self.score,
            combo: self.combo,
            multiplier: self.multiplier(),
            max_combo: self.max_combo,
            level: self.level,
            theme: theme_for_level(self.level),
            ghost_active: self.ghost_active,
            flicker: settings.flicker_intensity(self.flicker.phase),
            shake: settings.shake_amplitude(self.shake),
            hint_alpha: (1.0 - self.score as f32 / HINT_FADE_SCORE).max(0.0),
            hi_score: self.hi_score,
            hi_level: self.hi_level,
            new_best: self.new_best,
            dead_side: death.map(|d| d.side),
            death_timer_ms: death.map(|d| d.timer_ms),
            particles: death.map(|d| d.particles.clone()).unwrap_or_default(),
            overlay_alpha: death.map_or(0.0, |d| d.overlay_alpha()),
            survivor_fade: death.map_or(1.0, |d| d.survivor_fade()),
        }
    }

    pub(crate) fn dot_position(&self, lane: Lane) -> Vec2 {
        Vec2::new(self.dot(lane).x, DOT_Y)
    }
}

/// Per-frame view of the simulation
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub run: u32,
    pub phase: GamePhase,
    pub dot_y: f32,
    pub left_x: f32,
    pub right_x: f32,
    pub left_trail: Vec<f32>,
    pub right_trail: Vec<f32>,
    pub obstacles: Vec<Obstacle>,
    pub distance: f32,
    pub speed: f32,
    pub score: u64,
    pub combo: u32,
    pub multiplier: u32,
    pub max_combo: u32,
    pub level: u32,
    pub theme: &'static Theme,
    pub ghost_active: bool,
    pub flicker: f32,
    pub shake: f32,
    pub hint_alpha: f32,
    pub hi_score: u64,
    pub hi_level: u32,
    pub new_best: bool,
    pub dead_side: Option<Lane>,
    pub death_timer_ms: Option<f32>,
    pub particles: Vec<DeathParticle>,
    pub overlay_alpha: f32,
    pub survivor_fade: f32,
}
