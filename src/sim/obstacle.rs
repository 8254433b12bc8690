//! Obstacle rows and the pool that spawns, scrolls and culls them
//!
//! Each row is a pair of walls, one per lane, each with a single gap. The
//! right gap is a jittered mirror of the left one so both lanes present a
//! comparable challenge at the same height.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::Lane;
use crate::consts::*;
use crate::tuning::Tuning;

/// Seeding walks upward until rows are this far above the top edge
pub const SEED_TOP_Y: f32 = -200.0;
/// New rows are emitted while the spawn cursor is below this line
pub const SPAWN_TOP_Y: f32 = -60.0;
/// Rows at or below this line are dropped
pub const CULL_Y: f32 = H + 40.0;
/// Rows never sit closer together than one wall thickness
pub const MIN_SPACING: f32 = WALL_H;

/// Ghost power-up riding on an obstacle row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GhostPickup {
    pub x: f32,
    pub lane: Lane,
    pub collected: bool,
}

/// A row of paired gated walls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub y: f32,
    pub left_gap_x: f32,
    pub right_gap_x: f32,
    pub gap_w: f32,
    /// Already scored
    pub passed: bool,
    /// Near-miss already raised
    pub near_flagged: bool,
    /// A ghost was spent on this row; its walls no longer collide
    pub phased: bool,
    pub ghost: Option<GhostPickup>,
}

impl Obstacle {
    pub fn gap_center(&self, lane: Lane) -> f32 {
        match lane {
            Lane::Left => self.left_gap_x,
            Lane::Right => self.right_gap_x,
        }
    }

    pub fn uncollected_ghost_mut(&mut self) -> Option<&mut GhostPickup> {
        self.ghost.as_mut().filter(|g| !g.collected)
    }
}

fn row_spacing(distance: f32, tuning: &Tuning) -> f32 {
    tuning.difficulty.spacing(distance).max(MIN_SPACING)
}

/// Owns the live obstacle rows
#[derive(Debug, Clone)]
pub struct ObstaclePool {
    /// Live rows, bottom-most first
    pub items: Vec<Obstacle>,
    /// Where the next row above the current window will appear
    next_y: f32,
    rng: Pcg32,
}

impl ObstaclePool {
    pub fn new(seed: u64) -> Self {
        Self {
            items: Vec::new(),
            next_y: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn next_spawn_y(&self) -> f32 {
        self.next_y
    }

    /// Fill the window from `start_y` upward so the first frame already has rows
    pub fn seed(&mut self, start_y: f32, distance: f32, tuning: &Tuning) {
        let mut y = start_y;
        while y > SEED_TOP_Y {
            self.spawn(y, distance, tuning);
            y -= row_spacing(distance, tuning);
        }
        self.next_y = y;
        log::debug!("Seeded {} rows, next row at y={}", self.items.len(), self.next_y);
    }

    /// Emit one row at height `y` using the difficulty at `distance`
    pub fn spawn(&mut self, y: f32, distance: f32, tuning: &Tuning) {
        let d = &tuning.difficulty;
        let gap = d.gap(distance);

        let (lo, hi) = Lane::Left.gap_center_bounds(gap);
        let left_gap_x = if lo < hi {
            self.rng.random_range(lo..=hi)
        } else {
            HALF / 2.0
        };

        let mirror = W - left_gap_x;
        let max_off = d.max_lateral_offset(distance);
        let offset = if max_off > 0.0 {
            self.rng.random_range(-max_off..=max_off)
        } else {
            0.0
        };
        let (rlo, rhi) = Lane::Right.gap_center_bounds(gap);
        let right_gap_x = if rlo < rhi {
            (mirror + offset).clamp(rlo, rhi)
        } else {
            HALF + HALF / 2.0
        };

        let ghost = self.roll_ghost(distance, tuning).map(|lane| GhostPickup {
            x: match lane {
                Lane::Left => left_gap_x,
                Lane::Right => right_gap_x,
            },
            lane,
            collected: false,
        });
        if let Some(g) = &ghost {
            log::debug!("Ghost pickup spawned in {:?} lane at y={}", g.lane, y);
        }

        self.items.push(Obstacle {
            y,
            left_gap_x,
            right_gap_x,
            gap_w: gap,
            passed: false,
            near_flagged: false,
            phased: false,
            ghost,
        });
    }

    fn roll_ghost(&mut self, distance: f32, tuning: &Tuning) -> Option<Lane> {
        let level = (distance.max(0.0) / tuning.level_distance).floor() as u32;
        if level < tuning.ghost_min_level {
            return None;
        }
        if !self.rng.random_bool(tuning.ghost_spawn_chance) {
            return None;
        }
        Some(if self.rng.random_bool(0.5) {
            Lane::Left
        } else {
            Lane::Right
        })
    }

    /// Move every row down, emit new rows at the top, drop rows past the bottom
    pub fn scroll(&mut self, amount: f32, distance: f32, tuning: &Tuning) {
        for o in &mut self.items {
            o.y += amount;
        }

        self.next_y += amount;
        while self.next_y > SPAWN_TOP_Y {
            self.next_y -= row_spacing(distance, tuning);
            self.spawn(self.next_y, distance, tuning);
        }

        self.items.retain(|o| o.y < CULL_Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn seeded(seed: u64, distance: f32) -> (ObstaclePool, Tuning) {
        let tuning = Tuning::default();
        let mut pool = ObstaclePool::new(seed);
        pool.seed(DOT_Y - 250.0, distance, &tuning);
        (pool, tuning)
    }

    #[test]
    fn test_seed_fills_window() {
        let (pool, tuning) = seeded(1, 0.0);
        let spacing = tuning.difficulty.spacing(0.0);
        // 260, 50, -160 with spacing 210
        assert_eq!(pool.items.len(), 3);
        assert_eq!(pool.items[0].y, DOT_Y - 250.0);
        assert!((pool.items[1].y - (DOT_Y - 250.0 - spacing)).abs() < 1e-3);
        assert!(pool.next_spawn_y() <= SEED_TOP_Y);
    }

    #[test]
    fn test_scroll_spawns_and_culls() {
        let (mut pool, tuning) = seeded(7, 0.0);
        let mut distance = 0.0;
        for _ in 0..2000 {
            distance += 2.0;
            pool.scroll(2.0, distance, &tuning);
            assert!(pool.items.iter().all(|o| o.y < CULL_Y));
            assert!(pool.next_spawn_y() <= SPAWN_TOP_Y);
        }
        assert!(!pool.items.is_empty());
    }

    #[test]
    fn test_existing_rows_not_resized() {
        let (mut pool, tuning) = seeded(3, 0.0);
        let before: Vec<f32> = pool.items.iter().map(|o| o.gap_w).collect();
        assert_eq!(before.len(), 3);
        pool.scroll(400.0, 250_000.0, &tuning);
        assert_eq!(pool.items.len(), 4);
        for (o, w) in pool.items.iter().zip(before) {
            assert_eq!(o.gap_w, w);
        }
        // the row spawned by this scroll uses the narrower gap
        assert_eq!(pool.items[3].gap_w, tuning.difficulty.gap(250_000.0));
        assert!(pool.items[3].gap_w < pool.items[0].gap_w);
    }

    #[test]
    fn test_same_seed_same_rows() {
        let (a, _) = seeded(42, 500.0);
        let (b, _) = seeded(42, 500.0);
        assert_eq!(a.items, b.items);
    }

    #[test]
    fn test_no_ghost_below_min_level() {
        let tuning = Tuning {
            ghost_spawn_chance: 1.0,
            ..Tuning::default()
        };
        let mut pool = ObstaclePool::new(9);
        let below = tuning.level_distance * tuning.ghost_min_level as f32 - 1.0;
        for i in 0..50 {
            pool.spawn(-(i as f32), below, &tuning);
        }
        assert!(pool.items.iter().all(|o| o.ghost.is_none()));
    }

    #[test]
    fn test_ghost_sits_in_gap_center() {
        let tuning = Tuning {
            ghost_spawn_chance: 1.0,
            ..Tuning::default()
        };
        let mut pool = ObstaclePool::new(9);
        let eligible = tuning.level_distance * tuning.ghost_min_level as f32;
        for i in 0..50 {
            pool.spawn(-(i as f32), eligible, &tuning);
        }
        for o in &pool.items {
            let g = o.ghost.expect("chance 1.0 always spawns");
            assert_eq!(g.x, o.gap_center(g.lane));
            assert!(!g.collected);
        }
    }

    #[test]
    fn test_zero_spacing_still_terminates() {
        let mut tuning = Tuning::default();
        tuning.difficulty.spacing_initial = 0.0;
        tuning.difficulty.spacing_min = 0.0;
        let mut pool = ObstaclePool::new(4);
        pool.seed(DOT_Y - 250.0, 0.0, &tuning);
        assert!(pool.items.len() > 1);
        let step = pool.items[0].y - pool.items[1].y;
        assert!((step - MIN_SPACING).abs() < 1e-3);

        pool.scroll(100.0, 0.0, &tuning);
        assert!(pool.next_spawn_y() <= SPAWN_TOP_Y);
    }

    #[test]
    fn test_collected_ghost_is_hidden() {
        let mut pool = ObstaclePool::new(1);
        let tuning = Tuning::default();
        pool.spawn(0.0, 0.0, &tuning);
        let row = &mut pool.items[0];
        row.ghost = Some(GhostPickup {
            x: row.left_gap_x,
            lane: Lane::Left,
            collected: false,
        });
        assert!(row.uncollected_ghost_mut().is_some());
        if let Some(g) = row.ghost.as_mut() {
            g.collected = true;
        }
        assert!(row.uncollected_ghost_mut().is_none());
    }

    proptest! {
        #[test]
        fn gaps_stay_inside_lanes(seed in any::<u64>(), distance in 0.0f32..2.0e6) {
            let tuning = Tuning::default();
            let mut pool = ObstaclePool::new(seed);
            for i in 0..20 {
                pool.spawn(-(i as f32) * 100.0, distance, &tuning);
            }
            for o in &pool.items {
                let half = o.gap_w / 2.0;
                prop_assert!(o.left_gap_x - half >= WALL_PAD - 1e-3);
                prop_assert!(o.left_gap_x + half <= HALF - WALL_PAD + 1e-3);
                prop_assert!(o.right_gap_x - half >= HALF + WALL_PAD - 1e-3);
                prop_assert!(o.right_gap_x + half <= W - WALL_PAD + 1e-3);
                let jitter = (o.right_gap_x - (W - o.left_gap_x)).abs();
                prop_assert!(jitter <= tuning.difficulty.max_lateral_offset(distance) + 1e-3);
            }
        }
    }
}
