//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only (gameplay and cosmetics on separate streams)
//! - Elapsed time is the only clock
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod death;
pub mod difficulty;
pub mod flicker;
pub mod obstacle;
pub mod state;
pub mod tick;

pub use death::{DeathParticle, DeathSequence};
pub use difficulty::Difficulty;
pub use flicker::Flicker;
pub use obstacle::{GhostPickup, Obstacle, ObstaclePool};
pub use state::{
    Dot, GameEvent, GamePhase, GameState, Snapshot, THEMES, Theme, Trail, theme_for_level,
};
pub use tick::{TickInput, tick};
