//! Platform abstraction layer
//!
//! Turns raw host signals into what the simulation consumes:
//! - Keys and pointer contacts into one steering direction
//! - Host frame timestamps into clamped elapsed time

pub mod input;
pub mod time;

pub use input::{Direction, InputResolver, Key};
pub use time::FrameClock;
