//! Unified keyboard + multi-touch input
//!
//! Many sources reduce to one steering value: -1 spreads the dots apart,
//! +1 gathers them, 0 leaves them coasting. Opposing inputs cancel.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Lane;
use crate::sim::TickInput;

/// Resolved steering direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i8)]
pub enum Direction {
    /// Left dot moves left, right dot moves right
    Left = -1,
    #[default]
    Idle = 0,
    /// Left dot moves right, right dot moves left
    Right = 1,
}

impl Direction {
    pub fn from_flags(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, false) => Direction::Left,
            (false, true) => Direction::Right,
            _ => Direction::Idle,
        }
    }

    #[inline]
    pub fn as_f32(self) -> f32 {
        self as i8 as f32
    }
}

/// Reduce a snapshot of held keys and pointer lanes to one direction
pub fn resolve(
    keyboard_left: bool,
    keyboard_right: bool,
    pointers: impl IntoIterator<Item = Lane>,
) -> Direction {
    let mut left = keyboard_left;
    let mut right = keyboard_right;
    for lane in pointers {
        match lane {
            Lane::Left => left = true,
            Lane::Right => right = true,
        }
    }
    Direction::from_flags(left, right)
}

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    /// Restart only
    Action,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code` / key name
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "KeyD" | "d" | "D" => Some(Key::Right),
            "Space" | " " | "Enter" => Some(Key::Action),
            _ => None,
        }
    }
}

/// Tracks held keys and live pointer contacts
#[derive(Debug, Clone, Default)]
pub struct InputResolver {
    left_key: bool,
    right_key: bool,
    action_key: bool,
    /// Lane each live pointer was last seen over
    pointers: BTreeMap<u32, Lane>,
}

impl InputResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_key(&mut self, key: Key, down: bool) {
        match key {
            Key::Left => self.left_key = down,
            Key::Right => self.right_key = down,
            Key::Action => self.action_key = down,
        }
    }

    pub fn pointer_down(&mut self, id: u32, x: f32) {
        self.pointers.insert(id, Lane::of_x(x));
    }

    /// Moves only matter for pointers that are down
    pub fn pointer_move(&mut self, id: u32, x: f32) {
        if let Some(lane) = self.pointers.get_mut(&id) {
            *lane = Lane::of_x(x);
        }
    }

    pub fn pointer_up(&mut self, id: u32) {
        self.pointers.remove(&id);
    }

    /// Drop everything (focus lost)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn direction(&self) -> Direction {
        resolve(self.left_key, self.right_key, self.pointers.values().copied())
    }

    /// Anything held at all, including cancelled-out pairs
    pub fn any_active(&self) -> bool {
        self.left_key || self.right_key || self.action_key || !self.pointers.is_empty()
    }

    pub fn tick_input(&self) -> TickInput {
        TickInput {
            direction: self.direction(),
            any_input: self.any_active(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{HALF, W};

    const NONE: [Lane; 0] = [];

    #[test]
    fn test_resolve_table() {
        assert_eq!(resolve(false, false, NONE), Direction::Idle);
        assert_eq!(resolve(true, false, NONE), Direction::Left);
        assert_eq!(resolve(false, true, NONE), Direction::Right);
        assert_eq!(resolve(true, true, NONE), Direction::Idle);
        assert_eq!(resolve(false, false, [Lane::Left]), Direction::Left);
        assert_eq!(resolve(true, false, [Lane::Right]), Direction::Idle);
        assert_eq!(resolve(false, false, [Lane::Right, Lane::Right]), Direction::Right);
    }

    #[test]
    fn test_direction_values() {
        assert_eq!(Direction::Left.as_f32(), -1.0);
        assert_eq!(Direction::Idle.as_f32(), 0.0);
        assert_eq!(Direction::Right.as_f32(), 1.0);
    }

    #[test]
    fn test_multi_touch() {
        let mut input = InputResolver::new();
        input.pointer_down(1, 50.0);
        assert_eq!(input.direction(), Direction::Left);

        input.pointer_down(2, W - 50.0);
        assert_eq!(input.direction(), Direction::Idle);
        assert!(input.any_active());

        input.pointer_up(1);
        assert_eq!(input.direction(), Direction::Right);

        // Sliding across the divider re-maps the pointer
        input.pointer_move(2, HALF - 1.0);
        assert_eq!(input.direction(), Direction::Left);

        input.pointer_up(2);
        assert_eq!(input.direction(), Direction::Idle);
        assert!(!input.any_active());
    }

    #[test]
    fn test_move_without_down_ignored() {
        let mut input = InputResolver::new();
        input.pointer_move(7, 10.0);
        assert_eq!(input.direction(), Direction::Idle);
        assert!(!input.any_active());
    }

    #[test]
    fn test_keys_and_action() {
        let mut input = InputResolver::new();
        input.set_key(Key::from_code("ArrowRight").unwrap(), true);
        assert_eq!(input.tick_input().direction, Direction::Right);

        input.set_key(Key::Right, false);
        input.set_key(Key::Action, true);
        let tick = input.tick_input();
        assert_eq!(tick.direction, Direction::Idle);
        assert!(tick.any_input);

        input.clear();
        assert!(!input.any_active());
        assert_eq!(Key::from_code("KeyQ"), None);
    }
}
