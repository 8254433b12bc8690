//! Host-facing driver
//!
//! Owns one `GameState` together with its collaborators: the input
//! resolver, the frame clock and the best-result store. Best candidates
//! raised by the simulation are written through as soon as they appear.

use crate::highscores::Bests;
use crate::persistence::BestStore;
use crate::platform::{FrameClock, InputResolver};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

pub struct Session<S: BestStore> {
    state: GameState,
    input: InputResolver,
    clock: FrameClock,
    settings: Settings,
    store: S,
    bests: Bests,
}

impl<S: BestStore> Session<S> {
    /// Start a session, reading prior bests from `store`
    pub fn new(seed: u64, tuning: Tuning, settings: Settings, mut store: S) -> Self {
        let bests = store.load();
        Self {
            state: GameState::new(seed, tuning, bests),
            input: InputResolver::new(),
            clock: FrameClock::new(),
            settings,
            store,
            bests,
        }
    }

    /// Advance using a host frame timestamp
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let elapsed = self.clock.advance(now_ms);
        self.step(elapsed)
    }

    /// Advance by `elapsed_ms` with the tracked keys and pointers
    pub fn step(&mut self, elapsed_ms: f32) -> Vec<GameEvent> {
        let input = self.input.tick_input();
        self.step_with(&input, elapsed_ms)
    }

    /// Advance with an explicit input (autopilot, replays, tests)
    pub fn step_with(&mut self, input: &TickInput, elapsed_ms: f32) -> Vec<GameEvent> {
        let events = tick(&mut self.state, input, elapsed_ms);
        self.persist(&events);
        events
    }

    fn persist(&mut self, events: &[GameEvent]) {
        let mut changed = false;
        for event in events {
            match *event {
                GameEvent::BestScore { score } => changed |= self.bests.record_score(score),
                GameEvent::BestLevel { level } => changed |= self.bests.record_level(level),
                _ => {}
            }
        }
        if changed {
            log::debug!("Saving bests {:?}", self.bests);
            self.store.save(&self.bests);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot(&self.settings)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input_mut(&mut self) -> &mut InputResolver {
        &mut self.input
    }

    /// Page hidden or focus lost: release everything and skip the gap
    pub fn suspend(&mut self) {
        self.input.clear();
        self.clock.reset();
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn bests(&self) -> Bests {
        self.bests
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
