//! Browser bindings
//!
//! The page owns the canvas, the event listeners and the animation loop.
//! It forwards raw input here and reads back JSON snapshots and events.

use wasm_bindgen::prelude::*;

use crate::persistence::LocalStorageStore;
use crate::platform::Key;
use crate::session::Session;
use crate::settings::Settings;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) returns Err; keeping the first logger is fine
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Dual starting...");
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        log::error!("Failed to serialize: {err}");
        String::from("null")
    })
}

#[wasm_bindgen]
pub struct DualGame {
    session: Session<LocalStorageStore>,
}

#[wasm_bindgen]
impl DualGame {
    /// New game. `tuning_json` may be empty for the default balance.
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: &str) -> Result<DualGame, JsValue> {
        let tuning = if tuning_json.trim().is_empty() {
            Tuning::default()
        } else {
            Tuning::from_json(tuning_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };

        let entropy = (js_sys::Math::random() * u32::MAX as f64) as u64;
        let seed = (js_sys::Date::now() as u64) ^ (entropy << 32);
        log::info!("Seed {seed:#x}");

        Ok(Self {
            session: Session::new(seed, tuning, Settings::load(), LocalStorageStore),
        })
    }

    /// Advance to the `requestAnimationFrame` timestamp. Returns the events as JSON.
    pub fn frame(&mut self, now_ms: f64) -> String {
        let events = self.session.frame(now_ms);
        to_json(&events)
    }

    pub fn snapshot(&self) -> String {
        to_json(&self.session.snapshot())
    }

    /// Keyboard event by `KeyboardEvent.code`. Returns false for keys the game ignores.
    pub fn key(&mut self, code: &str, down: bool) -> bool {
        match Key::from_code(code) {
            Some(key) => {
                self.session.input_mut().set_key(key, down);
                true
            }
            None => false,
        }
    }

    pub fn pointer_down(&mut self, id: u32, x: f32) {
        self.session.input_mut().pointer_down(id, x);
    }

    pub fn pointer_move(&mut self, id: u32, x: f32) {
        self.session.input_mut().pointer_move(id, x);
    }

    pub fn pointer_up(&mut self, id: u32) {
        self.session.input_mut().pointer_up(id);
    }

    /// Window blur or tab hidden
    pub fn blur(&mut self) {
        self.session.suspend();
    }

    pub fn settings(&self) -> String {
        to_json(self.session.settings())
    }

    /// Replace settings from JSON (missing fields fall back to defaults) and persist them
    pub fn set_settings(&mut self, json: &str) -> Result<(), JsValue> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        settings.save();
        self.session.set_settings(settings);
        Ok(())
    }
}
