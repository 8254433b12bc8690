//! Presentation preferences
//!
//! These only scale the signals handed to the presentation layer. The
//! simulation underneath runs identically whatever they are set to.

use serde::{Deserialize, Serialize};

/// LocalStorage key for settings
#[allow(dead_code)]
const STORAGE_KEY: &str = "dual_settings";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Camera shake on near misses, level-ups and death
    pub screen_shake: bool,
    /// Screen flicker bursts at high scores
    pub flicker: bool,
    /// Dot trails
    pub trails: bool,
    /// Reduced motion (no shake, no flicker)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            flicker: true,
            trails: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective flicker (respects reduced_motion)
    pub fn effective_flicker(&self) -> bool {
        self.flicker && !self.reduced_motion
    }

    pub fn shake_amplitude(&self, shake: f32) -> f32 {
        if self.effective_screen_shake() { shake } else { 0.0 }
    }

    pub fn flicker_intensity(&self, phase: f32) -> f32 {
        if self.effective_flicker() { phase } else { 0.0 }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
