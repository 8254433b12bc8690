//! Best score / best level storage
//!
//! The simulation never blocks on storage. Stores swallow their own
//! failures: a failed read means "no record yet", a failed write is logged.

use crate::highscores::Bests;

/// Storage key (LocalStorage key on web, file stem on native)
pub const STORAGE_KEY: &str = "dual_bests";

/// Where best results live between sessions
pub trait BestStore {
    fn load(&mut self) -> Bests;
    fn save(&mut self, bests: &Bests);
}

/// Keeps bests for the lifetime of the process only
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub bests: Bests,
    /// Number of writes, for hosts and tests that care
    pub saves: usize,
}

impl MemoryStore {
    pub fn with(bests: Bests) -> Self {
        Self { bests, saves: 0 }
    }
}

impl BestStore for MemoryStore {
    fn load(&mut self) -> Bests {
        self.bests
    }

    fn save(&mut self, bests: &Bests) {
        self.bests = *bests;
        self.saves += 1;
    }
}

/// JSON file next to the binary (native only)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl BestStore for JsonFileStore {
    fn load(&mut self) -> Bests {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => {
                let bests = Bests::parse(&json);
                log::info!("Loaded bests {:?} from {}", bests, self.path.display());
                bests
            }
            Err(err) => {
                log::info!("No bests at {} ({err}), starting fresh", self.path.display());
                Bests::default()
            }
        }
    }

    fn save(&mut self, bests: &Bests) {
        if let Err(err) = std::fs::write(&self.path, bests.to_json()) {
            log::warn!("Could not save bests to {}: {err}", self.path.display());
        }
    }
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl BestStore for LocalStorageStore {
    fn load(&mut self) -> Bests {
        if let Some(storage) = Self::storage() {
            if let Ok(Some(json)) = storage.get_item(STORAGE_KEY) {
                let bests = Bests::parse(&json);
                log::info!("Loaded bests {:?}", bests);
                return bests;
            }
        }

        log::info!("No bests found, starting fresh");
        Bests::default()
    }

    fn save(&mut self, bests: &Bests) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(STORAGE_KEY, &bests.to_json()).is_err() {
                    log::warn!("LocalStorage rejected bests write");
                }
            }
            None => log::warn!("LocalStorage unavailable, bests not saved"),
        }
    }
}
