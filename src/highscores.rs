//! Best score and best level
//!
//! The simulation reports candidates; whatever storage the host provides
//! keeps them between sessions.

use serde::{Deserialize, Serialize};

/// Best results across runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bests {
    /// Highest score
    #[serde(default)]
    pub score: u64,
    /// Highest 1-based level reached
    #[serde(default)]
    pub level: u32,
}

impl Bests {
    pub fn new(score: u64, level: u32) -> Self {
        Self { score, level }
    }

    /// Keep `score` if it beats the record. Returns true when it did.
    pub fn record_score(&mut self, score: u64) -> bool {
        if score > self.score {
            self.score = score;
            true
        } else {
            false
        }
    }

    /// Keep `level` if it beats the record. Returns true when it did.
    pub fn record_level(&mut self, level: u32) -> bool {
        if level > self.level {
            self.level = level;
            true
        } else {
            false
        }
    }

    /// Parse a stored value, treating anything unreadable as no record
    pub fn parse(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|err| {
            log::warn!("Unreadable best record ({err}), starting fresh");
            Self::default()
        })
    }

    pub fn to_json(&self) -> String {
        // A struct of two integers always serializes
        serde_json::to_string(self).unwrap_or_default()
    }
}
