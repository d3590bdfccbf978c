//! Best-score bridge
//!
//! A single durable integer under a fixed key, read at startup and written
//! once at the end of every run.

use crate::persistence::KeyValueStore;

/// The all-time best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore {
    best: u64,
}

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "fb_best";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Load from storage; absent or unparseable values read as 0
    pub fn load(store: &impl KeyValueStore) -> Self {
        let best = match store.get(Self::STORAGE_KEY) {
            Some(raw) => parse_score(&raw).unwrap_or_else(|| {
                log::warn!("Ignoring unparseable best score {:?}", raw);
                0
            }),
            None => 0,
        };
        log::info!("Best score: {}", best);
        Self { best }
    }

    pub fn get(&self) -> u64 {
        self.best
    }

    /// Fold a finished run into the best score and write it back.
    /// Returns true if the run set a new best.
    pub fn record(&mut self, store: &mut impl KeyValueStore, final_score: u64) -> bool {
        let is_new = final_score > self.best;
        self.best = self.best.max(final_score);
        if !store.set(Self::STORAGE_KEY, &self.best.to_string()) {
            log::warn!("Best score {} not persisted", self.best);
        }
        if is_new {
            log::info!("New best score: {}", self.best);
        }
        is_new
    }
}

/// Accepts plain integers, and finite non-negative decimals (truncated)
fn parse_score(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    raw.parse::<u64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v as u64)
    })
}
