//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (mapped to [`Action`]s here, wired up by the browser entry point)
//! - Storage (`FileStore` native, `LocalStorageStore` on web)
//! - The headless native runner

#[cfg(not(target_arch = "wasm32"))]
pub mod native;

use crate::sim::Action;

/// Map a `KeyboardEvent.key` value to a game action
pub fn key_action(key: &str) -> Option<Action> {
    match key {
        " " | "ArrowUp" | "w" | "W" => Some(Action::Impulse),
        "p" | "P" => Some(Action::TogglePause),
        "r" | "R" => Some(Action::Restart),
        "Escape" | "q" | "Q" => Some(Action::Quit),
        _ => None,
    }
}

/// Whether the browser should suppress the key's default (page scroll)
pub fn swallows_key(key: &str) -> bool {
    matches!(key, " " | "ArrowUp")
}
