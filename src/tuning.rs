//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`] so a build can be rebalanced
//! from JSON without recompiling. Defaults mirror [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::KeyValueStore;
use crate::viewport::Viewport;

/// Gameplay constants, all in pixels and nominal frames unless noted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub lift: f32,
    pub avatar_x: f32,
    pub avatar_radius: f32,
    pub avatar_start_fraction: f32,
    pub ground_height: f32,
    pub obstacle_width: f32,
    pub gap_min: f32,
    pub gap_max: f32,
    pub gap_margin: f32,
    /// Milliseconds of wall-clock time between spawns
    pub spawn_interval_ms: f64,
    pub spawn_margin: f32,
    pub prune_margin: f32,
    pub base_speed: f32,
    pub speed_ramp: f32,
    /// Milliseconds per nominal frame
    pub nominal_frame_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            lift: LIFT,
            avatar_x: AVATAR_X,
            avatar_radius: AVATAR_RADIUS,
            avatar_start_fraction: AVATAR_START_FRACTION,
            ground_height: GROUND_HEIGHT,
            obstacle_width: OBSTACLE_WIDTH,
            gap_min: GAP_MIN,
            gap_max: GAP_MAX,
            gap_margin: GAP_MARGIN,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            spawn_margin: SPAWN_MARGIN,
            prune_margin: PRUNE_MARGIN,
            base_speed: BASE_SPEED,
            speed_ramp: SPEED_RAMP,
            nominal_frame_ms: NOMINAL_FRAME_MS,
        }
    }
}

impl Tuning {
    /// Store key holding a JSON override
    pub const STORAGE_KEY: &'static str = "flappy_tuning";

    /// Defaults, overridden by whatever the store holds under
    /// [`Tuning::STORAGE_KEY`]. A malformed override is ignored.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let Some(json) = store.get(Self::STORAGE_KEY) else {
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring malformed tuning override: {}", e);
                Self::default()
            }
        }
    }

    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Whether gap sampling never inverts its range on this viewport.
    /// Equal bounds are fine (a fixed gap, or a gap that exactly fills the
    /// space between the margins).
    ///
    /// A viewport that fails this check is a configuration error: the
    /// obstacle stream does not clamp, it samples from an inverted range.
    pub fn fits(&self, viewport: &Viewport) -> bool {
        viewport.ground_y(self) - 2.0 * self.gap_margin - self.gap_max >= 0.0
            && self.gap_max >= self.gap_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults_match_consts() {
        let t = Tuning::default();
        assert_eq!(t.gravity, 0.45);
        assert_eq!(t.lift, -8.8);
        assert_eq!(t.base_speed, 3.0);
        assert_eq!(t.spawn_interval_ms, 1400.0);
    }

    #[test]
    fn test_partial_json_override() {
        let t = Tuning::from_json(r#"{ "gravity": 0.5, "gap_min": 120.0 }"#).unwrap();
        assert_eq!(t.gravity, 0.5);
        assert_eq!(t.gap_min, 120.0);
        // Untouched fields keep their defaults
        assert_eq!(t.lift, LIFT);
        assert_eq!(t.obstacle_width, OBSTACLE_WIDTH);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(Tuning::from_json("{ gravity: }").is_err());
    }

    #[test]
    fn test_load_from_store() {
        let mut store = MemoryStore::new();
        assert_eq!(Tuning::load(&store), Tuning::default());

        store.set(Tuning::STORAGE_KEY, r#"{ "lift": -7.0 }"#);
        assert_eq!(Tuning::load(&store).lift, -7.0);

        store.set(Tuning::STORAGE_KEY, "not json");
        assert_eq!(Tuning::load(&store), Tuning::default());
    }

    #[test]
    fn test_fits_viewport() {
        let t = Tuning::default();
        assert!(t.fits(&Viewport::new(800.0, 600.0)));
        // 380 - 100 ground leaves exactly 2*40 + 200
        assert!(t.fits(&Viewport::new(800.0, 380.0)));
        assert!(!t.fits(&Viewport::new(800.0, 379.0)));
    }

    #[test]
    fn test_fixed_gap_fits() {
        let t = Tuning { gap_min: 170.0, gap_max: 170.0, ..Tuning::default() };
        assert!(t.fits(&Viewport::default()));

        let inverted = Tuning { gap_min: 180.0, gap_max: 170.0, ..Tuning::default() };
        assert!(!inverted.fits(&Viewport::default()));
    }
}
