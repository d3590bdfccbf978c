//! Frame clock and driver
//!
//! Converts display-refresh callbacks into a normalized delta time where
//! `dt == 1.0` is one nominal 60 Hz frame, so per-tick increments are
//! frame-rate independent.

use crate::tuning::Tuning;

/// Tracks the previous callback time and normalizes elapsed time
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    nominal_frame_ms: f64,
}

impl FrameClock {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            last_ms: None,
            nominal_frame_ms: tuning.nominal_frame_ms,
        }
    }

    /// Anchor the clock so the next delta is measured from `now_ms`
    pub fn reset(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }

    /// Normalized time since the previous call (or since `reset`).
    ///
    /// Scales with the gap however long it is; a clock running backwards
    /// reports zero. The first call on an unanchored clock reports one
    /// nominal frame.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / self.nominal_frame_ms) as f32,
            None => 1.0,
        };
        self.last_ms = Some(now_ms);
        dt.max(0.0)
    }
}

/// Whether the driver delivers ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Stopped,
    Active,
}

/// Startable, cancelable source of normalized ticks.
///
/// The platform layer calls [`Driver::frame`] from its refresh callback;
/// a stopped driver returns `None` and has no side effects.
#[derive(Debug, Clone)]
pub struct Driver {
    clock: FrameClock,
    state: DriverState,
}

impl Driver {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            clock: FrameClock::new(tuning),
            state: DriverState::Stopped,
        }
    }

    pub fn start(&mut self, now_ms: f64) {
        self.clock.reset(now_ms);
        self.state = DriverState::Active;
        log::debug!("Driver started at {:.1}ms", now_ms);
    }

    pub fn cancel(&mut self) {
        if self.state == DriverState::Active {
            log::debug!("Driver cancelled");
        }
        self.state = DriverState::Stopped;
    }

    pub fn is_active(&self) -> bool {
        self.state == DriverState::Active
    }

    /// Delta for this refresh callback, or `None` once cancelled
    pub fn frame(&mut self, now_ms: f64) -> Option<f32> {
        match self.state {
            DriverState::Active => Some(self.clock.delta(now_ms)),
            DriverState::Stopped => None,
        }
    }
}
