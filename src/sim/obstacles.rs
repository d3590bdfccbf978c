//! Obstacle stream: spawning, scrolling and retiring gated obstacles
//!
//! Obstacles are kept oldest-first. Everything scrolls at the same speed, so
//! the oldest obstacle is always the leftmost and removal only ever happens
//! at the front.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::Obstacle;
use crate::tuning::Tuning;
use crate::viewport::Viewport;

#[derive(Debug, Clone)]
pub struct ObstacleStream {
    obstacles: VecDeque<Obstacle>,
    /// Wall-clock time of the last spawn (or of the run start)
    last_spawn_ms: f64,
    rng: Pcg32,
}

impl ObstacleStream {
    pub fn new(seed: u64) -> Self {
        Self {
            obstacles: VecDeque::new(),
            last_spawn_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Drop every obstacle and restart the spawn timer at `now_ms`
    pub fn reset(&mut self, now_ms: f64) {
        self.obstacles.clear();
        self.last_spawn_ms = now_ms;
    }

    pub fn last_spawn_ms(&self) -> f64 {
        self.last_spawn_ms
    }

    /// Whether the spawn interval has elapsed
    pub fn spawn_due(&self, now_ms: f64, tuning: &Tuning) -> bool {
        now_ms - self.last_spawn_ms > tuning.spawn_interval_ms
    }

    /// Append a new obstacle at the far edge and restart the spawn timer.
    ///
    /// After the viewport narrows, the far edge can be left of an obstacle
    /// still in flight; the new one then starts level with the youngest so
    /// the sequence stays ordered.
    ///
    /// Gap size is uniform in `[gap_min, gap_max)`, and the gap top is
    /// uniform in `[gap_margin, ground_y - gap_margin - gap)`. A viewport too
    /// short for that range (see [`Tuning::fits`]) is a precondition
    /// violation; the range is not clamped.
    pub fn spawn(&mut self, now_ms: f64, tuning: &Tuning, viewport: &Viewport) -> Obstacle {
        debug_assert!(tuning.fits(viewport), "viewport too short for obstacle gaps");

        self.last_spawn_ms = now_ms;
        let gap = self.sample(tuning.gap_min, tuning.gap_max);
        let top = self.sample(
            tuning.gap_margin,
            viewport.ground_y(tuning) - tuning.gap_margin - gap,
        );
        let spawn_x = viewport.spawn_x(tuning);
        let x = self.obstacles.back().map_or(spawn_x, |last| last.x.max(spawn_x));
        let obstacle = Obstacle {
            x,
            top,
            gap,
            passed: false,
        };
        self.obstacles.push_back(obstacle);
        log::trace!("Spawned obstacle top={:.1} gap={:.1}", top, gap);
        obstacle
    }

    fn sample(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.rng.random::<f32>() * (hi - lo)
    }

    /// Scroll every obstacle left by `speed * dt`
    pub fn advance(&mut self, dt: f32, speed: f32) {
        let dx = speed * dt;
        for obstacle in &mut self.obstacles {
            obstacle.x -= dx;
        }
    }

    /// Remove obstacles whose trailing edge is past the left prune boundary.
    /// Returns how many were removed.
    pub fn prune(&mut self, tuning: &Tuning) -> usize {
        let boundary = -tuning.prune_margin;
        let mut removed = 0;
        while self
            .obstacles
            .front()
            .is_some_and(|o| o.trailing_edge(tuning.obstacle_width) < boundary)
        {
            self.obstacles.pop_front();
            removed += 1;
        }
        removed
    }

    /// Mark newly passed obstacles and return how many there were
    pub fn mark_passed(&mut self, avatar_x: f32, width: f32) -> u64 {
        let mut passed = 0;
        for obstacle in &mut self.obstacles {
            if !obstacle.passed && obstacle.trailing_edge(width) < avatar_x {
                obstacle.passed = true;
                passed += 1;
            }
        }
        passed
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Insert a hand-built obstacle at the young end (tests and tooling).
    /// Callers must keep the sequence ordered by `x`.
    pub fn push(&mut self, obstacle: Obstacle) {
        debug_assert!(self.obstacles.back().is_none_or(|last| last.x <= obstacle.x));
        self.obstacles.push_back(obstacle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn setup() -> (Tuning, Viewport) {
        (Tuning::default(), Viewport::new(800.0, 600.0))
    }

    #[test]
    fn test_spawn_geometry_in_range() {
        let (tuning, vp) = setup();
        let mut stream = ObstacleStream::new(42);
        for i in 0..500 {
            let o = stream.spawn(i as f64, &tuning, &vp);
            assert_eq!(o.x, 810.0);
            assert!(!o.passed);
            assert!(o.gap >= tuning.gap_min && o.gap < tuning.gap_max);
            assert!(o.top >= tuning.gap_margin);
            // Gap always fully above the ground with margin
            assert!(o.bottom_top() <= vp.ground_y(&tuning) - tuning.gap_margin);
        }
    }

    #[test]
    fn test_spawn_due_strictly_after_interval() {
        let (tuning, vp) = setup();
        let mut stream = ObstacleStream::new(1);
        stream.reset(1000.0);
        assert!(!stream.spawn_due(2400.0, &tuning));
        assert!(stream.spawn_due(2400.5, &tuning));
        stream.spawn(2400.5, &tuning, &vp);
        assert_eq!(stream.last_spawn_ms(), 2400.5);
        assert!(!stream.spawn_due(2401.0, &tuning));
    }

    #[test]
    fn test_same_seed_same_obstacles() {
        let (tuning, vp) = setup();
        let mut a = ObstacleStream::new(99);
        let mut b = ObstacleStream::new(99);
        for i in 0..10 {
            assert_eq!(
                a.spawn(i as f64, &tuning, &vp),
                b.spawn(i as f64, &tuning, &vp)
            );
        }
    }

    #[test]
    fn test_prune_from_front_only() {
        let (tuning, _) = setup();
        let mut stream = ObstacleStream::new(0);
        for x in [-95.0, -90.0, -89.0, 300.0] {
            stream.push(Obstacle { x, top: 100.0, gap: 150.0, passed: true });
        }
        // -95 + 80 = -15 and -90 + 80 = -10: only the first is past -10
        assert_eq!(stream.prune(&tuning), 1);
        assert_eq!(stream.len(), 3);
        assert_eq!(stream.iter().next().unwrap().x, -90.0);
    }

    #[test]
    fn test_spawn_after_resize() {
        let tuning = Tuning::default();
        let mut stream = ObstacleStream::new(7);
        stream.spawn(0.0, &tuning, &Viewport::new(1600.0, 900.0));

        // Narrower: the far edge (410) is left of the obstacle in flight
        stream.advance(1.0, 3.0);
        let narrow = stream.spawn(1500.0, &tuning, &Viewport::new(400.0, 900.0));
        assert_eq!(narrow.x, 1607.0);
        let xs: Vec<f32> = stream.iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![1607.0, 1607.0]);

        // Once the far edge is clear again, spawns use the current width
        stream.advance(100.0, 3.0);
        let later = stream.spawn(3000.0, &tuning, &Viewport::new(1400.0, 900.0));
        assert_eq!(later.x, 1410.0);
        assert!(stream.iter().map(|o| o.x).collect::<Vec<_>>().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_mark_passed_once() {
        let (tuning, _) = setup();
        let mut stream = ObstacleStream::new(0);
        stream.push(Obstacle { x: 30.0, top: 100.0, gap: 150.0, passed: false });
        stream.push(Obstacle { x: 35.0, top: 100.0, gap: 150.0, passed: false });
        stream.push(Obstacle { x: 200.0, top: 100.0, gap: 150.0, passed: false });

        assert_eq!(stream.mark_passed(tuning.avatar_x, tuning.obstacle_width), 2);
        assert_eq!(stream.mark_passed(tuning.avatar_x, tuning.obstacle_width), 0);
    }

    proptest! {
        #[test]
        fn prop_advance_keeps_order(
            seed in any::<u64>(),
            steps in prop::collection::vec((0.0f32..6.0, 3.0f32..10.0), 1..200),
        ) {
            let (tuning, vp) = setup();
            let mut stream = ObstacleStream::new(seed);
            let mut now = 0.0;
            for (dt, speed) in steps {
                now += dt as f64 * tuning.nominal_frame_ms;
                if stream.spawn_due(now, &tuning) {
                    stream.spawn(now, &tuning, &vp);
                }
                stream.advance(dt, speed);
                stream.prune(&tuning);

                let xs: Vec<f32> = stream.iter().map(|o| o.x).collect();
                prop_assert!(xs.windows(2).all(|w| w[0] <= w[1]));
            }
        }

        #[test]
        fn prop_resizes_keep_order(
            seed in any::<u64>(),
            steps in prop::collection::vec((0.5f32..3.0, 200.0f32..2000.0), 1..300),
        ) {
            let tuning = Tuning::default();
            let mut stream = ObstacleStream::new(seed);
            let mut now = 0.0;
            for (dt, width) in steps {
                let vp = Viewport::new(width, 600.0);
                now += dt as f64 * tuning.nominal_frame_ms * 20.0;
                if stream.spawn_due(now, &tuning) {
                    stream.spawn(now, &tuning, &vp);
                }
                stream.advance(dt, tuning.base_speed);
                stream.prune(&tuning);

                let xs: Vec<f32> = stream.iter().map(|o| o.x).collect();
                prop_assert!(xs.windows(2).all(|w| w[0] <= w[1]));
            }
        }

        #[test]
        fn prop_prune_never_removes_visible(
            xs in prop::collection::vec(-300.0f32..900.0, 0..20),
        ) {
            let (tuning, _) = setup();
            let mut sorted = xs.clone();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

            let mut stream = ObstacleStream::new(0);
            for &x in &sorted {
                stream.push(Obstacle { x, top: 100.0, gap: 150.0, passed: false });
            }
            let removed = stream.prune(&tuning);

            let boundary = -tuning.prune_margin;
            let expected = sorted
                .iter()
                .filter(|&&x| x + tuning.obstacle_width < boundary)
                .count();
            prop_assert_eq!(removed, expected);
            prop_assert!(stream.iter().all(|o| o.trailing_edge(tuning.obstacle_width) >= boundary));
        }
    }
}
