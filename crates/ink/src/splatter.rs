//! Directional ink splatter on fast, sharp direction changes
//!
//! Checked once per new point. A splatter fires when the turning angle
//! between the last two segment directions exceeds the hard-angle threshold
//! AND the segment entering the turn traveled far enough - a fast flick of
//! the pen. It emits 1-4 short divergent droplet curves along the pre-turn
//! direction, rendered thick-to-thin through the tapered renderer.
//!
//! The random source is an owned `StdRng` seeded from configuration so
//! droplet placement is reproducible under test.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use vellum_config::SessionConfig;

use crate::constants::{DEFAULT_RNG_SEED, DROPLET_END_WEIGHT, SPLATTER_REACH_SCALE};
use crate::renderer::draw_tapered;
use crate::surface::Surface;
use crate::types::InkPoint;

pub struct SplatterGenerator {
    rng: StdRng,
    hard_angle: f32,
    min_travel: f32,
    spread: f32,
    reach_cap: f32,
    droplet_strength: f32,
}

/// Turning angle between two direction angles, normalized into `[0, PI]`
fn turning_angle(a1: f32, a2: f32) -> f32 {
    let mut turn = (a2 - a1).abs() % TAU;
    if turn > PI {
        turn = TAU - turn;
    }
    turn
}

impl SplatterGenerator {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(config.seed.unwrap_or(DEFAULT_RNG_SEED)),
            hard_angle: config.splatter_hard_angle,
            min_travel: config.splatter_min_travel,
            spread: config.splatter_spread,
            reach_cap: config.splatter_reach_cap,
            droplet_strength: config.droplet_strength,
        }
    }

    fn random(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Check the newest point of the stroke and emit droplets if the pen
    /// just made a fast, sharp turn. Returns the number of droplets drawn.
    pub fn maybe_splatter<S: Surface>(&mut self, surface: &mut S, points: &[InkPoint]) -> usize {
        if points.len() < 3 {
            return 0;
        }
        let p = points[points.len() - 3];
        let q = points[points.len() - 2];
        let r = points[points.len() - 1];

        let seg_in = q.pos() - p.pos();
        let seg_out = r.pos() - q.pos();
        let travel = seg_in.length();
        if travel <= self.min_travel || seg_out.length() < f32::EPSILON {
            return 0;
        }

        let angle_in = seg_in.y.atan2(seg_in.x);
        let angle_out = seg_out.y.atan2(seg_out.x);
        let turn = turning_angle(angle_in, angle_out);
        if turn <= self.hard_angle {
            return 0;
        }

        let count = self.rng.random_range(1..=4usize);
        debug!(
            "splatter: turn {:.2} rad at ({:.1}, {:.1}), travel {:.1}, {} droplets",
            turn, q.x, q.y, travel, count
        );

        for _ in 0..count {
            let dir_angle = angle_in + (self.random() * 2.0 - 1.0) * self.spread;
            let dir = Vec2::new(dir_angle.cos(), dir_angle.sin());

            let reach =
                (travel * SPLATTER_REACH_SCALE).min(self.reach_cap) * (0.5 + 0.5 * self.random());
            let offset = self.random() * q.weight + self.droplet_strength;

            let start = q.pos() + dir * offset;
            let end = start + dir * reach;
            let perp = Vec2::new(-dir.y, dir.x);
            let control = (start + end) / 2.0 + perp * (self.random() - 0.5) * (reach / 2.0);

            let thick = q.weight.max(1.0);
            draw_tapered(
                surface,
                InkPoint::new(start.x, start.y, thick),
                InkPoint::new(control.x, control.y, DROPLET_END_WEIGHT),
                InkPoint::new(end.x, end.y, DROPLET_END_WEIGHT),
            );
        }
        count
    }
}
