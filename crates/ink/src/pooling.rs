//! Idle-time ink simulation: pooling at the pen tip, then falling drips
//!
//! Driven by the session's animation tick while the pointer is down.
//! Elapsed idle time past the short threshold grows the last point's weight
//! (ink pooling); past the long threshold, 1-4 drip seeds spawn near the
//! pooling point and each tick stretches them toward an asymptotic length
//! cap. Pooling renders into the persisted buffer; drips are transient and
//! render onto the display only, so interrupting them leaves no trace.
//!
//! Movement clears all transient state: drips vanish and the pooling base
//! weight is dropped, because pooling only ever applies to the most recent
//! point of the active stroke.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use vellum_config::SessionConfig;

use crate::constants::{DEFAULT_RNG_SEED, DRIP_START_WEIGHT, MIN_POOL_BASE};
use crate::renderer::draw_tapered;
use crate::surface::Surface;
use crate::types::{Drip, InkPoint, Stroke};

pub struct PoolAndDripSimulator {
    rng: StdRng,
    pooling_enabled: bool,
    drips_enabled: bool,
    pool_threshold_ms: u64,
    drip_threshold_ms: u64,
    pool_growth_factor: f32,
    drip_length_cap: f32,
    drip_min_rate: f32,
    drip_max_rate: f32,
    /// Weight of the last point when pooling began; captured once per
    /// pooled point, dropped on movement
    base_weight: Option<f32>,
    drips: Vec<Drip>,
}

/// Pooled weight after `elapsed_ms` of idleness: asymptotically growing,
/// with diminishing growth rate at larger base weights.
pub fn pooled_weight(base: f32, elapsed_ms: u64, growth_factor: f32) -> f32 {
    let base = base.max(MIN_POOL_BASE);
    base + elapsed_ms as f32 / (base * base * growth_factor.max(0.01))
}

impl PoolAndDripSimulator {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            // Offset so the splatter generator's droplet sequence and the
            // drip sequence differ under the same configured seed
            rng: StdRng::seed_from_u64(config.seed.unwrap_or(DEFAULT_RNG_SEED) ^ 0x9e37),
            pooling_enabled: config.pooling,
            drips_enabled: config.drips,
            pool_threshold_ms: config.pool_threshold_ms,
            drip_threshold_ms: config.drip_threshold_ms,
            pool_growth_factor: config.pool_growth_factor,
            drip_length_cap: config.drip_length_cap,
            drip_min_rate: config.drip_min_rate,
            drip_max_rate: config.drip_max_rate,
            base_weight: None,
            drips: Vec::new(),
        }
    }

    /// The pointer moved: drop all transient idle state
    pub fn notify_movement(&mut self) {
        self.base_weight = None;
        self.drips.clear();
    }

    /// The gesture ended: same cleanup as movement
    pub fn reset(&mut self) {
        self.notify_movement();
    }

    /// Live drips (empty unless the pointer has idled past the long
    /// threshold)
    pub fn drips(&self) -> &[Drip] {
        &self.drips
    }

    /// Grow the last stroke point and re-render its curve into the buffer.
    /// Returns true if pooling applied this tick.
    pub fn pool_tick<S: Surface>(
        &mut self,
        buffer: &mut S,
        stroke: &mut Stroke,
        elapsed_ms: u64,
    ) -> bool {
        if !self.pooling_enabled || elapsed_ms <= self.pool_threshold_ms {
            return false;
        }
        let Some(last) = stroke.last().copied() else {
            return false;
        };
        // A curve needs two points; a bare pointer-down gets its second
        // point synthesized in place
        if stroke.len() < 2 {
            stroke.push(last);
        }

        let base = *self
            .base_weight
            .get_or_insert_with(|| last.weight.max(MIN_POOL_BASE));
        let weight = pooled_weight(base, elapsed_ms, self.pool_growth_factor);
        stroke.set_last_weight(weight);

        let points = stroke.points();
        let prev = points[points.len() - 2];
        let tip = points[points.len() - 1];
        draw_tapered(
            buffer,
            InkPoint::new(
                (prev.x + tip.x) / 2.0,
                (prev.y + tip.y) / 2.0,
                prev.weight,
            ),
            tip,
            tip,
        );
        true
    }

    /// Spawn drips on first entry past the long threshold, then grow and
    /// render every live drip onto the display.
    pub fn drip_tick<S: Surface>(&mut self, display: &mut S, origin: InkPoint, elapsed_ms: u64) {
        if !self.drips_enabled || elapsed_ms <= self.drip_threshold_ms {
            return;
        }
        if self.drips.is_empty() {
            let count = self.rng.random_range(1..=4usize);
            for _ in 0..count {
                let sway = (self.rng.random::<f32>() * 2.0 - 1.0) * origin.weight.max(1.0);
                let rate = self.drip_min_rate
                    + self.rng.random::<f32>() * (self.drip_max_rate - self.drip_min_rate);
                let width = DRIP_START_WEIGHT
                    + self.rng.random::<f32>() * (origin.weight.max(1.0) * 0.6);
                self.drips.push(Drip {
                    x: origin.x + sway,
                    y: origin.y,
                    length: 0.0,
                    growth_rate: rate,
                    width,
                });
            }
            debug!(
                "drips: spawned {} at ({:.1}, {:.1}) after {}ms idle",
                count, origin.x, origin.y, elapsed_ms
            );
        }

        for drip in &mut self.drips {
            drip.grow(self.drip_length_cap);
            draw_tapered(
                display,
                InkPoint::new(drip.x, drip.y, DRIP_START_WEIGHT),
                InkPoint::new(drip.x, drip.y + drip.length / 2.0, drip.width),
                InkPoint::new(drip.x, drip.y + drip.length, drip.width),
            );
        }
    }
}
