//! Shared configuration for Vellum
//!
//! This crate provides the single source of truth for stroke appearance,
//! feature toggles, and the timing/feel constants of the ink simulation.
//! A [`SessionConfig`] is applied when a session is created or between
//! gestures, never mid-gesture.

use serde::{Deserialize, Serialize};

/// Default ink color (deep signature blue), Rgba16Float-compatible [r, g, b, a]
pub const DEFAULT_STROKE_COLOR: [f32; 4] = [0.051, 0.239, 0.471, 1.0];

/// Default stroke thickness in pixels (used when tapering is disabled)
pub const DEFAULT_BASE_THICKNESS: f32 = 10.0;

/// Default multiplier applied to every table-derived stroke width
pub const DEFAULT_THICKNESS_MULTIPLIER: f32 = 1.35;

/// Idle time before ink starts pooling at the pen tip, in milliseconds
pub const DEFAULT_POOL_THRESHOLD_MS: u64 = 100;

/// Idle time before pooled ink starts dripping, in milliseconds
pub const DEFAULT_DRIP_THRESHOLD_MS: u64 = 1000;

/// Default divisor factor in the pooling growth formula.
/// Pooled weight grows as `base + elapsed_ms / (base^2 * factor)`; larger
/// factors pool slower. Tunable feel, not a correctness contract.
pub const DEFAULT_POOL_GROWTH_FACTOR: f32 = 10.0;

/// Asymptotic cap on drip length in pixels
pub const DEFAULT_DRIP_LENGTH_CAP: f32 = 300.0;

/// Configuration for one stroke session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Ink color [r, g, b, a] in 0.0..=1.0
    pub stroke_color: [f32; 4],
    /// Fixed stroke thickness in pixels when tapering is off
    pub base_thickness: f32,
    /// Multiplier applied to tapered widths from the tolerance table
    pub thickness_multiplier: f32,
    /// Render velocity-tapered strokes instead of uniform lines
    pub tapered: bool,
    /// Emit ink splatter on fast, sharp direction changes
    pub splatter: bool,
    /// Grow ink at the pen tip while the pointer idles
    pub pooling: bool,
    /// Spawn falling drips after prolonged idleness
    pub drips: bool,
    /// Idle milliseconds before pooling begins
    pub pool_threshold_ms: u64,
    /// Idle milliseconds before dripping begins
    pub drip_threshold_ms: u64,
    /// Divisor factor in the pooling growth formula (see
    /// [`DEFAULT_POOL_GROWTH_FACTOR`])
    pub pool_growth_factor: f32,
    /// Asymptotic cap on drip length in pixels
    pub drip_length_cap: f32,
    /// Slowest per-tick drip growth rate in pixels
    pub drip_min_rate: f32,
    /// Fastest per-tick drip growth rate in pixels
    pub drip_max_rate: f32,
    /// Turning angle in radians beyond which a direction change counts as
    /// sharp (splatter trigger)
    pub splatter_hard_angle: f32,
    /// Minimum travel distance in pixels of the preceding segment for
    /// splatter to fire
    pub splatter_min_travel: f32,
    /// Half-width in radians of the random droplet direction spread
    pub splatter_spread: f32,
    /// Cap on droplet reach in pixels
    pub splatter_reach_cap: f32,
    /// Base offset of a droplet from its trigger point, in pixels
    pub droplet_strength: f32,
    /// Seed for the splatter/drip random source; `None` seeds from a fixed
    /// default so behavior is reproducible
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            stroke_color: DEFAULT_STROKE_COLOR,
            base_thickness: DEFAULT_BASE_THICKNESS,
            thickness_multiplier: DEFAULT_THICKNESS_MULTIPLIER,
            tapered: true,
            splatter: true,
            pooling: true,
            drips: true,
            pool_threshold_ms: DEFAULT_POOL_THRESHOLD_MS,
            drip_threshold_ms: DEFAULT_DRIP_THRESHOLD_MS,
            pool_growth_factor: DEFAULT_POOL_GROWTH_FACTOR,
            drip_length_cap: DEFAULT_DRIP_LENGTH_CAP,
            drip_min_rate: 2.0,
            drip_max_rate: 8.0,
            splatter_hard_angle: std::f32::consts::FRAC_PI_4,
            splatter_min_travel: 20.0,
            splatter_spread: 0.35,
            splatter_reach_cap: 60.0,
            droplet_strength: 6.0,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// A config with every ink effect disabled: plain uniform strokes only
    pub fn plain() -> Self {
        Self {
            tapered: false,
            splatter: false,
            pooling: false,
            drips: false,
            ..Default::default()
        }
    }

    /// Clamp the feel constants into sane ranges. Call after deserializing
    /// untrusted config.
    pub fn sanitized(mut self) -> Self {
        self.base_thickness = self.base_thickness.max(0.1);
        self.thickness_multiplier = self.thickness_multiplier.max(0.0);
        self.pool_growth_factor = self.pool_growth_factor.max(0.01);
        self.drip_length_cap = self.drip_length_cap.max(1.0);
        self.drip_min_rate = self.drip_min_rate.max(0.0);
        self.drip_max_rate = self.drip_max_rate.max(self.drip_min_rate);
        self.splatter_min_travel = self.splatter_min_travel.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.base_thickness, DEFAULT_BASE_THICKNESS);
        assert_eq!(config.pool_threshold_ms, DEFAULT_POOL_THRESHOLD_MS);
        assert!(config.drip_threshold_ms > config.pool_threshold_ms);
        assert!(config.tapered && config.splatter && config.pooling && config.drips);
    }

    #[test]
    fn test_plain_config_disables_effects() {
        let config = SessionConfig::plain();
        assert!(!config.tapered);
        assert!(!config.splatter);
        assert!(!config.pooling);
        assert!(!config.drips);
    }

    #[test]
    fn test_sanitized_orders_drip_rates() {
        let config = SessionConfig {
            drip_min_rate: 5.0,
            drip_max_rate: 1.0,
            ..Default::default()
        }
        .sanitized();
        assert!(config.drip_max_rate >= config.drip_min_rate);
    }

    #[test]
    fn test_serde_round_trip() {
        let config = SessionConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.stroke_color, config.stroke_color);
        assert_eq!(back.drip_threshold_ms, config.drip_threshold_ms);
    }
}
