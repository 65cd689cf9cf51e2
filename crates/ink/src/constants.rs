//! Engine constants: the stroke width table and ink simulation tuning

/// One row of the stroke width table: a normalized-distance tolerance and
/// the width rendered for motion within that tolerance.
#[derive(Debug, Clone, Copy)]
pub struct WidthEntry {
    /// Upper bound on normalized pointer travel covered by this row
    pub tolerance: f32,
    /// Stroke width in pixels (before the thickness multiplier)
    pub width: f32,
}

/// Width rendered when the travel distance matches no table row
pub const FALLBACK_WIDTH: f32 = 3.0;

/// The stroke width table, ordered coarsest tolerance first. The scan takes
/// the last row whose tolerance still covers the distance, so slow precise
/// motion lands on the thick small-tolerance rows at the bottom.
pub const WIDTH_TABLE: [WidthEntry; 26] = [
    WidthEntry { tolerance: 0.350, width: 0.81 },
    WidthEntry { tolerance: 0.300, width: 0.83 },
    WidthEntry { tolerance: 0.250, width: 0.86 },
    WidthEntry { tolerance: 0.200, width: 0.9 },
    WidthEntry { tolerance: 0.150, width: 0.93 },
    WidthEntry { tolerance: 0.100, width: 0.96 },
    WidthEntry { tolerance: 0.095, width: 0.99 },
    WidthEntry { tolerance: 0.090, width: 1.3 },
    WidthEntry { tolerance: 0.085, width: 1.4 },
    WidthEntry { tolerance: 0.080, width: 1.6 },
    WidthEntry { tolerance: 0.075, width: 1.8 },
    WidthEntry { tolerance: 0.070, width: 1.9 },
    WidthEntry { tolerance: 0.065, width: 2.1 },
    WidthEntry { tolerance: 0.060, width: 2.3 },
    WidthEntry { tolerance: 0.055, width: 2.5 },
    WidthEntry { tolerance: 0.050, width: 2.7 },
    WidthEntry { tolerance: 0.045, width: 2.9 },
    WidthEntry { tolerance: 0.040, width: 3.1 },
    WidthEntry { tolerance: 0.035, width: 3.3 },
    WidthEntry { tolerance: 0.030, width: 3.5 },
    WidthEntry { tolerance: 0.025, width: 3.7 },
    WidthEntry { tolerance: 0.020, width: 3.9 },
    WidthEntry { tolerance: 0.015, width: 4.1 },
    WidthEntry { tolerance: 0.010, width: 4.3 },
    WidthEntry { tolerance: 0.005, width: 4.5 },
    WidthEntry { tolerance: 0.001, width: 4.7 },
];

/// Subdivisions per unit of weight delta when tapering a curve. Larger
/// width swings get more slices so the taper stays smooth.
pub const TAPER_SUBDIVISION_SCALE: f32 = 5.0;

/// Droplet reach per pixel of triggering travel distance
pub const SPLATTER_REACH_SCALE: f32 = 1.5;

/// Fixed weight at the thin end of a splatter droplet
pub const DROPLET_END_WEIGHT: f32 = 0.5;

/// Fixed weight at the thin origin of a drip trail
pub const DRIP_START_WEIGHT: f32 = 0.5;

/// Smallest base weight used in the pooling growth divisor, keeping the
/// formula finite for hairline strokes
pub const MIN_POOL_BASE: f32 = 0.1;

/// Step length in pixels when flattening a quadratic curve for rasterizing
pub const RASTER_FLATTEN_STEP: f32 = 2.0;

/// Fixed fallback seed for the droplet/drip random source
pub const DEFAULT_RNG_SEED: u64 = 42;
