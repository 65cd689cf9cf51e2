//! Velocity-driven stroke width lookup
//!
//! Maps normalized pointer travel (distance / surface width) to a rendered
//! stroke width through the tolerance table in [`crate::constants`]. Slow,
//! precise motion falls through to the tight tolerances at the bottom of the
//! table and renders thick; fast motion stops at the coarse rows and renders
//! thin.

use crate::constants::{WidthEntry, FALLBACK_WIDTH, WIDTH_TABLE};

/// Pure width model: tolerance table plus a thickness multiplier.
#[derive(Debug, Clone)]
pub struct StrokeWidthModel {
    table: Vec<WidthEntry>,
    multiplier: f32,
}

impl Default for StrokeWidthModel {
    fn default() -> Self {
        Self {
            table: WIDTH_TABLE.to_vec(),
            multiplier: 1.0,
        }
    }
}

impl StrokeWidthModel {
    /// Model over the built-in table with the given multiplier
    pub fn new(multiplier: f32) -> Self {
        Self {
            table: WIDTH_TABLE.to_vec(),
            multiplier,
        }
    }

    /// Model over a caller-supplied table (tests, custom pens)
    pub fn with_table(table: Vec<WidthEntry>, multiplier: f32) -> Self {
        Self { table, multiplier }
    }

    /// Width for a normalized travel distance.
    ///
    /// The table is scanned in its fixed order; among the rows whose
    /// tolerance still covers the distance, the tightest tolerance wins.
    /// On a descending table this reduces to a plain last-match-overwrites
    /// scan. Distances beyond every tolerance get the fallback width. The
    /// result is scaled by the multiplier.
    pub fn width_for(&self, normalized_distance: f32) -> f32 {
        let mut best: Option<&WidthEntry> = None;
        for entry in &self.table {
            if normalized_distance <= entry.tolerance
                && best.map_or(true, |b| entry.tolerance <= b.tolerance)
            {
                best = Some(entry);
            }
        }
        best.map_or(FALLBACK_WIDTH, |e| e.width) * self.multiplier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_row_model() -> StrokeWidthModel {
        StrokeWidthModel::with_table(
            vec![
                WidthEntry {
                    tolerance: 0.1,
                    width: 2.0,
                },
                WidthEntry {
                    tolerance: 0.2,
                    width: 4.0,
                },
            ],
            1.0,
        )
    }

    #[test]
    fn test_tightest_tolerance_wins() {
        let model = two_row_model();
        // 0.05 is covered by both rows; the tighter 0.1 row wins
        assert_eq!(model.width_for(0.05), 2.0);
    }

    #[test]
    fn test_scenario_from_two_row_table() {
        let model = two_row_model();
        assert_eq!(model.width_for(0.15), 4.0);
        // Beyond every tolerance: fallback
        assert_eq!(model.width_for(0.5), 3.0);
    }

    #[test]
    fn test_width_non_decreasing_across_table_boundaries() {
        let model = two_row_model();
        let mut last = 0.0f32;
        for d in [0.01, 0.05, 0.1, 0.12, 0.15, 0.2] {
            let w = model.width_for(d);
            assert!(w >= last, "width shrank at distance {d}");
            last = w;
        }
    }

    #[test]
    fn test_multiplier_scales_result() {
        let model = StrokeWidthModel::new(1.35);
        let unscaled = StrokeWidthModel::new(1.0);
        let d = 0.02;
        assert!((model.width_for(d) - unscaled.width_for(d) * 1.35).abs() < 1e-6);
    }

    #[test]
    fn test_builtin_table_non_increasing_with_distance() {
        // Thicker widths belong to smaller distances: sampling at each
        // tolerance boundary must never increase as distance grows.
        let model = StrokeWidthModel::new(1.0);
        let mut boundaries: Vec<f32> = WIDTH_TABLE.iter().map(|e| e.tolerance).collect();
        boundaries.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let mut last = f32::INFINITY;
        for b in boundaries {
            let w = model.width_for(b);
            assert!(
                w <= last + 1e-6,
                "width grew with distance at tolerance {b}: {w} > {last}"
            );
            last = w;
        }
    }

    #[test]
    fn test_zero_distance_gets_thickest_width() {
        let model = StrokeWidthModel::new(1.0);
        assert_eq!(model.width_for(0.0), 4.7);
    }
}
