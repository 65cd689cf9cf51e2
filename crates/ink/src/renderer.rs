//! Stroke rendering: straight segments and subdivided variable-width curves
//!
//! Uniform mode strokes one straight line at a fixed width. Tapered mode
//! takes a quadratic curve whose endpoints carry different weights and
//! subdivides it so the width change renders as a smooth taper instead of a
//! visible jump. The number of subdivisions is proportional to the weight
//! delta (a quality/cost trade-off): `1 + floor(|dw| * 5)`, minimum 1.
//!
//! The subdivision loop is a fold: each slice is stroked independently and
//! the slice endpoint becomes the start state returned to the caller, which
//! feeds it into the next tapered call for continuity.

use glam::Vec2;

use crate::constants::TAPER_SUBDIVISION_SCALE;
use crate::curve::slice;
use crate::surface::Surface;
use crate::types::{Curve, InkPoint};

/// Draw a straight segment of fixed width
pub fn draw_segment<S: Surface>(surface: &mut S, from: Vec2, to: Vec2, width: f32) {
    surface.begin_path();
    surface.move_to(from);
    surface.line_to(to);
    surface.set_line_width(width);
    surface.stroke();
}

/// Draw a visible dot: a zero-length round-capped segment
pub fn draw_dot<S: Surface>(surface: &mut S, at: Vec2, width: f32) {
    draw_segment(surface, at, at, width);
}

/// Draw a tapered quadratic curve and return the next start point.
///
/// The curve runs `start -> control -> end` with the rendered weight
/// interpolating from `start.weight` to `control.weight` (the weight of the
/// later raw point), matching the smoothing scheme where `start` and `end`
/// are midpoints of consecutive raw points and `control` is the raw point
/// between them.
pub fn draw_tapered<S: Surface>(
    surface: &mut S,
    start: InkPoint,
    control: InkPoint,
    end: InkPoint,
) -> InkPoint {
    let curve = Curve::new(start, control, end);
    let dw = control.weight - start.weight;
    let divs = 1 + (dw.abs() * TAPER_SUBDIVISION_SCALE).floor() as u32;
    let step = dw / divs as f32;

    let mut t1 = 0.0;
    let mut next_start = start;
    for i in 1..=divs {
        let t2 = i as f32 / divs as f32;
        let sub = slice(&curve, t1, t2);

        surface.begin_path();
        surface.move_to(sub.start.pos());
        surface.set_line_width(start.weight + step * i as f32);
        surface.quadratic_curve_to(sub.control.pos(), sub.end.pos());
        surface.stroke();

        next_start = InkPoint::new(sub.end.x, sub.end.y, control.weight);
        t1 = t2;
    }
    next_start
}
