//! Quadratic Bezier sub-range slicing
//!
//! Pure de-Casteljau-style splitting: given a quadratic curve and a
//! parameter sub-range, compute the quadratic curve that traces exactly
//! that sub-range. Point weights interpolate linearly with the parameter so
//! sliced curves stay coherent for tapered rendering.
//!
//! Parameters are clamped into `[0, 1]`; a degenerate curve (start == end)
//! slices to a zero-length curve rather than dividing by anything.

use glam::Vec2;

use crate::types::{Curve, InkPoint};

#[inline]
fn lerp(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

#[inline]
fn lerp_weight(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// The sub-curve covering parameter range `[0, t]`. Identity at `t == 1`.
pub fn slice_up_to(curve: &Curve, t: f32) -> Curve {
    let t = t.clamp(0.0, 1.0);
    if t == 1.0 {
        return *curve;
    }
    let s = curve.start.pos();
    let c = curve.control.pos();
    let e = curve.end.pos();

    let m = lerp(c, e, t);
    let control = lerp(s, c, t);
    let end = lerp(control, m, t);

    Curve::new(
        curve.start,
        InkPoint::new(
            control.x,
            control.y,
            lerp_weight(curve.start.weight, curve.control.weight, t),
        ),
        InkPoint::new(end.x, end.y, lerp_weight(curve.start.weight, curve.end.weight, t)),
    )
}

/// The sub-curve covering parameter range `[t, 1]`. Identity at `t == 0`.
pub fn slice_from(curve: &Curve, t: f32) -> Curve {
    let t = t.clamp(0.0, 1.0);
    if t == 0.0 {
        return *curve;
    }
    let s = curve.start.pos();
    let c = curve.control.pos();
    let e = curve.end.pos();

    let m = lerp(s, c, t);
    let control = lerp(c, e, t);
    let start = lerp(m, control, t);

    Curve::new(
        InkPoint::new(start.x, start.y, lerp_weight(curve.start.weight, curve.end.weight, t)),
        InkPoint::new(
            control.x,
            control.y,
            lerp_weight(curve.control.weight, curve.end.weight, t),
        ),
        curve.end,
    )
}

/// The sub-curve covering `[t1, t2]`, composed from the two one-sided
/// slices. `t1 == 0` and `t2 == 1` fall through to the single-sided forms;
/// otherwise the up-to slice is re-sliced from `t1 / t2`.
pub fn slice(curve: &Curve, t1: f32, t2: f32) -> Curve {
    let t1 = t1.clamp(0.0, 1.0);
    let t2 = t2.clamp(0.0, 1.0);
    if t1 <= 0.0 {
        slice_up_to(curve, t2)
    } else if t2 >= 1.0 {
        slice_from(curve, t1)
    } else if t2 <= 0.0 {
        // Degenerate request: collapse to the start point
        slice_up_to(curve, 0.0)
    } else {
        let head = slice_up_to(curve, t2);
        slice_from(&head, t1 / t2)
    }
}

/// Point on the curve at parameter `t`
pub fn point_at(curve: &Curve, t: f32) -> Vec2 {
    let t = t.clamp(0.0, 1.0);
    let a = lerp(curve.start.pos(), curve.control.pos(), t);
    let b = lerp(curve.control.pos(), curve.end.pos(), t);
    lerp(a, b, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Curve {
        Curve::new(
            InkPoint::new(0.0, 0.0, 1.0),
            InkPoint::new(50.0, 100.0, 2.0),
            InkPoint::new(100.0, 0.0, 3.0),
        )
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_identity_slice() {
        let c = sample();
        assert_eq!(slice(&c, 0.0, 1.0), c);
        assert_eq!(slice_up_to(&c, 1.0), c);
        assert_eq!(slice_from(&c, 0.0), c);
    }

    #[test]
    fn test_partition_shares_split_point() {
        let c = sample();
        let t = 0.37;
        let head = slice(&c, 0.0, t);
        let tail = slice(&c, t, 1.0);

        assert!(close(head.start.pos(), c.start.pos()));
        assert!(close(tail.end.pos(), c.end.pos()));
        // Both halves meet exactly at the curve point for t
        let split = point_at(&c, t);
        assert!(close(head.end.pos(), split));
        assert!(close(tail.start.pos(), split));
    }

    #[test]
    fn test_interior_slice_endpoints_lie_on_curve() {
        let c = sample();
        let (t1, t2) = (0.25, 0.75);
        let mid = slice(&c, t1, t2);
        assert!(close(mid.start.pos(), point_at(&c, t1)));
        assert!(close(mid.end.pos(), point_at(&c, t2)));
        // And the slice traces the same path: compare its midpoint
        assert!(close(point_at(&mid, 0.5), point_at(&c, (t1 + t2) / 2.0)));
    }

    #[test]
    fn test_degenerate_curve_does_not_blow_up() {
        let p = InkPoint::new(5.0, 5.0, 1.0);
        let c = Curve::new(p, p, p);
        let s = slice(&c, 0.2, 0.8);
        assert!(close(s.start.pos(), p.pos()));
        assert!(close(s.end.pos(), p.pos()));
    }

    #[test]
    fn test_out_of_range_parameters_clamp() {
        let c = sample();
        let s = slice(&c, -1.0, 2.0);
        assert_eq!(s, c);
    }

    #[test]
    fn test_weights_interpolate_linearly() {
        let c = sample();
        let head = slice_up_to(&c, 0.5);
        assert!((head.end.weight - 2.0).abs() < 1e-6);
        let tail = slice_from(&c, 0.5);
        assert!((tail.start.weight - 2.0).abs() < 1e-6);
    }
}
