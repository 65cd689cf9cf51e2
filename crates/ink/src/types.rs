use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A captured stroke point: surface-local position plus the stroke width
/// rendered at that point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InkPoint {
    /// X position in surface-local pixels
    pub x: f32,
    /// Y position in surface-local pixels
    pub y: f32,
    /// Rendered stroke width at this point, never negative
    pub weight: f32,
}

impl InkPoint {
    pub fn new(x: f32, y: f32, weight: f32) -> Self {
        Self {
            x,
            y,
            weight: weight.max(0.0),
        }
    }

    /// Position as a vector for geometry math
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// The point halfway between two points, with averaged weight
    pub fn midpoint(a: &InkPoint, b: &InkPoint) -> InkPoint {
        InkPoint::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0, (a.weight + b.weight) / 2.0)
    }
}

/// One continuous gesture: an ordered, append-only point sequence.
///
/// A signature is an ordered sequence of strokes; insertion order is drawing
/// order, which replay depends on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stroke {
    points: Vec<InkPoint>,
}

impl Stroke {
    /// Start a stroke from its first point (a stroke always has >= 1 point)
    pub fn starting_at(point: InkPoint) -> Self {
        Self {
            points: vec![point],
        }
    }

    /// Append a point to the end of the stroke
    pub fn push(&mut self, point: InkPoint) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[InkPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The most recent point, if any
    pub fn last(&self) -> Option<&InkPoint> {
        self.points.last()
    }

    /// Overwrite the weight of the most recent point. Pooling is the only
    /// caller; pooling never applies to any earlier point.
    pub fn set_last_weight(&mut self, weight: f32) {
        if let Some(last) = self.points.last_mut() {
            last.weight = weight.max(0.0);
        }
    }
}

/// A transient quadratic Bezier segment. Never persisted; consumed
/// immediately by rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve {
    pub start: InkPoint,
    pub control: InkPoint,
    pub end: InkPoint,
}

impl Curve {
    pub fn new(start: InkPoint, control: InkPoint, end: InkPoint) -> Self {
        Self {
            start,
            control,
            end,
        }
    }
}

/// Transient state of one falling drip, alive only while the pointer idles
/// past the drip threshold.
#[derive(Debug, Clone, Copy)]
pub struct Drip {
    /// Origin x in surface-local pixels
    pub x: f32,
    /// Origin y in surface-local pixels
    pub y: f32,
    /// Current trail length in pixels, grows toward the cap
    pub length: f32,
    /// Per-tick growth rate in pixels
    pub growth_rate: f32,
    /// Terminal (thick-end) width of the trail
    pub width: f32,
}

impl Drip {
    /// Advance the trail one tick: `length += rate * (cap - length) / cap`,
    /// an asymptotic approach to the cap.
    pub fn grow(&mut self, cap: f32) {
        let cap = cap.max(1.0);
        self.length += self.growth_rate * (cap - self.length) / cap;
    }
}
