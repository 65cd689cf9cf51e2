//! Drawing surface capability
//!
//! The engine never touches pixels directly; it issues an ordered sequence
//! of path commands against a [`Surface`]. The contract mirrors a 2D canvas
//! context: build a path with `move_to`/`line_to`/`quadratic_curve_to`,
//! configure `set_line_width`/`set_stroke_color`, then `stroke` it.
//! `copy_from` blits another surface of the same size (layer compositing),
//! `clear` resets every pixel to transparent.

use glam::Vec2;

/// A drawable surface the engine renders through.
///
/// Round line caps are assumed: a stroked zero-length or short segment is
/// still expected to leave a visible dot of the current line width.
pub trait Surface {
    /// Surface width in pixels
    fn width(&self) -> u32;
    /// Surface height in pixels
    fn height(&self) -> u32;

    /// Start a fresh path, discarding any unstroked one
    fn begin_path(&mut self);
    /// Move the pen without drawing
    fn move_to(&mut self, p: Vec2);
    /// Append a straight path segment to `p`
    fn line_to(&mut self, p: Vec2);
    /// Append a quadratic curve segment with the given control point
    fn quadratic_curve_to(&mut self, control: Vec2, end: Vec2);

    /// Line width for subsequent `stroke` calls
    fn set_line_width(&mut self, width: f32);
    /// Stroke color [r, g, b, a] in 0.0..=1.0 for subsequent `stroke` calls
    fn set_stroke_color(&mut self, color: [f32; 4]);

    /// Render the current path with the current width and color
    fn stroke(&mut self);

    /// Reset every pixel to transparent
    fn clear(&mut self);
    /// Copy every pixel of `src` onto this surface. Both surfaces are the
    /// same size; the composition layer guarantees it.
    fn copy_from(&mut self, src: &Self);
}
