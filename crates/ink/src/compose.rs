//! Buffer/display layer compositing
//!
//! Two equally-sized surfaces: the buffer holds canonical committed ink,
//! the display is what the host shows. Strokes, splatter and pooling render
//! into the buffer; every animation tick the display is cleared and the
//! buffer copied onto it, and transient drips are drawn on the display
//! afterward so they never bake into the buffer while animating. Committing
//! snapshots the display back into the buffer at gesture end.

use crate::error::InkError;
use crate::surface::Surface;

pub struct CompositionLayer<S: Surface> {
    buffer: S,
    display: S,
}

impl<S: Surface> CompositionLayer<S> {
    /// Pair a buffer and display surface. Both must be the same non-zero
    /// size; anything else is fatal at construction.
    pub fn new(buffer: S, display: S) -> Result<Self, InkError> {
        if buffer.width() == 0 || buffer.height() == 0 {
            return Err(InkError::SurfaceUnavailable(format!(
                "zero-sized buffer {}x{}",
                buffer.width(),
                buffer.height()
            )));
        }
        if buffer.width() != display.width() || buffer.height() != display.height() {
            return Err(InkError::SurfaceMismatch {
                buffer_width: buffer.width(),
                buffer_height: buffer.height(),
                display_width: display.width(),
                display_height: display.height(),
            });
        }
        Ok(Self { buffer, display })
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// The persisted buffer (committed ink plus the in-progress gesture)
    pub fn buffer(&self) -> &S {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut S {
        &mut self.buffer
    }

    /// The display surface the host presents
    pub fn display(&self) -> &S {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut S {
        &mut self.display
    }

    /// Reconcile the display to the buffer: clear, then copy
    pub fn composite(&mut self) {
        self.display.clear();
        self.display.copy_from(&self.buffer);
    }

    /// Snapshot the final display into the buffer, committing the frame
    pub fn commit(&mut self) {
        self.buffer.copy_from(&self.display);
    }

    /// Wipe both layers
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.display.clear();
    }

    /// Apply a setting (color, width) to both layers so transient display
    /// drawing matches buffer drawing
    pub fn set_stroke_color(&mut self, color: [f32; 4]) {
        self.buffer.set_stroke_color(color);
        self.display.set_stroke_color(color);
    }
}
