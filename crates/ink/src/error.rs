use thiserror::Error;

/// Errors surfaced by the ink engine.
///
/// The taxonomy is deliberately narrow: degenerate geometry is clamped
/// rather than reported, and pooling with too few points synthesizes a
/// point internally. Only a missing or mismatched rendering surface is
/// fatal, and only at construction time.
#[derive(Debug, Error)]
pub enum InkError {
    #[error("surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("surface size mismatch: buffer {buffer_width}x{buffer_height} vs display {display_width}x{display_height}")]
    SurfaceMismatch {
        buffer_width: u32,
        buffer_height: u32,
        display_width: u32,
        display_height: u32,
    },
}
