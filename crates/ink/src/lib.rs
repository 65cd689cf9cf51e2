//! Vellum ink engine - stroke geometry and ink simulation
//!
//! This crate turns a stream of pointer positions into natural-media ink:
//! - [`width`] - velocity-driven stroke width lookup
//! - [`curve`] - quadratic Bezier sub-range slicing
//! - [`surface`] - the drawing surface capability trait
//! - [`raster`] - CPU f32-RGBA surface backend with image export
//! - [`renderer`] - straight and subdivided variable-width stroke rendering
//! - [`splatter`] - directional ink droplets on sharp fast turns
//! - [`pooling`] - idle-time ink pooling and gravity drips
//! - [`compose`] - buffer/display layer compositing
//! - [`session`] - the per-gesture orchestrator

pub mod compose;
pub mod constants;
pub mod curve;
pub mod error;
pub mod pooling;
pub mod raster;
pub mod renderer;
pub mod session;
pub mod splatter;
pub mod surface;
pub mod types;
pub mod width;

pub use compose::*;
pub use constants::*;
pub use curve::*;
pub use error::*;
pub use pooling::*;
pub use raster::*;
pub use renderer::*;
pub use session::*;
pub use splatter::*;
pub use surface::*;
pub use types::*;
pub use width::*;
