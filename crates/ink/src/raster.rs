//! CPU raster backend - f32 RGBA surface with round-dab stroking
//!
//! Stores pixels as `[f32; 4]` (Rgba16Float compatible) in row-major order.
//! Paths are flattened to polylines as they are built; `stroke` stamps
//! round dabs of the current line width along every segment, which gives
//! the round-cap behavior the engine expects (a zero-length segment still
//! leaves a dot).

use glam::Vec2;
use image::RgbaImage;

use crate::constants::RASTER_FLATTEN_STEP;
use crate::error::InkError;
use crate::surface::Surface;

/// A CPU surface driven by path commands.
pub struct RasterSurface {
    width: u32,
    height: u32,
    /// Pixel data in row-major order, each pixel is [r, g, b, a] as f32
    pixels: Vec<[f32; 4]>,
    /// Current path, flattened to a polyline. `None` entries separate
    /// subpaths started by `move_to`.
    path: Vec<Option<Vec2>>,
    pen: Option<Vec2>,
    line_width: f32,
    color: [f32; 4],
}

impl RasterSurface {
    /// Create a surface initialized to transparent black.
    ///
    /// A zero-sized surface is unusable and reported as
    /// [`InkError::SurfaceUnavailable`].
    pub fn new(width: u32, height: u32) -> Result<Self, InkError> {
        if width == 0 || height == 0 {
            return Err(InkError::SurfaceUnavailable(format!(
                "zero-sized surface {width}x{height}"
            )));
        }
        let pixel_count = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            pixels: vec![[0.0, 0.0, 0.0, 0.0]; pixel_count],
            path: Vec::new(),
            pen: None,
            line_width: 1.0,
            color: [0.0, 0.0, 0.0, 1.0],
        })
    }

    /// Get a pixel, or `None` out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y as usize) * (self.width as usize) + (x as usize)])
    }

    /// Direct access to pixel data (tests, snapshots)
    #[inline]
    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }

    /// Raw pixel bytes for texture upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Serialize the surface to an 8-bit RGBA raster image
    pub fn to_image(&self) -> RgbaImage {
        let mut img = RgbaImage::new(self.width, self.height);
        for (i, pixel) in self.pixels.iter().enumerate() {
            let x = (i % self.width as usize) as u32;
            let y = (i / self.width as usize) as u32;
            let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
            img.put_pixel(
                x,
                y,
                image::Rgba([to_u8(pixel[0]), to_u8(pixel[1]), to_u8(pixel[2]), to_u8(pixel[3])]),
            );
        }
        img
    }

    /// Blend a color onto an existing pixel using alpha compositing:
    /// `out = src * alpha + dst * (1 - alpha)`
    #[inline]
    fn blend_pixel(&mut self, x: u32, y: u32, color: [f32; 4], coverage: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        let dst = self.pixels[index];
        let src_alpha = color[3] * coverage;
        let inv = 1.0 - src_alpha;
        self.pixels[index] = [
            color[0] * src_alpha + dst[0] * inv,
            color[1] * src_alpha + dst[1] * inv,
            color[2] * src_alpha + dst[2] * inv,
            src_alpha + dst[3] * inv,
        ];
    }

    /// Stamp one round dab of the current line width centered at `center`
    fn stamp_dab(&mut self, center: Vec2, diameter: f32) {
        let radius = (diameter / 2.0).max(0.5);
        let color = self.color;
        let min_x = (center.x - radius - 1.0).floor().max(0.0) as u32;
        let max_x = (center.x + radius + 1.0).ceil().min(self.width as f32 - 1.0) as u32;
        let min_y = (center.y - radius - 1.0).floor().max(0.0) as u32;
        let max_y = (center.y + radius + 1.0).ceil().min(self.height as f32 - 1.0) as u32;
        if center.x + radius < 0.0 || center.y + radius < 0.0 {
            return;
        }
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                // One-pixel soft edge as cheap antialiasing
                let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_pixel(x, y, color, coverage);
                }
            }
        }
    }

    /// Stamp dabs along a segment, spaced at roughly half the dab radius
    fn stamp_segment(&mut self, from: Vec2, to: Vec2) {
        let width = self.line_width;
        let length = from.distance(to);
        if length < f32::EPSILON {
            self.stamp_dab(from, width);
            return;
        }
        let spacing = (width / 4.0).max(0.5);
        let steps = (length / spacing).ceil() as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.stamp_dab(from.lerp(to, t), width);
        }
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.pen = None;
    }

    fn move_to(&mut self, p: Vec2) {
        self.path.push(None);
        self.path.push(Some(p));
        self.pen = Some(p);
    }

    fn line_to(&mut self, p: Vec2) {
        if self.pen.is_none() {
            self.path.push(None);
        }
        self.path.push(Some(p));
        self.pen = Some(p);
    }

    fn quadratic_curve_to(&mut self, control: Vec2, end: Vec2) {
        let start = self.pen.unwrap_or(control);
        // Flatten by control-polygon length; short curves still get a point
        let poly_len = start.distance(control) + control.distance(end);
        let steps = ((poly_len / RASTER_FLATTEN_STEP).ceil() as usize).max(1);
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let a = start.lerp(control, t);
            let b = control.lerp(end, t);
            self.path.push(Some(a.lerp(b, t)));
        }
        self.pen = Some(end);
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width.max(0.0);
    }

    fn set_stroke_color(&mut self, color: [f32; 4]) {
        self.color = color;
    }

    fn stroke(&mut self) {
        let points = std::mem::take(&mut self.path);
        let mut prev: Option<Vec2> = None;
        for entry in points.iter().copied() {
            if let (Some(a), Some(b)) = (prev, entry) {
                self.stamp_segment(a, b);
            }
            prev = entry;
        }
        // Canvas keeps the path alive until the next begin_path
        self.path = points;
    }

    fn clear(&mut self) {
        self.pixels.fill([0.0, 0.0, 0.0, 0.0]);
    }

    fn copy_from(&mut self, src: &Self) {
        debug_assert_eq!(self.pixels.len(), src.pixels.len());
        self.pixels.copy_from_slice(&src.pixels);
    }
}
