//! Per-gesture orchestration
//!
//! A [`StrokeSession`] owns the composition layers, the width model, the
//! splatter generator and the pool/drip simulator, and dispatches pointer
//! events to them. The full workflow:
//! 1. `pointer_down` opens a gesture and arms the animation task
//! 2. `pointer_move` captures points, renders segments or tapered curves
//!    into the buffer, and checks for splatter
//! 3. `animation_tick` (host-driven, once per frame while drawing) runs the
//!    idle simulation and composites buffer + drips onto the display
//! 4. `pointer_up` cancels the animation task synchronously, finalizes a
//!    single-click dot, and commits the frame
//!
//! Sessions are plain values: several independent signature pads can each
//! own one. Configuration applies at construction or between gestures,
//! never mid-gesture.

use glam::Vec2;
use tracing::{debug, info, warn};
use vellum_config::SessionConfig;

use crate::compose::CompositionLayer;
use crate::error::InkError;
use crate::pooling::PoolAndDripSimulator;
use crate::raster::RasterSurface;
use crate::renderer::{draw_dot, draw_segment, draw_tapered};
use crate::splatter::SplatterGenerator;
use crate::surface::Surface;
use crate::types::{Drip, InkPoint, Stroke};
use crate::width::StrokeWidthModel;

/// Handle for the self-rescheduling animation callback chain.
///
/// The host keeps calling [`StrokeSession::animation_tick`]; the task gates
/// it. `cancel` stops the chain synchronously, so no tick can run after
/// pointer-up - there is no one-extra-stray-tick window.
#[derive(Debug)]
pub struct AnimationTask {
    active: bool,
}

impl AnimationTask {
    fn arm() -> Self {
        Self { active: true }
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// State for one in-flight gesture, created on pointer-down and consumed on
/// pointer-up
struct Gesture {
    stroke: Stroke,
    /// Running start point for the tapered subdivision fold
    curve_start: InkPoint,
    last_pos: Vec2,
    last_move_ms: u64,
    task: AnimationTask,
}

/// One signature pad: pointer events in, composited ink out.
pub struct StrokeSession<S: Surface> {
    config: SessionConfig,
    width_model: StrokeWidthModel,
    splatter: SplatterGenerator,
    simulator: PoolAndDripSimulator,
    layers: CompositionLayer<S>,
    /// Completed strokes in drawing order (replay depends on the order)
    strokes: Vec<Stroke>,
    gesture: Option<Gesture>,
}

impl<S: Surface> StrokeSession<S> {
    pub fn new(layers: CompositionLayer<S>, config: SessionConfig) -> Self {
        let config = config.sanitized();
        let mut session = Self {
            width_model: StrokeWidthModel::new(config.thickness_multiplier),
            splatter: SplatterGenerator::new(&config),
            simulator: PoolAndDripSimulator::new(&config),
            layers,
            strokes: Vec::new(),
            gesture: None,
            config,
        };
        session.layers.set_stroke_color(session.config.stroke_color);
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Swap configuration between gestures. Ignored (with a warning) while
    /// a gesture is active.
    pub fn set_config(&mut self, config: SessionConfig) {
        if self.gesture.is_some() {
            warn!("ignoring config change mid-gesture");
            return;
        }
        let config = config.sanitized();
        self.width_model = StrokeWidthModel::new(config.thickness_multiplier);
        self.splatter = SplatterGenerator::new(&config);
        self.simulator = PoolAndDripSimulator::new(&config);
        self.layers.set_stroke_color(config.stroke_color);
        self.config = config;
    }

    pub fn is_drawing(&self) -> bool {
        self.gesture.is_some()
    }

    /// Completed strokes in drawing order
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// The stroke of the in-flight gesture, if any
    pub fn active_stroke(&self) -> Option<&Stroke> {
        self.gesture.as_ref().map(|g| &g.stroke)
    }

    /// Drips currently animating (empty unless idle past the long
    /// threshold)
    pub fn live_drips(&self) -> &[Drip] {
        self.simulator.drips()
    }

    pub fn layers(&self) -> &CompositionLayer<S> {
        &self.layers
    }

    /// Begin a gesture at surface-local (x, y). A second pointer-down while
    /// drawing is ignored.
    pub fn pointer_down(&mut self, x: f32, y: f32, t_ms: u64) {
        if self.gesture.is_some() {
            return;
        }
        let weight = if self.config.tapered {
            // Zero travel: the width model's slowest, thickest response
            self.width_model.width_for(0.0)
        } else {
            self.config.base_thickness
        };
        let point = InkPoint::new(x, y, weight);
        debug!("gesture start at ({x:.1}, {y:.1}), weight {weight:.2}");
        self.gesture = Some(Gesture {
            stroke: Stroke::starting_at(point),
            curve_start: point,
            last_pos: point.pos(),
            last_move_ms: t_ms,
            task: AnimationTask::arm(),
        });
    }

    /// Extend the gesture. A move without a preceding down is a silent
    /// no-op; nothing is drawn.
    pub fn pointer_move(&mut self, x: f32, y: f32, t_ms: u64) {
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        let pos = Vec2::new(x, y);
        let distance = gesture.last_pos.distance(pos);
        let normalized = distance / self.layers.width() as f32;
        let weight = if self.config.tapered {
            self.width_model.width_for(normalized)
        } else {
            self.config.base_thickness
        };

        // Movement kills transient idle state before anything renders
        self.simulator.notify_movement();
        gesture.stroke.push(InkPoint::new(x, y, weight));

        let buffer = self.layers.buffer_mut();
        if !self.config.tapered {
            draw_segment(buffer, gesture.last_pos, pos, weight);
        } else if gesture.stroke.len() >= 3 {
            let points = gesture.stroke.points();
            let control = points[points.len() - 2];
            let end = InkPoint::midpoint(&points[points.len() - 2], &points[points.len() - 1]);
            gesture.curve_start = draw_tapered(buffer, gesture.curve_start, control, end);
        }

        if self.config.splatter {
            self.splatter
                .maybe_splatter(self.layers.buffer_mut(), gesture.stroke.points());
        }

        gesture.last_pos = pos;
        gesture.last_move_ms = t_ms;
    }

    /// One frame of the animation loop. No-op unless a gesture is active
    /// and its task has not been canceled.
    pub fn animation_tick(&mut self, now_ms: u64) {
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        if !gesture.task.is_active() {
            return;
        }
        let elapsed = now_ms.saturating_sub(gesture.last_move_ms);

        self.simulator
            .pool_tick(self.layers.buffer_mut(), &mut gesture.stroke, elapsed);
        self.layers.composite();
        if let Some(tip) = gesture.stroke.last().copied() {
            self.simulator
                .drip_tick(self.layers.display_mut(), tip, elapsed);
        }
    }

    /// End the gesture: cancel the animation task, finalize a single-click
    /// dot or the closing tapered curve, reconcile the display and commit
    /// the buffer.
    pub fn pointer_up(&mut self, _t_ms: u64) {
        let Some(mut gesture) = self.gesture.take() else {
            return;
        };
        gesture.task.cancel();

        if gesture.stroke.len() == 1 {
            // A click without movement still leaves a visible dot
            if let Some(p) = gesture.stroke.last().copied() {
                gesture.stroke.push(p);
                draw_dot(self.layers.buffer_mut(), p.pos(), p.weight);
            }
        } else if self.config.tapered {
            // The live curves stop at the last midpoint; close the stroke
            // through the second-to-last raw point to the final raw point.
            // This is also the whole rendering of a two-point gesture.
            let points = gesture.stroke.points();
            let control = points[points.len() - 2];
            let end = points[points.len() - 1];
            draw_tapered(self.layers.buffer_mut(), gesture.curve_start, control, end);
        }

        self.simulator.reset();
        self.layers.composite();
        self.layers.commit();

        info!("gesture end: {} points", gesture.stroke.len());
        self.strokes.push(gesture.stroke);
    }

    /// Wipe the pad: both layers, completed strokes, and any in-flight
    /// gesture
    pub fn clear(&mut self) {
        if let Some(gesture) = self.gesture.as_mut() {
            gesture.task.cancel();
        }
        self.gesture = None;
        self.simulator.reset();
        self.strokes.clear();
        self.layers.clear();
        self.layers.set_stroke_color(self.config.stroke_color);
    }
}

impl StrokeSession<RasterSurface> {
    /// Convenience constructor over the CPU raster backend
    pub fn with_size(width: u32, height: u32, config: SessionConfig) -> Result<Self, InkError> {
        let layers = CompositionLayer::new(
            RasterSurface::new(width, height)?,
            RasterSurface::new(width, height)?,
        )?;
        Ok(Self::new(layers, config))
    }

    /// Serialize the committed buffer to a static raster image
    pub fn to_image(&self) -> image::RgbaImage {
        self.layers.buffer().to_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> StrokeSession<RasterSurface> {
        StrokeSession::with_size(128, 128, SessionConfig {
            seed: Some(3),
            ..Default::default()
        })
        .unwrap()
    }

    fn inked(pixels: &[[f32; 4]]) -> usize {
        pixels.iter().filter(|p| p[3] > 0.0).count()
    }

    #[test]
    fn test_move_before_down_draws_nothing() {
        let mut s = session();
        s.pointer_move(40.0, 40.0, 10);
        s.pointer_move(60.0, 60.0, 20);
        assert_eq!(inked(s.layers().buffer().pixels()), 0);
        assert!(!s.is_drawing());
    }

    #[test]
    fn test_gesture_inks_buffer_and_stores_stroke() {
        let mut s = session();
        s.pointer_down(20.0, 64.0, 0);
        for i in 1..=8 {
            s.pointer_move(20.0 + i as f32 * 10.0, 64.0, i * 16);
        }
        s.pointer_up(200);

        assert!(inked(s.layers().buffer().pixels()) > 0);
        assert_eq!(s.strokes().len(), 1);
        assert_eq!(s.strokes()[0].len(), 9);
        assert!(!s.is_drawing());
    }

    #[test]
    fn test_two_point_gesture_inks_buffer() {
        let mut s = session();
        s.pointer_down(40.0, 40.0, 0);
        s.pointer_move(60.0, 40.0, 16);
        s.pointer_up(32);

        assert!(
            inked(s.layers().buffer().pixels()) > 0,
            "a down-move-up gesture must leave visible ink"
        );
        assert!(s.layers().buffer().get_pixel(50, 40).unwrap()[3] > 0.0);
    }

    #[test]
    fn test_ink_reaches_the_strokes_final_point() {
        let mut s = StrokeSession::with_size(256, 256, SessionConfig {
            seed: Some(3),
            ..Default::default()
        })
        .unwrap();
        s.pointer_down(20.0, 128.0, 0);
        for i in 1..=10 {
            s.pointer_move(20.0 + i as f32 * 20.0, 128.0, i * 16);
        }
        s.pointer_up(200);

        // The closing curve must carry ink all the way to the last raw
        // point, not stop at the final midpoint
        assert!(s.layers().buffer().get_pixel(219, 128).unwrap()[3] > 0.0);
    }

    #[test]
    fn test_single_click_renders_visible_dot() {
        let mut s = session();
        s.pointer_down(64.0, 64.0, 0);
        s.pointer_up(10);

        assert!(
            s.layers().buffer().get_pixel(64, 64).unwrap()[3] > 0.0,
            "single-click dot must be visible"
        );
        // The synthesized second point keeps the stroke curve-capable
        assert_eq!(s.strokes()[0].len(), 2);
    }

    #[test]
    fn test_no_tick_mutates_buffer_after_pointer_up() {
        let mut s = session();
        s.pointer_down(30.0, 30.0, 0);
        s.pointer_move(60.0, 60.0, 16);
        s.pointer_up(32);

        let snapshot = s.layers().buffer().pixels().to_vec();
        for dt in [100u64, 500, 2000, 10_000] {
            s.animation_tick(32 + dt);
        }
        assert_eq!(s.layers().buffer().pixels(), snapshot.as_slice());
    }

    #[test]
    fn test_idle_ticks_pool_ink() {
        let mut s = session();
        s.pointer_down(64.0, 64.0, 0);
        s.pointer_move(70.0, 64.0, 10);
        let before = s.active_stroke().unwrap().last().unwrap().weight;

        s.animation_tick(300);
        let after = s.active_stroke().unwrap().last().unwrap().weight;
        assert!(after > before, "idle pooling should grow the tip weight");

        s.animation_tick(600);
        let later = s.active_stroke().unwrap().last().unwrap().weight;
        assert!(later > after);
    }

    #[test]
    fn test_drips_spawn_on_long_idle_and_stay_off_the_buffer() {
        let mut s = session();
        s.pointer_down(64.0, 20.0, 0);
        s.pointer_move(70.0, 20.0, 10);

        s.animation_tick(1500);
        assert!(!s.live_drips().is_empty());

        // Drips live on the display only; the buffer ink stays identical
        // through a composite-only tick with pooling already applied
        let buffer_before = inked(s.layers().buffer().pixels());
        let display_ink = inked(s.layers().display().pixels());
        assert!(display_ink >= buffer_before);
    }

    #[test]
    fn test_movement_clears_drips() {
        let mut s = session();
        s.pointer_down(64.0, 20.0, 0);
        s.pointer_move(70.0, 20.0, 10);
        s.animation_tick(1500);
        assert!(!s.live_drips().is_empty());

        s.pointer_move(80.0, 25.0, 1510);
        assert!(s.live_drips().is_empty());
    }

    #[test]
    fn test_uniform_mode_uses_base_thickness() {
        let mut s = StrokeSession::with_size(128, 128, SessionConfig::plain()).unwrap();
        s.pointer_down(20.0, 64.0, 0);
        s.pointer_move(100.0, 64.0, 16);
        let stroke = s.active_stroke().unwrap();
        assert_eq!(
            stroke.last().unwrap().weight,
            s.config().base_thickness
        );
    }

    #[test]
    fn test_tapered_weights_follow_speed() {
        let mut s = session();
        s.pointer_down(10.0, 64.0, 0);
        // Slow, precise move (short travel) then a fast sweep
        s.pointer_move(12.0, 64.0, 16);
        s.pointer_move(90.0, 64.0, 32);
        let points = s.active_stroke().unwrap().points().to_vec();
        assert!(
            points[1].weight > points[2].weight,
            "slow motion should ink thicker than fast motion"
        );
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut a = session();
        let b = session();
        a.pointer_down(64.0, 64.0, 0);
        a.pointer_up(10);
        assert!(inked(a.layers().buffer().pixels()) > 0);
        assert_eq!(inked(b.layers().buffer().pixels()), 0);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut s = session();
        s.pointer_down(64.0, 64.0, 0);
        s.pointer_up(10);
        s.clear();
        assert_eq!(inked(s.layers().buffer().pixels()), 0);
        assert!(s.strokes().is_empty());
    }

    #[test]
    fn test_config_change_ignored_mid_gesture() {
        let mut s = session();
        s.pointer_down(64.0, 64.0, 0);
        let original = s.config().base_thickness;
        s.set_config(SessionConfig {
            base_thickness: 99.0,
            ..Default::default()
        });
        assert_eq!(s.config().base_thickness, original);
        s.pointer_up(10);
        s.set_config(SessionConfig {
            base_thickness: 99.0,
            ..Default::default()
        });
        assert_eq!(s.config().base_thickness, 99.0);
    }

    #[test]
    fn test_to_image_matches_buffer() {
        let mut s = session();
        s.pointer_down(64.0, 64.0, 0);
        s.pointer_up(10);
        let img = s.to_image();
        assert_eq!(img.dimensions(), (128, 128));
        assert!(img.get_pixel(64, 64)[3] > 0);
    }
}
