//! Free-hand stroke capture from pointer events.

use glam::Vec2;

use crate::api::config::InkConfig;
use super::color::InkColor;
use super::geometry::StrokeSegment;
use super::rng::Rng;

/// A completed stroke handed off by value, together with the session's
/// spawn point at the time it was finished.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedStroke {
    pub segments: Vec<StrokeSegment>,
    pub spawn_point: Option<Vec2>,
}

/// What a pointer move did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerMotion {
    /// A segment was appended to the active stroke.
    Drew(StrokeSegment),
    /// The pointer travelled without drawing (cosmetic trail only).
    Hovered { from: Vec2, to: Vec2 },
    /// First sample after a stroke ended; nothing to record.
    Idle,
}

/// Turns raw pointer events into line segments.
///
/// Holds the in-progress stroke, the ink of all finished strokes (for
/// redraw) and the session spawn point.
pub struct StrokeCapture {
    config: InkConfig,
    rng: Rng,
    drawing: bool,
    prev_point: Option<Vec2>,
    color: InkColor,
    current: Vec<StrokeSegment>,
    finished: Vec<StrokeSegment>,
    spawn_point: Option<Vec2>,
}

impl StrokeCapture {
    pub fn new(config: InkConfig, seed: u64) -> Self {
        Self {
            config,
            rng: Rng::new(seed.wrapping_add(104_729)),
            drawing: false,
            prev_point: None,
            color: InkColor::default(),
            current: Vec::new(),
            finished: Vec::new(),
            spawn_point: None,
        }
    }

    /// Begin a stroke. A stroke still active (its pointer-up was lost) is
    /// finalized first and returned.
    pub fn on_pointer_down(&mut self, point: Vec2) -> Option<FinishedStroke> {
        let previous = if self.drawing { self.on_pointer_up() } else { None };

        self.drawing = true;
        self.prev_point = Some(point);
        self.color = InkColor::random_ink(&mut self.rng);
        self.current.clear();

        if self.spawn_point.is_none() {
            let offset = Vec2::new(self.config.spawn_offset_x, self.config.spawn_offset_y);
            self.spawn_point = Some(point + offset);
            log::debug!("spawn point set at {:?}", point + offset);
        }

        previous
    }

    pub fn on_pointer_move(&mut self, point: Vec2) -> PointerMotion {
        let motion = match self.prev_point {
            Some(prev) if self.drawing => {
                let segment = StrokeSegment {
                    p1: prev,
                    p2: point,
                    width: self.config.stroke_width,
                    color: self.color,
                };
                self.current.push(segment);
                PointerMotion::Drew(segment)
            }
            Some(prev) => PointerMotion::Hovered { from: prev, to: point },
            None => PointerMotion::Idle,
        };
        self.prev_point = Some(point);
        motion
    }

    /// Finish the active stroke. Returns `None` when nothing was drawn.
    pub fn on_pointer_up(&mut self) -> Option<FinishedStroke> {
        let was_drawing = self.drawing;
        self.drawing = false;
        self.prev_point = None;

        if !was_drawing || self.current.is_empty() {
            self.current.clear();
            return None;
        }

        let segments = std::mem::take(&mut self.current);
        self.finished.extend_from_slice(&segments);
        Some(FinishedStroke {
            segments,
            spawn_point: self.spawn_point,
        })
    }

    /// Pointer capture was lost mid-stroke; same as releasing it.
    pub fn on_pointer_cancel(&mut self) -> Option<FinishedStroke> {
        self.on_pointer_up()
    }

    /// Discard all ink and forget the spawn point.
    pub fn clear(&mut self) {
        self.drawing = false;
        self.prev_point = None;
        self.current.clear();
        self.finished.clear();
        self.spawn_point = None;
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn spawn_point(&self) -> Option<Vec2> {
        self.spawn_point
    }

    /// Segments of the stroke being drawn.
    pub fn current_segments(&self) -> &[StrokeSegment] {
        &self.current
    }

    /// Segments of every finished stroke since the last clear.
    pub fn finished_segments(&self) -> &[StrokeSegment] {
        &self.finished
    }

    pub fn stroke_color(&self) -> InkColor {
        self.color
    }
}
