//! Conversion of drawn segments into static collider descriptors.

use glam::Vec2;

use super::color::InkColor;

/// Segments shorter than this (in pixels) never become colliders.
pub const MIN_SEGMENT_LENGTH: f32 = 5.0;

/// One drawn sub-segment of a stroke. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSegment {
    pub p1: Vec2,
    pub p2: Vec2,
    pub width: f32,
    pub color: InkColor,
}

impl StrokeSegment {
    pub fn length(&self) -> f32 {
        self.p1.distance(self.p2)
    }
}

/// Immovable obstacle derived from a stroke segment: a rectangle
/// `2 * half_length` long and `thickness` thick, rotated by `angle`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticCollider {
    pub center: Vec2,
    pub half_length: f32,
    pub thickness: f32,
    pub angle: f32,
    pub color: InkColor,
}

impl StaticCollider {
    /// Build a collider from one segment, or `None` if it is shorter than `min_length`.
    pub fn from_segment(segment: &StrokeSegment, min_length: f32) -> Option<Self> {
        let delta = segment.p2 - segment.p1;
        let length = delta.length();
        // NaN lengths fail this comparison too
        if !(length >= min_length) {
            return None;
        }
        Some(Self {
            center: (segment.p1 + segment.p2) / 2.0,
            half_length: length / 2.0,
            thickness: segment.width,
            angle: delta.y.atan2(delta.x),
            color: segment.color,
        })
    }

    /// Unit vector along the segment, from its first point to its second.
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    /// Rectangle corners in world space, counter-clockwise from the start side.
    pub fn corners(&self) -> [Vec2; 4] {
        let along = self.direction() * self.half_length;
        let across = along.perp().normalize_or_zero() * (self.thickness / 2.0);
        [
            self.center - along - across,
            self.center + along - across,
            self.center + along + across,
            self.center - along + across,
        ]
    }
}

/// Map segments 1:1 to colliders, dropping the degenerate ones.
pub fn to_static_colliders(segments: &[StrokeSegment]) -> Vec<StaticCollider> {
    to_static_colliders_with(segments, MIN_SEGMENT_LENGTH)
}

/// Same as [`to_static_colliders`] with an explicit length threshold.
pub fn to_static_colliders_with(segments: &[StrokeSegment], min_length: f32) -> Vec<StaticCollider> {
    let colliders: Vec<StaticCollider> = segments
        .iter()
        .filter_map(|s| StaticCollider::from_segment(s, min_length))
        .collect();
    let dropped = segments.len() - colliders.len();
    if dropped > 0 {
        log::trace!("dropped {} degenerate segment(s)", dropped);
    }
    colliders
}
