//! Lyon-based tessellation of ink, collider outlines, the spawn flag and
//! cosmetic particles into one flat triangle list.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor, LineCap,
    LineJoin, StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor,
    VertexBuffers,
};

use crate::ink::color::InkColor;
use crate::ink::geometry::{StaticCollider, StrokeSegment};

const TOLERANCE: f32 = 0.5;

const FLAG_HEIGHT: f32 = 30.0;
const FLAG_WIDTH: f32 = 20.0;
const FLAG_POLE_WIDTH: f32 = 2.0;

/// Per-vertex data read by the page. 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct InkVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl InkVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24

    fn at(x: f32, y: f32, color: InkColor) -> Self {
        Self {
            x,
            y,
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        }
    }
}

struct FillVertexCtor {
    color: InkColor,
}

impl FillVertexConstructor<InkVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> InkVertex {
        InkVertex::at(vertex.position().x, vertex.position().y, self.color)
    }
}

struct StrokeVertexCtor {
    color: InkColor,
}

impl StrokeVertexConstructor<InkVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> InkVertex {
        InkVertex::at(vertex.position().x, vertex.position().y, self.color)
    }
}

/// Tessellators plus the output triangle list.
/// Cleared and repopulated once per tick.
pub struct InkCanvas {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<InkVertex, u32>,
    buffer: Vec<InkVertex>,
}

impl InkCanvas {
    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(16384),
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len()
    }

    pub fn vertices(&self) -> &[InkVertex] {
        &self.buffer
    }

    /// Raw pointer to the flat float buffer for the page to copy from.
    pub fn buffer_ptr(&self) -> *const f32 {
        bytemuck::cast_slice::<InkVertex, f32>(&self.buffer).as_ptr()
    }

    /// Expand indexed geometry into the triangle list.
    fn flush_geometry(&mut self) {
        let vertices = &self.geometry.vertices;
        self.buffer
            .extend(self.geometry.indices.iter().map(|&i| vertices[i as usize]));
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    /// Fill a closed polygon.
    pub fn fill_polygon(&mut self, points: &[Vec2], color: InkColor) {
        if points.len() < 3 || !all_finite(points) {
            return;
        }
        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.close();
        let path = builder.build();
        self.fill_path(&path, color);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: InkColor) {
        if radius.is_nan() || radius <= 0.0 || !center.is_finite() {
            return;
        }
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, lyon::path::Winding::Positive);
        let path = builder.build();
        self.fill_path(&path, color);
    }

    fn fill_path(&mut self, path: &Path, color: InkColor) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(TOLERANCE),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );
        match result {
            Ok(()) => self.flush_geometry(),
            Err(e) => {
                log::trace!("fill tessellation failed: {:?}", e);
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }

    /// Stroke an open polyline with round caps and joins, like a brush.
    pub fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: InkColor) {
        if points.len() < 2 || !all_finite(points) || width.is_nan() || width <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(false);
        let path = builder.build();

        let options = StrokeOptions::tolerance(TOLERANCE)
            .with_line_width(width)
            .with_line_cap(LineCap::Round)
            .with_line_join(LineJoin::Round);
        let result = self.stroke_tess.tessellate_path(
            &path,
            &options,
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );
        match result {
            Ok(()) => self.flush_geometry(),
            Err(e) => {
                log::trace!("stroke tessellation failed: {:?}", e);
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }

    /// Draw ink. Consecutive segments that join end-to-start with the same
    /// color and width are drawn as one polyline so joints stay smooth.
    pub fn draw_segments(&mut self, segments: &[StrokeSegment]) {
        let mut run: Vec<Vec2> = Vec::new();
        let mut style: Option<(InkColor, f32)> = None;

        for segment in segments {
            let continues = style == Some((segment.color, segment.width))
                && run.last() == Some(&segment.p1);
            if !continues {
                if let Some((color, width)) = style {
                    self.stroke_polyline(&run, width, color);
                }
                run.clear();
                run.push(segment.p1);
                style = Some((segment.color, segment.width));
            }
            run.push(segment.p2);
        }
        if let Some((color, width)) = style {
            self.stroke_polyline(&run, width, color);
        }
    }

    /// Draw each collider as its rotated rectangle, faded so ink stays on top.
    pub fn draw_colliders<'a>(&mut self, colliders: impl IntoIterator<Item = &'a StaticCollider>) {
        for collider in colliders {
            self.fill_polygon(&collider.corners(), collider.color.with_alpha(0.25));
        }
    }

    /// Spawn marker: a pole rising from `at` with a pennant at its top.
    pub fn draw_flag(&mut self, at: Vec2) {
        let top = at - Vec2::new(0.0, FLAG_HEIGHT);
        self.stroke_polyline(&[at, top], FLAG_POLE_WIDTH, InkColor::ACCENT);
        self.fill_polygon(
            &[
                top,
                top + Vec2::new(FLAG_WIDTH, FLAG_WIDTH / 2.0),
                top + Vec2::new(0.0, FLAG_WIDTH),
            ],
            InkColor::ACCENT,
        );
    }
}

impl Default for InkCanvas {
    fn default() -> Self {
        Self::new()
    }
}

fn all_finite(points: &[Vec2]) -> bool {
    points.iter().all(|p| p.is_finite())
}
