//! Triangle batching for 2D primitives
//!
//! [`VertexBatch`] is the [`Canvas`] the GPU path draws into: every
//! rectangle becomes two triangles in surface pixel space.

use glam::Vec2;

use super::canvas::{Canvas, Color, Palette, Rect, Sprite};
use super::vertex::Vertex;

/// Push the two triangles covering `rect`
pub fn quad(vertices: &mut Vec<Vertex>, rect: Rect, color: Color) {
    if rect.size.x <= 0.0 || rect.size.y <= 0.0 {
        return;
    }
    let min = rect.pos;
    let max = rect.max();

    vertices.push(Vertex::new(min.x, min.y, color));
    vertices.push(Vertex::new(max.x, min.y, color));
    vertices.push(Vertex::new(min.x, max.y, color));

    vertices.push(Vertex::new(max.x, min.y, color));
    vertices.push(Vertex::new(max.x, max.y, color));
    vertices.push(Vertex::new(min.x, max.y, color));
}

/// Blocky runner silhouette stretched to `rect`
fn runner_silhouette(vertices: &mut Vec<Vertex>, rect: Rect, ducked: bool, color: Color) {
    let Rect { pos, size } = rect;
    let at = |fx: f32, fy: f32, fw: f32, fh: f32| {
        Rect::new(pos.x + size.x * fx, pos.y + size.y * fy, size.x * fw, size.y * fh)
    };

    if ducked {
        // Long low body with the head forward
        quad(vertices, at(0.0, 0.25, 0.75, 0.5), color);
        quad(vertices, at(0.6, 0.0, 0.4, 0.45), color);
        quad(vertices, at(0.1, 0.75, 0.15, 0.25), color);
        quad(vertices, at(0.45, 0.75, 0.15, 0.25), color);
    } else {
        quad(vertices, at(0.5, 0.0, 0.5, 0.3), color);
        quad(vertices, at(0.1, 0.3, 0.6, 0.45), color);
        quad(vertices, at(0.0, 0.35, 0.15, 0.25), color);
        quad(vertices, at(0.2, 0.75, 0.15, 0.25), color);
        quad(vertices, at(0.5, 0.75, 0.15, 0.25), color);
    }
}

/// Collects draw calls as colored triangles for one frame
#[derive(Debug, Clone)]
pub struct VertexBatch {
    size: Vec2,
    clear_color: Color,
    vertices: Vec<Vertex>,
}

impl VertexBatch {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            clear_color: Palette::day().background,
            vertices: Vec::with_capacity(256),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
}

impl Canvas for VertexBatch {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.vertices.clear();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        quad(&mut self.vertices, rect, color);
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect, tint: Color) {
        match sprite {
            Sprite::Runner { ducked } => runner_silhouette(&mut self.vertices, rect, ducked, tint),
        }
    }
}
