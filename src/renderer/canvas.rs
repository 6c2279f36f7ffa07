//! Drawing surface abstraction
//!
//! The scene never touches pixels; it issues rectangle and sprite draws to
//! whatever implements [`Canvas`].

use glam::Vec2;

/// RGBA, components in 0..=1
pub type Color = [f32; 4];

/// Axis-aligned rectangle in surface pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }
}

/// Image assets the scene can blit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    /// The runner; `ducked` selects the squashed pose
    Runner { ducked: bool },
}

/// 2D drawing primitives provided by the host
pub trait Canvas {
    /// Logical surface size in pixels
    fn size(&self) -> Vec2;
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Blit `sprite` stretched to `rect`. Backends without textures fill
    /// the silhouette with `tint`.
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect, tint: Color);
}

const fn rgb(hex: u32) -> Color {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Colors for one theme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub ground: Color,
    pub ground_texture: Color,
    pub obstacle: Color,
    pub runner: Color,
}

impl Palette {
    pub const fn day() -> Self {
        Self {
            background: rgb(0xf7f7f7),
            ground: rgb(0x535353),
            ground_texture: rgb(0xcccccc),
            obstacle: rgb(0x535353),
            runner: rgb(0x535353),
        }
    }

    pub const fn night() -> Self {
        Self {
            background: rgb(0x202124),
            ground: rgb(0x9aa0a6),
            ground_texture: rgb(0x3c4043),
            obstacle: rgb(0x9aa0a6),
            runner: rgb(0xe8eaed),
        }
    }

    pub const fn for_mode(dark_mode: bool) -> Self {
        if dark_mode { Self::night() } else { Self::day() }
    }
}
