//! Rendering
//!
//! The scene issues draw commands to a [`Canvas`]; on the web those are
//! batched into triangles and drawn with WebGPU.

pub mod canvas;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use canvas::{Canvas, Color, Palette, Rect, Sprite};
pub use pipeline::RenderState;
pub use scene::draw_scene;
pub use shapes::VertexBatch;
