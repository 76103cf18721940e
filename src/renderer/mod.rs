//! Rendering module
//!
//! `draw` turns the world into a flat list of draw commands; `pipeline`
//! is the WebGPU boundary that consumes them.

pub mod draw;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use draw::{DrawCommand, draw_list};
pub use pipeline::{RenderState, surface_to_window, window_to_ndc};
pub use vertex::Vertex;
