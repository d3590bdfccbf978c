//! Rendering module
//!
//! Frames are tessellated on the CPU from a simulation snapshot, then
//! presented with a single flat-color WebGPU pipeline.

pub mod digits;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Frame, avatar_tilt, draw_frame, draw_static_background};
pub use vertex::Vertex;
