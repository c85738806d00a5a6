//! WebGPU rendering module
//!
//! `scene` builds a triangle list from the game state; `pipeline` draws it.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
