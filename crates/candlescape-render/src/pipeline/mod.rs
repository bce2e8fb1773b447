//! Rendering pipelines.

pub mod cube;
pub mod traits;

pub use cube::{CubePipeline, DEPTH_FORMAT};
pub use traits::{InstancedMeshPipeline, Pipeline};
