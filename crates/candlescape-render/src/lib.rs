//! GPU rendering for candlescape.

pub mod camera;
pub mod gpu_context;
pub mod gpu_types;
pub mod mesh;
pub mod pipeline;
pub mod renderer;
pub mod scene;

pub use camera::{Camera, CameraSettings, CameraUniform, Movement, MovementKeys, Projection};
pub use gpu_context::GpuContext;
pub use gpu_types::{InstanceGpu, LightUniform, Vertex};
pub use pipeline::{CubePipeline, InstancedMeshPipeline, Pipeline};
pub use renderer::{DepthTarget, InstanceBuffer, MeshBuffers, SceneRenderer};
pub use scene::{build_instances, Instance, InstanceBuilder, Palette};

/// Constants for candle layout.
pub const CANDLE_SPACING: f32 = 1.2;
pub const VERTICAL_RANGE: f32 = 10.0;
pub const INSTANCES_PER_CANDLE: usize = 3; // body, upper wick, lower wick
