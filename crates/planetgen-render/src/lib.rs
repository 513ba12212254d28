//! wgpu rendering for the planet viewer: device and surface, depth buffer,
//! mesh buffers, one pipeline per primitive topology, and the orbit camera.

pub mod buffer;
pub mod camera;
pub mod depth;
pub mod gpu;
pub mod pass;
pub mod pipeline;

pub use buffer::{IndexBuffer, PlanetBuffers};
pub use camera::{OrbitCamera, OrbitCameraSettings};
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use pass::{FrameEncoder, RenderPassBuilder};
pub use pipeline::{PLANET_SHADER_SOURCE, PlanetPipelines, PlanetUniform};
